//! Repository implementations, one per entity.

pub mod chapter;
pub mod job;
pub mod question;
pub mod quiz;
pub mod score;
pub mod subject;
pub mod user;

pub use chapter::ChapterRepository;
pub use job::JobRepository;
pub use question::QuestionRepository;
pub use quiz::QuizRepository;
pub use score::ScoreRepository;
pub use subject::SubjectRepository;
pub use user::UserRepository;
