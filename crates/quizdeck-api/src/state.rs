//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use quizdeck_auth::jwt::decoder::JwtDecoder;
use quizdeck_auth::jwt::encoder::JwtEncoder;
use quizdeck_auth::password::hasher::PasswordHasher;
use quizdeck_auth::password::validator::PasswordValidator;
use quizdeck_core::config::AppConfig;
use quizdeck_worker::queue::JobQueue;

use quizdeck_database::repositories::chapter::ChapterRepository;
use quizdeck_database::repositories::job::JobRepository;
use quizdeck_database::repositories::question::QuestionRepository;
use quizdeck_database::repositories::quiz::QuizRepository;
use quizdeck_database::repositories::score::ScoreRepository;
use quizdeck_database::repositories::subject::SubjectRepository;
use quizdeck_database::repositories::user::UserRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Password policy validator
    pub password_validator: Arc<PasswordValidator>,

    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Subject repository
    pub subject_repo: Arc<SubjectRepository>,
    /// Chapter repository
    pub chapter_repo: Arc<ChapterRepository>,
    /// Quiz repository
    pub quiz_repo: Arc<QuizRepository>,
    /// Question repository
    pub question_repo: Arc<QuestionRepository>,
    /// Score repository
    pub score_repo: Arc<ScoreRepository>,
    /// Job repository
    pub job_repo: Arc<JobRepository>,

    /// Job queue for enqueuing background work
    pub job_queue: Arc<JobQueue>,
}
