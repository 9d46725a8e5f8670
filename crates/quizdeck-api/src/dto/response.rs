//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quizdeck_entity::question::Question;
use quizdeck_entity::quiz::Quiz;
use quizdeck_entity::score::Score;
use quizdeck_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Full display name.
    pub full_name: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Login/signup response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

/// Question as shown to a user taking an exam: no correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPublic {
    /// Question ID.
    pub id: Uuid,
    /// Quiz this question belongs to.
    pub quiz_id: Uuid,
    /// The question text.
    pub statement: String,
    /// Answer options.
    pub options: serde_json::Value,
}

impl From<&Question> for QuestionPublic {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            quiz_id: question.quiz_id,
            statement: question.statement.clone(),
            options: question.options.clone(),
        }
    }
}

/// Exam paper: a quiz plus its questions without answers.
#[derive(Debug, Clone, Serialize)]
pub struct ExamResponse {
    /// The quiz being taken.
    pub quiz: Quiz,
    /// Questions without correct answers.
    pub questions: Vec<QuestionPublic>,
}

/// Graded exam result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResultResponse {
    /// Persisted score ID.
    pub score_id: Uuid,
    /// Number of questions on the quiz.
    pub total_questions: i32,
    /// Number answered correctly.
    pub correct_answers: i32,
    /// Score percentage, two decimal places.
    pub percentage: f64,
}

/// Per-user dashboard summary.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    /// Attempts taken all time.
    pub total_quizzes: i64,
    /// All-time average percentage.
    pub average_score: f64,
    /// Most recent attempts, newest first.
    pub recent_scores: Vec<Score>,
}

/// Response for an accepted export request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportAcceptedResponse {
    /// ID of the queued export job, used to poll status.
    pub job_id: Uuid,
}

/// Export job status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportStatusResponse {
    /// Export job ID.
    pub job_id: Uuid,
    /// Current status (pending/running/completed/failed/cancelled).
    pub status: String,
    /// Failure reason when the job failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Database connectivity.
    pub database: String,
}
