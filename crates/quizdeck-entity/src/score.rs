//! Score entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A graded quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Score {
    /// Unique score identifier.
    pub id: Uuid,
    /// User who took the quiz.
    pub user_id: Uuid,
    /// Quiz that was attempted.
    pub quiz_id: Uuid,
    /// Number of questions in the quiz at grading time.
    pub total_questions: i32,
    /// Number of correctly answered questions.
    pub correct_answers: i32,
    /// Percentage score, 0.0 to 100.0.
    pub percentage: f64,
    /// When the attempt was graded.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a graded attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScore {
    /// User who took the quiz.
    pub user_id: Uuid,
    /// Quiz that was attempted.
    pub quiz_id: Uuid,
    /// Number of questions in the quiz.
    pub total_questions: i32,
    /// Number of correct answers.
    pub correct_answers: i32,
    /// Percentage score.
    pub percentage: f64,
}
