//! Question entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A multiple-choice question belonging to a quiz.
///
/// `options` is a JSON array of answer strings; `correct_option` is the
/// zero-based index into that array.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    /// Unique question identifier.
    pub id: Uuid,
    /// Owning quiz.
    pub quiz_id: Uuid,
    /// The question text.
    pub statement: String,
    /// Answer options as a JSON array of strings.
    pub options: serde_json::Value,
    /// Zero-based index of the correct option.
    pub correct_option: i32,
    /// When the question was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create or update a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionData {
    /// Owning quiz.
    pub quiz_id: Uuid,
    /// The question text.
    pub statement: String,
    /// Answer options.
    pub options: Vec<String>,
    /// Zero-based index of the correct option.
    pub correct_option: i32,
}
