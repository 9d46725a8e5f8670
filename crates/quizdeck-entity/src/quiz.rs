//! Quiz entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A quiz attached to a chapter.
///
/// `created_at` drives the daily-reminder window query: quizzes created
/// inside the last reminder window trigger an email to every non-admin
/// user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quiz {
    /// Unique quiz identifier.
    pub id: Uuid,
    /// Owning chapter.
    pub chapter_id: Uuid,
    /// Quiz title.
    pub title: String,
    /// Time allowed for an attempt, in minutes.
    pub duration_minutes: i32,
    /// Optional remarks shown to the user before starting.
    pub remarks: Option<String>,
    /// When the quiz was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create or update a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizData {
    /// Owning chapter.
    pub chapter_id: Uuid,
    /// Quiz title.
    pub title: String,
    /// Time allowed for an attempt, in minutes.
    pub duration_minutes: i32,
    /// Optional remarks.
    pub remarks: Option<String>,
}
