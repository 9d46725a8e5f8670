//! Chapter entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A chapter within a subject; quizzes hang off chapters.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chapter {
    /// Unique chapter identifier.
    pub id: Uuid,
    /// Owning subject.
    pub subject_id: Uuid,
    /// Chapter name.
    pub name: String,
    /// Short description.
    pub about: String,
    /// When the chapter was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create or update a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterData {
    /// Owning subject.
    pub subject_id: Uuid,
    /// Chapter name.
    pub name: String,
    /// Short description.
    pub about: String,
}
