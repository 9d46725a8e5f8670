//! Subject entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A top-level study subject containing chapters.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: Uuid,
    /// Subject name, unique across the platform.
    pub name: String,
    /// Short description.
    pub about: String,
    /// When the subject was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create or update a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectData {
    /// Subject name.
    pub name: String,
    /// Short description.
    pub about: String,
}
