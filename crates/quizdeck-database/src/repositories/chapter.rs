//! Chapter repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use quizdeck_core::error::{AppError, ErrorKind};
use quizdeck_core::result::AppResult;
use quizdeck_entity::chapter::{Chapter, ChapterData};

/// Repository for chapter CRUD operations.
#[derive(Debug, Clone)]
pub struct ChapterRepository {
    pool: PgPool,
}

impl ChapterRepository {
    /// Create a new chapter repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a chapter by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Chapter>> {
        sqlx::query_as::<_, Chapter>("SELECT * FROM chapters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find chapter", e))
    }

    /// List chapters belonging to a subject.
    pub async fn find_by_subject(&self, subject_id: Uuid) -> AppResult<Vec<Chapter>> {
        sqlx::query_as::<_, Chapter>(
            "SELECT * FROM chapters WHERE subject_id = $1 ORDER BY name",
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list chapters", e))
    }

    /// List all chapters.
    pub async fn find_all(&self) -> AppResult<Vec<Chapter>> {
        sqlx::query_as::<_, Chapter>("SELECT * FROM chapters ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list chapters", e))
    }

    /// Create a new chapter.
    pub async fn create(&self, data: &ChapterData) -> AppResult<Chapter> {
        sqlx::query_as::<_, Chapter>(
            "INSERT INTO chapters (subject_id, name, about) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.subject_id)
        .bind(&data.name)
        .bind(&data.about)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create chapter", e))
    }

    /// Update an existing chapter. Returns the updated row if it exists.
    pub async fn update(&self, id: Uuid, data: &ChapterData) -> AppResult<Option<Chapter>> {
        sqlx::query_as::<_, Chapter>(
            "UPDATE chapters SET subject_id = $2, name = $3, about = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.subject_id)
        .bind(&data.name)
        .bind(&data.about)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update chapter", e))
    }

    /// Delete a chapter. Returns true if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM chapters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete chapter", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
