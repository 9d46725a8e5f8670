//! Quiz repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use quizdeck_core::error::{AppError, ErrorKind};
use quizdeck_core::result::AppResult;
use quizdeck_entity::quiz::{Quiz, QuizData};

/// Repository for quiz CRUD and window queries.
#[derive(Debug, Clone)]
pub struct QuizRepository {
    pool: PgPool,
}

impl QuizRepository {
    /// Create a new quiz repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a quiz by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Quiz>> {
        sqlx::query_as::<_, Quiz>("SELECT * FROM quizzes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find quiz", e))
    }

    /// List all quizzes, optionally filtered by a title fragment.
    pub async fn find_all(&self, search: Option<&str>) -> AppResult<Vec<Quiz>> {
        match search {
            Some(fragment) => sqlx::query_as::<_, Quiz>(
                "SELECT * FROM quizzes WHERE title ILIKE $1 ORDER BY created_at DESC",
            )
            .bind(format!("%{fragment}%"))
            .fetch_all(&self.pool)
            .await,
            None => {
                sqlx::query_as::<_, Quiz>("SELECT * FROM quizzes ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list quizzes", e))
    }

    /// List quizzes belonging to a chapter.
    pub async fn find_by_chapter(&self, chapter_id: Uuid) -> AppResult<Vec<Quiz>> {
        sqlx::query_as::<_, Quiz>(
            "SELECT * FROM quizzes WHERE chapter_id = $1 ORDER BY created_at DESC",
        )
        .bind(chapter_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list quizzes", e))
    }

    /// List quizzes created inside the half-open window `[start, end)`.
    ///
    /// This is the daily-reminder query: a non-empty result means new
    /// quizzes appeared since the previous reminder fired.
    pub async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Quiz>> {
        sqlx::query_as::<_, Quiz>(
            "SELECT * FROM quizzes WHERE created_at >= $1 AND created_at < $2 \
             ORDER BY created_at",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query quizzes in window", e)
        })
    }

    /// Create a new quiz.
    pub async fn create(&self, data: &QuizData) -> AppResult<Quiz> {
        sqlx::query_as::<_, Quiz>(
            "INSERT INTO quizzes (chapter_id, title, duration_minutes, remarks) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.chapter_id)
        .bind(&data.title)
        .bind(data.duration_minutes)
        .bind(&data.remarks)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create quiz", e))
    }

    /// Update an existing quiz. Returns the updated row if it exists.
    pub async fn update(&self, id: Uuid, data: &QuizData) -> AppResult<Option<Quiz>> {
        sqlx::query_as::<_, Quiz>(
            "UPDATE quizzes SET chapter_id = $2, title = $3, duration_minutes = $4, \
             remarks = $5 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.chapter_id)
        .bind(&data.title)
        .bind(data.duration_minutes)
        .bind(&data.remarks)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update quiz", e))
    }

    /// Delete a quiz. Returns true if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete quiz", e))?;
        Ok(result.rows_affected() > 0)
    }
}
