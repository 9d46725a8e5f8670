//! Question repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use quizdeck_core::error::{AppError, ErrorKind};
use quizdeck_core::result::AppResult;
use quizdeck_entity::question::{Question, QuestionData};

/// Repository for question CRUD operations.
#[derive(Debug, Clone)]
pub struct QuestionRepository {
    pool: PgPool,
}

impl QuestionRepository {
    /// Create a new question repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a question by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Question>> {
        sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find question", e))
    }

    /// List questions belonging to a quiz in creation order.
    pub async fn find_by_quiz(&self, quiz_id: Uuid) -> AppResult<Vec<Question>> {
        sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE quiz_id = $1 ORDER BY created_at",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list questions", e))
    }

    /// Create a new question.
    pub async fn create(&self, data: &QuestionData) -> AppResult<Question> {
        let options = serde_json::to_value(&data.options)
            .map_err(|e| AppError::with_source(ErrorKind::Serialization, "Invalid options", e))?;

        sqlx::query_as::<_, Question>(
            "INSERT INTO questions (quiz_id, statement, options, correct_option) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.quiz_id)
        .bind(&data.statement)
        .bind(options)
        .bind(data.correct_option)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create question", e))
    }

    /// Update an existing question. Returns the updated row if it exists.
    pub async fn update(&self, id: Uuid, data: &QuestionData) -> AppResult<Option<Question>> {
        let options = serde_json::to_value(&data.options)
            .map_err(|e| AppError::with_source(ErrorKind::Serialization, "Invalid options", e))?;

        sqlx::query_as::<_, Question>(
            "UPDATE questions SET statement = $2, options = $3, correct_option = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.statement)
        .bind(options)
        .bind(data.correct_option)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update question", e))
    }

    /// Delete a question. Returns true if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete question", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
