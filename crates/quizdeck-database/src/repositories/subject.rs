//! Subject repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use quizdeck_core::error::{AppError, ErrorKind};
use quizdeck_core::result::AppResult;
use quizdeck_entity::subject::{Subject, SubjectData};

/// Repository for subject CRUD operations.
#[derive(Debug, Clone)]
pub struct SubjectRepository {
    pool: PgPool,
}

impl SubjectRepository {
    /// Create a new subject repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a subject by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Subject>> {
        sqlx::query_as::<_, Subject>("SELECT * FROM subjects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find subject", e))
    }

    /// Find a subject by exact name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Subject>> {
        sqlx::query_as::<_, Subject>("SELECT * FROM subjects WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find subject by name", e)
            })
    }

    /// List all subjects, optionally filtered by a name fragment.
    pub async fn find_all(&self, search: Option<&str>) -> AppResult<Vec<Subject>> {
        match search {
            Some(fragment) => sqlx::query_as::<_, Subject>(
                "SELECT * FROM subjects WHERE name ILIKE $1 ORDER BY name",
            )
            .bind(format!("%{fragment}%"))
            .fetch_all(&self.pool)
            .await,
            None => {
                sqlx::query_as::<_, Subject>("SELECT * FROM subjects ORDER BY name")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list subjects", e))
    }

    /// Create a new subject.
    pub async fn create(&self, data: &SubjectData) -> AppResult<Subject> {
        sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (name, about) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.about)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create subject", e))
    }

    /// Update an existing subject. Returns the updated row if it exists.
    pub async fn update(&self, id: Uuid, data: &SubjectData) -> AppResult<Option<Subject>> {
        sqlx::query_as::<_, Subject>(
            "UPDATE subjects SET name = $2, about = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.about)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update subject", e))
    }

    /// Delete a subject. Returns true if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete subject", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
