//! Score repository implementation.
//!
//! Besides attempt CRUD this repository carries the aggregate queries the
//! report and export pipelines run: per-user counts/averages overall and
//! within a date window. Aggregates are read-only over scores.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use quizdeck_core::error::{AppError, ErrorKind};
use quizdeck_core::result::AppResult;
use quizdeck_entity::report::ExportRow;
use quizdeck_entity::score::{CreateScore, Score};

/// Repository for score CRUD and aggregate queries.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    pool: PgPool,
}

/// Per-user count + average pair returned by window aggregates.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct UserStats {
    /// Number of graded attempts.
    pub total_quizzes: i64,
    /// Mean percentage. `None` when there are no attempts.
    pub average_score: Option<f64>,
}

/// One user's in-window average, used for ranking.
#[derive(Debug, Clone, FromRow)]
pub struct UserAverage {
    /// The user.
    pub user_id: Uuid,
    /// Mean percentage of that user's in-window attempts.
    pub average_score: f64,
}

impl ScoreRepository {
    /// Create a new score repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a score by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Score>> {
        sqlx::query_as::<_, Score>("SELECT * FROM scores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find score", e))
    }

    /// List a user's scores, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Score>> {
        sqlx::query_as::<_, Score>(
            "SELECT * FROM scores WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list scores", e))
    }

    /// Record a graded attempt.
    pub async fn create(&self, data: &CreateScore) -> AppResult<Score> {
        sqlx::query_as::<_, Score>(
            "INSERT INTO scores (user_id, quiz_id, total_questions, correct_answers, percentage) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.quiz_id)
        .bind(data.total_questions)
        .bind(data.correct_answers)
        .bind(data.percentage)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create score", e))
    }

    /// All-time count and average for one user.
    pub async fn stats_for_user(&self, user_id: Uuid) -> AppResult<UserStats> {
        sqlx::query_as::<_, UserStats>(
            "SELECT COUNT(*) AS total_quizzes, AVG(percentage) AS average_score \
             FROM scores WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to compute user stats", e))
    }

    /// A user's score percentages for quizzes created inside `[start, end)`.
    pub async fn percentages_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<f64>> {
        sqlx::query_scalar::<_, f64>(
            "SELECT s.percentage FROM scores s \
             JOIN quizzes q ON q.id = s.quiz_id \
             WHERE s.user_id = $1 AND q.created_at >= $2 AND q.created_at < $3 \
             ORDER BY s.created_at",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query scores in range", e)
        })
    }

    /// Every user's in-window average percentage, for ranking.
    ///
    /// Only users with at least one in-window attempt appear.
    pub async fn user_averages_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<UserAverage>> {
        sqlx::query_as::<_, UserAverage>(
            "SELECT s.user_id, AVG(s.percentage) AS average_score FROM scores s \
             JOIN quizzes q ON q.id = s.quiz_id \
             WHERE q.created_at >= $1 AND q.created_at < $2 \
             GROUP BY s.user_id",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute user averages", e)
        })
    }

    /// Aggregate rows for the admin CSV export: one row per non-admin user
    /// with their all-time attempt count and average percentage.
    pub async fn export_rows(&self) -> AppResult<Vec<ExportRow>> {
        let rows = sqlx::query_as::<_, ExportRowRecord>(
            "SELECT u.full_name AS name, u.email, \
             COUNT(s.id) AS total_quizzes, AVG(s.percentage) AS average_score \
             FROM users u \
             LEFT JOIN scores s ON s.user_id = u.id \
             WHERE u.role = 'user' \
             GROUP BY u.id, u.full_name, u.email \
             ORDER BY u.full_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute export rows", e)
        })?;

        Ok(rows.into_iter().map(ExportRowRecord::into_row).collect())
    }
}

/// Raw export row with a nullable average (no attempts yet).
#[derive(Debug, FromRow)]
struct ExportRowRecord {
    name: String,
    email: String,
    total_quizzes: i64,
    average_score: Option<f64>,
}

impl ExportRowRecord {
    fn into_row(self) -> ExportRow {
        ExportRow {
            name: self.name,
            email: self.email,
            total_quizzes: self.total_quizzes,
            // No attempts means a 0.0 average, never a division by zero.
            average_score: self
                .average_score
                .map(|avg| (avg * 100.0).round() / 100.0)
                .unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_row_defaults_to_zero_average() {
        let record = ExportRowRecord {
            name: "A".into(),
            email: "a@x.com".into(),
            total_quizzes: 0,
            average_score: None,
        };
        let row = record.into_row();
        assert_eq!(row.average_score, 0.0);
        assert_eq!(row.total_quizzes, 0);
    }

    #[test]
    fn test_export_row_rounds_to_two_decimals() {
        let record = ExportRowRecord {
            name: "B".into(),
            email: "b@x.com".into(),
            total_quizzes: 3,
            average_score: Some(75.5555),
        };
        assert_eq!(record.into_row().average_score, 75.56);
    }
}
