//! CSV export job: write the per-user activity summary to a file the
//! admin can download later.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing;
use uuid::Uuid;

use quizdeck_core::config::ExportConfig;
use quizdeck_database::repositories::score::ScoreRepository;
use quizdeck_entity::job::model::Job;
use quizdeck_entity::report::ExportRow;

use crate::executor::{JobExecutionError, JobHandler};

/// Serializes export rows to CSV bytes.
///
/// The header matches the format admins already import into their
/// spreadsheets: `Name,Email,total_quizzes,average_score`.
pub fn write_csv(rows: &[ExportRow]) -> Result<Vec<u8>, JobExecutionError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Name", "Email", "total_quizzes", "average_score"])
        .map_err(|e| JobExecutionError::Permanent(format!("Failed to write CSV header: {e}")))?;

    for row in rows {
        writer
            .write_record([
                row.name.as_str(),
                row.email.as_str(),
                &row.total_quizzes.to_string(),
                &format!("{:.2}", row.average_score),
            ])
            .map_err(|e| JobExecutionError::Permanent(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| JobExecutionError::Permanent(format!("Failed to finish CSV: {e}")))
}

/// File name for one export run. Keyed by job ID so concurrent exports
/// never clobber each other.
pub fn export_filename(job_id: Uuid) -> String {
    format!("users-{job_id}.csv")
}

/// Full path of the export file for a job.
pub fn export_path(directory: &str, job_id: Uuid) -> PathBuf {
    Path::new(directory).join(export_filename(job_id))
}

/// Handles the admin CSV export job.
#[derive(Debug)]
pub struct ExportJobHandler {
    score_repo: Arc<ScoreRepository>,
    config: ExportConfig,
}

impl ExportJobHandler {
    /// Create a new export job handler
    pub fn new(score_repo: Arc<ScoreRepository>, config: ExportConfig) -> Self {
        Self { score_repo, config }
    }
}

#[async_trait]
impl JobHandler for ExportJobHandler {
    fn job_type(&self) -> &str {
        "csv_export"
    }

    async fn execute(&self, job: &Job) -> Result<Option<Value>, JobExecutionError> {
        tracing::info!("Running CSV export for job {}", job.id);

        // The HTTP endpoint pre-aggregates rows and carries them in the
        // payload; triggers without rows aggregate here.
        let rows: Vec<ExportRow> = match job.payload.get("rows") {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                JobExecutionError::Permanent(format!("Malformed export rows in payload: {e}"))
            })?,
            None => self.score_repo.export_rows().await.map_err(|e| {
                JobExecutionError::Transient(format!("Failed to aggregate rows: {e}"))
            })?,
        };

        let bytes = write_csv(&rows)?;

        tokio::fs::create_dir_all(&self.config.directory)
            .await
            .map_err(|e| {
                JobExecutionError::Transient(format!("Failed to create export directory: {e}"))
            })?;

        let path = export_path(&self.config.directory, job.id);
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            JobExecutionError::Transient(format!("Failed to write export file: {e}"))
        })?;

        tracing::info!("CSV export written: {} ({} rows)", path.display(), rows.len());

        Ok(Some(serde_json::json!({
            "task": "csv_export",
            "path": path.to_string_lossy(),
            "rows": rows.len(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<ExportRow> {
        vec![
            ExportRow {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                total_quizzes: 4,
                average_score: 87.5,
            },
            ExportRow {
                name: "Grace Hopper".to_string(),
                email: "grace@example.com".to_string(),
                total_quizzes: 0,
                average_score: 0.0,
            },
        ]
    }

    #[test]
    fn test_csv_header_and_rows() {
        let bytes = write_csv(&sample_rows()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,Email,total_quizzes,average_score"
        );
        assert_eq!(lines.next().unwrap(), "Ada Lovelace,ada@example.com,4,87.50");
        assert_eq!(lines.next().unwrap(), "Grace Hopper,grace@example.com,0,0.00");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let bytes = write_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), "Name,Email,total_quizzes,average_score");
    }

    #[test]
    fn test_export_paths_are_unique_per_job() {
        let a = export_path("data/exports", Uuid::new_v4());
        let b = export_path("data/exports", Uuid::new_v4());
        assert_ne!(a, b);
        assert!(a.to_string_lossy().ends_with(".csv"));
    }
}
