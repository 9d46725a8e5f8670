//! Housekeeping job handlers: expired export files and old job history.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing;

use quizdeck_core::config::ExportConfig;
use quizdeck_database::repositories::job::JobRepository;
use quizdeck_entity::job::model::Job;

use crate::executor::{JobExecutionError, JobHandler};

/// Days of terminal job history kept before deletion.
const JOB_HISTORY_RETENTION_DAYS: i64 = 7;

/// Removes export files older than the configured retention period.
#[derive(Debug)]
pub struct ExportCleanupHandler {
    config: ExportConfig,
}

impl ExportCleanupHandler {
    /// Create a new export cleanup handler
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    async fn cleanup_exports(&self) -> Result<Value, JobExecutionError> {
        let cutoff = Utc::now() - Duration::hours(self.config.retention_hours as i64);
        let mut removed = 0u64;

        let dir = std::path::Path::new(&self.config.directory);
        if !dir.exists() {
            return Ok(serde_json::json!({
                "task": "export_cleanup",
                "files_removed": 0,
            }));
        }

        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            JobExecutionError::Transient(format!("Failed to read export directory: {e}"))
        })?;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            let modified_at: DateTime<Utc> = modified.into();
            if modified_at < cutoff {
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    tracing::warn!("Failed to remove expired export {:?}: {}", path, e);
                } else {
                    removed += 1;
                }
            }
        }

        tracing::info!("Removed {} expired export files", removed);

        Ok(serde_json::json!({
            "task": "export_cleanup",
            "files_removed": removed,
        }))
    }
}

#[async_trait]
impl JobHandler for ExportCleanupHandler {
    fn job_type(&self) -> &str {
        "export_cleanup"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let result = self.cleanup_exports().await?;
        Ok(Some(result))
    }
}

/// Deletes terminal jobs older than the retention window.
#[derive(Debug)]
pub struct JobHistoryCleanupHandler {
    job_repo: Arc<JobRepository>,
}

impl JobHistoryCleanupHandler {
    /// Create a new job history cleanup handler
    pub fn new(job_repo: Arc<JobRepository>) -> Self {
        Self { job_repo }
    }
}

#[async_trait]
impl JobHandler for JobHistoryCleanupHandler {
    fn job_type(&self) -> &str {
        "job_history_cleanup"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let before = Utc::now() - Duration::days(JOB_HISTORY_RETENTION_DAYS);
        let count = self
            .job_repo
            .cleanup_old(before)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Job history cleanup failed: {e}")))?;

        tracing::info!("Removed {} old job records", count);

        Ok(Some(serde_json::json!({
            "task": "job_history_cleanup",
            "jobs_removed": count,
        })))
    }
}
