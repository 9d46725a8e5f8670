//! Job queue abstraction for enqueuing and dequeuing background jobs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing;
use uuid::Uuid;

use quizdeck_core::error::AppError;
use quizdeck_database::repositories::job::JobRepository;
use quizdeck_entity::job::model::{CreateJob, Job};
use quizdeck_entity::job::status::{JobPriority, JobStatus};

/// Parameters for creating a new job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreateParams {
    /// Type of job (e.g., "daily_reminder", "csv_export")
    pub job_type: String,
    /// Queue name (e.g., "default", "maintenance")
    pub queue: String,
    /// Priority level
    pub priority: JobPriority,
    /// Job payload as JSON
    pub payload: serde_json::Value,
    /// Maximum retry attempts
    pub max_attempts: i32,
    /// Optional scheduled time (run after this time)
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Optional user who created the job
    pub created_by: Option<Uuid>,
}

/// Job queue for enqueuing and dequeuing work
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Job repository for database persistence
    repo: Arc<JobRepository>,
    /// Worker identifier for claiming jobs
    worker_id: String,
}

impl JobQueue {
    /// Create a new job queue
    pub fn new(repo: Arc<JobRepository>, worker_id: String) -> Self {
        Self { repo, worker_id }
    }

    /// Enqueue a new job
    pub async fn enqueue(&self, params: JobCreateParams) -> Result<Job, AppError> {
        let data = CreateJob {
            job_type: params.job_type,
            queue: params.queue,
            priority: params.priority,
            payload: params.payload,
            max_attempts: params.max_attempts,
            scheduled_at: params.scheduled_at,
            created_by: params.created_by,
        };

        let job = self.repo.create(&data).await?;

        tracing::debug!(
            "Enqueued job: id={}, type='{}', queue='{}', priority={:?}",
            job.id,
            job.job_type,
            job.queue,
            job.priority
        );

        Ok(job)
    }

    /// Dequeue the next available job from specified queues
    pub async fn dequeue(&self, queues: &[&str]) -> Result<Option<Job>, AppError> {
        for queue in queues {
            let job = self.repo.dequeue(queue, &self.worker_id).await?;

            if let Some(job) = job {
                tracing::debug!(
                    "Dequeued job: id={}, type='{}', queue='{}'",
                    job.id,
                    job.job_type,
                    job.queue
                );
                return Ok(Some(job));
            }
        }

        Ok(None)
    }

    /// Mark a job as completed successfully
    pub async fn complete(
        &self,
        job_id: Uuid,
        result: Option<serde_json::Value>,
    ) -> Result<(), AppError> {
        self.repo.complete(job_id, result.as_ref()).await?;
        tracing::debug!("Job completed: id={}", job_id);
        Ok(())
    }

    /// Mark a job as failed
    pub async fn fail(&self, job_id: Uuid, error: &str) -> Result<(), AppError> {
        self.repo.fail(job_id, error).await?;
        tracing::debug!("Job failed: id={}, error='{}'", job_id, error);
        Ok(())
    }

    /// Put a running job back in the queue after a transient failure
    pub async fn release_for_retry(&self, job_id: Uuid, error: &str) -> Result<(), AppError> {
        self.repo.release_for_retry(job_id, error).await?;
        tracing::debug!("Job released for retry: id={}", job_id);
        Ok(())
    }

    /// Reset a failed job to pending for a manual retry
    pub async fn retry(&self, job_id: Uuid) -> Result<(), AppError> {
        self.repo.retry(job_id).await?;
        tracing::debug!("Job retried: id={}", job_id);
        Ok(())
    }

    /// Mark a pending job as cancelled
    pub async fn cancel(&self, job_id: Uuid) -> Result<(), AppError> {
        self.repo.cancel(job_id).await?;
        tracing::debug!("Job cancelled: id={}", job_id);
        Ok(())
    }

    /// Look up a job by ID
    pub async fn find(&self, job_id: Uuid) -> Result<Option<Job>, AppError> {
        self.repo.find_by_id(job_id).await
    }

    /// Get queue statistics
    pub async fn stats(&self) -> Result<QueueStats, AppError> {
        let pending = self.repo.count_by_status(JobStatus::Pending).await?;
        let running = self.repo.count_by_status(JobStatus::Running).await?;
        let failed = self.repo.count_by_status(JobStatus::Failed).await?;

        Ok(QueueStats {
            pending,
            running,
            failed,
            worker_id: self.worker_id.clone(),
        })
    }
}

/// Queue statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStats {
    /// Number of pending jobs
    pub pending: i64,
    /// Number of running jobs
    pub running: i64,
    /// Number of failed jobs
    pub failed: i64,
    /// Current worker identifier
    pub worker_id: String,
}
