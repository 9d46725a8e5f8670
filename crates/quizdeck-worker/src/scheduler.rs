//! Cron scheduler for the periodic reminder, report, and cleanup jobs.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use quizdeck_core::error::AppError;
use quizdeck_entity::job::status::JobPriority;

use crate::queue::{JobCreateParams, JobQueue};

/// Cron-based scheduler for periodic background tasks.
///
/// Registration failures are fatal: a server that silently runs without
/// its reminder or report schedule is worse than one that refuses to
/// start.
pub struct PeriodicScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Job queue for enqueuing scheduled work
    queue: Arc<JobQueue>,
}

impl std::fmt::Debug for PeriodicScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicScheduler").finish()
    }
}

impl PeriodicScheduler {
    /// Create a new periodic scheduler
    pub async fn new(queue: Arc<JobQueue>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, queue })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_daily_reminder().await?;
        self.register_monthly_report().await?;
        self.register_export_cleanup().await?;
        self.register_job_history_cleanup().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Daily reminder — every day at 19:30
    async fn register_daily_reminder(&self) -> Result<(), AppError> {
        let queue = Arc::clone(&self.queue);
        let job = CronJob::new_async("0 30 19 * * *", move |_uuid, _lock| {
            let queue = Arc::clone(&queue);
            Box::pin(async move {
                tracing::debug!("Scheduling daily reminder job");
                let params = JobCreateParams {
                    job_type: "daily_reminder".to_string(),
                    queue: "default".to_string(),
                    priority: JobPriority::Normal,
                    payload: serde_json::json!({"task": "daily_reminder"}),
                    max_attempts: 3,
                    scheduled_at: None,
                    created_by: None,
                };
                if let Err(e) = queue.enqueue(params).await {
                    tracing::error!("Failed to enqueue daily_reminder: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create daily_reminder schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add daily_reminder schedule: {}", e))
        })?;

        tracing::info!("Registered: daily_reminder (daily at 19:30)");
        Ok(())
    }

    /// Monthly report — 1st of every month at 8 AM
    async fn register_monthly_report(&self) -> Result<(), AppError> {
        let queue = Arc::clone(&self.queue);
        let job = CronJob::new_async("0 0 8 1 * *", move |_uuid, _lock| {
            let queue = Arc::clone(&queue);
            Box::pin(async move {
                tracing::debug!("Scheduling monthly report job");
                let params = JobCreateParams {
                    job_type: "monthly_report".to_string(),
                    queue: "default".to_string(),
                    priority: JobPriority::Normal,
                    payload: serde_json::json!({"task": "monthly_report"}),
                    max_attempts: 3,
                    scheduled_at: None,
                    created_by: None,
                };
                if let Err(e) = queue.enqueue(params).await {
                    tracing::error!("Failed to enqueue monthly_report: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create monthly_report schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add monthly_report schedule: {}", e))
        })?;

        tracing::info!("Registered: monthly_report (1st of month, 8AM)");
        Ok(())
    }

    /// Export file cleanup — every day at 3 AM
    async fn register_export_cleanup(&self) -> Result<(), AppError> {
        let queue = Arc::clone(&self.queue);
        let job = CronJob::new_async("0 0 3 * * *", move |_uuid, _lock| {
            let queue = Arc::clone(&queue);
            Box::pin(async move {
                tracing::debug!("Scheduling export cleanup job");
                let params = JobCreateParams {
                    job_type: "export_cleanup".to_string(),
                    queue: "maintenance".to_string(),
                    priority: JobPriority::Low,
                    payload: serde_json::json!({"task": "export_cleanup"}),
                    max_attempts: 1,
                    scheduled_at: None,
                    created_by: None,
                };
                if let Err(e) = queue.enqueue(params).await {
                    tracing::error!("Failed to enqueue export_cleanup: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create export_cleanup schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add export_cleanup schedule: {}", e))
        })?;

        tracing::info!("Registered: export_cleanup (daily at 3AM)");
        Ok(())
    }

    /// Job history cleanup — every hour
    async fn register_job_history_cleanup(&self) -> Result<(), AppError> {
        let queue = Arc::clone(&self.queue);
        let job = CronJob::new_repeated_async(Duration::from_secs(3600), move |_uuid, _lock| {
            let queue = Arc::clone(&queue);
            Box::pin(async move {
                tracing::debug!("Scheduling job history cleanup");
                let params = JobCreateParams {
                    job_type: "job_history_cleanup".to_string(),
                    queue: "maintenance".to_string(),
                    priority: JobPriority::Low,
                    payload: serde_json::json!({"task": "job_history_cleanup"}),
                    max_attempts: 1,
                    scheduled_at: None,
                    created_by: None,
                };
                if let Err(e) = queue.enqueue(params).await {
                    tracing::error!("Failed to enqueue job_history_cleanup: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!(
                "Failed to create job_history_cleanup schedule: {}",
                e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add job_history_cleanup schedule: {}", e))
        })?;

        tracing::info!("Registered: job_history_cleanup (every hour)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizdeck_database::repositories::job::JobRepository;
    use sqlx::postgres::PgPoolOptions;

    // A lazy pool never opens a connection; schedules only enqueue when
    // the cron fires, so the lifecycle can be exercised without a
    // database.
    fn queue_without_database() -> Arc<JobQueue> {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/quizdeck")
            .unwrap();
        Arc::new(JobQueue::new(
            Arc::new(JobRepository::new(pool)),
            "test-worker".to_string(),
        ))
    }

    #[tokio::test]
    async fn test_scheduler_register_and_shutdown() {
        let mut scheduler = PeriodicScheduler::new(queue_without_database())
            .await
            .unwrap();
        scheduler.register_default_tasks().await.unwrap();
        scheduler.shutdown().await.unwrap();
    }
}
