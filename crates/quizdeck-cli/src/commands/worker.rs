//! Worker and job queue management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::output;
use quizdeck_core::error::AppError;
use quizdeck_database::repositories::job::JobRepository;
use quizdeck_entity::job::{JobPriority, JobStatus};
use quizdeck_worker::queue::{JobCreateParams, JobQueue};
use quizdeck_worker::wait_for_completion;

/// Arguments for worker commands
#[derive(Debug, Args)]
pub struct WorkerArgs {
    /// Worker subcommand
    #[command(subcommand)]
    pub command: WorkerCommand,
}

/// Worker subcommands
#[derive(Debug, Subcommand)]
pub enum WorkerCommand {
    /// Show worker/queue status
    Status,
    /// Trigger a specific job type immediately
    Trigger {
        /// Job type (daily_reminder, monthly_report, csv_export, ...)
        job_type: String,
        /// JSON payload
        #[arg(short, long, default_value = "{}")]
        payload: String,
        /// Wait for the job to reach a terminal state
        #[arg(short, long)]
        wait: bool,
    },
}

/// Execute worker commands
pub async fn execute(args: &WorkerArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let job_repo = Arc::new(JobRepository::new(pool.clone()));
    let queue = JobQueue::new(Arc::clone(&job_repo), "cli".to_string());

    match &args.command {
        WorkerCommand::Status => {
            let pending = job_repo.count_by_status(JobStatus::Pending).await?;
            let running = job_repo.count_by_status(JobStatus::Running).await?;
            let failed = job_repo.count_by_status(JobStatus::Failed).await?;
            let completed = job_repo.count_by_status(JobStatus::Completed).await?;

            println!("Worker Queue Status:");
            output::print_kv("Pending", &pending.to_string());
            output::print_kv("Running", &running.to_string());
            output::print_kv("Failed", &failed.to_string());
            output::print_kv("Completed", &completed.to_string());
            output::print_kv("Worker Enabled", &config.worker.enabled.to_string());
            output::print_kv("Scheduler Enabled", &config.worker.scheduler_enabled.to_string());
            output::print_kv("Concurrency", &config.worker.concurrency.to_string());
        }
        WorkerCommand::Trigger {
            job_type,
            payload,
            wait,
        } => {
            let payload_value: serde_json::Value = serde_json::from_str(payload)
                .map_err(|e| AppError::validation(format!("Invalid JSON payload: {}", e)))?;

            let job = queue
                .enqueue(JobCreateParams {
                    job_type: job_type.clone(),
                    queue: "default".to_string(),
                    priority: JobPriority::Normal,
                    payload: payload_value,
                    max_attempts: 3,
                    scheduled_at: None,
                    created_by: None,
                })
                .await?;

            output::print_success(&format!("Job '{}' enqueued (id: {})", job_type, job.id));

            if *wait {
                println!("Waiting for job to complete...");
                let finished = wait_for_completion(&queue, job.id).await?;
                match finished.status {
                    JobStatus::Completed => {
                        output::print_success(&format!("Job {} completed", finished.id));
                        if let Some(result) = &finished.result {
                            println!("{}", serde_json::to_string_pretty(result).unwrap_or_default());
                        }
                    }
                    status => {
                        output::print_warning(&format!(
                            "Job {} finished with status '{}': {}",
                            finished.id,
                            status.as_str(),
                            finished.error_message.as_deref().unwrap_or("no error")
                        ));
                    }
                }
            }
        }
    }

    Ok(())
}
