//! Bounded polling for job completion.
//!
//! Used by the CLI's `worker trigger --wait` to block until a triggered
//! job reaches a terminal state, without ever hanging the caller.

use std::future::Future;
use std::time::Duration;

use tokio::time;
use uuid::Uuid;

use quizdeck_core::error::AppError;
use quizdeck_core::result::AppResult;
use quizdeck_entity::job::model::Job;

use crate::queue::JobQueue;

/// How often to re-check the job status.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How long to wait before giving up.
pub const MAX_WAIT: Duration = Duration::from_secs(30);

/// Polls until the job reaches a terminal status or the deadline passes.
///
/// Returns the job in its terminal state, or a timeout error if the job
/// is still pending/running after [`MAX_WAIT`].
pub async fn wait_for_completion(queue: &JobQueue, job_id: Uuid) -> AppResult<Job> {
    poll_until_terminal(job_id, POLL_INTERVAL, MAX_WAIT, || queue.find(job_id)).await
}

/// The polling loop itself, generic over the status lookup.
async fn poll_until_terminal<F, Fut>(
    job_id: Uuid,
    interval: Duration,
    max_wait: Duration,
    mut fetch: F,
) -> AppResult<Job>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<Option<Job>>>,
{
    let deadline = time::Instant::now() + max_wait;

    loop {
        let job = fetch()
            .await?
            .ok_or_else(|| AppError::not_found(format!("Job {job_id} not found")))?;

        if job.status.is_terminal() {
            return Ok(job);
        }

        if time::Instant::now() >= deadline {
            return Err(AppError::timeout(format!(
                "Job {job_id} did not complete within {}s",
                max_wait.as_secs()
            )));
        }

        time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use quizdeck_core::error::ErrorKind;
    use quizdeck_entity::job::status::{JobPriority, JobStatus};

    use super::*;

    fn job_with_status(id: Uuid, status: JobStatus) -> Job {
        Job {
            id,
            job_type: "csv_export".to_string(),
            queue: "default".to_string(),
            priority: JobPriority::Normal,
            payload: serde_json::json!({}),
            result: None,
            error_message: None,
            status,
            attempts: 0,
            max_attempts: 3,
            scheduled_at: None,
            started_at: None,
            completed_at: None,
            created_by: None,
            worker_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_returns_once_job_completes() {
        let id = Uuid::new_v4();
        let polls = AtomicUsize::new(0);

        let result = poll_until_terminal(id, Duration::from_secs(1), Duration::from_secs(30), || {
            let n = polls.fetch_add(1, Ordering::SeqCst);
            let status = if n < 3 {
                JobStatus::Running
            } else {
                JobStatus::Completed
            };
            let job = job_with_status(id, status);
            async move { Ok(Some(job)) }
        })
        .await
        .unwrap();

        assert_eq!(result.status, JobStatus::Completed);
        assert_eq!(polls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_times_out_on_stuck_job() {
        let id = Uuid::new_v4();

        let err = poll_until_terminal(id, Duration::from_secs(1), Duration::from_secs(5), || {
            let job = job_with_status(id, JobStatus::Running);
            async move { Ok(Some(job)) }
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_errors_on_missing_job() {
        let id = Uuid::new_v4();

        let err = poll_until_terminal(id, Duration::from_secs(1), Duration::from_secs(5), || async {
            Ok(None)
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_returns_failed_job_without_waiting_out_the_deadline() {
        let id = Uuid::new_v4();
        let started = time::Instant::now();

        let result = poll_until_terminal(id, Duration::from_secs(1), Duration::from_secs(30), || {
            let job = job_with_status(id, JobStatus::Failed);
            async move { Ok(Some(job)) }
        })
        .await
        .unwrap();

        assert_eq!(result.status, JobStatus::Failed);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
