//! Admin job management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use quizdeck_core::error::AppError;
use quizdeck_entity::job::model::Job;
use quizdeck_entity::job::status::JobStatus;
use quizdeck_worker::queue::QueueStats;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Job>>>, ApiError> {
    auth.require_admin()?;
    let jobs = state.job_repo.find_recent(100).await?;
    Ok(Json(ApiResponse::ok(jobs)))
}

/// GET /api/admin/jobs/stats
pub async fn job_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<QueueStats>>, ApiError> {
    auth.require_admin()?;
    let stats = state.job_queue.stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/admin/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Job>>, ApiError> {
    auth.require_admin()?;
    let job = state
        .job_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Job not found"))?;
    Ok(Json(ApiResponse::ok(job)))
}

/// POST /api/admin/jobs/:id/cancel
pub async fn cancel_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    auth.require_admin()?;

    let job = state
        .job_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Job not found"))?;

    if job.status != JobStatus::Pending {
        return Err(AppError::conflict("Only pending jobs can be cancelled").into());
    }

    state.job_queue.cancel(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Job cancelled"))))
}

/// POST /api/admin/jobs/:id/retry
pub async fn retry_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    auth.require_admin()?;

    let job = state
        .job_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Job not found"))?;

    if !job.can_retry() {
        return Err(AppError::conflict("Only failed jobs can be retried").into());
    }

    state.job_queue.retry(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Job retried"))))
}
