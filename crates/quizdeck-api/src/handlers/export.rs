//! Admin CSV export handlers.
//!
//! Export runs as a background job: the POST returns 202 with a job ID
//! immediately, and the admin polls status before downloading.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use quizdeck_core::error::AppError;
use quizdeck_entity::job::model::Job;
use quizdeck_entity::job::status::{JobPriority, JobStatus};
use quizdeck_worker::queue::JobCreateParams;

use crate::dto::response::{ApiResponse, ExportAcceptedResponse, ExportStatusResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

async fn find_export_job(state: &AppState, job_id: Uuid) -> Result<Job, ApiError> {
    let job = state
        .job_repo
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| AppError::not_found("Export job not found"))?;
    if job.job_type != "csv_export" {
        return Err(AppError::not_found("Export job not found").into());
    }
    Ok(job)
}

/// POST /api/admin/export
pub async fn start_export(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<(StatusCode, Json<ApiResponse<ExportAcceptedResponse>>), ApiError> {
    auth.require_admin()?;

    let rows = state.score_repo.export_rows().await?;

    let job = state
        .job_queue
        .enqueue(JobCreateParams {
            job_type: "csv_export".to_string(),
            queue: "default".to_string(),
            priority: JobPriority::High,
            payload: serde_json::json!({"task": "csv_export", "rows": rows}),
            max_attempts: 3,
            scheduled_at: None,
            created_by: Some(auth.user_id()),
        })
        .await?;

    tracing::info!(job_id = %job.id, admin = %auth.user_id(), "CSV export queued");

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::ok(ExportAcceptedResponse { job_id: job.id })),
    ))
}

/// GET /api/admin/export/:id/status
pub async fn export_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ExportStatusResponse>>, ApiError> {
    auth.require_admin()?;

    let job = find_export_job(&state, job_id).await?;

    Ok(Json(ApiResponse::ok(ExportStatusResponse {
        job_id: job.id,
        status: job.status.as_str().to_string(),
        error_message: job.error_message,
    })))
}

/// GET /api/admin/export/:id/download
pub async fn download_export(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    auth.require_admin()?;

    let job = find_export_job(&state, job_id).await?;

    if job.status != JobStatus::Completed {
        return Err(AppError::conflict(format!(
            "Export is not ready yet (status: {})",
            job.status.as_str()
        ))
        .into());
    }

    let path = job
        .result
        .as_ref()
        .and_then(|r| r.get("path"))
        .and_then(|p| p.as_str())
        .ok_or_else(|| AppError::internal("Export job has no file path"))?;

    let bytes = tokio::fs::read(path).await.map_err(|_| {
        AppError::not_found("Export file no longer exists, it may have been cleaned up")
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"quizdeck_users.csv\"".to_string(),
            ),
        ],
        bytes,
    )
        .into_response())
}
