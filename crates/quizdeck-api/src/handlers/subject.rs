//! Subject CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use quizdeck_core::error::AppError;
use quizdeck_entity::subject::{Subject, SubjectData};

use crate::dto::request::{SearchQuery, SubjectRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/subjects
pub async fn list_subjects(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Subject>>>, ApiError> {
    let subjects = state.subject_repo.find_all(query.q.as_deref()).await?;
    Ok(Json(ApiResponse::ok(subjects)))
}

/// GET /api/subjects/:id
pub async fn get_subject(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Subject>>, ApiError> {
    let subject = state
        .subject_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Subject not found"))?;
    Ok(Json(ApiResponse::ok(subject)))
}

/// POST /api/subjects
pub async fn create_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SubjectRequest>,
) -> Result<Json<ApiResponse<Subject>>, ApiError> {
    auth.require_admin()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if state.subject_repo.find_by_name(&req.name).await?.is_some() {
        return Err(AppError::conflict("A subject with this name already exists").into());
    }

    let subject = state
        .subject_repo
        .create(&SubjectData {
            name: req.name,
            about: req.about.unwrap_or_default(),
        })
        .await?;

    Ok(Json(ApiResponse::ok(subject)))
}

/// PUT /api/subjects/:id
pub async fn update_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SubjectRequest>,
) -> Result<Json<ApiResponse<Subject>>, ApiError> {
    auth.require_admin()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let subject = state
        .subject_repo
        .update(
            id,
            &SubjectData {
                name: req.name,
                about: req.about.unwrap_or_default(),
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("Subject not found"))?;

    Ok(Json(ApiResponse::ok(subject)))
}

/// DELETE /api/subjects/:id
pub async fn delete_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    auth.require_admin()?;

    if !state.subject_repo.delete(id).await? {
        return Err(AppError::not_found("Subject not found").into());
    }

    Ok(Json(ApiResponse::ok(MessageResponse::new("Subject deleted"))))
}
