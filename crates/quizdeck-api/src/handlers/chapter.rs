//! Chapter CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use quizdeck_core::error::AppError;
use quizdeck_entity::chapter::{Chapter, ChapterData};

use crate::dto::request::ChapterRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/subjects/:id/chapters
pub async fn list_chapters(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Chapter>>>, ApiError> {
    if state.subject_repo.find_by_id(subject_id).await?.is_none() {
        return Err(AppError::not_found("Subject not found").into());
    }
    let chapters = state.chapter_repo.find_by_subject(subject_id).await?;
    Ok(Json(ApiResponse::ok(chapters)))
}

/// GET /api/chapters/:id
pub async fn get_chapter(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Chapter>>, ApiError> {
    let chapter = state
        .chapter_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Chapter not found"))?;
    Ok(Json(ApiResponse::ok(chapter)))
}

/// POST /api/subjects/:id/chapters
pub async fn create_chapter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subject_id): Path<Uuid>,
    Json(req): Json<ChapterRequest>,
) -> Result<Json<ApiResponse<Chapter>>, ApiError> {
    auth.require_admin()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if state.subject_repo.find_by_id(subject_id).await?.is_none() {
        return Err(AppError::not_found("Subject not found").into());
    }

    let chapter = state
        .chapter_repo
        .create(&ChapterData {
            subject_id,
            name: req.name,
            about: req.about.unwrap_or_default(),
        })
        .await?;

    Ok(Json(ApiResponse::ok(chapter)))
}

/// PUT /api/chapters/:id
pub async fn update_chapter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChapterRequest>,
) -> Result<Json<ApiResponse<Chapter>>, ApiError> {
    auth.require_admin()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let existing = state
        .chapter_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Chapter not found"))?;

    let chapter = state
        .chapter_repo
        .update(
            id,
            &ChapterData {
                subject_id: existing.subject_id,
                name: req.name,
                about: req.about.unwrap_or_default(),
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("Chapter not found"))?;

    Ok(Json(ApiResponse::ok(chapter)))
}

/// DELETE /api/chapters/:id
pub async fn delete_chapter(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    auth.require_admin()?;

    if !state.chapter_repo.delete(id).await? {
        return Err(AppError::not_found("Chapter not found").into());
    }

    Ok(Json(ApiResponse::ok(MessageResponse::new("Chapter deleted"))))
}
