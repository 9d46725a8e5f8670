//! Quiz CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use quizdeck_core::error::AppError;
use quizdeck_entity::quiz::{Quiz, QuizData};

use crate::dto::request::{QuizRequest, SearchQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/quizzes
pub async fn list_quizzes(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Quiz>>>, ApiError> {
    let quizzes = state.quiz_repo.find_all(query.q.as_deref()).await?;
    Ok(Json(ApiResponse::ok(quizzes)))
}

/// GET /api/chapters/:id/quizzes
pub async fn list_chapter_quizzes(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(chapter_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Quiz>>>, ApiError> {
    if state.chapter_repo.find_by_id(chapter_id).await?.is_none() {
        return Err(AppError::not_found("Chapter not found").into());
    }
    let quizzes = state.quiz_repo.find_by_chapter(chapter_id).await?;
    Ok(Json(ApiResponse::ok(quizzes)))
}

/// GET /api/quizzes/:id
pub async fn get_quiz(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Quiz>>, ApiError> {
    let quiz = state
        .quiz_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Quiz not found"))?;
    Ok(Json(ApiResponse::ok(quiz)))
}

/// POST /api/quizzes
pub async fn create_quiz(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<QuizRequest>,
) -> Result<Json<ApiResponse<Quiz>>, ApiError> {
    auth.require_admin()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if state.chapter_repo.find_by_id(req.chapter_id).await?.is_none() {
        return Err(AppError::not_found("Chapter not found").into());
    }

    let quiz = state
        .quiz_repo
        .create(&QuizData {
            chapter_id: req.chapter_id,
            title: req.title,
            duration_minutes: req.duration_minutes,
            remarks: req.remarks,
        })
        .await?;

    Ok(Json(ApiResponse::ok(quiz)))
}

/// PUT /api/quizzes/:id
pub async fn update_quiz(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<QuizRequest>,
) -> Result<Json<ApiResponse<Quiz>>, ApiError> {
    auth.require_admin()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let quiz = state
        .quiz_repo
        .update(
            id,
            &QuizData {
                chapter_id: req.chapter_id,
                title: req.title,
                duration_minutes: req.duration_minutes,
                remarks: req.remarks,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("Quiz not found"))?;

    Ok(Json(ApiResponse::ok(quiz)))
}

/// DELETE /api/quizzes/:id
pub async fn delete_quiz(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    auth.require_admin()?;

    if !state.quiz_repo.delete(id).await? {
        return Err(AppError::not_found("Quiz not found").into());
    }

    Ok(Json(ApiResponse::ok(MessageResponse::new("Quiz deleted"))))
}
