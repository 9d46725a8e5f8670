//! Question CRUD handlers (admin only — answers are included).

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use quizdeck_core::error::AppError;
use quizdeck_entity::question::{Question, QuestionData};

use crate::dto::request::QuestionRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

fn check_correct_option(req: &QuestionRequest) -> Result<(), ApiError> {
    if req.correct_option < 0 || req.correct_option as usize >= req.options.len() {
        return Err(AppError::validation(
            "correct_option must index into the options list",
        )
        .into());
    }
    Ok(())
}

/// GET /api/quizzes/:id/questions
pub async fn list_questions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(quiz_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Question>>>, ApiError> {
    auth.require_admin()?;

    if state.quiz_repo.find_by_id(quiz_id).await?.is_none() {
        return Err(AppError::not_found("Quiz not found").into());
    }
    let questions = state.question_repo.find_by_quiz(quiz_id).await?;
    Ok(Json(ApiResponse::ok(questions)))
}

/// POST /api/quizzes/:id/questions
pub async fn create_question(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(quiz_id): Path<Uuid>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<ApiResponse<Question>>, ApiError> {
    auth.require_admin()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    check_correct_option(&req)?;

    if state.quiz_repo.find_by_id(quiz_id).await?.is_none() {
        return Err(AppError::not_found("Quiz not found").into());
    }

    let question = state
        .question_repo
        .create(&QuestionData {
            quiz_id,
            statement: req.statement,
            options: req.options,
            correct_option: req.correct_option,
        })
        .await?;

    Ok(Json(ApiResponse::ok(question)))
}

/// PUT /api/questions/:id
pub async fn update_question(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<ApiResponse<Question>>, ApiError> {
    auth.require_admin()?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    check_correct_option(&req)?;

    let existing = state
        .question_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Question not found"))?;

    let question = state
        .question_repo
        .update(
            id,
            &QuestionData {
                quiz_id: existing.quiz_id,
                statement: req.statement,
                options: req.options,
                correct_option: req.correct_option,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("Question not found"))?;

    Ok(Json(ApiResponse::ok(question)))
}

/// DELETE /api/questions/:id
pub async fn delete_question(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    auth.require_admin()?;

    if !state.question_repo.delete(id).await? {
        return Err(AppError::not_found("Question not found").into());
    }

    Ok(Json(ApiResponse::ok(MessageResponse::new("Question deleted"))))
}
