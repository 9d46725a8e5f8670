//! Exam handlers: take a quiz, submit answers, view scores and dashboard.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use quizdeck_core::error::AppError;
use quizdeck_entity::question::Question;
use quizdeck_entity::score::{CreateScore, Score};

use crate::dto::request::ExamSubmission;
use crate::dto::response::{
    ApiResponse, DashboardResponse, ExamResponse, ExamResultResponse, QuestionPublic,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Grades a submission against the quiz's questions.
///
/// Unanswered questions count as wrong; answers for unknown questions
/// are ignored.
pub fn grade(questions: &[Question], submission: &ExamSubmission) -> (i32, i32, f64) {
    let selected: HashMap<Uuid, i32> = submission
        .answers
        .iter()
        .map(|a| (a.question_id, a.selected_option))
        .collect();

    let total = questions.len() as i32;
    let correct = questions
        .iter()
        .filter(|q| selected.get(&q.id) == Some(&q.correct_option))
        .count() as i32;

    let percentage = if total == 0 {
        0.0
    } else {
        ((correct as f64 / total as f64) * 100.0 * 100.0).round() / 100.0
    };

    (total, correct, percentage)
}

/// GET /api/exam/:quiz_id
///
/// Returns the quiz and its questions with the correct answers stripped.
pub async fn take_exam(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(quiz_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ExamResponse>>, ApiError> {
    let quiz = state
        .quiz_repo
        .find_by_id(quiz_id)
        .await?
        .ok_or_else(|| AppError::not_found("Quiz not found"))?;

    let questions = state.question_repo.find_by_quiz(quiz_id).await?;
    if questions.is_empty() {
        return Err(AppError::validation("This quiz has no questions yet").into());
    }

    Ok(Json(ApiResponse::ok(ExamResponse {
        quiz,
        questions: questions.iter().map(QuestionPublic::from).collect(),
    })))
}

/// POST /api/exam/:quiz_id/submit
pub async fn submit_exam(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(quiz_id): Path<Uuid>,
    Json(submission): Json<ExamSubmission>,
) -> Result<Json<ApiResponse<ExamResultResponse>>, ApiError> {
    if state.quiz_repo.find_by_id(quiz_id).await?.is_none() {
        return Err(AppError::not_found("Quiz not found").into());
    }

    let questions = state.question_repo.find_by_quiz(quiz_id).await?;
    if questions.is_empty() {
        return Err(AppError::validation("This quiz has no questions yet").into());
    }

    let (total, correct, percentage) = grade(&questions, &submission);

    let score = state
        .score_repo
        .create(&CreateScore {
            user_id: auth.user_id(),
            quiz_id,
            total_questions: total,
            correct_answers: correct,
            percentage,
        })
        .await?;

    tracing::info!(
        user_id = %auth.user_id(),
        quiz_id = %quiz_id,
        percentage,
        "exam graded"
    );

    Ok(Json(ApiResponse::ok(ExamResultResponse {
        score_id: score.id,
        total_questions: total,
        correct_answers: correct,
        percentage,
    })))
}

/// GET /api/results/:score_id
pub async fn get_result(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(score_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Score>>, ApiError> {
    let score = state
        .score_repo
        .find_by_id(score_id)
        .await?
        .ok_or_else(|| AppError::not_found("Result not found"))?;

    if score.user_id != auth.user_id() && !auth.is_admin() {
        return Err(AppError::not_found("Result not found").into());
    }

    Ok(Json(ApiResponse::ok(score)))
}

/// GET /api/scores
pub async fn list_scores(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Score>>>, ApiError> {
    let scores = state.score_repo.find_by_user(auth.user_id()).await?;
    Ok(Json(ApiResponse::ok(scores)))
}

/// GET /api/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let stats = state.score_repo.stats_for_user(auth.user_id()).await?;
    let mut recent = state.score_repo.find_by_user(auth.user_id()).await?;
    recent.truncate(10);

    Ok(Json(ApiResponse::ok(DashboardResponse {
        total_quizzes: stats.total_quizzes,
        average_score: stats
            .average_score
            .map(|avg| (avg * 100.0).round() / 100.0)
            .unwrap_or(0.0),
        recent_scores: recent,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::request::AnswerItem;
    use chrono::Utc;

    fn question(correct: i32) -> Question {
        Question {
            id: Uuid::new_v4(),
            quiz_id: Uuid::new_v4(),
            statement: "?".to_string(),
            options: serde_json::json!(["a", "b", "c", "d"]),
            correct_option: correct,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_grade_all_correct() {
        let questions = vec![question(0), question(2)];
        let submission = ExamSubmission {
            answers: questions
                .iter()
                .map(|q| AnswerItem {
                    question_id: q.id,
                    selected_option: q.correct_option,
                })
                .collect(),
        };
        assert_eq!(grade(&questions, &submission), (2, 2, 100.0));
    }

    #[test]
    fn test_grade_unanswered_counts_as_wrong() {
        let questions = vec![question(1), question(1), question(1)];
        let submission = ExamSubmission {
            answers: vec![AnswerItem {
                question_id: questions[0].id,
                selected_option: 1,
            }],
        };
        let (total, correct, percentage) = grade(&questions, &submission);
        assert_eq!((total, correct), (3, 1));
        assert_eq!(percentage, 33.33);
    }

    #[test]
    fn test_grade_ignores_unknown_question_ids() {
        let questions = vec![question(0)];
        let submission = ExamSubmission {
            answers: vec![AnswerItem {
                question_id: Uuid::new_v4(),
                selected_option: 0,
            }],
        };
        assert_eq!(grade(&questions, &submission), (1, 0, 0.0));
    }
}
