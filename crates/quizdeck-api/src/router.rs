//! Route definitions for the QuizDeck HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(subject_routes())
        .merge(chapter_routes())
        .merge(quiz_routes())
        .merge(question_routes())
        .merge(exam_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: signup, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Subject CRUD
fn subject_routes() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(handlers::subject::list_subjects))
        .route("/subjects", post(handlers::subject::create_subject))
        .route("/subjects/{id}", get(handlers::subject::get_subject))
        .route("/subjects/{id}", put(handlers::subject::update_subject))
        .route("/subjects/{id}", delete(handlers::subject::delete_subject))
}

/// Chapter CRUD (nested under subjects for listing/creation)
fn chapter_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subjects/{id}/chapters",
            get(handlers::chapter::list_chapters),
        )
        .route(
            "/subjects/{id}/chapters",
            post(handlers::chapter::create_chapter),
        )
        .route("/chapters/{id}", get(handlers::chapter::get_chapter))
        .route("/chapters/{id}", put(handlers::chapter::update_chapter))
        .route("/chapters/{id}", delete(handlers::chapter::delete_chapter))
}

/// Quiz CRUD
fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/quizzes", get(handlers::quiz::list_quizzes))
        .route("/quizzes", post(handlers::quiz::create_quiz))
        .route(
            "/chapters/{id}/quizzes",
            get(handlers::quiz::list_chapter_quizzes),
        )
        .route("/quizzes/{id}", get(handlers::quiz::get_quiz))
        .route("/quizzes/{id}", put(handlers::quiz::update_quiz))
        .route("/quizzes/{id}", delete(handlers::quiz::delete_quiz))
}

/// Question CRUD (admin; includes correct answers)
fn question_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/quizzes/{id}/questions",
            get(handlers::question::list_questions),
        )
        .route(
            "/quizzes/{id}/questions",
            post(handlers::question::create_question),
        )
        .route("/questions/{id}", put(handlers::question::update_question))
        .route(
            "/questions/{id}",
            delete(handlers::question::delete_question),
        )
}

/// Exam taking, grading, scores, dashboard
fn exam_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/exam/{quiz_id}",
            get(handlers::exam::take_exam).post(handlers::exam::submit_exam),
        )
        .route("/results/{score_id}", get(handlers::exam::get_result))
        .route("/scores", get(handlers::exam::list_scores))
        .route("/dashboard", get(handlers::exam::dashboard))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        // User management
        .route("/admin/users", get(handlers::user::list_users))
        .route("/admin/users/{id}", get(handlers::user::get_user))
        .route("/admin/users/{id}", delete(handlers::user::delete_user))
        // CSV export
        .route("/admin/export", post(handlers::export::start_export))
        .route(
            "/admin/export/{id}/status",
            get(handlers::export::export_status),
        )
        .route(
            "/admin/export/{id}/download",
            get(handlers::export::download_export),
        )
        // Jobs
        .route("/admin/jobs", get(handlers::jobs::list_jobs))
        .route("/admin/jobs/stats", get(handlers::jobs::job_stats))
        .route("/admin/jobs/{id}", get(handlers::jobs::get_job))
        .route("/admin/jobs/{id}/cancel", post(handlers::jobs::cancel_job))
        .route("/admin/jobs/{id}/retry", post(handlers::jobs::retry_job))
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use tower_http::cors::Any;

    let origins = &state.config.server.cors_origins;

    if origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<axum::http::HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
