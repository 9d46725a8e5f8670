//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use quizdeck_core::error::AppError;
use quizdeck_entity::user::UserRole;

use crate::dto::request::SearchQuery;
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    auth.require_admin()?;

    let users = match query.q.as_deref() {
        Some(fragment) if !fragment.is_empty() => {
            state.user_repo.search_by_name(fragment).await?
        }
        _ => state.user_repo.find_by_role(UserRole::User).await?,
    };

    Ok(Json(ApiResponse::ok(
        users.iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/admin/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    auth.require_admin()?;

    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// DELETE /api/admin/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    auth.require_admin()?;

    if id == auth.user_id() {
        return Err(AppError::validation("Administrators cannot delete themselves").into());
    }

    if !state.user_repo.delete(id).await? {
        return Err(AppError::not_found("User not found").into());
    }

    Ok(Json(ApiResponse::ok(MessageResponse::new("User deleted"))))
}
