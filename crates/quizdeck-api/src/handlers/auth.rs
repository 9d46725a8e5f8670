//! Auth handlers — signup, login, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use quizdeck_core::error::AppError;
use quizdeck_entity::user::{CreateUser, UserRole};

use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    state.password_validator.validate(&req.password)?;

    if state.user_repo.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::conflict("An account with this email already exists").into());
    }

    let password_hash = state.password_hasher.hash_password(&req.password)?;
    let user = state
        .user_repo
        .create(&CreateUser {
            full_name: req.full_name,
            email: req.email.to_lowercase(),
            password_hash,
            role: UserRole::User,
        })
        .await?;

    let issued = state
        .jwt_encoder
        .generate_token(user.id, user.role, &user.full_name)?;

    tracing::info!(user_id = %user.id, "new user signed up");

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: UserResponse::from(&user),
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let user = state
        .user_repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

    let valid = state
        .password_hasher
        .verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::authentication("Invalid email or password").into());
    }

    state.user_repo.touch_last_login(user.id).await?;

    let issued = state
        .jwt_encoder
        .generate_token(user.id, user.role, &user.full_name)?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: UserResponse::from(&user),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_repo
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
