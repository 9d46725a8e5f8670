//! Integration tests for the authentication flow.

use crate::helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_signup_and_login() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "full_name": "Test Student",
                "email": "student@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(response.body.pointer("/data/token").is_some());

    let token = app.login("student@test.com", "password123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Dup", "dup@test.com", "password123", "user")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "full_name": "Dup Again",
                "email": "dup@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_invalid_password() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Victim", "victim@test.com", "password123", "user")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "victim@test.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_token() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_weak_password_rejected() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "full_name": "Weak",
                "email": "weak@test.com",
                "password": "short",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
