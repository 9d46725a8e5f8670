//! Integration tests for the CSV export and job admin endpoints.

use crate::helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_start_export_returns_job_id() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Admin", "admin@test.com", "password123", "admin")
        .await;
    let token = app.login("admin@test.com", "password123").await;

    let response = app
        .request("POST", "/api/admin/export", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED, "{:?}", response.body);
    let job_id = response
        .body
        .pointer("/data/job_id")
        .and_then(|v| v.as_str())
        .expect("job_id in response")
        .to_string();

    let status = app
        .request(
            "GET",
            &format!("/api/admin/export/{}/status", job_id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(status.status, StatusCode::OK);
    assert_eq!(
        status.body.pointer("/data/status").and_then(|v| v.as_str()),
        Some("pending")
    );
}

#[tokio::test]
async fn test_export_requires_admin() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Student", "student@test.com", "password123", "user")
        .await;
    let token = app.login("student@test.com", "password123").await;

    let response = app
        .request("POST", "/api/admin/export", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_download_before_completion_conflicts() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Admin", "admin@test.com", "password123", "admin")
        .await;
    let token = app.login("admin@test.com", "password123").await;

    let started = app
        .request("POST", "/api/admin/export", None, Some(&token))
        .await;
    let job_id = started
        .body
        .pointer("/data/job_id")
        .and_then(|v| v.as_str())
        .expect("job_id in response")
        .to_string();

    let response = app
        .request(
            "GET",
            &format!("/api/admin/export/{}/download", job_id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_export_status_unknown_job_not_found() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Admin", "admin@test.com", "password123", "admin")
        .await;
    let token = app.login("admin@test.com", "password123").await;

    let response = app
        .request(
            "GET",
            &format!("/api/admin/export/{}/status", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_pending_job() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Admin", "admin@test.com", "password123", "admin")
        .await;
    let token = app.login("admin@test.com", "password123").await;

    let started = app
        .request("POST", "/api/admin/export", None, Some(&token))
        .await;
    let job_id = started
        .body
        .pointer("/data/job_id")
        .and_then(|v| v.as_str())
        .expect("job_id in response")
        .to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/admin/jobs/{}/cancel", job_id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
}
