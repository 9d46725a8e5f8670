//! Integration tests for the quiz content and exam flow.

use crate::helpers;

use axum::http::StatusCode;
use serde_json::Value;

async fn create_quiz_with_question(app: &helpers::TestApp, token: &str) -> (String, String) {
    let subject = app
        .request(
            "POST",
            "/api/subjects",
            Some(serde_json::json!({"name": "Physics", "about": "Mechanics and waves"})),
            Some(token),
        )
        .await;
    assert_eq!(subject.status, StatusCode::OK, "{:?}", subject.body);
    let subject_id = subject.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();

    let chapter = app
        .request(
            "POST",
            &format!("/api/subjects/{}/chapters", subject_id),
            Some(serde_json::json!({"name": "Kinematics", "about": ""})),
            Some(token),
        )
        .await;
    assert_eq!(chapter.status, StatusCode::OK, "{:?}", chapter.body);
    let chapter_id = chapter.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();

    let quiz = app
        .request(
            "POST",
            "/api/quizzes",
            Some(serde_json::json!({
                "chapter_id": chapter_id,
                "title": "Velocity basics",
                "duration_minutes": 30,
            })),
            Some(token),
        )
        .await;
    assert_eq!(quiz.status, StatusCode::OK, "{:?}", quiz.body);
    let quiz_id = quiz.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();

    let question = app
        .request(
            "POST",
            &format!("/api/quizzes/{}/questions", quiz_id),
            Some(serde_json::json!({
                "statement": "Unit of velocity?",
                "options": ["m/s", "kg", "N", "J"],
                "correct_option": 0,
            })),
            Some(token),
        )
        .await;
    assert_eq!(question.status, StatusCode::OK, "{:?}", question.body);
    let question_id = question.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();

    (quiz_id, question_id)
}

#[tokio::test]
async fn test_content_crud_requires_admin() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Student", "student@test.com", "password123", "user")
        .await;
    let token = app.login("student@test.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/subjects",
            Some(serde_json::json!({"name": "Forbidden", "about": ""})),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_take_exam_hides_correct_answers() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Admin", "admin@test.com", "password123", "admin")
        .await;
    let admin_token = app.login("admin@test.com", "password123").await;
    let (quiz_id, _) = create_quiz_with_question(&app, &admin_token).await;

    app.create_test_user("Student", "student@test.com", "password123", "user")
        .await;
    let token = app.login("student@test.com", "password123").await;

    let response = app
        .request("GET", &format!("/api/exam/{}", quiz_id), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let questions = response
        .body
        .pointer("/data/questions")
        .and_then(Value::as_array)
        .expect("questions array");
    assert_eq!(questions.len(), 1);
    assert!(questions[0].get("correct_option").is_none());
}

#[tokio::test]
async fn test_submit_exam_grades_and_records_score() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Admin", "admin@test.com", "password123", "admin")
        .await;
    let admin_token = app.login("admin@test.com", "password123").await;
    let (quiz_id, question_id) = create_quiz_with_question(&app, &admin_token).await;

    app.create_test_user("Student", "student@test.com", "password123", "user")
        .await;
    let token = app.login("student@test.com", "password123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/exam/{}", quiz_id),
            Some(serde_json::json!({
                "answers": [{"question_id": question_id, "selected_option": 0}],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body.pointer("/data/percentage").and_then(Value::as_f64),
        Some(100.0)
    );

    let scores = app.request("GET", "/api/scores", None, Some(&token)).await;
    assert_eq!(scores.status, StatusCode::OK);
    let list = scores
        .body
        .pointer("/data")
        .and_then(Value::as_array)
        .expect("scores array");
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn test_exam_for_empty_quiz_rejected() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    app.create_test_user("Admin", "admin@test.com", "password123", "admin")
        .await;
    let admin_token = app.login("admin@test.com", "password123").await;

    // "about" omitted on purpose: it is optional and defaults to empty.
    let subject = app
        .request(
            "POST",
            "/api/subjects",
            Some(serde_json::json!({"name": "Empty"})),
            Some(&admin_token),
        )
        .await;
    assert_eq!(subject.status, StatusCode::OK, "{:?}", subject.body);
    let subject_id = subject.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();
    let chapter = app
        .request(
            "POST",
            &format!("/api/subjects/{}/chapters", subject_id),
            Some(serde_json::json!({"name": "Empty"})),
            Some(&admin_token),
        )
        .await;
    assert_eq!(chapter.status, StatusCode::OK, "{:?}", chapter.body);
    let chapter_id = chapter.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();
    let quiz = app
        .request(
            "POST",
            "/api/quizzes",
            Some(serde_json::json!({
                "chapter_id": chapter_id,
                "title": "No questions",
                "duration_minutes": 10,
            })),
            Some(&admin_token),
        )
        .await;
    let quiz_id = quiz.body.pointer("/data/id").unwrap().as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/exam/{}", quiz_id), None, Some(&admin_token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
