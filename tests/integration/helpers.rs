//! Shared test helpers for integration tests.
//!
//! These tests need a real PostgreSQL instance. Set
//! `QUIZDECK_TEST_DATABASE_URL` to run them; without it every test
//! returns early.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use quizdeck_core::config::{AppConfig, AuthConfig, DatabaseConfig};

/// All tests share one database, so they must not interleave.
static DB_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    /// Held for the lifetime of the test to serialize database access
    _db_lock: tokio::sync::MutexGuard<'static, ()>,
}

impl TestApp {
    /// Create a new test application, or `None` when no test database
    /// is configured.
    pub async fn try_new() -> Option<Self> {
        let url = match std::env::var("QUIZDECK_TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("QUIZDECK_TEST_DATABASE_URL not set, skipping integration test");
                return None;
            }
        };

        let db_lock = DB_LOCK.lock().await;

        let config = test_config(url);

        let db = quizdeck_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = db.into_pool();

        quizdeck_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let user_repo = Arc::new(
            quizdeck_database::repositories::user::UserRepository::new(db_pool.clone()),
        );
        let subject_repo = Arc::new(
            quizdeck_database::repositories::subject::SubjectRepository::new(db_pool.clone()),
        );
        let chapter_repo = Arc::new(
            quizdeck_database::repositories::chapter::ChapterRepository::new(db_pool.clone()),
        );
        let quiz_repo = Arc::new(
            quizdeck_database::repositories::quiz::QuizRepository::new(db_pool.clone()),
        );
        let question_repo = Arc::new(
            quizdeck_database::repositories::question::QuestionRepository::new(db_pool.clone()),
        );
        let score_repo = Arc::new(
            quizdeck_database::repositories::score::ScoreRepository::new(db_pool.clone()),
        );
        let job_repo = Arc::new(quizdeck_database::repositories::job::JobRepository::new(
            db_pool.clone(),
        ));

        let jwt_encoder = Arc::new(quizdeck_auth::jwt::encoder::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(quizdeck_auth::jwt::decoder::JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(quizdeck_auth::password::hasher::PasswordHasher::new());
        let password_validator =
            Arc::new(quizdeck_auth::password::validator::PasswordValidator::new());

        let job_queue = Arc::new(quizdeck_worker::queue::JobQueue::new(
            Arc::clone(&job_repo),
            "test-worker".to_string(),
        ));

        let app_state = quizdeck_api::state::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
            jwt_encoder,
            jwt_decoder,
            password_hasher,
            password_validator,
            user_repo,
            subject_repo,
            chapter_repo,
            quiz_repo,
            question_repo,
            score_repo,
            job_repo,
            job_queue,
        };

        let router = quizdeck_api::router::build_router(app_state);

        Some(Self {
            router,
            db_pool,
            config,
            _db_lock: db_lock,
        })
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "jobs",
            "scores",
            "questions",
            "quizzes",
            "chapters",
            "subjects",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {}", table);
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a test user and return their ID
    pub async fn create_test_user(&self, name: &str, email: &str, password: &str, role: &str) -> Uuid {
        let hasher = quizdeck_auth::password::hasher::PasswordHasher::new();
        let hash = hasher
            .hash_password(password)
            .expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO users (id, full_name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5::user_role)",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(&hash)
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");

        id
    }

    /// Login and return a JWT token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .pointer("/data/token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Build an isolated configuration for the test run
fn test_config(database_url: String) -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 5,
            idle_timeout_seconds: 60,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            token_ttl_hours: 1,
        },
        smtp: Default::default(),
        worker: Default::default(),
        export: Default::default(),
        logging: Default::default(),
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
