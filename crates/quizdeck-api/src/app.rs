//! Application builder — wires repositories, auth, mailer, worker, and
//! scheduler into a running Axum server.

use std::sync::Arc;

use tokio::sync::watch;

use quizdeck_core::config::AppConfig;
use quizdeck_core::error::AppError;
use quizdeck_database::migration::run_migrations;
use quizdeck_database::repositories::{chapter, job, question, quiz, score, subject, user};
use quizdeck_database::DatabasePool;
use quizdeck_mailer::{Mailer, ReportRenderer};
use quizdeck_worker::jobs::{
    ExportCleanupHandler, ExportJobHandler, JobHistoryCleanupHandler, ReminderJobHandler,
    ReportJobHandler,
};

use crate::router::build_router;
use crate::state::AppState;

/// Runs the QuizDeck server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting QuizDeck server...");

    // ── Step 1: Database ─────────────────────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(user::UserRepository::new(db_pool.clone()));
    let subject_repo = Arc::new(subject::SubjectRepository::new(db_pool.clone()));
    let chapter_repo = Arc::new(chapter::ChapterRepository::new(db_pool.clone()));
    let quiz_repo = Arc::new(quiz::QuizRepository::new(db_pool.clone()));
    let question_repo = Arc::new(question::QuestionRepository::new(db_pool.clone()));
    let score_repo = Arc::new(score::ScoreRepository::new(db_pool.clone()));
    let job_repo = Arc::new(job::JobRepository::new(db_pool.clone()));

    // ── Step 3: Auth ─────────────────────────────────────────────
    let jwt_encoder = Arc::new(quizdeck_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(quizdeck_auth::jwt::decoder::JwtDecoder::new(&config.auth));
    let password_hasher = Arc::new(quizdeck_auth::password::hasher::PasswordHasher::new());
    let password_validator = Arc::new(quizdeck_auth::password::validator::PasswordValidator::new());

    // ── Step 4: Mailer ───────────────────────────────────────────
    let mailer = Arc::new(Mailer::new(&config.smtp)?);
    let renderer = Arc::new(ReportRenderer::new()?);

    // ── Step 5: Job queue, worker, and scheduler ─────────────────
    let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let job_queue = Arc::new(quizdeck_worker::queue::JobQueue::new(
        Arc::clone(&job_repo),
        worker_id.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let _worker_handle = if config.worker.enabled {
        let mut job_executor = quizdeck_worker::executor::JobExecutor::new();

        job_executor.register(Arc::new(ReminderJobHandler::new(
            Arc::clone(&quiz_repo),
            Arc::clone(&user_repo),
            Arc::clone(&mailer),
        )));
        job_executor.register(Arc::new(ReportJobHandler::new(
            Arc::clone(&user_repo),
            Arc::clone(&score_repo),
            Arc::clone(&mailer),
            Arc::clone(&renderer),
        )));
        job_executor.register(Arc::new(ExportJobHandler::new(
            Arc::clone(&score_repo),
            config.export.clone(),
        )));
        job_executor.register(Arc::new(ExportCleanupHandler::new(config.export.clone())));
        job_executor.register(Arc::new(JobHistoryCleanupHandler::new(Arc::clone(
            &job_repo,
        ))));

        let job_executor = Arc::new(job_executor);
        let worker_runner = quizdeck_worker::runner::WorkerRunner::new(
            Arc::clone(&job_queue),
            job_executor,
            config.worker.clone(),
            worker_id,
        );

        let worker_cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            worker_runner.run(worker_cancel).await;
        }))
    } else {
        tracing::warn!("Worker disabled; background jobs will not run on this instance");
        None
    };

    let scheduler = if config.worker.scheduler_enabled {
        let scheduler =
            quizdeck_worker::scheduler::PeriodicScheduler::new(Arc::clone(&job_queue)).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        None
    };

    // ── Step 6: HTTP server ──────────────────────────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
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

    let app = build_router(app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("QuizDeck server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
