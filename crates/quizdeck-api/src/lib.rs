//! # quizdeck-api
//!
//! HTTP API layer for QuizDeck built on Axum: routes, handlers, DTOs,
//! the shared application state, and the server entry point that wires
//! the database, mailer, worker, and scheduler together.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::run_server;
pub use state::AppState;
