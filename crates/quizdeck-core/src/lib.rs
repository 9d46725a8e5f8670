//! # quizdeck-core
//!
//! Core crate for QuizDeck. Contains configuration schemas and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other QuizDeck crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
