//! HTTP handlers organized by domain.

pub mod auth;
pub mod chapter;
pub mod exam;
pub mod export;
pub mod health;
pub mod jobs;
pub mod question;
pub mod quiz;
pub mod subject;
pub mod user;
