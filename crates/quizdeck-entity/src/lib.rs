//! # quizdeck-entity
//!
//! Domain entity models for QuizDeck: users, the subject/chapter/quiz/
//! question hierarchy, recorded scores, background jobs, and the ephemeral
//! aggregate rows consumed by the report and export pipelines.

pub mod chapter;
pub mod job;
pub mod question;
pub mod quiz;
pub mod report;
pub mod score;
pub mod subject;
pub mod user;
