//! Background job processing and scheduled tasks for QuizDeck.
//!
//! This crate provides:
//! - A worker runner that polls for and executes queued jobs
//! - A cron scheduler that enqueues the periodic reminder, report, and
//!   cleanup jobs
//! - A job executor that dispatches jobs to the correct handler
//! - Built-in job implementations for reminders, monthly reports, CSV
//!   export, and housekeeping

pub mod executor;
pub mod jobs;
pub mod queue;
pub mod runner;
pub mod scheduler;
pub mod wait;

pub use runner::WorkerRunner;
pub use scheduler::PeriodicScheduler;
pub use wait::wait_for_completion;
