//! Built-in job handler implementations.

pub mod cleanup;
pub mod export;
pub mod reminder;
pub mod report;

pub use cleanup::{ExportCleanupHandler, JobHistoryCleanupHandler};
pub use export::ExportJobHandler;
pub use reminder::ReminderJobHandler;
pub use report::ReportJobHandler;
