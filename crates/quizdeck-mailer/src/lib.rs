//! # quizdeck-mailer
//!
//! Email delivery for QuizDeck: SMTP sending with lettre and HTML
//! templating with Handlebars.
//!
//! ## Modules
//!
//! - `sender` — SMTP transport, single and batch delivery
//! - `template` — report and reminder rendering

pub mod sender;
pub mod template;

pub use sender::{BatchOutcome, EmailMessage, Mailer};
pub use template::ReportRenderer;
