//! Daily reminder job: email users when new quizzes appeared since the
//! last reminder fired.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde_json::Value;
use tracing;

use quizdeck_database::repositories::quiz::QuizRepository;
use quizdeck_database::repositories::user::UserRepository;
use quizdeck_entity::job::model::Job;
use quizdeck_entity::quiz::Quiz;
use quizdeck_entity::user::UserRole;
use quizdeck_mailer::{EmailMessage, Mailer};

use crate::executor::{JobExecutionError, JobHandler};

/// Minutes past midnight when the reminder fires (19:30).
const BOUNDARY_MINUTES: i64 = 19 * 60 + 30;

/// Computes the reminder window `[start, end)` for a given instant.
///
/// The window ends at the most recent 19:30 boundary at or before `now`
/// and spans exactly one day, so consecutive daily runs tile the
/// timeline with no gaps or overlaps.
pub fn reminder_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let mut end = midnight + Duration::minutes(BOUNDARY_MINUTES);
    if end > now {
        end -= Duration::days(1);
    }
    (end - Duration::days(1), end)
}

/// Builds the reminder email body listing the new quizzes.
pub fn reminder_body(name: &str, quizzes: &[Quiz]) -> String {
    let mut body = format!(
        "Hello {name},\n\n\
         {count} new quiz{plural} appeared on QuizDeck since yesterday:\n\n",
        count = quizzes.len(),
        plural = if quizzes.len() == 1 { "" } else { "zes" },
    );
    for quiz in quizzes {
        body.push_str(&format!(
            "  - {} ({} min)\n",
            quiz.title, quiz.duration_minutes
        ));
    }
    body.push_str("\nLog in and give them a try!\n\n— The QuizDeck team\n");
    body
}

/// Handles the daily reminder job.
#[derive(Debug)]
pub struct ReminderJobHandler {
    quiz_repo: Arc<QuizRepository>,
    user_repo: Arc<UserRepository>,
    mailer: Arc<Mailer>,
}

impl ReminderJobHandler {
    /// Create a new reminder job handler
    pub fn new(
        quiz_repo: Arc<QuizRepository>,
        user_repo: Arc<UserRepository>,
        mailer: Arc<Mailer>,
    ) -> Self {
        Self {
            quiz_repo,
            user_repo,
            mailer,
        }
    }
}

#[async_trait]
impl JobHandler for ReminderJobHandler {
    fn job_type(&self) -> &str {
        "daily_reminder"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let (start, end) = reminder_window(Utc::now());
        tracing::info!("Running daily reminder for window {} .. {}", start, end);

        let quizzes = self
            .quiz_repo
            .find_created_between(start, end)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Failed to query quizzes: {e}")))?;

        if quizzes.is_empty() {
            tracing::info!("No new quizzes in window, skipping reminder emails");
            return Ok(Some(serde_json::json!({
                "task": "daily_reminder",
                "new_quizzes": 0,
                "emails_sent": 0,
            })));
        }

        let users = self
            .user_repo
            .find_by_role(UserRole::User)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Failed to list users: {e}")))?;

        let messages: Vec<EmailMessage> = users
            .iter()
            .map(|user| {
                EmailMessage::text(
                    user.email.clone(),
                    format!("{} new quizzes are waiting for you", quizzes.len()),
                    reminder_body(&user.full_name, &quizzes),
                )
            })
            .collect();

        let outcome = self.mailer.send_batch(&messages).await;

        if outcome.all_failed() {
            return Err(JobExecutionError::Transient(format!(
                "All {} reminder emails failed to send",
                outcome.attempted()
            )));
        }

        tracing::info!(
            "Daily reminder sent: {} delivered, {} failed",
            outcome.sent,
            outcome.failed.len()
        );

        Ok(Some(serde_json::json!({
            "task": "daily_reminder",
            "new_quizzes": quizzes.len(),
            "emails_sent": outcome.sent,
            "emails_failed": outcome.failed,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_before_boundary_ends_yesterday() {
        let now = Utc.with_ymd_and_hms(2026, 7, 10, 9, 0, 0).unwrap();
        let (start, end) = reminder_window(now);
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 7, 9, 19, 30, 0).unwrap());
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 7, 8, 19, 30, 0).unwrap());
    }

    #[test]
    fn test_window_at_boundary_ends_today() {
        let now = Utc.with_ymd_and_hms(2026, 7, 10, 19, 30, 0).unwrap();
        let (start, end) = reminder_window(now);
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 7, 10, 19, 30, 0).unwrap());
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 7, 9, 19, 30, 0).unwrap());
    }

    #[test]
    fn test_consecutive_windows_tile_without_gaps() {
        let run1 = Utc.with_ymd_and_hms(2026, 7, 10, 19, 30, 5).unwrap();
        let run2 = run1 + Duration::days(1);
        let (_, end1) = reminder_window(run1);
        let (start2, _) = reminder_window(run2);
        assert_eq!(end1, start2);
    }

    #[test]
    fn test_body_lists_quiz_titles() {
        let quiz = Quiz {
            id: uuid::Uuid::new_v4(),
            chapter_id: uuid::Uuid::new_v4(),
            title: "Algebra Basics".to_string(),
            duration_minutes: 15,
            remarks: None,
            created_at: Utc::now(),
        };
        let body = reminder_body("Ada", std::slice::from_ref(&quiz));
        assert!(body.contains("Hello Ada"));
        assert!(body.contains("Algebra Basics"));
        assert!(body.contains("1 new quiz appeared"));
    }
}
