//! Monthly activity report job: render and email each user a summary of
//! last month's quiz activity.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde_json::Value;
use tracing;
use uuid::Uuid;

use quizdeck_database::repositories::score::ScoreRepository;
use quizdeck_database::repositories::user::UserRepository;
use quizdeck_entity::job::model::Job;
use quizdeck_entity::report::ReportData;
use quizdeck_entity::user::UserRole;
use quizdeck_mailer::sender::BatchOutcome;
use quizdeck_mailer::{EmailMessage, Mailer, ReportRenderer};

use crate::executor::{JobExecutionError, JobHandler};

/// Computes the previous calendar month as a half-open UTC window
/// `[first of previous month, first of current month)`.
pub fn previous_month_range(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let first_of_current = midnight - Duration::days(now.day0() as i64);
    let last_of_previous = first_of_current - Duration::days(1);
    let first_of_previous = last_of_previous - Duration::days(last_of_previous.day0() as i64);
    (first_of_previous, first_of_current)
}

/// Human-readable label for the month a window starts in, e.g. "July 2026".
pub fn month_label(start: DateTime<Utc>) -> String {
    start.format("%B %Y").to_string()
}

/// Ranks users by average percentage, highest first.
///
/// Uses competition ranking: equal averages share a rank and the next
/// distinct average skips the tied positions.
pub fn compute_rankings(averages: &[(Uuid, f64)]) -> HashMap<Uuid, usize> {
    let mut sorted: Vec<(Uuid, f64)> = averages.to_vec();
    sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut rankings = HashMap::with_capacity(sorted.len());
    let mut previous: Option<(f64, usize)> = None;
    for (position, (user_id, average)) in sorted.into_iter().enumerate() {
        let rank = match previous {
            Some((prev_avg, prev_rank)) if prev_avg == average => prev_rank,
            _ => position + 1,
        };
        rankings.insert(user_id, rank);
        previous = Some((average, rank));
    }
    rankings
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Handles the monthly report job.
#[derive(Debug)]
pub struct ReportJobHandler {
    user_repo: Arc<UserRepository>,
    score_repo: Arc<ScoreRepository>,
    mailer: Arc<Mailer>,
    renderer: Arc<ReportRenderer>,
}

impl ReportJobHandler {
    /// Create a new report job handler
    pub fn new(
        user_repo: Arc<UserRepository>,
        score_repo: Arc<ScoreRepository>,
        mailer: Arc<Mailer>,
        renderer: Arc<ReportRenderer>,
    ) -> Self {
        Self {
            user_repo,
            score_repo,
            mailer,
            renderer,
        }
    }
}

#[async_trait]
impl JobHandler for ReportJobHandler {
    fn job_type(&self) -> &str {
        "monthly_report"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let (start, end) = previous_month_range(Utc::now());
        let month = month_label(start);
        tracing::info!("Generating monthly reports for {}", month);

        let averages = self
            .score_repo
            .user_averages_in_range(start, end)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Failed to query averages: {e}")))?;

        let rankings = compute_rankings(
            &averages
                .iter()
                .map(|a| (a.user_id, a.average_score))
                .collect::<Vec<_>>(),
        );

        let users = self
            .user_repo
            .find_by_role(UserRole::User)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Failed to list users: {e}")))?;

        let mut outcome = BatchOutcome::default();

        for user in &users {
            let scores = self
                .score_repo
                .percentages_in_range(user.id, start, end)
                .await
                .map_err(|e| {
                    JobExecutionError::Transient(format!("Failed to query scores: {e}"))
                })?;

            let average = if scores.is_empty() {
                0.0
            } else {
                round2(scores.iter().sum::<f64>() / scores.len() as f64)
            };

            let report = ReportData {
                name: user.full_name.clone(),
                email: user.email.clone(),
                total_quizzes: scores.len() as i64,
                average_score: average,
                ranking: rankings.get(&user.id).copied(),
                scores,
                month: month.clone(),
            };

            let html = self.renderer.render_monthly_report(&report)?;
            let message = EmailMessage::text(
                user.email.clone(),
                format!("Your QuizDeck activity report for {month}"),
                format!(
                    "Hello {},\n\nYou took {} quizzes in {} with an average score of \
                     {:.2}%. Your ranking: {}.\n\n— The QuizDeck team\n",
                    user.full_name,
                    report.total_quizzes,
                    month,
                    report.average_score,
                    report.ranking_display(),
                ),
            )
            .with_html(html);

            match self.mailer.send(&message).await {
                Ok(()) => outcome.sent += 1,
                Err(e) => {
                    tracing::warn!("Report email to {} failed: {}", user.email, e);
                    outcome.failed.push((user.email.clone(), e.to_string()));
                }
            }
        }

        if outcome.all_failed() {
            return Err(JobExecutionError::Transient(format!(
                "All {} report emails failed to send",
                outcome.attempted()
            )));
        }

        tracing::info!(
            "Monthly reports sent for {}: {} delivered, {} failed",
            month,
            outcome.sent,
            outcome.failed.len()
        );

        Ok(Some(serde_json::json!({
            "task": "monthly_report",
            "month": month,
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
    fn test_previous_month_range_mid_month() {
        let now = Utc.with_ymd_and_hms(2026, 8, 23, 14, 5, 0).unwrap();
        let (start, end) = previous_month_range(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_previous_month_range_across_year_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let (start, end) = previous_month_range(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_label() {
        let start = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(month_label(start), "July 2026");
    }

    #[test]
    fn test_rankings_highest_average_first() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let rankings = compute_rankings(&[(a, 60.0), (b, 90.0), (c, 75.0)]);
        assert_eq!(rankings[&b], 1);
        assert_eq!(rankings[&c], 2);
        assert_eq!(rankings[&a], 3);
    }

    #[test]
    fn test_rankings_ties_share_rank() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let rankings = compute_rankings(&[(a, 80.0), (b, 80.0), (c, 70.0)]);
        assert_eq!(rankings[&a], rankings[&b]);
        assert_eq!(rankings[&c], 3);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(75.5555), 75.56);
        assert_eq!(round2(75.554), 75.55);
        assert_eq!(round2(0.0), 0.0);
    }
}
