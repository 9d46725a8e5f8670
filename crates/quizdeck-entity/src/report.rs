//! Ephemeral aggregate rows for the report and export pipelines.
//!
//! Neither type is persisted: an [`ExportRow`] lives inside an export job
//! payload until the CSV is written, and a [`ReportData`] lives for one
//! template render + send.

use serde::{Deserialize, Serialize};

/// One per-user line of the admin CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    /// User's full name.
    pub name: String,
    /// User's email address.
    pub email: String,
    /// Count of graded quiz attempts.
    pub total_quizzes: i64,
    /// Mean percentage across attempts, 0.0 when there are none.
    pub average_score: f64,
}

/// Everything the monthly report template needs for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    /// User's full name.
    pub name: String,
    /// User's email address.
    pub email: String,
    /// Graded attempts inside the report month.
    pub total_quizzes: i64,
    /// Mean percentage inside the report month, rounded to 2 decimals.
    pub average_score: f64,
    /// 1-based rank by monthly average, `None` when the user has no
    /// in-window attempts. Renders as "N/A".
    pub ranking: Option<usize>,
    /// The individual percentages behind the average.
    pub scores: Vec<f64>,
    /// Human-readable report month, e.g. "July 2026".
    pub month: String,
}

impl ReportData {
    /// The rank as the template displays it.
    pub fn ranking_display(&self) -> String {
        match self.ranking {
            Some(r) => r.to_string(),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_display() {
        let mut data = ReportData {
            name: "A".into(),
            email: "a@x.com".into(),
            total_quizzes: 0,
            average_score: 0.0,
            ranking: None,
            scores: vec![],
            month: "July 2026".into(),
        };
        assert_eq!(data.ranking_display(), "N/A");
        data.ranking = Some(3);
        assert_eq!(data.ranking_display(), "3");
    }
}
