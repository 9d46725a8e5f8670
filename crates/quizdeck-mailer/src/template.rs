//! HTML report rendering with Handlebars.

use handlebars::Handlebars;
use serde_json::json;

use quizdeck_core::error::AppError;
use quizdeck_core::result::AppResult;
use quizdeck_entity::report::ReportData;

/// Template name registered for the monthly activity report.
const MONTHLY_REPORT: &str = "monthly_report";

/// Renders HTML email bodies from registered templates.
#[derive(Debug)]
pub struct ReportRenderer {
    registry: Handlebars<'static>,
}

impl ReportRenderer {
    /// Builds a renderer with all templates registered.
    ///
    /// Templates are compiled into the binary so deployment never depends
    /// on a templates directory being present at runtime.
    pub fn new() -> AppResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_template_string(
                MONTHLY_REPORT,
                include_str!("../../../templates/monthly_report.hbs"),
            )
            .map_err(|e| {
                AppError::template(format!("Failed to register monthly report template: {e}"))
            })?;
        Ok(Self { registry })
    }

    /// Renders the monthly activity report for one user.
    pub fn render_monthly_report(&self, data: &ReportData) -> AppResult<String> {
        let context = json!({
            "name": data.name,
            "month": data.month,
            "total_quizzes": data.total_quizzes,
            "average_score": format!("{:.2}", data.average_score),
            "ranking": data.ranking_display(),
            "has_scores": !data.scores.is_empty(),
            "scores": data.scores.iter().map(|s| format!("{s:.2}")).collect::<Vec<_>>(),
        });

        self.registry
            .render(MONTHLY_REPORT, &context)
            .map_err(|e| AppError::template(format!("Failed to render monthly report: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(ranking: Option<usize>, scores: Vec<f64>) -> ReportData {
        ReportData {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            total_quizzes: scores.len() as i64,
            average_score: if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            },
            ranking,
            scores,
            month: "July 2026".to_string(),
        }
    }

    #[test]
    fn test_render_includes_name_month_and_rank() {
        let renderer = ReportRenderer::new().unwrap();
        let html = renderer
            .render_monthly_report(&sample_report(Some(3), vec![80.0, 90.0]))
            .unwrap();
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("July 2026"));
        assert!(html.contains("3"));
    }

    #[test]
    fn test_render_without_scores_shows_na_ranking() {
        let renderer = ReportRenderer::new().unwrap();
        let html = renderer
            .render_monthly_report(&sample_report(None, vec![]))
            .unwrap();
        assert!(html.contains("N/A"));
    }
}
