//! Estimate Report

use artifact_store::{AverageStatistics, NumericField};
use feature_engine::UserSelection;
use scenario_explorer::{Scenario, ScenarioOutcome};
use serde::Serialize;
use std::fmt::Write;

/// Nights a month is projected over
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Projected monthly revenue at the given occupancy percentage
pub fn monthly_revenue(nightly_price: f64, occupancy_pct: u32) -> f64 {
    nightly_price * f64::from(occupancy_pct) * DAYS_PER_MONTH / 100.0
}

/// Round to cents
fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioDelta {
    pub scenario: Scenario,
    pub label: &'static str,
    pub price: f64,
    pub delta: f64,
}

impl From<&ScenarioOutcome> for ScenarioDelta {
    fn from(outcome: &ScenarioOutcome) -> Self {
        Self {
            scenario: outcome.scenario,
            label: outcome.scenario.label(),
            price: cents(outcome.price),
            delta: cents(outcome.delta),
        }
    }
}

/// One "you vs. average" line
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub label: &'static str,
    pub you: f64,
    pub average: Option<f64>,
    pub text: String,
}

impl Comparison {
    fn against_average(
        label: &'static str,
        you: f64,
        you_text: String,
        average: Option<f64>,
        decimals: usize,
    ) -> Self {
        let avg_text = average
            .map(|a| format!("{:.*}", decimals, a))
            .unwrap_or_else(|| "n/a".to_string());
        Self {
            label,
            you,
            average,
            text: format!("{}: You = {}, Avg = {}", label, you_text, avg_text),
        }
    }

    /// Bathrooms, minimum nights, reviews and superhost status
    pub fn build(selection: &UserSelection, averages: &AverageStatistics) -> Vec<Self> {
        let superhost = if selection.host_is_superhost { "Yes" } else { "No" };
        vec![
            Self::against_average(
                "Bathrooms",
                selection.bathrooms,
                format!("{:.1}", selection.bathrooms),
                averages.get(NumericField::Bathrooms),
                1,
            ),
            Self::against_average(
                "Minimum Nights",
                f64::from(selection.minimum_nights),
                selection.minimum_nights.to_string(),
                averages.get(NumericField::MinimumNights),
                1,
            ),
            Self::against_average(
                "Reviews",
                f64::from(selection.number_of_reviews),
                selection.number_of_reviews.to_string(),
                averages.get(NumericField::NumberOfReviews),
                0,
            ),
            Self {
                label: "Superhost",
                you: selection.numeric_value(NumericField::HostIsSuperhost),
                average: None,
                text: format!("Superhost: {}", superhost),
            },
        ]
    }
}

/// Everything shown for one selection
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub selection: UserSelection,
    pub baseline_price: f64,
    pub scenarios: Vec<ScenarioDelta>,
    pub comparisons: Vec<Comparison>,
    pub occupancy_pct: u32,
    pub monthly_revenue: f64,
}

impl EstimateReport {
    pub fn new(
        selection: UserSelection,
        baseline_price: f64,
        outcomes: &[ScenarioOutcome],
        averages: &AverageStatistics,
        occupancy_pct: u32,
    ) -> Self {
        let comparisons = Comparison::build(&selection, averages);
        Self {
            selection,
            baseline_price: cents(baseline_price),
            scenarios: outcomes.iter().map(ScenarioDelta::from).collect(),
            comparisons,
            occupancy_pct,
            monthly_revenue: cents(monthly_revenue(baseline_price, occupancy_pct)),
        }
    }

    /// Plain-text rendering
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Estimated Nightly Price: ${:.2}", self.baseline_price);

        let _ = writeln!(out, "\nFeature Impact Simulator");
        for s in &self.scenarios {
            let _ = writeln!(out, "{}: ${:+.2}", s.label, s.delta);
        }

        let _ = writeln!(out, "\nYour Property vs. Average");
        for c in &self.comparisons {
            let _ = writeln!(out, "{}", c.text);
        }

        let _ = writeln!(out, "\nMonthly Revenue Projection");
        let _ = writeln!(out, "Estimated Occupancy: {}%", self.occupancy_pct);
        let _ = writeln!(out, "Projected Monthly Revenue: ${:.2}", self.monthly_revenue);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn averages() -> AverageStatistics {
        let mut values = BTreeMap::new();
        values.insert("bathrooms".to_string(), 1.27);
        values.insert("minimum_nights".to_string(), 18.44);
        values.insert("number_of_reviews".to_string(), 36.6);
        AverageStatistics::new(values)
    }

    #[test]
    fn test_monthly_revenue() {
        assert_eq!(monthly_revenue(100.0, 70), 2100.0);
        assert_eq!(format!("{:.2}", monthly_revenue(100.0, 70)), "2100.00");
        assert_eq!(monthly_revenue(90.0, 100), 2700.0);
    }

    #[test]
    fn test_comparisons() {
        let comparisons = Comparison::build(&UserSelection::default(), &averages());
        let lines: Vec<&str> = comparisons.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            lines,
            vec![
                "Bathrooms: You = 1.0, Avg = 1.3",
                "Minimum Nights: You = 14, Avg = 18.4",
                "Reviews: You = 50, Avg = 37",
                "Superhost: No",
            ]
        );
    }

    #[test]
    fn test_render_text() {
        let outcomes = vec![
            ScenarioOutcome {
                scenario: Scenario::SwitchToEntirePlace,
                price: 160.0,
                delta: 70.0,
            },
            ScenarioOutcome {
                scenario: Scenario::FewerMinimumNights,
                price: 87.5,
                delta: -2.5,
            },
        ];
        let report = EstimateReport::new(UserSelection::default(), 90.0, &outcomes, &averages(), 70);
        let text = report.render_text();

        assert!(text.starts_with("Estimated Nightly Price: $90.00\n"));
        assert!(text.contains("Switch to Entire Place: $+70.00\n"));
        assert!(text.contains("-1 Minimum Night: $-2.50\n"));
        assert!(text.contains("Superhost: No\n"));
        assert!(text.ends_with("Projected Monthly Revenue: $1890.00\n"));
    }
}
