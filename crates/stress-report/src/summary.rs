//! Per-aggregate summary of stress results.

use serde::{Deserialize, Serialize};
use stress_engine::ScenarioResults;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Extremes of one aggregate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub struct SummaryRow {
    /// Aggregation key.
    #[tabled(rename = "Underlying")]
    pub key: String,
    /// Lowest P&L.
    #[tabled(rename = "Max Loss", display_with = "fmt_money")]
    pub max_loss: f64,
    /// Column label of the lowest P&L.
    #[tabled(rename = "Max Loss Stress")]
    pub max_loss_at: String,
    /// Highest P&L.
    #[tabled(rename = "Max Gain", display_with = "fmt_money")]
    pub max_gain: f64,
    /// Column label of the highest P&L.
    #[tabled(rename = "Max Gain Stress")]
    pub max_gain_at: String,
    /// Highest minus lowest P&L.
    #[tabled(rename = "Range", display_with = "fmt_money")]
    pub range: f64,
}

fn fmt_money(value: &f64) -> String {
    format!("{value:.2}")
}

/// Summarizes each aggregate row: worst and best column and the spread
/// between them. Ties resolve to the first column.
#[must_use]
pub fn summarize_results(results: &ScenarioResults) -> Vec<SummaryRow> {
    let labels = results.labels();
    results
        .aggregates
        .iter()
        .filter_map(|agg| {
            let (lo, hi) = extremes(&agg.pnl)?;
            Some(SummaryRow {
                key: agg.key.clone(),
                max_loss: agg.pnl[lo],
                max_loss_at: labels.get(lo).map(|s| s.to_string()).unwrap_or_default(),
                max_gain: agg.pnl[hi],
                max_gain_at: labels.get(hi).map(|s| s.to_string()).unwrap_or_default(),
                range: agg.pnl[hi] - agg.pnl[lo],
            })
        })
        .collect()
}

/// Renders a summary as a text table.
#[must_use]
pub fn summary_table(rows: &[SummaryRow]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Indices of the first minimum and first maximum.
fn extremes(values: &[f64]) -> Option<(usize, usize)> {
    let first = *values.first()?;
    let (mut lo, mut hi) = (0, 0);
    let (mut min, mut max) = (first, first);
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < min {
            min = v;
            lo = i;
        }
        if v > max {
            max = v;
            hi = i;
        }
    }
    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_results;

    #[test]
    fn test_summary() {
        let rows = summarize_results(&sample_results());
        assert_eq!(rows.len(), 2);

        let aapl = &rows[0];
        assert_eq!(aapl.key, "AAPL");
        assert_eq!(aapl.max_loss, -690.0);
        assert_eq!(aapl.max_loss_at, "-0.050");
        assert_eq!(aapl.max_gain, 810.0);
        assert_eq!(aapl.max_gain_at, "0.050");
        assert_eq!(aapl.range, 1500.0);
    }

    #[test]
    fn test_ties_pick_first_column() {
        assert_eq!(extremes(&[1.0, 1.0, 1.0]), Some((0, 0)));
        assert_eq!(extremes(&[2.0, -1.0, -1.0, 3.0, 3.0]), Some((1, 3)));
        assert_eq!(extremes(&[]), None);
    }

    #[test]
    fn test_summary_table() {
        let text = summary_table(&summarize_results(&sample_results()));
        assert!(text.contains("Max Loss Stress"));
        assert!(text.contains("-690.00"));
    }
}
