//! Cross-scenario comparison of position P&L.

use serde::{Deserialize, Serialize};
use stress_engine::ScenarioResults;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Selects which positions to compare.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareFilter {
    /// Keep only positions on this underlying.
    pub underlying: Option<String>,
    /// Keep only this position.
    pub position_id: Option<String>,
}

impl CompareFilter {
    /// A filter that keeps every position.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one underlying.
    #[must_use]
    pub fn underlying(mut self, symbol: impl Into<String>) -> Self {
        self.underlying = Some(symbol.into());
        self
    }

    /// Restricts to one position.
    #[must_use]
    pub fn position(mut self, id: impl Into<String>) -> Self {
        self.position_id = Some(id.into());
        self
    }

    fn matches(&self, underlying: &str, position_id: &str) -> bool {
        self.underlying.as_deref().map_or(true, |u| u == underlying)
            && self.position_id.as_deref().map_or(true, |p| p == position_id)
    }
}

/// P&L of one position across a scenario's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlSeries {
    /// `{underlying} - {position_id}`.
    pub label: String,
    /// P&L per column.
    pub pnl: Vec<f64>,
}

/// Filtered position series for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// Scenario name.
    pub scenario_name: String,
    /// Column labels.
    pub columns: Vec<String>,
    /// Matching positions.
    pub series: Vec<PnlSeries>,
}

impl ScenarioComparison {
    /// Renders as a text table, one row per series.
    #[must_use]
    pub fn to_table_string(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(std::iter::once(self.scenario_name.clone()).chain(self.columns.iter().cloned()));
        for series in &self.series {
            builder.push_record(
                std::iter::once(series.label.clone())
                    .chain(series.pnl.iter().map(|v| format!("{v:.2}"))),
            );
        }
        builder.build().with(Style::rounded()).to_string()
    }
}

/// Extracts per-scenario P&L series for the positions matching `filter`.
///
/// Scenarios are returned in input order, including those where nothing
/// matches.
#[must_use]
pub fn compare_scenarios(results: &[ScenarioResults], filter: &CompareFilter) -> Vec<ScenarioComparison> {
    results
        .iter()
        .map(|r| ScenarioComparison {
            scenario_name: r.scenario_name.clone(),
            columns: r.labels().into_iter().map(str::to_string).collect(),
            series: r
                .positions
                .iter()
                .filter(|p| filter.matches(&p.underlying, &p.position_id))
                .map(|p| PnlSeries {
                    label: format!("{} - {}", p.underlying, p.position_id),
                    pnl: p.pnl.clone(),
                })
                .collect(),
        })
        .collect()
}
