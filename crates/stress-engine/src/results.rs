//! Stress test results.

use serde::{Deserialize, Serialize};
use stress_core::{AggregationType, StressColumn};
use stress_pricing::InstrumentKind;

/// P&L of one position across the scenario's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionPnl {
    /// Position id.
    pub position_id: String,
    /// Underlying symbol.
    pub underlying: String,
    /// Instrument kind.
    pub instrument_type: InstrumentKind,
    /// Position quantity.
    pub quantity: f64,
    /// Position value at unstressed parameters.
    pub base_value: f64,
    /// P&L per column.
    pub pnl: Vec<f64>,
}

impl PositionPnl {
    /// Largest loss (most negative P&L), or 0 if the position never loses.
    #[must_use]
    pub fn max_loss(&self) -> f64 {
        self.pnl.iter().copied().fold(0.0, f64::min)
    }

    /// Largest gain, or 0 if the position never gains.
    #[must_use]
    pub fn max_gain(&self) -> f64 {
        self.pnl.iter().copied().fold(0.0, f64::max)
    }
}

/// Summed P&L for one aggregation key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatePnl {
    /// Underlying symbol, factor name or `total`.
    pub key: String,
    /// P&L per column.
    pub pnl: Vec<f64>,
}

/// Results of running one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResults {
    /// Scenario name.
    pub scenario_name: String,
    /// How positions were aggregated.
    pub aggregation: AggregationType,
    /// Stress levels, in column order.
    pub columns: Vec<StressColumn>,
    /// Per-position P&L, in portfolio order.
    pub positions: Vec<PositionPnl>,
    /// Aggregated P&L rows.
    pub aggregates: Vec<AggregatePnl>,
}

impl ScenarioResults {
    /// Number of stress columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column labels.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Portfolio P&L per column.
    #[must_use]
    pub fn total_pnl(&self) -> Vec<f64> {
        let mut total = vec![0.0; self.columns.len()];
        for position in &self.positions {
            for (acc, pnl) in total.iter_mut().zip(&position.pnl) {
                *acc += pnl;
            }
        }
        total
    }

    /// Column with the lowest portfolio P&L.
    #[must_use]
    pub fn worst_case(&self) -> Option<(&StressColumn, f64)> {
        self.columns
            .iter()
            .zip(self.total_pnl())
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Column with the highest portfolio P&L.
    #[must_use]
    pub fn best_case(&self) -> Option<(&StressColumn, f64)> {
        self.columns
            .iter()
            .zip(self.total_pnl())
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Results for one position.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<&PositionPnl> {
        self.positions.iter().find(|p| p.position_id == id)
    }

    /// Aggregate row for one key.
    #[must_use]
    pub fn aggregate(&self, key: &str) -> Option<&AggregatePnl> {
        self.aggregates.iter().find(|a| a.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> ScenarioResults {
        ScenarioResults {
            scenario_name: "test".into(),
            aggregation: AggregationType::Total,
            columns: vec![
                StressColumn::from_fraction(-1.0),
                StressColumn::from_fraction(0.0),
                StressColumn::from_fraction(1.0),
            ],
            positions: vec![
                PositionPnl {
                    position_id: "a".into(),
                    underlying: "AAPL".into(),
                    instrument_type: InstrumentKind::Equity,
                    quantity: 10.0,
                    base_value: 1000.0,
                    pnl: vec![-100.0, 0.0, 100.0],
                },
                PositionPnl {
                    position_id: "b".into(),
                    underlying: "MSFT".into(),
                    instrument_type: InstrumentKind::Option,
                    quantity: -1.0,
                    base_value: -50.0,
                    pnl: vec![20.0, 0.0, -30.0],
                },
            ],
            aggregates: vec![AggregatePnl {
                key: "total".into(),
                pnl: vec![-80.0, 0.0, 70.0],
            }],
        }
    }

    #[test]
    fn test_total_and_extremes() {
        let r = results();
        assert_eq!(r.total_pnl(), vec![-80.0, 0.0, 70.0]);

        let (col, pnl) = r.worst_case().unwrap();
        assert_eq!(col.label, "-1.000");
        assert_eq!(pnl, -80.0);

        let (col, pnl) = r.best_case().unwrap();
        assert_eq!(col.label, "1.000");
        assert_eq!(pnl, 70.0);
    }

    #[test]
    fn test_lookup() {
        let r = results();
        assert_eq!(r.position("b").unwrap().max_loss(), -30.0);
        assert_eq!(r.position("a").unwrap().max_gain(), 100.0);
        assert!(r.position("c").is_none());
        assert!(r.aggregate("total").is_some());
        assert_eq!(r.labels(), ["-1.000", "0.000", "1.000"]);
    }

    #[test]
    fn test_empty_results() {
        let r = ScenarioResults {
            columns: Vec::new(),
            positions: Vec::new(),
            aggregates: Vec::new(),
            ..results()
        };
        assert!(r.worst_case().is_none());
        assert!(r.total_pnl().is_empty());
    }
}
