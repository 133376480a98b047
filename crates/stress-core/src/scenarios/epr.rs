//! Expected price range (EPR) scenarios.
//!
//! Each underlying is stressed by fractions of its own EPR, so a 40% EPR
//! name moves twice as far as a 20% EPR name at the same fraction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::StressResult;
use crate::types::{IdiosyncraticGrid, StressScenario, UnderlyingGrid};

/// Fraction grid for custom EPR scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EprGrid {
    /// Same fractions for every underlying.
    Shared(Vec<f64>),
    /// Fractions per underlying; missing symbols use `[-1, 1]`.
    PerSymbol(BTreeMap<String, Vec<f64>>),
}

impl EprGrid {
    fn fractions_for(&self, symbol: &str) -> Vec<f64> {
        match self {
            EprGrid::Shared(fractions) => fractions.clone(),
            EprGrid::PerSymbol(map) => map
                .get(symbol)
                .cloned()
                .unwrap_or_else(|| vec![-1.0, 1.0]),
        }
    }
}

/// EPR fractions: `±k/n_steps` for `k = 1..=n_steps`, ascending.
///
/// `n_steps == 0` yields the bounds `[-1, 1]` only.
#[must_use]
pub fn epr_fractions(n_steps: usize, include_base: bool) -> Vec<f64> {
    if n_steps == 0 {
        return vec![-1.0, 1.0];
    }

    let steps = n_steps as f64;
    let down = (1..=n_steps).rev().map(|k| -(k as f64) / steps);
    let base = include_base.then_some(0.0);
    let up = (1..=n_steps).map(|k| k as f64 / steps);
    down.chain(base).chain(up).collect()
}

/// Builds an idiosyncratic scenario stepping each underlying through its EPR.
pub fn build_epr_stress_scenario(
    name: impl Into<String>,
    epr_map: &BTreeMap<String, f64>,
    n_steps: usize,
    include_base: bool,
) -> StressResult<StressScenario> {
    let fractions = epr_fractions(n_steps, include_base);
    build_epr_stress_scenario_custom(name, epr_map, &EprGrid::Shared(fractions))
}

/// Builds an idiosyncratic scenario from explicit EPR fractions.
pub fn build_epr_stress_scenario_custom(
    name: impl Into<String>,
    epr_map: &BTreeMap<String, f64>,
    grid: &EprGrid,
) -> StressResult<StressScenario> {
    let underlyings = epr_map
        .iter()
        .map(|(symbol, &epr)| {
            (
                symbol.clone(),
                UnderlyingGrid::new(epr, grid.fractions_for(symbol)),
            )
        })
        .collect();

    let scenario = StressScenario::idiosyncratic(name, IdiosyncraticGrid::new(underlyings)?);
    scenario.validate()?;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eprs() -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("AAPL".to_string(), 0.20),
            ("MSFT".to_string(), 0.15),
            ("NVDA".to_string(), 0.40),
        ])
    }

    #[test]
    fn test_fractions() {
        assert_eq!(epr_fractions(2, false), vec![-1.0, -0.5, 0.5, 1.0]);
        assert_eq!(epr_fractions(2, true), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(epr_fractions(0, true), vec![-1.0, 1.0]);
    }

    #[test]
    fn test_epr_scenario_values() {
        let s = build_epr_stress_scenario("EPR", &eprs(), 2, false).unwrap();
        let crate::types::ScenarioGrid::Idiosyncratic(grid) = &s.grid else {
            panic!("expected idiosyncratic grid");
        };
        let nvda = &grid.risk_arrays()["NVDA"];
        let expected = [-0.4, -0.2, 0.2, 0.4];
        for (v, e) in nvda.values.iter().zip(expected) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }
        let labels: Vec<String> = s.columns().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, ["-1.000", "-0.500", "0.500", "1.000"]);
    }

    #[test]
    fn test_custom_per_symbol_defaults_to_bounds() {
        let grid = EprGrid::PerSymbol(BTreeMap::from([(
            "NVDA".to_string(),
            vec![-1.0, -0.75, -0.5, -0.25, 0.25, 0.5, 0.75, 1.0],
        )]));
        let s = build_epr_stress_scenario_custom("Custom", &eprs(), &grid).unwrap();
        let crate::types::ScenarioGrid::Idiosyncratic(g) = &s.grid else {
            panic!("expected idiosyncratic grid");
        };
        assert_eq!(g.underlyings["AAPL"].fractions, vec![-1.0, 1.0]);
        assert_eq!(s.column_count(), 8);
    }

    #[test]
    fn test_rejects_empty_map() {
        assert!(build_epr_stress_scenario("none", &BTreeMap::new(), 2, false).is_err());
    }
}
