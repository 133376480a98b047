//! Serializable scenario definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    build_epr_stress_scenario, build_epr_stress_scenario_custom, build_price_stress_scenario,
    build_price_vol_stress_scenario, EprGrid, GridRange,
};
use crate::error::StressResult;
use crate::factors::FactorSet;
use crate::types::{AggregationType, RiskArray, StressScenario};

fn default_steps() -> usize {
    5
}

fn default_step() -> f64 {
    0.05
}

fn default_epr_steps() -> usize {
    2
}

/// A scenario as written in configuration.
///
/// Factors are referenced by name and resolved against a [`FactorSet`] when
/// the scenario is built. `aggregation`, when present, overrides the
/// builder's default.
///
/// ```toml
/// [[scenarios]]
/// type = "price"
/// name = "Beta Stress"
/// n_up = 2
/// n_down = 2
/// step = 0.05
/// factor = "beta"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioDefinition {
    /// Equidistant price moves.
    Price {
        /// Scenario name.
        name: String,
        /// Up steps.
        #[serde(default = "default_steps")]
        n_up: usize,
        /// Down steps.
        #[serde(default = "default_steps")]
        n_down: usize,
        /// Step size (relative).
        #[serde(default = "default_step")]
        step: f64,
        /// Factor name.
        #[serde(default)]
        factor: Option<String>,
        /// Aggregation override.
        #[serde(default)]
        aggregation: Option<AggregationType>,
    },

    /// Price x volatility grid.
    PriceVol {
        /// Scenario name.
        name: String,
        /// Price grid.
        price: GridRange,
        /// Volatility grid.
        volatility: GridRange,
        /// Aggregation override.
        #[serde(default)]
        aggregation: Option<AggregationType>,
    },

    /// EPR steps per underlying.
    Epr {
        /// Scenario name.
        name: String,
        /// Underlying -> expected price range.
        ranges: BTreeMap<String, f64>,
        /// Steps between zero and the full range.
        #[serde(default = "default_epr_steps")]
        n_steps: usize,
        /// Include the unstressed level.
        #[serde(default)]
        include_base: bool,
        /// Aggregation override.
        #[serde(default)]
        aggregation: Option<AggregationType>,
    },

    /// Explicit EPR fractions.
    EprCustom {
        /// Scenario name.
        name: String,
        /// Underlying -> expected price range.
        ranges: BTreeMap<String, f64>,
        /// Shared or per-symbol fractions.
        grid: EprGrid,
        /// Aggregation override.
        #[serde(default)]
        aggregation: Option<AggregationType>,
    },

    /// Arbitrary risk arrays.
    Grid {
        /// Scenario name.
        name: String,
        /// Risk arrays, one per dimension.
        arrays: Vec<RiskArray>,
        /// Factor name.
        #[serde(default)]
        factor: Option<String>,
        /// Aggregation override.
        #[serde(default)]
        aggregation: Option<AggregationType>,
    },
}

impl ScenarioDefinition {
    /// Scenario name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ScenarioDefinition::Price { name, .. }
            | ScenarioDefinition::PriceVol { name, .. }
            | ScenarioDefinition::Epr { name, .. }
            | ScenarioDefinition::EprCustom { name, .. }
            | ScenarioDefinition::Grid { name, .. } => name,
        }
    }

    /// Short type tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioDefinition::Price { .. } => "price",
            ScenarioDefinition::PriceVol { .. } => "price_vol",
            ScenarioDefinition::Epr { .. } => "epr",
            ScenarioDefinition::EprCustom { .. } => "epr_custom",
            ScenarioDefinition::Grid { .. } => "grid",
        }
    }

    fn aggregation_override(&self) -> Option<AggregationType> {
        match self {
            ScenarioDefinition::Price { aggregation, .. }
            | ScenarioDefinition::PriceVol { aggregation, .. }
            | ScenarioDefinition::Epr { aggregation, .. }
            | ScenarioDefinition::EprCustom { aggregation, .. }
            | ScenarioDefinition::Grid { aggregation, .. } => *aggregation,
        }
    }

    /// Builds the scenario, resolving factor references.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced factor is undefined or the grid is
    /// invalid.
    pub fn build(&self, factors: &FactorSet) -> StressResult<StressScenario> {
        let scenario = match self {
            ScenarioDefinition::Price {
                name,
                n_up,
                n_down,
                step,
                factor,
                ..
            } => {
                let factor = factors.resolve(factor.as_deref())?;
                build_price_stress_scenario(name.as_str(), *n_up, *n_down, *step, factor)?
            }
            ScenarioDefinition::PriceVol {
                name,
                price,
                volatility,
                ..
            } => build_price_vol_stress_scenario(name.as_str(), *price, *volatility)?,
            ScenarioDefinition::Epr {
                name,
                ranges,
                n_steps,
                include_base,
                ..
            } => build_epr_stress_scenario(name.as_str(), ranges, *n_steps, *include_base)?,
            ScenarioDefinition::EprCustom {
                name, ranges, grid, ..
            } => build_epr_stress_scenario_custom(name.as_str(), ranges, grid)?,
            ScenarioDefinition::Grid {
                name,
                arrays,
                factor,
                ..
            } => {
                let factor = factors.resolve(factor.as_deref())?;
                let aggregation = if factor.is_some() {
                    AggregationType::ByFactor
                } else {
                    AggregationType::ByUnderlying
                };
                StressScenario::new(name.as_str(), arrays.clone())?
                    .with_factor(factor)
                    .with_aggregation(aggregation)
            }
        };

        Ok(match self.aggregation_override() {
            Some(aggregation) => scenario.with_aggregation(aggregation),
            None => scenario,
        })
    }
}
