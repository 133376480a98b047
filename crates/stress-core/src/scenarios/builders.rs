//! Price and price/volatility scenario builders.

use serde::{Deserialize, Serialize};

use crate::error::StressResult;
use crate::types::{AggregationType, Factor, RiskArray, RiskDimension, StressScenario};

/// Equidistant grid parameters: `n_up` steps up, `n_down` steps down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRange {
    /// Number of up steps.
    pub n_up: usize,
    /// Number of down steps.
    pub n_down: usize,
    /// Step size.
    pub step: f64,
}

impl GridRange {
    /// Creates a grid range.
    #[must_use]
    pub fn new(n_up: usize, n_down: usize, step: f64) -> Self {
        Self { n_up, n_down, step }
    }

    /// Builds the equidistant risk array (base included).
    pub fn risk_array(&self, dimension: RiskDimension) -> StressResult<RiskArray> {
        RiskArray::equidistant(dimension, self.n_up, self.n_down, self.step, true)
    }
}

impl From<(usize, usize, f64)> for GridRange {
    fn from((n_up, n_down, step): (usize, usize, f64)) -> Self {
        Self::new(n_up, n_down, step)
    }
}

/// Builds a single-dimension price stress scenario.
///
/// Scenarios with a factor aggregate across the portfolio
/// ([`AggregationType::ByFactor`]); without one they aggregate by underlying.
pub fn build_price_stress_scenario(
    name: impl Into<String>,
    n_up: usize,
    n_down: usize,
    step: f64,
    factor: Option<Factor>,
) -> StressResult<StressScenario> {
    let array = RiskArray::equidistant(RiskDimension::Price, n_up, n_down, step, true)?;
    let aggregation = if factor.is_some() {
        AggregationType::ByFactor
    } else {
        AggregationType::ByUnderlying
    };

    Ok(StressScenario::new(name, vec![array])?
        .with_factor(factor)
        .with_aggregation(aggregation))
}

/// Builds a combined price and volatility stress scenario.
pub fn build_price_vol_stress_scenario(
    name: impl Into<String>,
    price_range: impl Into<GridRange>,
    vol_range: impl Into<GridRange>,
) -> StressResult<StressScenario> {
    let price = price_range.into().risk_array(RiskDimension::Price)?;
    let vol = vol_range.into().risk_array(RiskDimension::Volatility)?;
    StressScenario::new(name, vec![price, vol])
}
