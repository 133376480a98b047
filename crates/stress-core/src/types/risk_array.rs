//! Risk arrays: ordered shock values along one dimension.

use serde::{Deserialize, Serialize};

use super::RiskDimension;
use crate::error::{StressError, StressResult};

/// How a shock value is combined with the base parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShockMode {
    /// Fractional change: `base * (1 + shock)`
    #[default]
    Relative,
    /// Additive change: `base + shock`
    Absolute,
}

impl ShockMode {
    /// Returns true for relative (percentage) shocks.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        matches!(self, ShockMode::Relative)
    }
}

/// The shock grid for a single risk dimension.
///
/// Values are kept in the order they were supplied. Equidistant arrays are
/// ascending: down moves first, then the optional base, then up moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskArray {
    /// Dimension being shocked.
    pub dimension: RiskDimension,

    /// Shock values.
    pub values: Vec<f64>,

    /// How values are applied to the base parameter.
    #[serde(default)]
    pub mode: ShockMode,
}

impl RiskArray {
    /// Creates an equidistant relative risk array.
    ///
    /// Produces `[-n_down*step, ..., -step, (0), step, ..., n_up*step]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is not finite and positive, or if the
    /// resulting array would be empty.
    pub fn equidistant(
        dimension: RiskDimension,
        n_up: usize,
        n_down: usize,
        step: f64,
        include_base: bool,
    ) -> StressResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(StressError::invalid_array(
                dimension,
                format!("step must be finite and positive, got {step}"),
            ));
        }

        let down = (1..=n_down).rev().map(|i| -(i as f64) * step);
        let base = include_base.then_some(0.0);
        let up = (1..=n_up).map(|i| i as f64 * step);
        let values: Vec<f64> = down.chain(base).chain(up).collect();

        if values.is_empty() {
            return Err(StressError::EmptyRiskArray { dimension });
        }

        Ok(Self {
            dimension,
            values,
            mode: ShockMode::Relative,
        })
    }

    /// Creates a risk array from explicit values.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` is empty or contains NaN/infinite values.
    pub fn custom(
        dimension: RiskDimension,
        values: Vec<f64>,
        mode: ShockMode,
    ) -> StressResult<Self> {
        let array = Self {
            dimension,
            values,
            mode,
        };
        array.validate()?;
        Ok(array)
    }

    /// Checks that the array is non-empty and every value is finite.
    pub fn validate(&self) -> StressResult<()> {
        if self.values.is_empty() {
            return Err(StressError::EmptyRiskArray {
                dimension: self.dimension,
            });
        }
        if let Some(bad) = self.values.iter().find(|v| !v.is_finite()) {
            return Err(StressError::invalid_array(
                self.dimension,
                format!("non-finite value {bad}"),
            ));
        }
        Ok(())
    }

    /// Returns a copy with every value multiplied by `k`.
    #[must_use]
    pub fn scaled(&self, k: f64) -> Self {
        Self {
            dimension: self.dimension,
            values: self.values.iter().map(|v| v * k).collect(),
            mode: self.mode,
        }
    }

    /// Number of shock values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the array has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute shock in the array.
    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}
