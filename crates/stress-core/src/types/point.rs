//! Stress points and result columns.

use serde::{Deserialize, Serialize};

use super::{RiskDimension, ShockMode};

/// A single shock applied to one market parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shock {
    /// Dimension being shocked.
    pub dimension: RiskDimension,
    /// Shock value.
    pub value: f64,
    /// How the value is applied.
    pub mode: ShockMode,
}

impl Shock {
    /// Creates a relative shock.
    #[must_use]
    pub fn relative(dimension: RiskDimension, value: f64) -> Self {
        Self {
            dimension,
            value,
            mode: ShockMode::Relative,
        }
    }

    /// Creates an absolute shock.
    #[must_use]
    pub fn absolute(dimension: RiskDimension, value: f64) -> Self {
        Self {
            dimension,
            value,
            mode: ShockMode::Absolute,
        }
    }
}

/// One combination of shocks, at most one per dimension.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StressPoint {
    /// Shocks in risk array order.
    pub shocks: Vec<Shock>,
}

impl StressPoint {
    /// Creates a stress point from shocks.
    #[must_use]
    pub fn new(shocks: Vec<Shock>) -> Self {
        Self { shocks }
    }

    /// Returns the shock value for `dimension`, if any.
    #[must_use]
    pub fn get(&self, dimension: RiskDimension) -> Option<f64> {
        self.shocks
            .iter()
            .find(|s| s.dimension == dimension)
            .map(|s| s.value)
    }

    /// Column label: `{:.3}` of each value, joined by `/`.
    #[must_use]
    pub fn label(&self) -> String {
        self.shocks
            .iter()
            .map(|s| format_level(s.value))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Shock values in order.
    #[must_use]
    pub fn coordinates(&self) -> Vec<f64> {
        self.shocks.iter().map(|s| s.value).collect()
    }
}

/// A result column: one stress level as reported to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressColumn {
    /// Display label (e.g. `-0.050`).
    pub label: String,

    /// Shock values (uniform grids) or the EPR fraction (idiosyncratic grids).
    pub coordinates: Vec<f64>,
}

impl StressColumn {
    /// Creates a column for a uniform-grid stress point.
    #[must_use]
    pub fn from_point(point: &StressPoint) -> Self {
        Self {
            label: point.label(),
            coordinates: point.coordinates(),
        }
    }

    /// Creates a column for an EPR fraction.
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        Self {
            label: format_level(fraction),
            coordinates: vec![fraction],
        }
    }
}

/// Formats a stress level to three decimals, normalizing `-0.000` to `0.000`.
pub(crate) fn format_level(value: f64) -> String {
    let s = format!("{value:.3}");
    if s == "-0.000" {
        "0.000".to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shock_label() {
        let point = StressPoint::new(vec![Shock::relative(RiskDimension::Price, -0.05)]);
        assert_eq!(point.label(), "-0.050");
        assert_eq!(point.get(RiskDimension::Price), Some(-0.05));
        assert_eq!(point.get(RiskDimension::Volatility), None);
    }

    #[test]
    fn test_multi_shock_label() {
        let point = StressPoint::new(vec![
            Shock::relative(RiskDimension::Price, 0.1),
            Shock::relative(RiskDimension::Volatility, -0.25),
        ]);
        assert_eq!(point.label(), "0.100/-0.250");
        assert_eq!(StressColumn::from_point(&point).coordinates, vec![0.1, -0.25]);
    }

    #[test]
    fn test_negative_zero_label() {
        assert_eq!(StressColumn::from_fraction(-0.0).label, "0.000");
        assert_eq!(StressColumn::from_fraction(-0.0001).label, "0.000");
    }
}
