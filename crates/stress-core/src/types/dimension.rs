//! Risk dimensions and aggregation types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StressError;

/// Market parameter that a stress shock can move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskDimension {
    /// Spot price of the underlying
    Price,
    /// Implied volatility
    Volatility,
    /// Time to expiry, in days
    Time,
    /// Risk-free interest rate
    InterestRate,
    /// Continuous dividend yield
    DividendYield,
}

impl RiskDimension {
    /// All dimensions in canonical order.
    pub const ALL: [RiskDimension; 5] = [
        RiskDimension::Price,
        RiskDimension::Volatility,
        RiskDimension::Time,
        RiskDimension::InterestRate,
        RiskDimension::DividendYield,
    ];

    /// Returns the snake_case name used in configuration and output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskDimension::Price => "price",
            RiskDimension::Volatility => "volatility",
            RiskDimension::Time => "time",
            RiskDimension::InterestRate => "interest_rate",
            RiskDimension::DividendYield => "dividend_yield",
        }
    }

    /// Returns true if stressed values of this dimension cannot go below zero.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        matches!(
            self,
            RiskDimension::Price | RiskDimension::Volatility | RiskDimension::Time
        )
    }
}

impl fmt::Display for RiskDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskDimension {
    type Err = StressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" | "spot" => Ok(RiskDimension::Price),
            "volatility" | "vol" | "iv" => Ok(RiskDimension::Volatility),
            "time" | "dte" => Ok(RiskDimension::Time),
            "interest_rate" | "rate" => Ok(RiskDimension::InterestRate),
            "dividend_yield" | "dividend" => Ok(RiskDimension::DividendYield),
            _ => Err(StressError::UnknownDimension(s.to_string())),
        }
    }
}

/// How position-level P&L is rolled up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AggregationType {
    /// One aggregate per underlying symbol
    #[default]
    ByUnderlying,
    /// One aggregate for the whole portfolio under the scenario's factor
    ByFactor,
    /// A single portfolio total
    Total,
}

impl AggregationType {
    /// Returns the snake_case name used in configuration and output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationType::ByUnderlying => "by_underlying",
            AggregationType::ByFactor => "by_factor",
            AggregationType::Total => "total",
        }
    }
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationType {
    type Err = StressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "by_underlying" | "underlying" => Ok(AggregationType::ByUnderlying),
            "by_factor" | "factor" => Ok(AggregationType::ByFactor),
            "total" => Ok(AggregationType::Total),
            _ => Err(StressError::UnknownAggregation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_round_trip_names() {
        for dim in RiskDimension::ALL {
            assert_eq!(dim.as_str().parse::<RiskDimension>().unwrap(), dim);
        }
    }

    #[test]
    fn test_dimension_aliases() {
        assert_eq!("vol".parse::<RiskDimension>().unwrap(), RiskDimension::Volatility);
        assert_eq!("DTE".parse::<RiskDimension>().unwrap(), RiskDimension::Time);
        assert!("gamma".parse::<RiskDimension>().is_err());
    }

    #[test]
    fn test_dimension_serde() {
        let json = serde_json::to_string(&RiskDimension::InterestRate).unwrap();
        assert_eq!(json, "\"interest_rate\"");
    }

    #[test]
    fn test_non_negative_dimensions() {
        assert!(RiskDimension::Price.is_non_negative());
        assert!(RiskDimension::Volatility.is_non_negative());
        assert!(!RiskDimension::InterestRate.is_non_negative());
    }

    #[test]
    fn test_aggregation_default() {
        assert_eq!(AggregationType::default(), AggregationType::ByUnderlying);
        assert_eq!("total".parse::<AggregationType>().unwrap(), AggregationType::Total);
    }
}
