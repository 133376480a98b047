//! Error types for stress scenario construction.

use thiserror::Error;

use crate::types::RiskDimension;

/// A specialized Result type for stress core operations.
pub type StressResult<T> = Result<T, StressError>;

/// Errors raised while building risk arrays, factors and scenarios.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StressError {
    /// Risk array has no values.
    #[error("Empty risk array for dimension {dimension}")]
    EmptyRiskArray {
        /// Dimension of the empty array.
        dimension: RiskDimension,
    },

    /// Risk array contains an unusable value.
    #[error("Invalid risk array for dimension {dimension}: {reason}")]
    InvalidRiskArray {
        /// Dimension of the offending array.
        dimension: RiskDimension,
        /// Description of the problem.
        reason: String,
    },

    /// Two risk arrays in one scenario stress the same dimension.
    #[error("Dimension {dimension} appears more than once in scenario '{scenario}'")]
    DuplicateDimension {
        /// Scenario name.
        scenario: String,
        /// Repeated dimension.
        dimension: RiskDimension,
    },

    /// Scenario grid is empty.
    #[error("Scenario '{scenario}' has no risk arrays")]
    EmptyScenario {
        /// Scenario name.
        scenario: String,
    },

    /// Expected price range is negative or non-finite.
    #[error("Invalid price range for {symbol}: {value}")]
    InvalidPriceRange {
        /// Underlying symbol.
        symbol: String,
        /// Offending range.
        value: f64,
    },

    /// A scenario refers to a factor that was not defined.
    #[error("Unknown factor: {name}")]
    UnknownFactor {
        /// Name of the missing factor.
        name: String,
    },

    /// Unrecognized risk dimension name.
    #[error("Unknown risk dimension: {0}")]
    UnknownDimension(String),

    /// Unrecognized aggregation name.
    #[error("Unknown aggregation type: {0}")]
    UnknownAggregation(String),
}

impl StressError {
    /// Creates an invalid risk array error.
    #[must_use]
    pub fn invalid_array(dimension: RiskDimension, reason: impl Into<String>) -> Self {
        Self::InvalidRiskArray {
            dimension,
            reason: reason.into(),
        }
    }

    /// Creates an unknown factor error.
    #[must_use]
    pub fn unknown_factor(name: impl Into<String>) -> Self {
        Self::UnknownFactor { name: name.into() }
    }
}
