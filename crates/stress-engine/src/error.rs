//! Engine error types.

use stress_core::StressError;
use stress_pricing::PricingError;
use thiserror::Error;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The scenario is malformed
    #[error("invalid scenario: {0}")]
    Scenario(#[from] StressError),

    /// A position could not be priced
    #[error("pricing failed for position {position_id}: {source}")]
    Pricing {
        /// Position that failed.
        position_id: String,
        /// Underlying pricing error.
        #[source]
        source: PricingError,
    },

    /// Two positions share an id
    #[error("duplicate position id: {0}")]
    DuplicatePosition(String),

    /// A position quantity is NaN or infinite
    #[error("invalid quantity for position {position_id}: {value}")]
    InvalidQuantity {
        /// Position id.
        position_id: String,
        /// Offending quantity.
        value: f64,
    },
}

impl EngineError {
    /// Wraps a pricing error with the position it occurred on.
    #[must_use]
    pub fn pricing(position_id: impl Into<String>, source: PricingError) -> Self {
        Self::Pricing {
            position_id: position_id.into(),
            source,
        }
    }
}
