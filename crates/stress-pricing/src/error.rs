//! Error types for pricing.

use thiserror::Error;

/// A specialized Result type for pricing.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur while pricing an instrument.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A model input is missing
    #[error("missing {parameter} for {instrument}")]
    MissingParameter {
        /// Instrument description.
        instrument: String,
        /// Missing parameter name.
        parameter: &'static str,
    },

    /// A model input is outside its domain
    #[error("invalid {parameter}: {value}")]
    InvalidParameter {
        /// Parameter name.
        parameter: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The model cannot price this kind of instrument
    #[error("{model} cannot price {kind} instruments")]
    UnsupportedInstrument {
        /// Model name.
        model: &'static str,
        /// Instrument kind.
        kind: String,
    },

    /// The model produced a non-finite value
    #[error("calculation failed: {0}")]
    CalculationFailed(String),
}

impl PricingError {
    /// Creates a missing parameter error.
    #[must_use]
    pub fn missing(instrument: impl Into<String>, parameter: &'static str) -> Self {
        Self::MissingParameter {
            instrument: instrument.into(),
            parameter,
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid(parameter: &'static str, value: f64) -> Self {
        Self::InvalidParameter { parameter, value }
    }
}
