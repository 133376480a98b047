//! # Stress Core
//!
//! Core types for stress testing equity and option portfolios.
//!
//! This crate provides the building blocks a stress test is assembled from:
//!
//! - **Types**: [`RiskDimension`], [`RiskArray`], [`Factor`], [`StressScenario`]
//! - **Calculators**: How a shock moves a market parameter (relative, absolute, time decay)
//! - **Scenarios**: Builders for price, price/vol and EPR (expected price range) scenarios
//! - **Factors**: Beta and idiosyncratic loadings that scale shocks per underlying
//!
//! ## Design Philosophy
//!
//! - **Pure data**: Nothing here prices instruments or performs I/O
//! - **Validated construction**: Risk arrays and scenarios reject empty or non-finite grids
//! - **Serializable**: Scenario definitions load from TOML/JSON configuration
//!
//! ## Example
//!
//! ```rust
//! use stress_core::prelude::*;
//!
//! let scenario = build_price_stress_scenario("Price Stress", 2, 2, 0.05, None).unwrap();
//! let labels: Vec<String> = scenario.columns().into_iter().map(|c| c.label).collect();
//! assert_eq!(labels, ["-0.100", "-0.050", "0.000", "0.050", "0.100"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod calculators;
pub mod error;
pub mod factors;
pub mod scenarios;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculators::{
        calculator_for, AbsoluteStressCalculator, RelativeStressCalculator, StressCalculator,
        TimeDecayCalculator,
    };
    pub use crate::error::{StressError, StressResult};
    pub use crate::factors::{create_beta_factor, create_idiosyncratic_factor, FactorSet};
    pub use crate::scenarios::{
        build_epr_stress_scenario, build_epr_stress_scenario_custom,
        build_price_stress_scenario, build_price_vol_stress_scenario, EprGrid,
        ScenarioDefinition,
    };
    pub use crate::types::{
        AggregationType, Factor, IdiosyncraticGrid, RiskArray, RiskDimension, ScenarioGrid,
        Shock, ShockMode, StressColumn, StressPoint, StressScenario, UnderlyingGrid,
    };
}

// Re-export commonly used types at crate root
pub use error::{StressError, StressResult};
pub use types::{
    AggregationType, Factor, RiskArray, RiskDimension, ShockMode, StressColumn, StressPoint,
    StressScenario,
};
