//! Scenario builders.
//!
//! - [`build_price_stress_scenario`]: Equidistant price moves, optionally factor-scaled
//! - [`build_price_vol_stress_scenario`]: Price x volatility grid
//! - [`build_epr_stress_scenario`]: Per-underlying moves in steps of each symbol's EPR
//! - [`build_epr_stress_scenario_custom`]: Per-underlying moves on explicit EPR fractions
//! - [`ScenarioDefinition`]: Serializable description of any of the above

mod builders;
mod definition;
mod epr;

pub use builders::{build_price_stress_scenario, build_price_vol_stress_scenario, GridRange};
pub use definition::ScenarioDefinition;
pub use epr::{build_epr_stress_scenario, build_epr_stress_scenario_custom, epr_fractions, EprGrid};
