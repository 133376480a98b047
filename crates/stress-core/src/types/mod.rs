//! Domain types for stress testing.
//!
//! - [`RiskDimension`]: Market parameter a shock applies to
//! - [`AggregationType`]: How position P&L is rolled up
//! - [`RiskArray`]: Ordered shock values for one dimension
//! - [`StressPoint`]: One combination of shocks across dimensions
//! - [`Factor`]: Per-underlying loadings that scale shocks
//! - [`StressScenario`]: Named grid of shocks plus aggregation rules

mod dimension;
mod factor;
mod point;
mod risk_array;
mod scenario;

pub use dimension::{AggregationType, RiskDimension};
pub use factor::Factor;
pub use point::{Shock, StressColumn, StressPoint};
pub use risk_array::{RiskArray, ShockMode};
pub use scenario::{IdiosyncraticGrid, ScenarioGrid, StressScenario, UnderlyingGrid};
