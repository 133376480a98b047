//! # stress-engine
//!
//! Revalues portfolios of equities and options over stress scenarios.
//!
//! - **Portfolio**: [`Position`], [`Portfolio`] and [`PortfolioBuilder`]
//! - **Engine**: [`StressTestEngine`] runs [`StressScenario`](stress_core::StressScenario)s
//! - **Results**: [`ScenarioResults`] with per-position and aggregated P&L
//!
//! ## Example
//!
//! ```rust
//! use stress_core::prelude::*;
//! use stress_engine::prelude::*;
//! use stress_pricing::{Equity, PricingRouter};
//!
//! let portfolio = PortfolioBuilder::new()
//!     .add_position(Position::new("eq1", Equity::new("AAPL", 150.0), 100.0))
//!     .build()
//!     .unwrap();
//! let engine = StressTestEngine::new(portfolio, PricingRouter::new());
//!
//! let scenario = build_price_stress_scenario("Price Stress", 1, 1, 0.05, None).unwrap();
//! let results = engine.run_scenario(&scenario).unwrap();
//!
//! let pnl = &results.position("eq1").unwrap().pnl;
//! assert!((pnl[0] + 750.0).abs() < 1e-9);
//! assert!((pnl[2] - 750.0).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): revalue positions with rayon above
//!   [`EngineConfig::parallel_threshold`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregation;
pub mod config;
pub mod engine;
pub mod error;
pub mod parallel;
pub mod portfolio;
pub mod results;

pub use config::EngineConfig;
pub use engine::{apply_shock, StressTestEngine};
pub use error::{EngineError, EngineResult};
pub use portfolio::{Portfolio, PortfolioBuilder, Position};
pub use results::{AggregatePnl, PositionPnl, ScenarioResults};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aggregation::{aggregate, PORTFOLIO_KEY, TOTAL_KEY};
    pub use crate::config::EngineConfig;
    pub use crate::engine::StressTestEngine;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::portfolio::{Portfolio, PortfolioBuilder, Position};
    pub use crate::results::{AggregatePnl, PositionPnl, ScenarioResults};
}
