//! # stress-pricing
//!
//! Instruments and pricing models used to revalue positions under stress.
//!
//! - **Instruments**: [`Equity`] and European [`EquityOption`]
//! - **Market parameters**: [`MarketParams`], the stressable inputs of an instrument
//! - **Models**: [`SpotPricer`], [`BlackScholesPricer`], and closures via [`FnPricer`]
//! - **Routing**: [`PricingRouter`] selects a model per instrument kind
//!
//! ## Example
//!
//! ```
//! use stress_pricing::prelude::*;
//!
//! let option = Instrument::Option(EquityOption::new("AAPL", OptionType::Call, 100.0, 100.0, 0.2).with_dte(365.0).with_rate(0.05));
//! let router = PricingRouter::new();
//! let params = MarketParams::from_instrument(&option, None).unwrap();
//! let value = router.price(&option, &params).unwrap();
//! assert!((value - 10.4506).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod instruments;
pub mod models;
pub mod params;
pub mod router;

pub use error::{PricingError, PricingResult};
pub use instruments::{Equity, EquityOption, Instrument, InstrumentKind, OptionType};
pub use models::{BlackScholes, BlackScholesPricer, FnPricer, PricingModel, SpotPricer};
pub use params::MarketParams;
pub use router::PricingRouter;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::instruments::{Equity, EquityOption, Instrument, InstrumentKind, OptionType};
    pub use crate::models::{BlackScholes, BlackScholesPricer, FnPricer, PricingModel, SpotPricer};
    pub use crate::params::MarketParams;
    pub use crate::router::PricingRouter;
}
