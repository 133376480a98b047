//! Pricing models.
//!
//! A [`PricingModel`] values one unit of an instrument from its (possibly
//! stressed) [`MarketParams`].

mod black_scholes;
mod spot;

pub use black_scholes::{BlackScholes, BlackScholesPricer};
pub use spot::SpotPricer;

use crate::error::PricingResult;
use crate::instruments::Instrument;
use crate::params::MarketParams;

/// Values an instrument from market parameters.
pub trait PricingModel: Send + Sync {
    /// Model name, for logging and error messages.
    fn name(&self) -> &'static str;

    /// Value of one unit of `instrument` (before any contract multiplier).
    fn price(&self, instrument: &Instrument, params: &MarketParams) -> PricingResult<f64>;
}

/// Adapts a closure into a [`PricingModel`].
///
/// ```
/// use stress_pricing::prelude::*;
///
/// // Value an option as its premium scaled by the move in the underlying.
/// let pricer = FnPricer::new("premium-scaling", |inst: &Instrument, params: &MarketParams| {
///     match inst {
///         Instrument::Option(o) => Ok(o.premium.unwrap_or(0.0) * params.price / o.underlying_price),
///         Instrument::Equity(_) => Ok(params.price),
///     }
/// });
/// assert_eq!(pricer.name(), "premium-scaling");
/// ```
pub struct FnPricer<F> {
    name: &'static str,
    f: F,
}

impl<F> FnPricer<F>
where
    F: Fn(&Instrument, &MarketParams) -> PricingResult<f64> + Send + Sync,
{
    /// Wraps `f` under `name`.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> PricingModel for FnPricer<F>
where
    F: Fn(&Instrument, &MarketParams) -> PricingResult<f64> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn price(&self, instrument: &Instrument, params: &MarketParams) -> PricingResult<f64> {
        (self.f)(instrument, params)
    }
}
