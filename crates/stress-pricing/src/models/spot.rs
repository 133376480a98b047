//! Delta-one pricing.

use super::PricingModel;
use crate::error::PricingResult;
use crate::instruments::Instrument;
use crate::params::MarketParams;

/// Values an instrument at its (stressed) spot price.
///
/// Correct for equities; also the fallback for instrument kinds without a
/// registered model.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpotPricer;

impl PricingModel for SpotPricer {
    fn name(&self) -> &'static str {
        "spot"
    }

    fn price(&self, _instrument: &Instrument, params: &MarketParams) -> PricingResult<f64> {
        Ok(params.price)
    }
}
