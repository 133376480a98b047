//! Pricing router - selects a pricing model per instrument kind.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::PricingResult;
use crate::instruments::{Instrument, InstrumentKind};
use crate::models::{BlackScholesPricer, PricingModel, SpotPricer};
use crate::params::MarketParams;

/// Routes instruments to the pricing model registered for their kind.
///
/// Kinds with no registered model are priced by the fallback model, which
/// is [`SpotPricer`] unless replaced.
#[derive(Clone)]
pub struct PricingRouter {
    models: HashMap<InstrumentKind, Arc<dyn PricingModel>>,
    fallback: Arc<dyn PricingModel>,
}

impl PricingRouter {
    /// Create a router with the default models: equities at spot, options
    /// with Black-Scholes-Merton.
    #[must_use]
    pub fn new() -> Self {
        Self::empty()
            .with_model(InstrumentKind::Equity, SpotPricer)
            .with_model(InstrumentKind::Option, BlackScholesPricer::default())
    }

    /// Create a router with no registered models; everything is priced by
    /// the spot fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            models: HashMap::new(),
            fallback: Arc::new(SpotPricer),
        }
    }

    /// Registers `model` for `kind`, replacing any previous model.
    #[must_use]
    pub fn with_model<M: PricingModel + 'static>(mut self, kind: InstrumentKind, model: M) -> Self {
        self.models.insert(kind, Arc::new(model));
        self
    }

    /// Registers a shared model for `kind`.
    #[must_use]
    pub fn with_shared_model(mut self, kind: InstrumentKind, model: Arc<dyn PricingModel>) -> Self {
        self.models.insert(kind, model);
        self
    }

    /// Replaces the fallback model.
    #[must_use]
    pub fn with_fallback<M: PricingModel + 'static>(mut self, model: M) -> Self {
        self.fallback = Arc::new(model);
        self
    }

    /// Returns the model used for `kind`.
    pub fn model_for(&self, kind: InstrumentKind) -> &dyn PricingModel {
        match self.models.get(&kind) {
            Some(model) => model.as_ref(),
            None => {
                debug!(%kind, fallback = self.fallback.name(), "no model registered");
                self.fallback.as_ref()
            }
        }
    }

    /// Prices one unit of `instrument`.
    ///
    /// # Errors
    ///
    /// Propagates the selected model's error.
    pub fn price(&self, instrument: &Instrument, params: &MarketParams) -> PricingResult<f64> {
        let model = self.model_for(instrument.kind());
        model.price(instrument, params).map_err(|e| {
            warn!(
                instrument = %instrument.describe(),
                model = model.name(),
                error = %e,
                "pricing failed"
            );
            e
        })
    }
}

impl Default for PricingRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PricingRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut models: Vec<_> = self
            .models
            .iter()
            .map(|(kind, model)| (*kind, model.name()))
            .collect();
        models.sort();
        f.debug_struct("PricingRouter")
            .field("models", &models)
            .field("fallback", &self.fallback.name())
            .finish()
    }
}
