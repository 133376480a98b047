//! Stressable market parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stress_core::RiskDimension;

use crate::error::{PricingError, PricingResult};
use crate::instruments::Instrument;

/// Market inputs of an instrument, one per [`RiskDimension`].
///
/// Dimensions the instrument does not depend on are `None` and are left
/// untouched by stress shocks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketParams {
    /// Spot price (the underlying's price for options).
    pub price: f64,
    /// Implied volatility.
    pub volatility: Option<f64>,
    /// Days to expiry.
    pub time: Option<f64>,
    /// Risk-free rate.
    pub interest_rate: Option<f64>,
    /// Dividend yield.
    pub dividend_yield: Option<f64>,
}

impl MarketParams {
    /// Extracts base parameters from an instrument.
    ///
    /// For options with an `expiry` date and no `dte`, time is the number
    /// of days from `as_of` to expiry (never negative).
    ///
    /// # Errors
    ///
    /// Returns an error if an option's expiry cannot be resolved because no
    /// as-of date was supplied.
    pub fn from_instrument(
        instrument: &Instrument,
        as_of: Option<NaiveDate>,
    ) -> PricingResult<Self> {
        match instrument {
            Instrument::Equity(e) => Ok(Self {
                price: e.price,
                dividend_yield: e.dividend_yield,
                ..Self::default()
            }),
            Instrument::Option(o) => {
                let time = match (o.dte, o.expiry) {
                    (Some(days), _) => Some(days),
                    (None, Some(expiry)) => {
                        let as_of = as_of
                            .ok_or_else(|| PricingError::missing(instrument.describe(), "as-of date"))?;
                        Some((expiry - as_of).num_days().max(0) as f64)
                    }
                    (None, None) => None,
                };
                Ok(Self {
                    price: o.underlying_price,
                    volatility: Some(o.volatility),
                    time,
                    interest_rate: o.interest_rate.or(Some(0.0)),
                    dividend_yield: o.dividend_yield.or(Some(0.0)),
                })
            }
        }
    }

    /// Returns the value for a dimension, if the instrument carries it.
    #[must_use]
    pub fn get(&self, dimension: RiskDimension) -> Option<f64> {
        match dimension {
            RiskDimension::Price => Some(self.price),
            RiskDimension::Volatility => self.volatility,
            RiskDimension::Time => self.time,
            RiskDimension::InterestRate => self.interest_rate,
            RiskDimension::DividendYield => self.dividend_yield,
        }
    }

    /// Overwrites a dimension's value.
    ///
    /// Returns `false` (and changes nothing) if the instrument does not
    /// carry the dimension.
    pub fn set(&mut self, dimension: RiskDimension, value: f64) -> bool {
        let slot = match dimension {
            RiskDimension::Price => {
                self.price = value;
                return true;
            }
            RiskDimension::Volatility => &mut self.volatility,
            RiskDimension::Time => &mut self.time,
            RiskDimension::InterestRate => &mut self.interest_rate,
            RiskDimension::DividendYield => &mut self.dividend_yield,
        };
        match slot {
            Some(v) => {
                *v = value;
                true
            }
            None => false,
        }
    }
}
