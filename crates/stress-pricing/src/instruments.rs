//! Equity and equity option instruments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Option type: call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy
    Call,
    /// Right to sell
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.write_str("call"),
            OptionType::Put => f.write_str("put"),
        }
    }
}

/// A listed equity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equity {
    /// Ticker symbol.
    pub symbol: String,
    /// Spot price.
    pub price: f64,
    /// Continuous dividend yield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
}

impl Equity {
    /// Creates an equity.
    #[must_use]
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            dividend_yield: None,
        }
    }

    /// Sets the dividend yield.
    #[must_use]
    pub fn with_dividend_yield(mut self, q: f64) -> Self {
        self.dividend_yield = Some(q);
        self
    }
}

fn default_multiplier() -> f64 {
    1.0
}

/// A European option on an equity.
///
/// Time to expiry is given either directly in days (`dte`) or as an
/// `expiry` date resolved against the portfolio as-of date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityOption {
    /// Underlying symbol.
    pub underlying: String,
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
    /// Spot price of the underlying.
    pub underlying_price: f64,
    /// Implied volatility (annualized, decimal).
    pub volatility: f64,
    /// Days to expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dte: Option<f64>,
    /// Expiry date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<NaiveDate>,
    /// Risk-free rate (continuous, decimal).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    /// Continuous dividend yield of the underlying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    /// Observed market premium, for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<f64>,
    /// Contract multiplier.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl EquityOption {
    /// Creates an option with no expiry, rate or dividend set.
    #[must_use]
    pub fn new(
        underlying: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        underlying_price: f64,
        volatility: f64,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            option_type,
            strike,
            underlying_price,
            volatility,
            dte: None,
            expiry: None,
            interest_rate: None,
            dividend_yield: None,
            premium: None,
            multiplier: 1.0,
        }
    }

    /// Sets days to expiry.
    #[must_use]
    pub fn with_dte(mut self, days: f64) -> Self {
        self.dte = Some(days);
        self
    }

    /// Sets the expiry date.
    #[must_use]
    pub fn with_expiry(mut self, expiry: NaiveDate) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    /// Sets the dividend yield.
    #[must_use]
    pub fn with_dividend_yield(mut self, q: f64) -> Self {
        self.dividend_yield = Some(q);
        self
    }

    /// Sets the observed premium.
    #[must_use]
    pub fn with_premium(mut self, premium: f64) -> Self {
        self.premium = Some(premium);
        self
    }

    /// Sets the contract multiplier.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }
}

/// Kind of instrument, used to route pricing models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Equity
    Equity,
    /// Equity option
    Option,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentKind::Equity => f.write_str("Equity"),
            InstrumentKind::Option => f.write_str("Option"),
        }
    }
}

/// Any instrument a position can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instrument {
    /// An equity.
    Equity(Equity),
    /// An equity option.
    Option(EquityOption),
}

impl Instrument {
    /// Instrument kind.
    #[must_use]
    pub fn kind(&self) -> InstrumentKind {
        match self {
            Instrument::Equity(_) => InstrumentKind::Equity,
            Instrument::Option(_) => InstrumentKind::Option,
        }
    }

    /// Symbol of the underlying (the equity itself for equities).
    #[must_use]
    pub fn underlying(&self) -> &str {
        match self {
            Instrument::Equity(e) => &e.symbol,
            Instrument::Option(o) => &o.underlying,
        }
    }

    /// Contract multiplier (1 for equities).
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        match self {
            Instrument::Equity(_) => 1.0,
            Instrument::Option(o) => o.multiplier,
        }
    }

    /// Observed market price per unit, if known.
    #[must_use]
    pub fn market_price(&self) -> Option<f64> {
        match self {
            Instrument::Equity(e) => Some(e.price),
            Instrument::Option(o) => o.premium,
        }
    }

    /// Short human-readable description.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Instrument::Equity(e) => e.symbol.clone(),
            Instrument::Option(o) => format!("{} {} {}", o.underlying, o.strike, o.option_type),
        }
    }
}

impl From<Equity> for Instrument {
    fn from(e: Equity) -> Self {
        Instrument::Equity(e)
    }
}

impl From<EquityOption> for Instrument {
    fn from(o: EquityOption) -> Self {
        Instrument::Option(o)
    }
}
