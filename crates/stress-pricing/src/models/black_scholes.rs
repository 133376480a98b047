//! Black-Scholes-Merton pricing for European equity options.
//!
//! ## Formula
//!
//! ```text
//! d1 = (ln(S/K) + (r - q + σ²/2)·T) / (σ·√T)
//! d2 = d1 - σ·√T
//! C  = S·e^(-qT)·N(d1) - K·e^(-rT)·N(d2)
//! P  = K·e^(-rT)·N(-d2) - S·e^(-qT)·N(-d1)
//! ```

use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use tracing::trace;

use super::PricingModel;
use crate::error::{PricingError, PricingResult};
use crate::instruments::{Instrument, OptionType};
use crate::params::MarketParams;

/// Standard normal CDF.
fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal PDF.
fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes-Merton inputs for one option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price of the underlying
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Risk-free rate (continuous)
    pub rate: f64,
    /// Dividend yield (continuous)
    pub dividend_yield: f64,
    /// Volatility (annualized)
    pub volatility: f64,
    /// Call or put
    pub option_type: OptionType,
}

impl BlackScholes {
    /// Creates a pricer with zero dividend yield.
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            rate,
            dividend_yield: 0.0,
            volatility,
            option_type,
        }
    }

    /// Sets the dividend yield.
    #[must_use]
    pub fn with_dividend_yield(mut self, q: f64) -> Self {
        self.dividend_yield = q;
        self
    }

    fn df_rate(&self) -> f64 {
        (-self.rate * self.time_to_expiry).exp()
    }

    fn df_div(&self) -> f64 {
        (-self.dividend_yield * self.time_to_expiry).exp()
    }

    /// True when the lognormal formula is undefined and limits apply.
    fn is_degenerate(&self) -> bool {
        self.time_to_expiry <= 0.0 || self.volatility <= 0.0 || self.spot <= 0.0
    }

    /// d1 term.
    #[must_use]
    pub fn d1(&self) -> f64 {
        let vol_sqrt_t = self.volatility * self.time_to_expiry.sqrt();
        ((self.spot / self.strike).ln()
            + (self.rate - self.dividend_yield + 0.5 * self.volatility * self.volatility)
                * self.time_to_expiry)
            / vol_sqrt_t
    }

    /// d2 term.
    #[must_use]
    pub fn d2(&self) -> f64 {
        self.d1() - self.volatility * self.time_to_expiry.sqrt()
    }

    /// Option value.
    ///
    /// At or past expiry this is intrinsic value; with zero volatility it is
    /// the discounted intrinsic value of the forward.
    #[must_use]
    pub fn price(&self) -> f64 {
        if self.time_to_expiry <= 0.0 {
            return match self.option_type {
                OptionType::Call => (self.spot - self.strike).max(0.0),
                OptionType::Put => (self.strike - self.spot).max(0.0),
            };
        }

        let fwd_spot = self.spot * self.df_div();
        let pv_strike = self.strike * self.df_rate();

        if self.is_degenerate() {
            return match self.option_type {
                OptionType::Call => (fwd_spot - pv_strike).max(0.0),
                OptionType::Put => (pv_strike - fwd_spot).max(0.0),
            };
        }

        let d1 = self.d1();
        let d2 = self.d2();
        match self.option_type {
            OptionType::Call => fwd_spot * norm_cdf(d1) - pv_strike * norm_cdf(d2),
            OptionType::Put => pv_strike * norm_cdf(-d2) - fwd_spot * norm_cdf(-d1),
        }
    }

    /// Delta: ∂V/∂S
    #[must_use]
    pub fn delta(&self) -> f64 {
        if self.is_degenerate() {
            let itm = match self.option_type {
                OptionType::Call => self.spot * self.df_div() > self.strike * self.df_rate(),
                OptionType::Put => self.spot * self.df_div() < self.strike * self.df_rate(),
            };
            return match (self.option_type, itm) {
                (OptionType::Call, true) => self.df_div(),
                (OptionType::Put, true) => -self.df_div(),
                (_, false) => 0.0,
            };
        }
        let n_d1 = norm_cdf(self.d1());
        match self.option_type {
            OptionType::Call => self.df_div() * n_d1,
            OptionType::Put => self.df_div() * (n_d1 - 1.0),
        }
    }

    /// Gamma: ∂²V/∂S²
    #[must_use]
    pub fn gamma(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.df_div() * norm_pdf(self.d1())
            / (self.spot * self.volatility * self.time_to_expiry.sqrt())
    }

    /// Vega: ∂V/∂σ, per 1.00 change in volatility.
    #[must_use]
    pub fn vega(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.spot * self.df_div() * norm_pdf(self.d1()) * self.time_to_expiry.sqrt()
    }

    /// Theta: ∂V/∂t, per year (negative for long options that lose value).
    #[must_use]
    pub fn theta(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let d1 = self.d1();
        let d2 = self.d2();
        let decay = -self.spot * self.df_div() * norm_pdf(d1) * self.volatility
            / (2.0 * self.time_to_expiry.sqrt());
        let pv_strike = self.strike * self.df_rate();
        let fwd_spot = self.spot * self.df_div();
        match self.option_type {
            OptionType::Call => {
                decay - self.rate * pv_strike * norm_cdf(d2)
                    + self.dividend_yield * fwd_spot * norm_cdf(d1)
            }
            OptionType::Put => {
                decay + self.rate * pv_strike * norm_cdf(-d2)
                    - self.dividend_yield * fwd_spot * norm_cdf(-d1)
            }
        }
    }
}

/// Prices options with Black-Scholes-Merton and equities at spot.
#[derive(Debug, Clone, Copy)]
pub struct BlackScholesPricer {
    /// Day count basis converting days to expiry into years.
    pub days_per_year: f64,
}

impl Default for BlackScholesPricer {
    fn default() -> Self {
        Self {
            days_per_year: 365.0,
        }
    }
}

impl BlackScholesPricer {
    /// Creates a pricer with a 365-day year.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the day count basis.
    #[must_use]
    pub fn with_days_per_year(mut self, days: f64) -> Self {
        self.days_per_year = days;
        self
    }

    /// Builds the Black-Scholes inputs for an option instrument.
    ///
    /// # Errors
    ///
    /// Returns an error for equities, missing volatility or time, or inputs
    /// outside their domain.
    pub fn model(&self, instrument: &Instrument, params: &MarketParams) -> PricingResult<BlackScholes> {
        let Instrument::Option(option) = instrument else {
            return Err(PricingError::UnsupportedInstrument {
                model: self.name(),
                kind: instrument.kind().to_string(),
            });
        };

        if !(option.strike.is_finite() && option.strike > 0.0) {
            return Err(PricingError::invalid("strike", option.strike));
        }
        if !params.price.is_finite() || params.price < 0.0 {
            return Err(PricingError::invalid("price", params.price));
        }
        let volatility = params
            .volatility
            .ok_or_else(|| PricingError::missing(instrument.describe(), "volatility"))?;
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(PricingError::invalid("volatility", volatility));
        }
        let days = params
            .time
            .ok_or_else(|| PricingError::missing(instrument.describe(), "time to expiry"))?;
        if !days.is_finite() {
            return Err(PricingError::invalid("time", days));
        }

        Ok(BlackScholes {
            spot: params.price,
            strike: option.strike,
            time_to_expiry: days.max(0.0) / self.days_per_year,
            rate: params.interest_rate.unwrap_or(0.0),
            dividend_yield: params.dividend_yield.unwrap_or(0.0),
            volatility,
            option_type: option.option_type,
        })
    }
}

impl PricingModel for BlackScholesPricer {
    fn name(&self) -> &'static str {
        "black-scholes"
    }

    fn price(&self, instrument: &Instrument, params: &MarketParams) -> PricingResult<f64> {
        if let Instrument::Equity(_) = instrument {
            return Ok(params.price);
        }

        let bs = self.model(instrument, params)?;
        let value = bs.price();
        trace!(
            spot = bs.spot,
            strike = bs.strike,
            t = bs.time_to_expiry,
            vol = bs.volatility,
            value,
            "black-scholes price"
        );

        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::CalculationFailed(format!(
                "non-finite value for {}",
                instrument.describe()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{Equity, EquityOption};
    use approx::assert_relative_eq;

    fn atm(option_type: OptionType) -> BlackScholes {
        BlackScholes::new(100.0, 100.0, 1.0, 0.05, 0.2, option_type)
    }

    #[test]
    fn test_reference_values() {
        // Hull, Options Futures and Other Derivatives: S=K=100, r=5%, σ=20%, T=1
        assert_relative_eq!(atm(OptionType::Call).price(), 10.4506, epsilon = 1e-4);
        assert_relative_eq!(atm(OptionType::Put).price(), 5.5735, epsilon = 1e-4);
    }

    #[test]
    fn test_put_call_parity_with_dividends() {
        let call = BlackScholes::new(110.0, 100.0, 0.5, 0.03, 0.25, OptionType::Call)
            .with_dividend_yield(0.02);
        let put = BlackScholes { option_type: OptionType::Put, ..call };
        let parity = 110.0 * (-0.02_f64 * 0.5).exp() - 100.0 * (-0.03_f64 * 0.5).exp();
        assert_relative_eq!(call.price() - put.price(), parity, epsilon = 1e-10);
    }

    #[test]
    fn test_expiry_is_intrinsic() {
        let call = BlackScholes::new(105.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call);
        assert_relative_eq!(call.price(), 5.0);
        let put = BlackScholes { option_type: OptionType::Put, ..call };
        assert_relative_eq!(put.price(), 0.0);
    }

    #[test]
    fn test_zero_vol_is_discounted_forward_intrinsic() {
        let call = BlackScholes::new(100.0, 90.0, 1.0, 0.05, 0.0, OptionType::Call);
        assert_relative_eq!(call.price(), 100.0 - 90.0 * (-0.05_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_spot() {
        let put = BlackScholes::new(0.0, 100.0, 1.0, 0.0, 0.3, OptionType::Put);
        assert_relative_eq!(put.price(), 100.0, epsilon = 1e-12);
        let call = BlackScholes { option_type: OptionType::Call, ..put };
        assert_relative_eq!(call.price(), 0.0);
    }

    #[test]
    fn test_greeks_against_finite_differences() {
        let bs = atm(OptionType::Call);
        let h = 1e-3;
        let up = BlackScholes { spot: 100.0 + h, ..bs };
        let dn = BlackScholes { spot: 100.0 - h, ..bs };
        assert_relative_eq!(bs.delta(), (up.price() - dn.price()) / (2.0 * h), epsilon = 1e-6);
        assert_relative_eq!(
            bs.gamma(),
            (up.price() - 2.0 * bs.price() + dn.price()) / (h * h),
            epsilon = 1e-4
        );

        // vega and theta have large third derivatives
        let h = 1e-4;
        let vup = BlackScholes { volatility: 0.2 + h, ..bs };
        let vdn = BlackScholes { volatility: 0.2 - h, ..bs };
        assert_relative_eq!(bs.vega(), (vup.price() - vdn.price()) / (2.0 * h), epsilon = 1e-5);

        // theta is -∂V/∂T
        let tup = BlackScholes { time_to_expiry: 1.0 + h, ..bs };
        let tdn = BlackScholes { time_to_expiry: 1.0 - h, ..bs };
        assert_relative_eq!(bs.theta(), -(tup.price() - tdn.price()) / (2.0 * h), epsilon = 1e-5);

        let put = atm(OptionType::Put);
        let tup = BlackScholes { time_to_expiry: 1.0 + h, ..put };
        let tdn = BlackScholes { time_to_expiry: 1.0 - h, ..put };
        assert_relative_eq!(put.theta(), -(tup.price() - tdn.price()) / (2.0 * h), epsilon = 1e-5);
    }

    #[test]
    fn test_pricer_on_instruments() {
        let pricer = BlackScholesPricer::new();
        let eq: Instrument = Equity::new("AAPL", 280.0).into();
        let params = MarketParams::from_instrument(&eq, None).unwrap();
        assert_eq!(pricer.price(&eq, &params).unwrap(), 280.0);

        let opt: Instrument = EquityOption::new("AAPL", OptionType::Call, 100.0, 100.0, 0.2)
            .with_dte(365.0)
            .with_rate(0.05)
            .into();
        let params = MarketParams::from_instrument(&opt, None).unwrap();
        assert_relative_eq!(pricer.price(&opt, &params).unwrap(), 10.4506, epsilon = 1e-4);
    }

    #[test]
    fn test_pricer_errors() {
        let pricer = BlackScholesPricer::new();
        let opt: Instrument = EquityOption::new("AAPL", OptionType::Call, 100.0, 100.0, 0.2).into();
        let params = MarketParams::from_instrument(&opt, None).unwrap();
        assert!(matches!(
            pricer.price(&opt, &params),
            Err(PricingError::MissingParameter { parameter: "time to expiry", .. })
        ));

        let bad: Instrument = EquityOption::new("AAPL", OptionType::Call, 0.0, 100.0, 0.2)
            .with_dte(30.0)
            .into();
        let params = MarketParams::from_instrument(&bad, None).unwrap();
        assert!(matches!(
            pricer.price(&bad, &params),
            Err(PricingError::InvalidParameter { parameter: "strike", .. })
        ));
    }
}
