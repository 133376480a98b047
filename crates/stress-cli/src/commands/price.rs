//! Price command implementation.
//!
//! Prices a single European option with Black-Scholes and reports its greeks.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use stress_pricing::{BlackScholes, OptionType};

use crate::cli::OutputFormat;
use crate::commands::{validate_non_negative, validate_positive};
use crate::output::{print_header, print_json, print_output, KeyValue};

/// Option side accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionSide {
    /// Call option
    Call,
    /// Put option
    Put,
}

impl From<OptionSide> for OptionType {
    fn from(side: OptionSide) -> Self {
        match side {
            OptionSide::Call => OptionType::Call,
            OptionSide::Put => OptionType::Put,
        }
    }
}

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Option type
    #[arg(short = 't', long, value_enum, default_value = "call")]
    pub option_type: OptionSide,

    /// Spot price of the underlying
    #[arg(short, long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Implied volatility (decimal, e.g. 0.25)
    #[arg(long)]
    pub vol: f64,

    /// Days to expiry
    #[arg(short, long)]
    pub dte: f64,

    /// Risk-free rate (decimal)
    #[arg(short, long, default_value = "0")]
    pub rate: f64,

    /// Continuous dividend yield (decimal)
    #[arg(long, default_value = "0")]
    pub dividend: f64,

    /// Days per year used to convert days to expiry
    #[arg(long, default_value = "365")]
    pub days_per_year: f64,
}

/// Option value and greeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceResult {
    /// Option value
    pub value: f64,
    /// dV/dS
    pub delta: f64,
    /// d2V/dS2
    pub gamma: f64,
    /// Value change for a one point (1%) volatility move
    pub vega: f64,
    /// Value change per calendar day
    pub theta: f64,
}

/// Prices the option described by `args`.
pub fn calculate(args: &PriceArgs) -> Result<PriceResult> {
    let spot = validate_non_negative("spot", args.spot)?;
    let strike = validate_positive("strike", args.strike)?;
    let vol = validate_non_negative("vol", args.vol)?;
    let dte = validate_non_negative("dte", args.dte)?;
    let days_per_year = validate_positive("days-per-year", args.days_per_year)?;

    let model = BlackScholes::new(
        spot,
        strike,
        dte / days_per_year,
        args.rate,
        vol,
        args.option_type.into(),
    )
    .with_dividend_yield(args.dividend);

    Ok(PriceResult {
        value: model.price(),
        delta: model.delta(),
        gamma: model.gamma(),
        vega: model.vega() / 100.0,
        theta: model.theta() / days_per_year,
    })
}

/// Execute the price command.
pub fn execute(args: PriceArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let result = calculate(&args)?;

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    let rows = vec![
        KeyValue::new("Type", format!("{:?}", args.option_type)),
        KeyValue::from_f64("Value", result.value, 4),
        KeyValue::from_f64("Delta", result.delta, 4),
        KeyValue::from_f64("Gamma", result.gamma, 6),
        KeyValue::from_f64("Vega (1%)", result.vega, 4),
        KeyValue::from_f64("Theta (1d)", result.theta, 4),
    ];

    if format == OutputFormat::Table && !quiet {
        print_header(&format!(
            "Black-Scholes S={} K={} vol={} dte={}",
            args.spot, args.strike, args.vol, args.dte
        ));
    }
    print_output(&rows, format)
}
