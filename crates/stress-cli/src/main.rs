//! Stress CLI - Command-line interface for equity and option stress testing.
//!
//! # Usage
//!
//! ```bash
//! # Write a sample configuration
//! stress init stress.toml
//!
//! # List its scenarios
//! stress scenarios stress.toml
//!
//! # Run everything, or selected scenarios
//! stress run stress.toml --summary --heatmap
//! stress run stress.toml --scenario "1-Day EPR" --format csv
//!
//! # Price a single option
//! stress price --spot 100 --strike 105 --vol 0.25 --dte 30 --rate 0.045
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, format, quiet)?,
        Commands::Scenarios(args) => commands::scenarios::execute(args, format, quiet)?,
        Commands::Price(args) => commands::price::execute(args, format, quiet)?,
        Commands::Init(args) => commands::init::execute(args, format, quiet)?,
    }

    Ok(())
}
