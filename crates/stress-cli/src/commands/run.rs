//! Run command implementation.
//!
//! Loads a configuration, runs its scenarios and prints or writes results.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use stress_engine::{ScenarioResults, StressTestEngine};
use stress_pricing::PricingRouter;
use stress_report::{
    compare_scenarios, summarize_results, summary_table, CompareFilter, PnlHeatmap,
    ResultsTable, ScenarioComparison, SummaryRow,
};

use crate::cli::OutputFormat;
use crate::commands::unique_slugs;
use crate::config::StressConfig;
use crate::output::{print_header, print_info, print_json, print_success, print_warning};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Configuration file (.toml, .json, .yaml)
    pub config: PathBuf,

    /// Run only these scenarios (repeatable)
    #[arg(short, long = "scenario", value_name = "NAME")]
    pub scenarios: Vec<String>,

    /// Print worst/best stress level per aggregate
    #[arg(long)]
    pub summary: bool,

    /// Print a P&L heatmap per scenario
    #[arg(long)]
    pub heatmap: bool,

    /// Compare position P&L across scenarios
    #[arg(long)]
    pub compare: bool,

    /// Restrict the comparison to one underlying
    #[arg(long, requires = "compare")]
    pub underlying: Option<String>,

    /// Write one CSV file per scenario into this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// JSON document for one scenario.
#[derive(Debug, Serialize)]
struct ScenarioOutput {
    table: ResultsTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Vec<SummaryRow>>,
}

/// JSON document for a run.
#[derive(Debug, Serialize)]
struct RunOutput {
    portfolio: String,
    scenarios: Vec<ScenarioOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<Vec<ScenarioComparison>>,
}

/// Loads the configuration and runs the selected scenarios.
pub fn run_config(config: &StressConfig, names: &[String]) -> Result<Vec<ScenarioResults>> {
    let scenarios = config.build_scenarios(names)?;
    let engine = StressTestEngine::new(config.portfolio.clone(), PricingRouter::new())
        .with_config(config.engine.clone());
    Ok(engine.run_scenarios(&scenarios)?)
}

/// Execute the run command.
pub fn execute(args: RunArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = StressConfig::load(&args.config)?;
    info!(
        "Running {} from {}",
        if args.scenarios.is_empty() {
            "all scenarios".to_string()
        } else {
            args.scenarios.join(", ")
        },
        args.config.display()
    );

    let results = run_config(&config, &args.scenarios)?;
    if results.is_empty() {
        print_warning(&format!("No scenarios defined in {}", args.config.display()));
    }
    let comparison = args.compare.then(|| {
        let filter = match &args.underlying {
            Some(symbol) => CompareFilter::all().underlying(symbol.clone()),
            None => CompareFilter::all(),
        };
        compare_scenarios(&results, &filter)
    });

    if let Some(dir) = &args.output_dir {
        write_csv_files(dir, &results, quiet)?;
    }

    match format {
        OutputFormat::Table => print_tables(&config, &results, &args, comparison.as_deref(), quiet),
        OutputFormat::Json => {
            let output = RunOutput {
                portfolio: config.portfolio.name.clone(),
                scenarios: results
                    .iter()
                    .map(|r| ScenarioOutput {
                        table: ResultsTable::from_results(r),
                        summary: args.summary.then(|| summarize_results(r)),
                    })
                    .collect(),
                comparison,
            };
            print_json(&output)
        }
        OutputFormat::Csv => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for (i, r) in results.iter().enumerate() {
                if i > 0 {
                    writeln!(handle)?;
                }
                ResultsTable::from_results(r).write_csv(&mut handle)?;
            }
            Ok(())
        }
    }
}

fn print_tables(
    config: &StressConfig,
    results: &[ScenarioResults],
    args: &RunArgs,
    comparison: Option<&[ScenarioComparison]>,
    quiet: bool,
) -> Result<()> {
    if !quiet {
        print_info(&format!(
            "{}: {} positions, {} scenarios",
            config.portfolio.name,
            config.portfolio.len(),
            results.len()
        ));
    }

    for r in results {
        print_header(&r.scenario_name);
        println!("{}", ResultsTable::from_results(r).to_table_string());

        if args.summary {
            println!("\n{}", "Summary".bold());
            println!("{}", summary_table(&summarize_results(r)));
        }
        if args.heatmap {
            println!("\n{}", PnlHeatmap::from_results(r).render(true));
        }
    }

    if let Some(comparison) = comparison {
        print_header("Comparison");
        for c in comparison {
            println!("{}\n{}", c.scenario_name.bold(), c.to_table_string());
        }
    }
    Ok(())
}

fn write_csv_files(dir: &Path, results: &[ScenarioResults], quiet: bool) -> Result<()> {
    fs::create_dir_all(dir)?;
    let stems = unique_slugs(results.iter().map(|r| r.scenario_name.as_str()));
    for (r, stem) in results.iter().zip(stems) {
        let path = dir.join(format!("{stem}.csv"));
        ResultsTable::from_results(r).write_csv(File::create(&path)?)?;
        if !quiet {
            print_success(&format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}
