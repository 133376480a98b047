//! Scenarios command implementation.
//!
//! Lists the scenarios defined in a configuration file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use stress_core::StressScenario;

use crate::cli::OutputFormat;
use crate::config::StressConfig;
use crate::output::{print_header, print_output};

/// Arguments for the scenarios command.
#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Configuration file (.toml, .json, .yaml)
    pub config: PathBuf,
}

/// One listed scenario.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ScenarioRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Grid")]
    pub grid: String,
    #[tabled(rename = "Factor")]
    pub factor: String,
    #[tabled(rename = "Aggregation")]
    pub aggregation: String,
    #[tabled(rename = "Columns")]
    pub columns: usize,
    #[tabled(rename = "Range")]
    pub range: String,
}

impl ScenarioRow {
    fn new(kind: &str, scenario: &StressScenario) -> Self {
        let labels: Vec<String> = scenario.columns().into_iter().map(|c| c.label).collect();
        let grid = if scenario.is_idiosyncratic() {
            "per underlying".to_string()
        } else {
            scenario
                .risk_arrays()
                .iter()
                .map(|a| format!("{}[{}]", a.dimension, a.len()))
                .collect::<Vec<_>>()
                .join(" x ")
        };
        let range = match (labels.first(), labels.last()) {
            (Some(first), Some(last)) => format!("{first} .. {last}"),
            _ => String::new(),
        };

        Self {
            name: scenario.name.clone(),
            kind: kind.to_string(),
            grid,
            factor: scenario
                .factor
                .as_ref()
                .map_or_else(|| "-".to_string(), |f| f.name.clone()),
            aggregation: scenario.aggregation.to_string(),
            columns: labels.len(),
            range,
        }
    }
}

/// Builds one row per configured scenario.
pub fn scenario_rows(config: &StressConfig) -> Result<Vec<ScenarioRow>> {
    let factors = config.factor_set();
    config
        .scenarios
        .iter()
        .map(|def| {
            let scenario = def.build(&factors)?;
            Ok(ScenarioRow::new(def.kind(), &scenario))
        })
        .collect()
}

/// Execute the scenarios command.
pub fn execute(args: ScenariosArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = StressConfig::load(&args.config)?;
    let rows = scenario_rows(&config)?;

    if format == OutputFormat::Table && !quiet {
        print_header(&format!(
            "{} ({} positions)",
            config.portfolio.name,
            config.portfolio.len()
        ));
    }
    print_output(&rows, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigFormat, SAMPLE_CONFIG};

    #[test]
    fn test_sample_rows() {
        let config = StressConfig::parse(SAMPLE_CONFIG, ConfigFormat::Toml).unwrap();
        let rows = scenario_rows(&config).unwrap();
        assert_eq!(rows.len(), config.scenarios.len());

        let price = &rows[0];
        assert_eq!(price.name, "Price Stress");
        assert_eq!(price.kind, "price");
        assert_eq!(price.columns, 5);
        assert_eq!(price.range, "-0.100 .. 0.100");
        assert_eq!(price.factor, "-");

        assert_eq!(rows[1].factor, "beta");
        assert_eq!(rows[2].columns, 9);
        assert_eq!(rows[2].grid, "price[3] x volatility[3]");
        assert_eq!(rows[3].grid, "per underlying");
        assert_eq!(rows[3].columns, 4);
        assert_eq!(rows[4].aggregation, "total");
    }
}
