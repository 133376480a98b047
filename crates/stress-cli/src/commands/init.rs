//! Init command implementation.
//!
//! Writes a sample configuration to start from.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::config::{ConfigFormat, StressConfig, SAMPLE_CONFIG};
use crate::error::CliError;
use crate::output::{print_info, print_success};

/// Arguments for the init command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output path; the extension selects TOML, JSON or YAML
    #[arg(default_value = "stress.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Sample configuration rendered in `format`. TOML keeps the commented template.
pub fn sample_text(format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => Ok(SAMPLE_CONFIG.to_string()),
        other => {
            let config = StressConfig::parse(SAMPLE_CONFIG, ConfigFormat::Toml)
                .map_err(|e| anyhow::anyhow!("Invalid sample configuration: {e}"))?;
            config.render(other)
        }
    }
}

/// Execute the init command.
pub fn execute(args: InitArgs, _format: OutputFormat, quiet: bool) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::FileExists(args.path).into());
    }

    let format = ConfigFormat::from_path(&args.path)?;
    fs::write(&args.path, sample_text(format)?)?;

    if !quiet {
        print_success(&format!("Wrote {}", args.path.display()));
        print_info(&format!("Run it with: stress run {}", args.path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_text_formats() {
        let toml = sample_text(ConfigFormat::Toml).unwrap();
        assert!(toml.starts_with('#'));

        let json = sample_text(ConfigFormat::Json).unwrap();
        let parsed = StressConfig::parse(&json, ConfigFormat::Json).unwrap();
        assert_eq!(parsed.portfolio.name, "Sample Portfolio");
        assert_eq!(parsed.scenarios.len(), 5);
    }
}
