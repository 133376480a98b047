//! Stress test configuration files.
//!
//! A configuration holds the portfolio, named factors, engine settings and
//! scenario definitions. TOML, JSON and YAML are accepted, chosen by file
//! extension.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use stress_core::factors::FactorSet;
use stress_core::scenarios::ScenarioDefinition;
use stress_core::{Factor, StressScenario};
use stress_engine::{EngineConfig, Portfolio};

use crate::error::{CliError, CliResult};

/// Sample configuration written by `stress init`.
pub const SAMPLE_CONFIG: &str = include_str!("sample_config.toml");

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML
    Toml,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> CliResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(CliError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// A complete stress test configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressConfig {
    /// Portfolio under test.
    pub portfolio: Portfolio,

    /// Engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Factors referenced by scenarios.
    #[serde(default)]
    pub factors: Vec<Factor>,

    /// Scenario definitions, run in order.
    #[serde(default)]
    pub scenarios: Vec<ScenarioDefinition>,
}

impl StressConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let text = fs::read_to_string(path)?;
        let config = Self::parse(&text, format).map_err(|message| CliError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        config.validate()?;
        debug!(
            "Loaded {}: {} positions, {} factors, {} scenarios",
            path.display(),
            config.portfolio.len(),
            config.factors.len(),
            config.scenarios.len()
        );
        Ok(config)
    }

    /// Checks the portfolio and that scenario and factor names are unique.
    pub fn validate(&self) -> CliResult<()> {
        self.portfolio.validate()?;

        let mut seen = HashSet::new();
        if let Some(dup) = self.scenarios.iter().find(|d| !seen.insert(d.name())) {
            return Err(CliError::DuplicateScenario(dup.name().to_string()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.factors.iter().find(|f| !seen.insert(f.name.as_str())) {
            return Err(CliError::DuplicateFactor(dup.name.clone()));
        }
        Ok(())
    }

    /// Parses configuration text.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, String> {
        match format {
            ConfigFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        }
    }

    /// Serializes the configuration in the given format.
    pub fn render(&self, format: ConfigFormat) -> anyhow::Result<String> {
        Ok(match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    /// The factors as a lookup set.
    pub fn factor_set(&self) -> FactorSet {
        self.factors.iter().cloned().collect()
    }

    /// Builds the selected scenarios, or all of them when `names` is empty.
    ///
    /// Selected scenarios keep configuration order.
    pub fn build_scenarios(&self, names: &[String]) -> CliResult<Vec<StressScenario>> {
        if let Some(missing) = names
            .iter()
            .find(|n| !self.scenarios.iter().any(|d| d.name() == n.as_str()))
        {
            return Err(CliError::UnknownScenario(missing.clone()));
        }

        let factors = self.factor_set();
        self.scenarios
            .iter()
            .filter(|d| names.is_empty() || names.iter().any(|n| n == d.name()))
            .map(|d| d.build(&factors).map_err(CliError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> StressConfig {
        StressConfig::parse(SAMPLE_CONFIG, ConfigFormat::Toml).unwrap()
    }

    #[test]
    fn test_sample_parses_and_builds() {
        let config = sample();
        assert_eq!(config.portfolio.len(), 4);
        assert!(config.portfolio.validate().is_ok());
        let scenarios = config.build_scenarios(&[]).unwrap();
        assert_eq!(scenarios.len(), config.scenarios.len());
        assert!(scenarios.iter().any(|s| s.is_idiosyncratic()));
        assert!(scenarios.iter().any(|s| s.factor.is_some()));
    }

    #[test]
    fn test_select_scenarios() {
        let config = sample();
        let picked = config
            .build_scenarios(&["1-Day EPR".to_string(), "Price Stress".to_string()])
            .unwrap();
        let names: Vec<_> = picked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Price Stress", "1-Day EPR"]);

        let err = config.build_scenarios(&["Nope".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::UnknownScenario(name) if name == "Nope"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = sample();
        let text = config.render(ConfigFormat::Yaml).unwrap();
        assert_eq!(StressConfig::parse(&text, ConfigFormat::Yaml).unwrap(), config);
    }

    #[test]
    fn test_json_conversion() {
        let config = sample();
        let text = config.render(ConfigFormat::Json).unwrap();
        let parsed = StressConfig::parse(&text, ConfigFormat::Json).unwrap();
        assert_eq!(parsed.portfolio.as_of, config.portfolio.as_of);
        assert_eq!(parsed.portfolio.len(), config.portfolio.len());
        let names: Vec<_> = parsed.scenarios.iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            ["Price Stress", "Beta Stress", "Price x Vol", "1-Day EPR", "Time Decay"]
        );
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("a.TOML")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(&PathBuf::from("a.yml")).unwrap(), ConfigFormat::Yaml);
        assert!(ConfigFormat::from_path(&PathBuf::from("a.txt")).is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut config = sample();
        assert!(config.validate().is_ok());

        let mut twice = config.clone();
        twice.scenarios.push(config.scenarios[0].clone());
        assert!(matches!(
            twice.validate(),
            Err(CliError::DuplicateScenario(name)) if name == "Price Stress"
        ));

        config.factors.push(config.factors[0].clone());
        assert!(matches!(
            config.validate(),
            Err(CliError::DuplicateFactor(name)) if name == "beta"
        ));
    }

    #[test]
    fn test_load_rejects_duplicate_factor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.toml");
        let text = r#"
            [portfolio]
            name = "x"

            [[factors]]
            name = "beta"
            loadings = { AAPL = 1.2 }

            [[factors]]
            name = "beta"
            loadings = { AAPL = 2.0 }
        "#;
        fs::write(&path, text).unwrap();
        assert!(matches!(
            StressConfig::load(&path),
            Err(CliError::DuplicateFactor(_))
        ));
    }

    #[test]
    fn test_unknown_factor_is_reported() {
        let text = r#"
            [portfolio]
            name = "x"

            [[scenarios]]
            type = "price"
            name = "Beta"
            factor = "beta"
        "#;
        let config = StressConfig::parse(text, ConfigFormat::Toml).unwrap();
        assert!(matches!(
            config.build_scenarios(&[]),
            Err(CliError::Stress(stress_core::StressError::UnknownFactor { .. }))
        ));
    }
}
