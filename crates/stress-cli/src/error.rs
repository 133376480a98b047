//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file extension is not toml, json, yaml or yml.
    #[error("Unsupported config format: {0}. Use .toml, .json, .yaml or .yml.")]
    UnsupportedFormat(PathBuf),

    /// Configuration file could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Config file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Requested scenario is not in the configuration.
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    /// Two scenarios share a name.
    #[error("Duplicate scenario name: {0}")]
    DuplicateScenario(String),

    /// Two factors share a name.
    #[error("Duplicate factor name: {0}")]
    DuplicateFactor(String),

    /// Refusing to overwrite an existing file.
    #[error("{0} already exists. Use --force to overwrite.")]
    FileExists(PathBuf),

    /// Invalid command-line value.
    #[error("Invalid {name}: {value}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Scenario definition error.
    #[error(transparent)]
    Stress(#[from] stress_core::StressError),

    /// Engine error.
    #[error(transparent)]
    Engine(#[from] stress_engine::EngineError),

    /// Report error.
    #[error(transparent)]
    Report(#[from] stress_report::ReportError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
