//! Report error types.

use thiserror::Error;

/// A specialized Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while rendering or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output was not valid UTF-8
    #[error("invalid UTF-8 in report output")]
    Utf8(#[from] std::string::FromUtf8Error),
}
