//! Factor loadings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A factor that scales a shock per underlying.
///
/// A beta factor, for example, maps each symbol to its beta against a
/// benchmark so that a benchmark move of `x` shocks the symbol by `beta * x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    /// Factor name (e.g. `beta`).
    pub name: String,

    /// Underlying symbol -> loading.
    #[serde(default)]
    pub loadings: BTreeMap<String, f64>,

    /// Benchmark the loadings are measured against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<String>,
}

impl Factor {
    /// Creates a factor without a benchmark.
    #[must_use]
    pub fn new(name: impl Into<String>, loadings: BTreeMap<String, f64>) -> Self {
        Self {
            name: name.into(),
            loadings,
            benchmark: None,
        }
    }

    /// Sets the benchmark symbol.
    #[must_use]
    pub fn with_benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = Some(benchmark.into());
        self
    }

    /// Returns the loading for `symbol`, or `1.0` if the symbol has none.
    #[must_use]
    pub fn loading(&self, symbol: &str) -> f64 {
        self.loadings.get(symbol).copied().unwrap_or(1.0)
    }
}
