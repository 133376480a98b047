//! Factor helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{StressError, StressResult};
use crate::types::Factor;

/// Default benchmark for beta factors.
pub const DEFAULT_BENCHMARK: &str = "SPX";

/// Creates a beta factor named `beta`.
#[must_use]
pub fn create_beta_factor(
    betas: BTreeMap<String, f64>,
    benchmark: Option<&str>,
) -> Factor {
    Factor::new("beta", betas).with_benchmark(benchmark.unwrap_or(DEFAULT_BENCHMARK))
}

/// Creates a single-underlying factor named `idio_{symbol}`.
#[must_use]
pub fn create_idiosyncratic_factor(symbol: &str, value: f64) -> Factor {
    Factor::new(
        format!("idio_{symbol}"),
        BTreeMap::from([(symbol.to_string(), value)]),
    )
}

/// Named factors available to scenario definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorSet {
    factors: BTreeMap<String, Factor>,
}

impl FactorSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a factor under its own name, replacing any previous one.
    pub fn insert(&mut self, factor: Factor) {
        self.factors.insert(factor.name.clone(), factor);
    }

    /// Adds a factor (builder style).
    #[must_use]
    pub fn with(mut self, factor: Factor) -> Self {
        self.insert(factor);
        self
    }

    /// Looks up a factor.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Factor> {
        self.factors.get(name)
    }

    /// Resolves an optional factor reference.
    ///
    /// # Errors
    ///
    /// Returns [`StressError::UnknownFactor`] if `name` is set but not defined.
    pub fn resolve(&self, name: Option<&str>) -> StressResult<Option<Factor>> {
        name.map(|n| self.get(n).cloned().ok_or_else(|| StressError::unknown_factor(n)))
            .transpose()
    }

    /// Number of factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Iterates factors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Factor> {
        self.factors.values()
    }
}

impl FromIterator<Factor> for FactorSet {
    fn from_iter<I: IntoIterator<Item = Factor>>(iter: I) -> Self {
        let mut set = Self::new();
        for factor in iter {
            set.insert(factor);
        }
        set
    }
}
