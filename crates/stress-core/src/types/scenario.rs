//! Stress scenarios and their shock grids.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{AggregationType, Factor, RiskArray, RiskDimension, Shock, StressColumn, StressPoint};
use crate::error::{StressError, StressResult};

const FRACTION_TOLERANCE: f64 = 1e-9;

/// Price grid for a single underlying, expressed as fractions of its range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderlyingGrid {
    /// Expected price range as a fraction of spot (e.g. `0.20` for 20%).
    pub range: f64,

    /// Fractions of the range to apply (e.g. `[-1.0, -0.5, 0.5, 1.0]`).
    pub fractions: Vec<f64>,
}

impl UnderlyingGrid {
    /// Creates a grid for one underlying.
    #[must_use]
    pub fn new(range: f64, fractions: Vec<f64>) -> Self {
        Self { range, fractions }
    }

    /// Relative price shock at `fraction`, if the grid contains it.
    #[must_use]
    pub fn shock_at(&self, fraction: f64) -> Option<f64> {
        self.fractions
            .iter()
            .any(|f| (f - fraction).abs() < FRACTION_TOLERANCE)
            .then(|| fraction * self.range)
    }

    /// The grid as a relative price risk array (`fraction * range`).
    #[must_use]
    pub fn risk_array(&self) -> RiskArray {
        RiskArray {
            dimension: RiskDimension::Price,
            values: self.fractions.iter().map(|f| f * self.range).collect(),
            mode: super::ShockMode::Relative,
        }
    }
}

/// Per-underlying price grids (EPR scenarios).
///
/// Each underlying is moved by its own range; results are reported against
/// the common fraction axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IdiosyncraticGrid {
    /// Underlying symbol -> grid.
    pub underlyings: BTreeMap<String, UnderlyingGrid>,
}

impl IdiosyncraticGrid {
    /// Creates a grid from per-symbol entries.
    ///
    /// # Errors
    ///
    /// Returns an error if a range is negative or non-finite, or a symbol
    /// has no usable fractions.
    pub fn new(underlyings: BTreeMap<String, UnderlyingGrid>) -> StressResult<Self> {
        let grid = Self { underlyings };
        grid.validate()?;
        Ok(grid)
    }

    fn validate(&self) -> StressResult<()> {
        for (symbol, entry) in &self.underlyings {
            if !entry.range.is_finite() || entry.range < 0.0 {
                return Err(StressError::InvalidPriceRange {
                    symbol: symbol.clone(),
                    value: entry.range,
                });
            }
            entry.risk_array().validate()?;
        }
        Ok(())
    }

    /// Sorted union of all fractions across underlyings.
    #[must_use]
    pub fn fractions(&self) -> Vec<f64> {
        let mut all: Vec<f64> = self
            .underlyings
            .values()
            .flat_map(|g| g.fractions.iter().copied())
            .collect();
        all.sort_by(f64::total_cmp);
        all.dedup_by(|a, b| (*a - *b).abs() < FRACTION_TOLERANCE);
        all
    }

    /// Price shock for `symbol` at `fraction`, if the symbol's grid carries it.
    #[must_use]
    pub fn shock_for(&self, symbol: &str, fraction: f64) -> Option<Shock> {
        self.underlyings
            .get(symbol)
            .and_then(|g| g.shock_at(fraction))
            .map(|v| Shock::relative(RiskDimension::Price, v))
    }

    /// Per-underlying price risk arrays.
    #[must_use]
    pub fn risk_arrays(&self) -> BTreeMap<String, RiskArray> {
        self.underlyings
            .iter()
            .map(|(s, g)| (s.clone(), g.risk_array()))
            .collect()
    }
}

/// The shock grid of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioGrid {
    /// The same risk arrays apply to every position.
    Uniform {
        /// Risk arrays, one per dimension.
        arrays: Vec<RiskArray>,
    },
    /// Each underlying carries its own price grid.
    Idiosyncratic(IdiosyncraticGrid),
}

/// A named stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenario {
    /// Scenario name.
    pub name: String,

    /// Shock grid.
    pub grid: ScenarioGrid,

    /// Optional factor scaling shocks per underlying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<Factor>,

    /// How position P&L is aggregated.
    #[serde(default)]
    pub aggregation: AggregationType,
}

impl StressScenario {
    /// Creates a scenario with uniform risk arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no arrays, an array is invalid, or a
    /// dimension appears twice.
    pub fn new(name: impl Into<String>, arrays: Vec<RiskArray>) -> StressResult<Self> {
        let scenario = Self {
            name: name.into(),
            grid: ScenarioGrid::Uniform { arrays },
            factor: None,
            aggregation: AggregationType::ByUnderlying,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Creates an idiosyncratic (per-underlying) scenario.
    #[must_use]
    pub fn idiosyncratic(name: impl Into<String>, grid: IdiosyncraticGrid) -> Self {
        Self {
            name: name.into(),
            grid: ScenarioGrid::Idiosyncratic(grid),
            factor: None,
            aggregation: AggregationType::ByUnderlying,
        }
    }

    /// Sets the factor.
    #[must_use]
    pub fn with_factor(mut self, factor: Option<Factor>) -> Self {
        self.factor = factor;
        self
    }

    /// Sets the aggregation type.
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: AggregationType) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Validates the grid.
    pub fn validate(&self) -> StressResult<()> {
        match &self.grid {
            ScenarioGrid::Uniform { arrays } => {
                if arrays.is_empty() {
                    return Err(StressError::EmptyScenario {
                        scenario: self.name.clone(),
                    });
                }
                for (i, array) in arrays.iter().enumerate() {
                    array.validate()?;
                    if arrays[..i].iter().any(|a| a.dimension == array.dimension) {
                        return Err(StressError::DuplicateDimension {
                            scenario: self.name.clone(),
                            dimension: array.dimension,
                        });
                    }
                }
                Ok(())
            }
            ScenarioGrid::Idiosyncratic(grid) => {
                if grid.underlyings.is_empty() {
                    return Err(StressError::EmptyScenario {
                        scenario: self.name.clone(),
                    });
                }
                grid.validate()
            }
        }
    }

    /// Returns true if each underlying has its own grid.
    #[must_use]
    pub fn is_idiosyncratic(&self) -> bool {
        matches!(self.grid, ScenarioGrid::Idiosyncratic(_))
    }

    /// Uniform risk arrays (empty for idiosyncratic scenarios).
    #[must_use]
    pub fn risk_arrays(&self) -> &[RiskArray] {
        match &self.grid {
            ScenarioGrid::Uniform { arrays } => arrays,
            ScenarioGrid::Idiosyncratic(_) => &[],
        }
    }

    /// All stress points of a uniform grid.
    ///
    /// Cartesian product of the risk arrays with the first array varying
    /// slowest. Idiosyncratic scenarios have no global stress points.
    #[must_use]
    pub fn stress_points(&self) -> Vec<StressPoint> {
        let arrays = self.risk_arrays();
        if arrays.is_empty() {
            return Vec::new();
        }

        let mut points = vec![StressPoint::default()];
        for array in arrays {
            points = points
                .into_iter()
                .flat_map(|prefix| {
                    array.values.iter().map(move |&value| {
                        let mut shocks = prefix.shocks.clone();
                        shocks.push(Shock {
                            dimension: array.dimension,
                            value,
                            mode: array.mode,
                        });
                        StressPoint::new(shocks)
                    })
                })
                .collect();
        }
        points
    }

    /// The stress levels reported as result columns.
    #[must_use]
    pub fn columns(&self) -> Vec<StressColumn> {
        match &self.grid {
            ScenarioGrid::Uniform { .. } => self
                .stress_points()
                .iter()
                .map(StressColumn::from_point)
                .collect(),
            ScenarioGrid::Idiosyncratic(grid) => grid
                .fractions()
                .into_iter()
                .map(StressColumn::from_fraction)
                .collect(),
        }
    }

    /// Labels shared by more than one column, sorted.
    ///
    /// Levels closer than the three-decimal label precision render the same.
    #[must_use]
    pub fn duplicate_labels(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let dups: BTreeSet<String> = self
            .columns()
            .into_iter()
            .filter_map(|c| (!seen.insert(c.label.clone())).then_some(c.label))
            .collect();
        dups.into_iter().collect()
    }

    /// Number of result columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        match &self.grid {
            ScenarioGrid::Uniform { arrays } => arrays.iter().map(RiskArray::len).product(),
            ScenarioGrid::Idiosyncratic(grid) => grid.fractions().len(),
        }
    }
}
