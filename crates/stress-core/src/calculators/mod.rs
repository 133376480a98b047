//! Stress calculators.
//!
//! A calculator turns a base parameter value, a shock and a factor loading
//! into the stressed parameter value:
//!
//! | Calculator                    | Formula                         |
//! |-------------------------------|---------------------------------|
//! | [`RelativeStressCalculator`]  | `base * (1 + shock * loading)`  |
//! | [`AbsoluteStressCalculator`]  | `base + shock * loading`        |
//! | [`TimeDecayCalculator`]       | `max(0, base - shock)`          |

mod absolute;
mod relative;
mod time_decay;

pub use absolute::AbsoluteStressCalculator;
pub use relative::RelativeStressCalculator;
pub use time_decay::TimeDecayCalculator;

use crate::types::{RiskDimension, ShockMode};

/// Computes a stressed parameter value.
pub trait StressCalculator: Send + Sync {
    /// Returns the stressed value of `base` under `shock`, scaled by `loading`.
    fn stressed_value(&self, base: f64, shock: f64, loading: f64) -> f64;
}

static RELATIVE: RelativeStressCalculator = RelativeStressCalculator;
static ABSOLUTE: AbsoluteStressCalculator = AbsoluteStressCalculator;
static TIME_DECAY: TimeDecayCalculator = TimeDecayCalculator;

/// Selects the calculator for a dimension and shock mode.
///
/// Time shocks are always days elapsed; every other dimension follows the
/// shock mode.
#[must_use]
pub fn calculator_for(dimension: RiskDimension, mode: ShockMode) -> &'static dyn StressCalculator {
    match (dimension, mode) {
        (RiskDimension::Time, _) => &TIME_DECAY,
        (_, ShockMode::Relative) => &RELATIVE,
        (_, ShockMode::Absolute) => &ABSOLUTE,
    }
}
