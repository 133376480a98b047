use super::StressCalculator;

/// Absolute (additive) stress.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteStressCalculator;

impl StressCalculator for AbsoluteStressCalculator {
    fn stressed_value(&self, base: f64, shock: f64, loading: f64) -> f64 {
        base + shock * loading
    }
}
