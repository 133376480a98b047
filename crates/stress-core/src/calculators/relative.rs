use super::StressCalculator;

/// Relative (percentage) stress.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeStressCalculator;

impl StressCalculator for RelativeStressCalculator {
    fn stressed_value(&self, base: f64, shock: f64, loading: f64) -> f64 {
        base * (1.0 + shock * loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relative_with_loading() {
        let calc = RelativeStressCalculator;
        assert_relative_eq!(calc.stressed_value(150.0, -0.05, 1.0), 142.5, epsilon = 1e-9);
        // beta 1.5 turns a -10% benchmark move into -15%
        assert_relative_eq!(calc.stressed_value(200.0, -0.10, 1.5), 170.0, epsilon = 1e-9);
    }
}
