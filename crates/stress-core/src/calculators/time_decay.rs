use super::StressCalculator;

/// Time decay: removes days from the time to expiry, never below zero.
///
/// Factor loadings do not apply to the passage of time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeDecayCalculator;

impl StressCalculator for TimeDecayCalculator {
    fn stressed_value(&self, base: f64, shock: f64, _loading: f64) -> f64 {
        (base - shock).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_decay_floors_at_zero() {
        let calc = TimeDecayCalculator;
        assert_eq!(calc.stressed_value(30.0, 10.0, 1.0), 20.0);
        assert_eq!(calc.stressed_value(5.0, 10.0, 1.0), 0.0);
    }
}
