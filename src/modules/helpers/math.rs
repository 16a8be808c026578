pub struct Math {}

impl Math {
    pub fn round_float_to_n_decimals(number: f64, decimals: i32) -> f64 {
        let multiplier = 10.0_f64.powi(decimals);
        (number * multiplier).round() / multiplier
    }

    pub fn mean(nums: &[f64]) -> f64 {
        let sum: f64 = nums.iter().sum();
        let len = nums.len() as f64;
        sum / len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_requested_precision() {
        assert_eq!(Math::round_float_to_n_decimals(5.79349, 3), 5.793);
        assert_eq!(Math::round_float_to_n_decimals(0.125, 2), 0.13);
        assert_eq!(Math::round_float_to_n_decimals(1200.0, 2), 1200.0);
    }

    #[test]
    fn mean_of_positions() {
        assert_eq!(Math::mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(Math::mean(&[4.0]), 4.0);
    }
}
