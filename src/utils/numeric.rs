//! Numeric helpers.

/// Round to `places` decimal places, halves away from zero.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_one_place() {
        assert!((round_to(18.000_000_000_000_004, 1) - 18.0).abs() < f64::EPSILON);
        assert!((round_to(2.400_000_000_000_000_4, 1) - 2.4).abs() < f64::EPSILON);
        assert!((round_to(0.25, 1) - 0.3).abs() < f64::EPSILON);
        assert!((round_to(-0.25, 1) + 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_to_two_places() {
        assert!((round_to(0.240_000_000_000_000_02, 2) - 0.24).abs() < f64::EPSILON);
        assert!((round_to(36.0, 2) - 36.0).abs() < f64::EPSILON);
    }
}
