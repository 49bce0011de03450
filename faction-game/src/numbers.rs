//! Numeric helpers shared by the faction setters and the save codec.

use num_traits::Float;

/// Clamp `value` into `[min, max]`, mapping NaN to `min`.
#[must_use]
pub fn clamp_number<F: Float>(value: F, min: F, max: F) -> F {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Clamp only the lower bound, mapping NaN to `min`.
#[must_use]
pub fn clamp_min<F: Float>(value: F, min: F) -> F {
    clamp_number(value, min, F::infinity())
}

/// Zero and NaN count as "unset" when deciding what to persist.
#[must_use]
pub fn is_truthy<F: Float>(value: F) -> bool {
    !value.is_nan() && !value.is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_nan_and_bounds() {
        assert!((clamp_number(f64::NAN, 1.0, 5.0) - 1.0).abs() < f64::EPSILON);
        assert!((clamp_number(9.0, 1.0, 5.0) - 5.0).abs() < f64::EPSILON);
        assert!((clamp_number(-9.0_f32, 1.0, 5.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn clamp_min_leaves_upper_bound_open() {
        assert!((clamp_min(1e300, 0.0) - 1e300).abs() < f64::EPSILON);
        assert!(clamp_min(-0.5, 0.0).abs() < f64::EPSILON);
        assert!(clamp_min(f64::INFINITY, 0.0).is_infinite());
    }

    #[test]
    fn truthiness_matches_save_rules() {
        assert!(!is_truthy(0.0));
        assert!(!is_truthy(-0.0));
        assert!(!is_truthy(f64::NAN));
        assert!(is_truthy(0.25));
    }
}
