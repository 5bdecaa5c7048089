//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

/// Limit a value to the range `[min, max]`.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float,
{
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

/// Wrap an angle in degrees into the range `(-180, 180]`.
///
/// The result is the signed shortest rotation equivalent to `angle_deg`.
pub fn wrap_180_deg<T>(angle_deg: T) -> T
where
    T: Float,
{
    let full = T::from(360.0).unwrap_or_else(T::nan);
    let half = T::from(180.0).unwrap_or_else(T::nan);

    let wrapped = rem_euclid(angle_deg, full);

    if wrapped > half {
        wrapped - full
    } else {
        wrapped
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0f64, 10f64), (0f64, 100f64), 5f64), 50f64);
        assert_eq!(lin_map((2f64, 10f64), (20f64, 60f64), 6f64), 40f64);
    }

    #[test]
    fn test_wrap_180_deg() {
        assert_eq!(wrap_180_deg(340f64), -20f64);
        assert_eq!(wrap_180_deg(-340f64), 20f64);
        assert_eq!(wrap_180_deg(180f64), 180f64);
        assert_eq!(wrap_180_deg(-180f64), 180f64);
        assert_eq!(wrap_180_deg(0f64), 0f64);
        assert_eq!(wrap_180_deg(725f64), 5f64);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5f64, -1f64, 1f64), 1f64);
        assert_eq!(clamp(-5f64, -1f64, 1f64), -1f64);
        assert_eq!(clamp(0.5f64, -1f64, 1f64), 0.5f64);
    }
}
