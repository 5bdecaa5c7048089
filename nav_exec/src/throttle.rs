//! # Throttle profile
//!
//! Maps the distance to the current waypoint onto a throttle demand. The distance law gives the
//! desired throttle, which is then rate limited against the previous demand and finally floored
//! at the drivetrain's minimum moving throttle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;
use util::maths::lin_map;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Distance based throttle profile.
///
/// All throttle values are in percent, accelerations in percent per second.
#[derive(Debug, Clone, Serialize)]
pub struct ThrottleProfile {
    pub maximum_throttle: f64,
    pub minimum_throttle: f64,

    /// Throttle used at or below `min_distance_m`, and while the post-arrival delay is active.
    pub min_distance_throttle: f64,

    /// Distance at and above which the maximum throttle is used.
    pub threshold_distance_m: f64,

    /// Distance at and below which the minimum distance throttle is used.
    pub min_distance_m: f64,

    pub maximum_acceleration: f64,
    pub maximum_deceleration: f64,

    /// Rate at which `next` is called.
    pub refresh_rate_hz: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ThrottleProfile {
    /// Calculate the next throttle demand.
    pub fn next(&self, distance_m: f64, last_throttle: f64, accel_delay_active: bool) -> f64 {
        let base = self.base_throttle(distance_m, accel_delay_active);

        // Per-cycle rate budgets
        let max_increase = self.maximum_acceleration / self.refresh_rate_hz;
        let max_decrease = self.maximum_deceleration / self.refresh_rate_hz;

        let limited = if base - last_throttle > max_increase {
            last_throttle + max_increase
        } else if last_throttle - base > max_decrease {
            last_throttle - max_decrease
        } else {
            base
        };

        if limited < self.minimum_throttle {
            self.minimum_throttle
        } else {
            limited
        }
    }

    /// Desired throttle for the given distance before any rate limiting.
    pub fn base_throttle(&self, distance_m: f64, accel_delay_active: bool) -> f64 {
        if accel_delay_active || distance_m <= self.min_distance_m {
            self.min_distance_throttle
        } else if distance_m < self.threshold_distance_m {
            lin_map(
                (self.min_distance_m, self.threshold_distance_m),
                (self.min_distance_throttle, self.maximum_throttle),
                distance_m,
            )
        } else {
            self.maximum_throttle
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn profile() -> ThrottleProfile {
        ThrottleProfile {
            maximum_throttle: 30.0,
            minimum_throttle: 5.0,
            min_distance_throttle: 10.0,
            threshold_distance_m: 20.0,
            min_distance_m: 4.0,
            maximum_acceleration: 10.0,
            maximum_deceleration: 20.0,
            refresh_rate_hz: 10.0,
        }
    }

    #[test]
    fn test_base_segments() {
        let p = profile();

        assert_eq!(p.base_throttle(2.0, false), 10.0);
        assert_eq!(p.base_throttle(4.0, false), 10.0);
        assert!((p.base_throttle(12.0, false) - 20.0).abs() < 1e-12);
        assert_eq!(p.base_throttle(20.0, false), 30.0);
        assert_eq!(p.base_throttle(500.0, false), 30.0);

        // Delay forces the minimum distance segment regardless of distance
        assert_eq!(p.base_throttle(500.0, true), 10.0);
    }

    #[test]
    fn test_acceleration_limited() {
        let p = ThrottleProfile {
            maximum_throttle: 1.0,
            minimum_throttle: 0.0,
            min_distance_throttle: 0.5,
            threshold_distance_m: 5.0,
            min_distance_m: 1.0,
            maximum_acceleration: 2.0,
            maximum_deceleration: 2.0,
            refresh_rate_hz: 10.0,
        };

        assert!((p.next(100.0, 0.0, false) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_deceleration_limited() {
        let p = profile();

        // Far away at full throttle then the delay is armed, decelerate by 2% per cycle
        assert!((p.next(100.0, 30.0, true) - 28.0).abs() < 1e-12);
    }

    #[test]
    fn test_floor() {
        let mut p = profile();
        p.min_distance_throttle = 0.0;

        assert_eq!(p.next(0.0, 0.0, false), 5.0);
        assert_eq!(p.next(0.0, 6.0, false), 5.0);
    }

    #[test]
    fn test_bounds_and_rate() {
        let p = profile();
        let max_step = p.maximum_acceleration.max(p.maximum_deceleration) / p.refresh_rate_hz;

        for last_step in 0..=60 {
            let last = p.minimum_throttle
                + (p.maximum_throttle - p.minimum_throttle) * (last_step as f64) / 60.0;

            for dist_step in 0..=100 {
                let distance = (dist_step as f64) * 0.5;

                for &delay in &[false, true] {
                    let next = p.next(distance, last, delay);

                    assert!(
                        next >= p.minimum_throttle && next <= p.maximum_throttle,
                        "throttle {} out of bounds",
                        next
                    );
                    assert!(
                        (next - last).abs() <= max_step + 1e-9,
                        "step from {} to {} too large",
                        last,
                        next
                    );
                }
            }
        }
    }
}
