//! # Steering control module
//!
//! Converts the bearing to the current waypoint and the vehicle's compass heading into a steering
//! angle demand.
//!
//! Headings are represented in [0, 360), so a raw difference between two headings can point the
//! long way around the compass. The target heading is therefore first unwrapped to lie within
//! 180 degrees of the actual heading before being handed to the PID controller, and the
//! controller output is then wrapped back into (-180, 180].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod pid;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use pid::PidController;

use serde::Serialize;
use util::maths::wrap_180_deg;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Steering controller.
#[derive(Debug, Clone, Serialize)]
pub struct SteerCtrl {
    pid: PidController,
}

/// Output of one steering calculation.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SteerOutput {
    /// Output of the PID controller before the wraparound correction.
    ///
    /// Units: degrees
    pub raw_deg: f64,

    /// Steering angle demand.
    ///
    /// Units: degrees
    pub steering_deg: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SteerCtrl {
    /// Create a new steering controller.
    ///
    /// `max_angle_deg` is the maximum rotation of the steering servo either side of centre.
    pub fn new(k_p: f64, k_i: f64, k_d: f64, max_angle_deg: f64) -> Self {
        Self {
            pid: PidController::new(k_p, k_i, k_d, max_angle_deg),
        }
    }

    /// Calculate the steering demand to turn from `actual_heading_deg` onto `target_heading_deg`.
    pub fn steer(
        &mut self,
        target_heading_deg: f64,
        actual_heading_deg: f64,
        dt: f64,
    ) -> SteerOutput {
        // Unwrap the target so the error is the shorter arc
        let target_deg = actual_heading_deg + wrap_180_deg(target_heading_deg - actual_heading_deg);

        let raw_deg = self.pid.calculate(target_deg, actual_heading_deg, dt);

        let steering_deg = if raw_deg > 180.0 {
            raw_deg - 360.0
        } else if raw_deg < -180.0 {
            raw_deg + 360.0
        } else {
            raw_deg
        };

        SteerOutput {
            raw_deg,
            steering_deg,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shorter_arc() {
        let mut ctrl = SteerCtrl::new(1.0, 0.0, 0.0, 45.0);

        // Target just anticlockwise of north, vehicle just clockwise of it: turn 20 degrees left
        // rather than 340 degrees right.
        let out = ctrl.steer(350.0, 10.0, 0.1);
        assert!((out.steering_deg + 20.0).abs() < 1e-9);

        let mut ctrl = SteerCtrl::new(1.0, 0.0, 0.0, 45.0);
        let out = ctrl.steer(10.0, 350.0, 0.1);
        assert!((out.steering_deg - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_limit() {
        let mut ctrl = SteerCtrl::new(1.0, 0.0, 0.0, 30.0);

        let out = ctrl.steer(90.0, 0.0, 0.1);
        assert_eq!(out.steering_deg, 30.0);

        let out = ctrl.steer(181.0, 0.0, 0.1);
        assert_eq!(out.steering_deg, -30.0);
    }

    #[test]
    fn test_large_limit_wraps_output() {
        // A limit above 180 lets the raw output leave the half circle, which is then wrapped
        let mut ctrl = SteerCtrl::new(2.0, 0.0, 0.0, 360.0);

        let out = ctrl.steer(100.0, 0.0, 0.1);
        assert_eq!(out.raw_deg, 200.0);
        assert_eq!(out.steering_deg, -160.0);
    }
}
