//! # PID controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use util::maths::clamp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PID controller with a symmetrically clamped output.
#[derive(Debug, Serialize, Clone)]
pub struct PidController {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Dervative gain
    k_d: f64,

    /// Maximum absolute value of the output
    output_limit: f64,

    /// Previous error
    prev_error: Option<f64>,

    /// The integral accumulation
    integral: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidController {
    /// Create a new controller with the given gains, the output will be clamped to
    /// `[-output_limit, output_limit]`.
    pub fn new(k_p: f64, k_i: f64, k_d: f64, output_limit: f64) -> Self {
        Self {
            k_p,
            k_i,
            k_d,
            output_limit: output_limit.abs(),
            integral: 0f64,
            prev_error: None,
        }
    }

    /// Get the value of the controller for the given target and actual values.
    ///
    /// The error is `target - actual` with no wrapping applied, `dt` is the time since the
    /// previous call in seconds.
    pub fn calculate(&mut self, target: f64, actual: f64, dt: f64) -> f64 {
        let error = target - actual;

        // A non-positive dt would blow up the derivative, so treat it as no time having passed
        let dt = if dt > 0.0 { Some(dt) } else { None };

        // Accumulate the integral term.
        //
        // There is no anti-windup beyond the clamp on the output.
        self.integral += match dt {
            Some(t) => error * t,
            None => 0f64,
        };

        // Calculate the derivative.
        //
        // On the first call the previous error is taken as zero.
        let deriv = match dt {
            Some(t) => (error - self.prev_error.unwrap_or(0f64)) / t,
            None => 0f64,
        };

        // Calculate the output
        let out = self.k_p * error + self.k_i * self.integral + self.k_d * deriv;

        // Remember the previous error
        self.prev_error = Some(error);

        clamp(out, -self.output_limit, self.output_limit)
    }

    /// The accumulated integral of the error.
    pub fn integral(&self) -> f64 {
        self.integral
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_proportional_only() {
        let mut pid = PidController::new(2.0, 0.0, 0.0, 100.0);

        assert_eq!(pid.calculate(10.0, 4.0, 0.1), 12.0);
        assert_eq!(pid.calculate(4.0, 10.0, 0.1), -12.0);
    }

    #[test]
    fn test_output_clamped() {
        let mut pid = PidController::new(10.0, 0.0, 0.0, 30.0);

        assert_eq!(pid.calculate(90.0, 0.0, 0.1), 30.0);
        assert_eq!(pid.calculate(-90.0, 0.0, 0.1), -30.0);
    }

    #[test]
    fn test_integral_and_derivative() {
        let mut pid = PidController::new(0.0, 1.0, 0.0, 100.0);

        pid.calculate(5.0, 0.0, 0.5);
        pid.calculate(5.0, 0.0, 0.5);
        assert!((pid.integral() - 5.0).abs() < 1e-12);

        let mut pid = PidController::new(0.0, 0.0, 1.0, 100.0);

        // First call differentiates against a zero error
        assert!((pid.calculate(1.0, 0.0, 0.1) - 10.0).abs() < 1e-9);
        // Constant error has no derivative
        assert!(pid.calculate(1.0, 0.0, 0.1).abs() < 1e-9);
        assert!((pid.calculate(3.0, 0.0, 0.1) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_dt() {
        let mut pid = PidController::new(1.0, 1.0, 1.0, 100.0);

        assert_eq!(pid.calculate(3.0, 0.0, 0.0), 3.0);
        assert_eq!(pid.integral(), 0.0);
    }
}
