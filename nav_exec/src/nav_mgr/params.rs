//! Parameters structure for NavMgr

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use std::path::PathBuf;

use crate::geo::EARTH_RADIUS_M;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the navigation manager.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    // ---- STEERING ----
    /// Steering PID proportional gain
    pub pid_k_p: f64,

    /// Steering PID integral gain
    pub pid_k_i: f64,

    /// Steering PID derivative gain
    pub pid_k_d: f64,

    /// Maximum rotation of the steering servo either side of centre.
    ///
    /// Units: degrees
    pub steer_max_angle_deg: f64,

    // ---- THROTTLE ----
    /// Units: percent
    pub maximum_throttle: f64,

    /// Lowest throttle at which the vehicle still moves.
    ///
    /// Units: percent
    pub minimum_throttle: f64,

    /// Throttle used when close to a waypoint and just after reaching one.
    ///
    /// Units: percent
    pub min_distance_throttle: f64,

    /// Distance to the target above which the maximum throttle is used.
    ///
    /// Units: meters
    pub threshold_distance_m: f64,

    /// Distance to the target below which the minimum distance throttle is used.
    ///
    /// Units: meters
    pub min_distance_m: f64,

    /// Units: percent/second
    pub maximum_acceleration: f64,

    /// Units: percent/second
    pub maximum_deceleration: f64,

    // ---- WAYPOINTS ----
    /// Distance from a waypoint within which it is considered reached.
    ///
    /// Units: meters
    pub waypoint_radius_m: f64,

    /// Time after reaching a waypoint for which the throttle is held at the minimum distance
    /// throttle.
    ///
    /// Units: seconds
    pub accel_delay_time_s: f64,

    /// Path to the waypoint file. Relative paths are taken from the software root.
    pub waypoint_file_path: PathBuf,

    // ---- MISC ----
    /// Frequency at which the navigation manager is processed.
    ///
    /// Units: hertz
    pub refresh_rate_hz: f64,

    /// Units: meters
    pub earth_radius_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised when the parameters are inconsistent.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamsError {
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("threshold_distance_m must be greater than min_distance_m")]
    ThresholdBelowMinDistance,

    #[error(
        "Throttles must satisfy minimum_throttle <= min_distance_throttle <= maximum_throttle"
    )]
    ThrottleOrder,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Check that the parameters are consistent.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("refresh_rate_hz", self.refresh_rate_hz),
            ("steer_max_angle_deg", self.steer_max_angle_deg),
            ("maximum_acceleration", self.maximum_acceleration),
            ("maximum_deceleration", self.maximum_deceleration),
            ("waypoint_radius_m", self.waypoint_radius_m),
            ("earth_radius_m", self.earth_radius_m),
        ];

        // Written as a negated comparison so that NaN is rejected too
        for (name, value) in positive.iter() {
            if !(*value > 0.0) {
                return Err(ParamsError::NotPositive(*name));
            }
        }

        if !(self.accel_delay_time_s >= 0.0) {
            return Err(ParamsError::Negative("accel_delay_time_s"));
        }

        if !(self.threshold_distance_m > self.min_distance_m) {
            return Err(ParamsError::ThresholdBelowMinDistance);
        }

        if !(self.minimum_throttle <= self.min_distance_throttle
            && self.min_distance_throttle <= self.maximum_throttle)
        {
            return Err(ParamsError::ThrottleOrder);
        }

        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            pid_k_p: 0.0,
            pid_k_i: 0.0,
            pid_k_d: 0.0,
            steer_max_angle_deg: 0.0,
            maximum_throttle: 0.0,
            minimum_throttle: 0.0,
            min_distance_throttle: 0.0,
            threshold_distance_m: 0.0,
            min_distance_m: 0.0,
            maximum_acceleration: 0.0,
            maximum_deceleration: 0.0,
            waypoint_radius_m: 0.0,
            accel_delay_time_s: 0.0,
            waypoint_file_path: PathBuf::new(),
            refresh_rate_hz: 0.0,
            earth_radius_m: EARTH_RADIUS_M,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const TEST_PARAMS: &str = r#"
        pid_k_p = 1.0
        pid_k_i = 0.0
        pid_k_d = 0.1
        steer_max_angle_deg = 30.0
        maximum_throttle = 30.0
        minimum_throttle = 5.0
        min_distance_throttle = 10.0
        threshold_distance_m = 20.0
        min_distance_m = 4.0
        maximum_acceleration = 10.0
        maximum_deceleration = 20.0
        waypoint_radius_m = 2.0
        accel_delay_time_s = 1.5
        waypoint_file_path = "data/waypoints.csv"
        refresh_rate_hz = 10.0
        earth_radius_m = 6371008.7714
    "#;

    #[test]
    fn test_load_and_validate() {
        let params: Params = util::params::load_from_str(TEST_PARAMS).unwrap();

        assert_eq!(params.earth_radius_m, EARTH_RADIUS_M);
        assert_eq!(params.waypoint_file_path, PathBuf::from("data/waypoints.csv"));
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn test_invalid() {
        let valid: Params = util::params::load_from_str(TEST_PARAMS).unwrap();

        let mut p = valid.clone();
        p.refresh_rate_hz = 0.0;
        assert_eq!(p.validate(), Err(ParamsError::NotPositive("refresh_rate_hz")));

        let mut p = valid.clone();
        p.waypoint_radius_m = f64::NAN;
        assert_eq!(p.validate(), Err(ParamsError::NotPositive("waypoint_radius_m")));

        let mut p = valid.clone();
        p.accel_delay_time_s = -1.0;
        assert_eq!(p.validate(), Err(ParamsError::Negative("accel_delay_time_s")));

        let mut p = valid.clone();
        p.min_distance_m = 20.0;
        assert_eq!(p.validate(), Err(ParamsError::ThresholdBelowMinDistance));

        let mut p = valid;
        p.min_distance_throttle = 40.0;
        assert_eq!(p.validate(), Err(ParamsError::ThrottleOrder));
    }

    #[test]
    fn test_missing_field() {
        let truncated = TEST_PARAMS.replace("refresh_rate_hz = 10.0", "");
        assert!(util::params::load_from_str::<Params>(&truncated).is_err());

        let truncated = TEST_PARAMS.replace("earth_radius_m = 6371008.7714", "");
        assert!(util::params::load_from_str::<Params>(&truncated).is_err());
    }
}
