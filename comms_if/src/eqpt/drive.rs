//! # Drive Equipment Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands published by the navigation exec to the steering servo and the ESC.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DriveDems {
    /// Time at which the demands were produced.
    pub timestamp: DateTime<Utc>,

    /// Demanded steering servo angle in degrees. Positive and negative values turn in opposite
    /// directions, zero is straight ahead.
    pub steering_angle_deg: f64,

    /// Demanded throttle in percent of full power.
    pub throttle_percent: f64,

    /// True if the vehicle is in autonomous mode.
    ///
    /// The actuator multiplexer shall ignore demands with this flag cleared, the operator's
    /// manual demands take priority in manual mode.
    pub autonomous: bool,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl DriveDems {
    /// Neutral demands: straight ahead with no throttle.
    pub fn neutral(autonomous: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            steering_angle_deg: 0.0,
            throttle_percent: 0.0,
            autonomous,
        }
    }
}
