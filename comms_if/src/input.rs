//! # Navigation inputs
//!
//! Messages pushed to the navigation exec by the sensor nodes and the operator. All inputs share
//! one socket, the exec drains it at the start of every cycle and keeps only the latest value of
//! each kind.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Index of the controller button which starts and stops autonomous running.
pub const JOY_START_BUTTON: usize = 1;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// An input message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputMsg {
    /// Compass heading of the vehicle.
    Heading {
        /// Heading in degrees, clockwise from north, in the range [0, 360).
        heading_deg: f64,
    },

    /// GNSS position fix.
    Fix {
        latitude_deg: f64,
        longitude_deg: f64,
    },

    /// Control mode command from the mode selection node.
    Control {
        /// True if autonomous control is being enabled.
        autonomous: bool,
    },

    /// Button state of the operator's controller.
    Joy {
        /// Button states, 1 for pressed and 0 for released.
        buttons: Vec<i32>,
    },
}

/// Errors which can occur when parsing an input message.
#[derive(Debug, Error)]
pub enum InputParseError {
    #[error("Input contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Input could not be serialized: {0}")]
    SerializeError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl InputMsg {
    /// Parse an input from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, InputParseError> {
        serde_json::from_str(json_str).map_err(InputParseError::InvalidJson)
    }

    /// Serialize the input into a JSON string.
    pub fn to_json(&self) -> Result<String, InputParseError> {
        serde_json::to_string(self).map_err(InputParseError::SerializeError)
    }

    /// Returns true if the controller start button is pressed in this message.
    ///
    /// Returns `false` for all non-controller messages.
    pub fn is_start_pressed(&self) -> bool {
        match self {
            InputMsg::Joy { buttons } => buttons.get(JOY_START_BUTTON).map_or(false, |b| *b == 1),
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_tagged_input() {
        let msg = InputMsg::from_json(r#"{"type": "Fix", "latitude_deg": 10.5, "longitude_deg": -3.25}"#)
            .unwrap();
        assert_eq!(
            msg,
            InputMsg::Fix {
                latitude_deg: 10.5,
                longitude_deg: -3.25
            }
        );

        assert!(InputMsg::from_json(r#"{"type": "Speed", "speed_ms": 1.0}"#).is_err());
    }

    #[test]
    fn test_start_pressed() {
        assert!(InputMsg::Joy { buttons: vec![0, 1, 0] }.is_start_pressed());
        assert!(!InputMsg::Joy { buttons: vec![1, 0] }.is_start_pressed());
        assert!(!InputMsg::Joy { buttons: vec![] }.is_start_pressed());
        assert!(!InputMsg::Control { autonomous: true }.is_start_pressed());
    }
}
