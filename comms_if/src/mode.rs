//! # Mode change service
//!
//! Before changing control modes the mode selection node asks the navigation exec whether it is
//! ready to change. The exec is not ready while it is autonomously driving the vehicle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Request sent to the navigation exec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeChangeRequest {
    /// If false this is a pure readiness query. If true the requester intends to change modes as
    /// soon as the exec reports it is ready.
    pub mode_change_requested: bool,
}

/// Response from the navigation exec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeChangeResponse {
    pub ready_to_change: bool,
}
