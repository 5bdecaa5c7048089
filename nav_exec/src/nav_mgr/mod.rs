//! # Navigation manager module
//!
//! Owns the control mode and run state of the vehicle and, while running autonomously, steers
//! and throttles it towards each waypoint in turn.
//!
//! ## States
//!
//! - Manual: the operator drives, navigation demands are neutral.
//! - Autonomous, Idle: waypoints are loaded and the vehicle waits for a start trigger.
//! - Autonomous, Running: the vehicle drives to the front waypoint of the queue.
//!
//! A start trigger toggles between Idle and Running. A mode change while Running aborts the run.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod indicator;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use indicator::*;
pub use params::*;
pub use state::*;

use serde::Serialize;
use util::{archive::ArchiveError, params::LoadError};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Source of the vehicle's demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Manual,
    Autonomous,
}

/// Whether autonomous navigation is actively driving the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Idle,
    Running,
}

/// Possible errors that can occur during NavMgr operation.
#[derive(Debug, thiserror::Error)]
pub enum NavMgrError {
    #[error("Could not load the NavMgr parameters: {0}")]
    ParamsLoadError(LoadError),

    #[error("Invalid NavMgr parameters: {0}")]
    InvalidParams(ParamsError),

    #[error("Could not initialise the NavMgr archive: {0}")]
    ArchiveError(ArchiveError),

    #[error("NavMgr has not been initialised")]
    NotInitialised,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Mode {
    fn default() -> Self {
        Mode::Manual
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Idle
    }
}
