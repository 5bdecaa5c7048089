//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the navigation software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Sensor and operator inputs consumed by the navigation exec
pub mod input;

/// Mode change readiness service
pub mod mode;

/// Command definitions for equipment (the drive actuators)
pub mod eqpt;

/// Network module
pub mod net;
