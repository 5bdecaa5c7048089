//! # Navigation Executable Parameters
//!
//! This module provide parameters for the navigation executable which are not owned by a module.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::gpio::GpioParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The `[exec]` table of the navigation parameter file.
#[derive(Debug, Deserialize)]
pub struct NavExecParams {
    /// Hardware pin assignments
    pub exec: GpioParams,
}
