//! # Navigation library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the navigation crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Data store - holds the data shared between modules during a cycle
pub mod data_store;

/// Demands server - publishes drive demands to the actuators
pub mod dems_server;

/// Geodesic maths - bearing and distance to waypoints
pub mod geo;

/// GPIO - start button and indicator LED
pub mod gpio;

/// Input client - recieves sensor and operator inputs
pub mod input_client;

/// Mode server - answers mode change readiness requests
pub mod mode_server;

/// Navigation manager - the mode and run state machine which drives to each waypoint
pub mod nav_mgr;

/// Executable parameters
pub mod params;

/// Steering control - PID steering onto the waypoint bearing
pub mod steer_ctrl;

/// Throttle profile - distance based, rate limited throttle demand
pub mod throttle;

/// Waypoint queue - the waypoints still to be reached
pub mod waypoint;
