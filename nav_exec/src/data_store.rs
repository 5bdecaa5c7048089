//! # Data Store

use comms_if::input::InputMsg;
use log::trace;

use crate::{
    geo::VehicleFix,
    nav_mgr::{self, Mode, NavMgr},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Time since the exec started
    pub exec_time_s: f64,

    // Inputs, the latest value of each is kept
    pub heading_deg: f64,
    pub fix: VehicleFix,

    /// Mode requested by the operator during this cycle
    pub mode_request: Option<Mode>,

    /// True if the start button or the controller start button was pressed during this cycle
    pub start_trigger: bool,

    /// Level of the start button on the previous read
    button_pressed: bool,

    /// State of the controller start button in the previous controller message
    joy_start_pressed: bool,

    // NavMgr
    pub nav_mgr: NavMgr,
    pub nav_mgr_output: Option<nav_mgr::OutputData>,
    pub nav_mgr_status_rpt: nav_mgr::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64, exec_time_s: f64) {
        let cycles_per_second = (cycle_frequency_hz as u128).max(1);
        self.is_1_hz_cycle = self.num_cycles % cycles_per_second == 0;

        self.exec_time_s = exec_time_s;

        self.mode_request = None;
        self.start_trigger = false;
        self.nav_mgr_output = None;
    }

    /// Apply an input message. Later messages overwrite earlier ones.
    pub fn apply_input(&mut self, msg: &InputMsg) {
        trace!("Input: {:?}", msg);

        match msg {
            InputMsg::Heading { heading_deg } => self.heading_deg = *heading_deg,
            InputMsg::Fix {
                latitude_deg,
                longitude_deg,
            } => self.fix = VehicleFix::from_deg(*latitude_deg, *longitude_deg),
            InputMsg::Control { autonomous } => {
                self.mode_request = Some(match autonomous {
                    true => Mode::Autonomous,
                    false => Mode::Manual,
                })
            }
            InputMsg::Joy { .. } => {
                let pressed = msg.is_start_pressed();
                if pressed && !self.joy_start_pressed {
                    self.start_trigger = true;
                }
                self.joy_start_pressed = pressed;
            }
        }
    }

    /// Update the start button level, a press raises the start trigger.
    pub fn update_button(&mut self, pressed: bool) {
        if pressed && !self.button_pressed {
            self.start_trigger = true;
        }
        self.button_pressed = pressed;
    }

    /// Build the NavMgr input from the current cycle's data.
    pub fn nav_mgr_input(&self) -> nav_mgr::InputData {
        nav_mgr::InputData {
            now_s: self.exec_time_s,
            heading_deg: self.heading_deg,
            fix: self.fix,
            mode_request: self.mode_request,
            start_trigger: self.start_trigger,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
