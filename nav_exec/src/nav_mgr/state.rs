//! Implementations for the NavMgr state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use chrono::Utc;
use log::{debug, info, warn};
use serde::Serialize;

// Internal
use super::{IndicatorSeq, Mode, NavMgrError, Params, RunState};
use crate::{
    geo::{bearing_deg, planar_distance_m, VehicleFix},
    steer_ctrl::SteerCtrl,
    throttle::ThrottleProfile,
    waypoint::WaypointQueue,
};
use comms_if::eqpt::drive::DriveDems;
use util::{
    archive::{ArchiveError, Archived, Archiver},
    host,
    module::State,
    params,
    session::Session,
    time::period_s,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Navigation manager state
pub struct NavMgr {
    params: Params,

    initialised: bool,

    /// Period of one cycle, used as the controller timestep.
    period_s: f64,

    mode: Mode,
    run_state: RunState,

    queue: WaypointQueue,

    steer_ctrl: SteerCtrl,
    throttle: ThrottleProfile,

    /// Throttle demanded on the previous cycle, zero while idle.
    last_throttle: f64,

    /// Time at which the post-arrival acceleration delay expires, `None` if not armed.
    accel_delay_deadline_s: Option<f64>,

    /// Indicator sequence played while idle.
    indicator_seq: Option<IndicatorSeq>,

    report: StatusReport,
    arch_report: Archiver,
}

/// Input data to the navigation manager.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    /// Current time, used for the acceleration delay and indicator sequences.
    ///
    /// Units: seconds
    pub now_s: f64,

    /// Latest compass heading of the vehicle.
    ///
    /// Units: degrees
    pub heading_deg: f64,

    /// Latest position fix of the vehicle.
    pub fix: VehicleFix,

    /// Mode requested by the operator this cycle, if any.
    pub mode_request: Option<Mode>,

    /// True if a start trigger (button press) occured this cycle.
    pub start_trigger: bool,
}

/// Output of the navigation manager.
#[derive(Debug, Clone, Copy)]
pub struct OutputData {
    /// Demands to publish to the drive equipment.
    pub dems: DriveDems,

    /// Level of the indicator LED.
    pub indicator_on: bool,
}

/// Status report for NavMgr processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    pub time_s: f64,
    pub mode: Mode,
    pub run_state: RunState,
    pub waypoints_remaining: usize,

    /// Bearing from the vehicle to the target waypoint.
    ///
    /// Units: degrees
    pub target_bearing_deg: f64,

    /// Units: meters
    pub distance_m: f64,

    /// Steering controller output before wraparound correction.
    ///
    /// Units: degrees
    pub steer_raw_deg: f64,

    /// Units: degrees
    pub steering_deg: f64,

    /// Units: percent
    pub throttle_percent: f64,

    pub accel_delay_active: bool,

    /// A waypoint was reached and removed from the queue this cycle.
    pub waypoint_reached: bool,

    /// The final waypoint was reached this cycle.
    pub nav_complete: bool,

    /// A mode change stopped autonomous running this cycle.
    pub forced_exit: bool,

    /// A start trigger was refused as there are no waypoints.
    pub start_refused: bool,

    pub indicator_on: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for NavMgr {
    type InitData = &'static str;
    type InitError = NavMgrError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = NavMgrError;

    /// Initialise the NavMgr module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        let mut params: Params = params::load(init_data).map_err(NavMgrError::ParamsLoadError)?;

        params.waypoint_file_path = host::resolve_sw_path(params.waypoint_file_path.clone());

        *self = Self::new(params)?;

        self.arch_report = Archiver::from_path(session, "nav_mgr/status_report.csv")
            .map_err(NavMgrError::ArchiveError)?;

        Ok(())
    }

    /// Perform cyclic processing of the navigation manager.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        if !self.initialised {
            return Err(NavMgrError::NotInitialised);
        }

        // Clear the status report
        self.report = StatusReport {
            time_s: input_data.now_s,
            ..Default::default()
        };

        // Mode changes take priority, a start trigger on the same cycle is dropped
        if let Some(mode) = input_data.mode_request {
            self.change_mode(mode);
        } else if input_data.start_trigger {
            self.toggle_running();
        }

        // Expire the acceleration delay
        if let Some(deadline_s) = self.accel_delay_deadline_s {
            if input_data.now_s >= deadline_s {
                self.accel_delay_deadline_s = None;
            }
        }

        let dems = match self.run_state {
            RunState::Running => self.navigate(input_data),
            RunState::Idle => self.neutral(),
        };

        let indicator_on = self.indicator_level(input_data.now_s);

        self.report.mode = self.mode;
        self.report.run_state = self.run_state;
        self.report.waypoints_remaining = self.queue.len();
        self.report.accel_delay_active = self.accel_delay_deadline_s.is_some();
        self.report.indicator_on = indicator_on;

        Ok((OutputData { dems, indicator_on }, self.report))
    }
}

impl Archived for NavMgr {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(self.report)
    }
}

impl Default for NavMgr {
    fn default() -> Self {
        Self::from_params(Params::default())
    }
}

impl NavMgr {
    /// Create a new initialised navigation manager from the given parameters, without archiving.
    pub fn new(params: Params) -> Result<Self, NavMgrError> {
        params.validate().map_err(NavMgrError::InvalidParams)?;

        let mut nav_mgr = Self::from_params(params);
        nav_mgr.initialised = true;

        Ok(nav_mgr)
    }

    fn from_params(params: Params) -> Self {
        Self {
            period_s: period_s(params.refresh_rate_hz),
            steer_ctrl: SteerCtrl::new(
                params.pid_k_p,
                params.pid_k_i,
                params.pid_k_d,
                params.steer_max_angle_deg,
            ),
            throttle: ThrottleProfile {
                maximum_throttle: params.maximum_throttle,
                minimum_throttle: params.minimum_throttle,
                min_distance_throttle: params.min_distance_throttle,
                threshold_distance_m: params.threshold_distance_m,
                min_distance_m: params.min_distance_m,
                maximum_acceleration: params.maximum_acceleration,
                maximum_deceleration: params.maximum_deceleration,
                refresh_rate_hz: params.refresh_rate_hz,
            },
            params,
            initialised: false,
            mode: Mode::default(),
            run_state: RunState::default(),
            queue: WaypointQueue::default(),
            last_throttle: 0.0,
            accel_delay_deadline_s: None,
            indicator_seq: None,
            report: StatusReport::default(),
            arch_report: Archiver::default(),
        }
    }

    /// Answer a mode change readiness query.
    ///
    /// The mode may only be changed while autonomous navigation is not running. If
    /// `mode_change_requested` is true the requester will go on to change the mode when ready.
    pub fn ready_to_change(&self, mode_change_requested: bool) -> bool {
        let ready = self.run_state != RunState::Running;

        match (mode_change_requested, ready) {
            (true, true) => info!("Mode change requested; changing control modes"),
            (false, true) => {
                info!("Ready to change modes status requested; indicating ready to change")
            }
            (true, false) => info!("Mode change requested; indicating navigation is busy"),
            (false, false) => {
                info!("Ready to change modes status requested; indicating navigation is busy")
            }
        }

        ready
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn waypoints_remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn last_throttle(&self) -> f64 {
        self.last_throttle
    }

    pub fn accel_delay_active(&self) -> bool {
        self.accel_delay_deadline_s.is_some()
    }

    /// Process a mode change event.
    fn change_mode(&mut self, mode: Mode) {
        if self.run_state == RunState::Running {
            warn!(
                "Mode change to {:?} received while running, stopping autonomous navigation",
                mode
            );
            self.stop();
            self.report.forced_exit = true;
        }

        self.mode = mode;
        info!("Control mode set to {:?}", mode);

        match mode {
            Mode::Autonomous => self.load_waypoints(),
            Mode::Manual => self.queue.clear(),
        }
    }

    /// Process a start trigger, toggling between idle and running.
    fn toggle_running(&mut self) {
        match (self.mode, self.run_state) {
            (Mode::Manual, _) => debug!("Start trigger ignored in manual mode"),
            (Mode::Autonomous, RunState::Idle) => {
                if self.queue.is_empty() {
                    info!("No waypoints loaded; cannot enable autonomous running");
                    self.report.start_refused = true;
                } else {
                    self.run_state = RunState::Running;
                    self.indicator_seq = None;
                    info!("Enabling autonomous running");
                }
            }
            (Mode::Autonomous, RunState::Running) => {
                self.stop();
                info!("Disabling autonomous running");
            }
        }
    }

    /// Replace the queue with the contents of the waypoint file.
    fn load_waypoints(&mut self) {
        self.queue = match WaypointQueue::from_path(&self.params.waypoint_file_path) {
            Ok(q) => q,
            Err(e) => {
                warn!(
                    "Could not read waypoints from {:?}: {}",
                    self.params.waypoint_file_path, e
                );
                WaypointQueue::default()
            }
        };

        if self.queue.is_empty() {
            info!(
                "Waypoint list read from file but no waypoints found; switch to mapping mode to \
                record waypoints"
            );
        } else {
            info!(
                "Waypoint list read from file, {} total waypoints",
                self.queue.len()
            );
        }
    }

    /// Run one navigation step towards the front waypoint.
    fn navigate(&mut self, input_data: &InputData) -> DriveDems {
        let target = match self.queue.front() {
            Some(wp) => *wp,
            None => {
                self.complete(input_data.now_s);
                return self.neutral();
            }
        };

        let target_bearing_deg = bearing_deg(&input_data.fix, &target);
        let distance_m =
            planar_distance_m(&input_data.fix, &target, self.params.earth_radius_m);

        let steer = self
            .steer_ctrl
            .steer(target_bearing_deg, input_data.heading_deg, self.period_s);

        let throttle_percent = self.throttle.next(
            distance_m,
            self.last_throttle,
            self.accel_delay_deadline_s.is_some(),
        );
        self.last_throttle = throttle_percent;

        debug!(
            "Target heading: {:.2}, current heading: {:.2}, steering: {:.2}, throttle: {:.2}",
            target_bearing_deg, input_data.heading_deg, steer.steering_deg, throttle_percent
        );

        self.report.target_bearing_deg = target_bearing_deg;
        self.report.distance_m = distance_m;
        self.report.steer_raw_deg = steer.raw_deg;
        self.report.steering_deg = steer.steering_deg;
        self.report.throttle_percent = throttle_percent;

        if distance_m < self.params.waypoint_radius_m {
            self.queue.pop_front();
            self.accel_delay_deadline_s = Some(input_data.now_s + self.params.accel_delay_time_s);
            self.report.waypoint_reached = true;

            info!(
                "Target reached; navigating to next waypoint ({} remaining)",
                self.queue.len()
            );

            if self.queue.is_empty() {
                self.complete(input_data.now_s);
                return self.neutral();
            }
        }

        DriveDems {
            timestamp: Utc::now(),
            steering_angle_deg: steer.steering_deg,
            throttle_percent,
            autonomous: true,
        }
    }

    /// End autonomous running after the final waypoint.
    fn complete(&mut self, now_s: f64) {
        self.stop();
        self.indicator_seq = Some(IndicatorSeq::completion_flash(now_s));
        self.report.nav_complete = true;

        info!("No waypoints remaining in list; navigation complete");
        info!("Switch to manual mode and back to reload the waypoints");
    }

    fn stop(&mut self) {
        self.run_state = RunState::Idle;
        self.last_throttle = 0.0;
    }

    /// Neutral demands, also resets the throttle history.
    fn neutral(&mut self) -> DriveDems {
        self.last_throttle = 0.0;
        DriveDems::neutral(self.mode == Mode::Autonomous)
    }

    fn indicator_level(&mut self, now_s: f64) -> bool {
        if self.run_state == RunState::Running {
            return true;
        }

        match self.indicator_seq.and_then(|s| s.level(now_s)) {
            Some(level) => level,
            None => {
                self.indicator_seq = None;
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::{
        io::Write,
        path::PathBuf,
        sync::atomic::{AtomicUsize, Ordering},
    };

    static NUM_FILES: AtomicUsize = AtomicUsize::new(0);

    fn write_waypoints(points: &[(f64, f64)]) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "nav_mgr_waypoints_{}_{}.csv",
            std::process::id(),
            NUM_FILES.fetch_add(1, Ordering::Relaxed)
        ));

        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "latitude,longitude").unwrap();
        for (lat, lon) in points {
            writeln!(f, "{},{}", lat, lon).unwrap();
        }

        path
    }

    fn test_params(waypoint_file_path: PathBuf) -> Params {
        Params {
            pid_k_p: 1.0,
            pid_k_i: 0.0,
            pid_k_d: 0.0,
            steer_max_angle_deg: 30.0,
            maximum_throttle: 30.0,
            minimum_throttle: 5.0,
            min_distance_throttle: 10.0,
            threshold_distance_m: 20.0,
            min_distance_m: 4.0,
            maximum_acceleration: 10.0,
            maximum_deceleration: 20.0,
            waypoint_radius_m: 2.0,
            accel_delay_time_s: 1.5,
            waypoint_file_path,
            refresh_rate_hz: 10.0,
            earth_radius_m: crate::geo::EARTH_RADIUS_M,
        }
    }

    fn nav_mgr(points: &[(f64, f64)]) -> NavMgr {
        NavMgr::new(test_params(write_waypoints(points))).unwrap()
    }

    fn input(now_s: f64, fix: (f64, f64)) -> InputData {
        InputData {
            now_s,
            heading_deg: 0.0,
            fix: VehicleFix::from_deg(fix.0, fix.1),
            mode_request: None,
            start_trigger: false,
        }
    }

    fn mode_change(now_s: f64, mode: Mode) -> InputData {
        InputData {
            mode_request: Some(mode),
            ..input(now_s, (0.0, 0.0))
        }
    }

    fn start(now_s: f64, fix: (f64, f64)) -> InputData {
        InputData {
            start_trigger: true,
            ..input(now_s, fix)
        }
    }

    /// Enter autonomous mode and start running.
    fn run(mgr: &mut NavMgr, fix: (f64, f64)) -> (OutputData, StatusReport) {
        mgr.proc(&mode_change(0.0, Mode::Autonomous)).unwrap();
        mgr.proc(&start(0.1, fix)).unwrap()
    }

    #[test]
    fn test_not_initialised() {
        let mut mgr = NavMgr::default();

        assert!(matches!(
            mgr.proc(&InputData::default()),
            Err(NavMgrError::NotInitialised)
        ));
    }

    #[test]
    fn test_invalid_params() {
        let mut params = test_params(PathBuf::new());
        params.refresh_rate_hz = 0.0;

        assert!(matches!(
            NavMgr::new(params),
            Err(NavMgrError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_manual_mode_neutral() {
        let mut mgr = nav_mgr(&[(10.01, 20.0)]);

        let (out, rpt) = mgr.proc(&start(0.0, (10.0, 20.0))).unwrap();

        assert_eq!(mgr.mode(), Mode::Manual);
        assert_eq!(rpt.run_state, RunState::Idle);
        assert_eq!(out.dems.throttle_percent, 0.0);
        assert_eq!(out.dems.steering_angle_deg, 0.0);
        assert!(!out.dems.autonomous);
        assert!(!out.indicator_on);
    }

    #[test]
    fn test_enter_autonomous_loads_waypoints() {
        let mut mgr = nav_mgr(&[(10.01, 20.0), (10.02, 20.0), (10.03, 20.0)]);

        let (out, rpt) = mgr.proc(&mode_change(0.0, Mode::Autonomous)).unwrap();

        assert_eq!(rpt.mode, Mode::Autonomous);
        assert_eq!(rpt.run_state, RunState::Idle);
        assert_eq!(rpt.waypoints_remaining, 3);
        assert!(out.dems.autonomous);
        assert_eq!(out.dems.throttle_percent, 0.0);
    }

    #[test]
    fn test_start_and_stop() {
        let mut mgr = nav_mgr(&[(10.01, 20.0)]);

        let (out, rpt) = run(&mut mgr, (10.0, 20.0));
        assert_eq!(rpt.run_state, RunState::Running);
        assert!(out.indicator_on);
        assert!(out.dems.throttle_percent > 0.0);

        let (out, rpt) = mgr.proc(&start(0.2, (10.0, 20.0))).unwrap();
        assert_eq!(rpt.run_state, RunState::Idle);
        assert!(!out.indicator_on);
        assert_eq!(out.dems.throttle_percent, 0.0);
        assert_eq!(mgr.last_throttle(), 0.0);

        // Waypoints are kept, so running can resume
        assert_eq!(rpt.waypoints_remaining, 1);
        let (_, rpt) = mgr.proc(&start(0.3, (10.0, 20.0))).unwrap();
        assert_eq!(rpt.run_state, RunState::Running);
    }

    #[test]
    fn test_start_refused_without_waypoints() {
        let mut mgr = NavMgr::new(test_params(PathBuf::from("/nonexistent/waypoints.csv"))).unwrap();

        mgr.proc(&mode_change(0.0, Mode::Autonomous)).unwrap();
        let (_, rpt) = mgr.proc(&start(0.1, (10.0, 20.0))).unwrap();

        assert!(rpt.start_refused);
        assert_eq!(rpt.run_state, RunState::Idle);
    }

    #[test]
    fn test_arrival_completes_navigation() {
        let mut mgr = nav_mgr(&[(10.0, 20.0)]);

        let (out, rpt) = run(&mut mgr, (10.0, 20.0));

        assert!(rpt.distance_m < 1e-6);
        assert!(rpt.waypoint_reached);
        assert!(rpt.nav_complete);
        assert_eq!(rpt.waypoints_remaining, 0);
        assert_eq!(rpt.run_state, RunState::Idle);
        assert_eq!(mgr.run_state(), RunState::Idle);
        assert_eq!(out.dems.throttle_percent, 0.0);

        // Cannot restart until the waypoints are reloaded
        let (_, rpt) = mgr.proc(&start(1.0, (10.0, 20.0))).unwrap();
        assert!(rpt.start_refused);
    }

    #[test]
    fn test_one_arrival_per_cycle() {
        let mut mgr = nav_mgr(&[(10.0, 20.0), (10.0, 20.0), (10.01, 20.0)]);

        let (_, rpt) = run(&mut mgr, (10.0, 20.0));
        assert!(rpt.waypoint_reached);
        assert_eq!(rpt.waypoints_remaining, 2);
        assert_eq!(rpt.run_state, RunState::Running);

        let (_, rpt) = mgr.proc(&input(0.2, (10.0, 20.0))).unwrap();
        assert!(rpt.waypoint_reached);
        assert_eq!(rpt.waypoints_remaining, 1);
    }

    #[test]
    fn test_accel_delay() {
        let mut mgr = nav_mgr(&[(10.0, 20.0), (10.01, 20.0)]);

        // Arrive at the first waypoint at t = 0.1 s
        let (_, rpt) = run(&mut mgr, (10.0, 20.0));
        assert!(rpt.waypoint_reached);
        assert!(mgr.accel_delay_active());

        // Far from the next waypoint but the delay holds the base throttle at the minimum
        // distance throttle
        let mut now_s = 0.2;
        while now_s < 1.55 {
            let (out, rpt) = mgr.proc(&input(now_s, (10.0, 20.0))).unwrap();
            assert!(rpt.accel_delay_active);
            assert!(out.dems.throttle_percent <= 10.0 + 1e-9);
            now_s += 0.1;
        }

        let (_, rpt) = mgr.proc(&input(1.7, (10.0, 20.0))).unwrap();
        assert!(!rpt.accel_delay_active);
    }

    #[test]
    fn test_accel_delay_rearmed() {
        let mut mgr = nav_mgr(&[(10.0, 20.0), (10.005, 20.0), (10.01, 20.0)]);

        // First arrival at t = 0.1 s, second at t = 1.0 s while the delay is pending
        let (_, rpt) = run(&mut mgr, (10.0, 20.0));
        assert!(rpt.waypoint_reached);

        let (_, rpt) = mgr.proc(&input(1.0, (10.005, 20.0))).unwrap();
        assert!(rpt.waypoint_reached);
        assert!(rpt.accel_delay_active);

        // Past the first deadline (1.6 s) but not the second (2.5 s)
        let (_, rpt) = mgr.proc(&input(2.0, (10.005, 20.0))).unwrap();
        assert!(!rpt.waypoint_reached);
        assert!(rpt.accel_delay_active);

        let (_, rpt) = mgr.proc(&input(2.6, (10.005, 20.0))).unwrap();
        assert!(!rpt.accel_delay_active);
        assert_eq!(rpt.waypoints_remaining, 1);
    }

    #[test]
    fn test_throttle_rate_limited() {
        let mut mgr = nav_mgr(&[(10.01, 20.0)]);

        // From rest the throttle is floored at the minimum, then rises by 1 % per cycle
        let (out, _) = run(&mut mgr, (10.0, 20.0));
        assert_eq!(out.dems.throttle_percent, 5.0);

        let (out, _) = mgr.proc(&input(0.2, (10.0, 20.0))).unwrap();
        assert!((out.dems.throttle_percent - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_steers_shorter_arc() {
        // Target to the north west of the vehicle, vehicle heading just east of north
        let mut mgr = nav_mgr(&[(10.001, 19.9999)]);

        mgr.proc(&mode_change(0.0, Mode::Autonomous)).unwrap();
        let (out, rpt) = mgr
            .proc(&InputData {
                heading_deg: 10.0,
                ..start(0.1, (10.0, 20.0))
            })
            .unwrap();

        assert!(rpt.target_bearing_deg > 350.0);
        assert!(out.dems.steering_angle_deg < 0.0);
        assert!(out.dems.steering_angle_deg > -30.0);
    }

    #[test]
    fn test_ready_to_change() {
        let mut mgr = nav_mgr(&[(10.01, 20.0)]);

        assert!(mgr.ready_to_change(false));

        run(&mut mgr, (10.0, 20.0));
        assert!(!mgr.ready_to_change(false));
        assert!(!mgr.ready_to_change(true));

        mgr.proc(&start(0.2, (10.0, 20.0))).unwrap();
        assert!(mgr.ready_to_change(false));
        assert!(mgr.ready_to_change(true));
    }

    #[test]
    fn test_mode_change_while_running() {
        let mut mgr = nav_mgr(&[(10.01, 20.0)]);
        run(&mut mgr, (10.0, 20.0));

        let (out, rpt) = mgr
            .proc(&InputData {
                mode_request: Some(Mode::Manual),
                start_trigger: true,
                ..input(0.2, (10.0, 20.0))
            })
            .unwrap();

        assert!(rpt.forced_exit);
        assert_eq!(rpt.mode, Mode::Manual);
        assert_eq!(rpt.run_state, RunState::Idle);
        assert_eq!(rpt.waypoints_remaining, 0);
        assert!(!out.indicator_on);
        assert!(!out.dems.autonomous);
        assert_eq!(out.dems.throttle_percent, 0.0);
    }

    #[test]
    fn test_completion_flash() {
        let mut mgr = nav_mgr(&[(10.0, 20.0)]);

        // Completes at t = 0.1 s, the flash starts off
        let (out, _) = run(&mut mgr, (10.0, 20.0));
        assert!(!out.indicator_on);

        let levels: Vec<bool> = [0.7, 1.2, 1.7, 2.2]
            .iter()
            .map(|t| mgr.proc(&input(*t, (10.0, 20.0))).unwrap().0.indicator_on)
            .collect();

        assert_eq!(levels, vec![true, false, true, false]);
    }

    #[test]
    fn test_reload_on_reentry() {
        let mut mgr = nav_mgr(&[(10.0, 20.0)]);

        run(&mut mgr, (10.0, 20.0));
        assert_eq!(mgr.waypoints_remaining(), 0);

        mgr.proc(&mode_change(1.0, Mode::Manual)).unwrap();
        let (_, rpt) = mgr.proc(&mode_change(2.0, Mode::Autonomous)).unwrap();
        assert_eq!(rpt.waypoints_remaining, 1);
    }
}
