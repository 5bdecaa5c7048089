//! Main navigation executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop, at the NavMgr refresh rate:
//!         - Input acquisition:
//!             - Sensor and operator inputs
//!             - Start button
//!         - Mode change readiness requests
//!         - Navigation processing
//!         - Drive demand publication and indicator output
//!         - Archiving
//!
//! # Modules
//!
//! All modules (e.g. `nav_mgr`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::thread;
use std::time::{Duration, Instant};

// Internal
use comms_if::{eqpt::drive::DriveDems, mode::ModeChangeResponse, net::NetParams};
use nav_lib::{
    data_store::DataStore,
    dems_server::DemsServer,
    gpio,
    input_client::{InputClient, InputClientError},
    mode_server::ModeServer,
    nav_mgr::Mode,
    params::NavExecParams,
};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
    time::period_s,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Parameter file shared by the exec and NavMgr.
const PARAMS_FILE: &str = "nav_exec.toml";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("nav_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Navigation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: NavExecParams =
        util::params::load(PARAMS_FILE).wrap_err("Could not load exec params")?;
    let net_params: NetParams =
        util::params::load("net.toml").wrap_err("Could not load net params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.nav_mgr
        .init(PARAMS_FILE, &session)
        .wrap_err("Failed to initialise NavMgr")?;
    info!("NavMgr init complete");

    let cycle_frequency_hz = ds.nav_mgr.params().refresh_rate_hz;
    let cycle_period = Duration::from_secs_f64(period_s(cycle_frequency_hz));

    info!("Module initialisation complete\n");

    // ---- INITIALISE HARDWARE ----

    let (mut indicator, button) =
        gpio::open(&exec_params.exec).wrap_err("Failed to initialise GPIO")?;
    info!("GPIO initialised");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let input_client = {
        let c = InputClient::new(&zmq_ctx, &net_params)
            .wrap_err("Failed to initialise InputClient")?;
        info!("InputClient initialised");
        c
    };

    let mode_server = {
        let s =
            ModeServer::new(&zmq_ctx, &net_params).wrap_err("Failed to initialise ModeServer")?;
        info!("ModeServer initialised");
        s
    };

    let dems_server = {
        let s =
            DemsServer::new(&zmq_ctx, &net_params).wrap_err("Failed to initialise DemsServer")?;
        info!("DemsServer initialised");
        s
    };

    info!("Network initialisation complete");

    // ---- MAIN LOOP ----

    info!("Begining main loop at {:.01} Hz\n", cycle_frequency_hz);

    let exec_start_instant = Instant::now();

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(
            cycle_frequency_hz,
            exec_start_instant.elapsed().as_secs_f64(),
        );

        // ---- DATA INPUT ----

        // Get inputs until none remain
        loop {
            match input_client.recieve_input() {
                Ok(Some(msg)) => ds.apply_input(&msg),
                Ok(None) => break,
                Err(e @ InputClientError::InputParseError(_))
                | Err(e @ InputClientError::NonUtf8Message) => {
                    warn!("Discarding input: {}", e)
                }
                Err(e) => {
                    warn!("InputClient error: {}", e);
                    break;
                }
            }
        }

        ds.update_button(button.is_pressed());

        // ---- MODE CHANGE REQUESTS ----

        loop {
            match mode_server.recieve_request() {
                Ok(Some(request)) => {
                    let response = ModeChangeResponse {
                        ready_to_change: ds
                            .nav_mgr
                            .ready_to_change(request.mode_change_requested),
                    };

                    if let Err(e) = mode_server.send_response(response) {
                        warn!("Could not respond to mode change request: {}", e);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("ModeServer error: {}", e);
                    break;
                }
            }
        }

        // ---- NAVIGATION PROCESSING ----

        let nav_mgr_input = ds.nav_mgr_input();
        match ds.nav_mgr.proc(&nav_mgr_input) {
            Ok((o, r)) => {
                ds.nav_mgr_output = Some(o);
                ds.nav_mgr_status_rpt = r;
            }
            Err(e) => warn!("Error during NavMgr processing: {}", e),
        }

        // ---- OUTPUTS ----

        // Neutral demands are published if processing failed
        let (dems, indicator_on) = match ds.nav_mgr_output {
            Some(o) => (o.dems, o.indicator_on),
            None => (
                DriveDems::neutral(ds.nav_mgr.mode() == Mode::Autonomous),
                false,
            ),
        };

        if let Err(e) = dems_server.send(&dems) {
            warn!("DemsServer error: {}", e);
        }

        if indicator.is_on() != indicator_on {
            if let Err(e) = indicator.set(indicator_on) {
                warn!("Could not set the indicator: {}", e);
            }
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.nav_mgr.write() {
            warn!("Could not archive the NavMgr status report: {}", e);
        }

        if ds.is_1_hz_cycle {
            debug!(
                "{:?}/{:?}, {} waypoints remaining, inputs connected: {}",
                ds.nav_mgr_status_rpt.mode,
                ds.nav_mgr_status_rpt.run_state,
                ds.nav_mgr_status_rpt.waypoints_remaining,
                input_client.is_connected()
            );
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }
}
