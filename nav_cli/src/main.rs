//! # Navigation command line
//!
//! Operator console for the navigation exec. Queries mode change readiness, changes the control
//! mode, toggles autonomous running, and injects heading and position inputs for bench testing
//! without the sensor nodes.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use structopt::{clap::AppSettings, StructOpt};

use comms_if::{
    input::InputMsg,
    mode::{ModeChangeRequest, ModeChangeResponse},
    net::{zmq, MonitoredSocket, NetParams, SocketOptions},
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const PROMPT: &str = "nav $ ";
const HISTORY_PATH: &str = "data/history.txt";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Sockets connected to the navigation exec.
struct NavLink {
    input: MonitoredSocket,
    mode: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(
    name = "nav",
    no_version,
    setting = AppSettings::NoBinaryName,
    global_setting = AppSettings::AllowNegativeNumbers
)]
enum Command {
    /// Ask whether the exec is ready to change control modes
    Ready,

    /// Change the control mode, if the exec is ready
    Mode {
        /// "auto" or "manual"
        #[structopt(possible_values = &["auto", "manual"])]
        mode: String,
    },

    /// Press the controller start button, starting or stopping autonomous running
    Start,

    /// Send a compass heading
    Heading {
        /// Heading in degrees clockwise from north
        heading_deg: f64,
    },

    /// Send a position fix
    Fix {
        latitude_deg: f64,
        longitude_deg: f64,
    },

    /// Exit the console
    Exit,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let net_params: NetParams =
        util::params::load("net.toml").wrap_err("Could not load net params")?;

    let ctx = zmq::Context::new();
    let link = NavLink::new(&ctx, &net_params)?;

    let mut rl = DefaultEditor::new()?;
    if rl.load_history(HISTORY_PATH).is_err() {
        println!("No history detected");
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                rl.add_history_entry(line.as_str()).ok();

                let cmd = match Command::from_iter_safe(line.split_whitespace()) {
                    Ok(c) => c,
                    Err(e) => {
                        println!("{}", e.message);
                        continue;
                    }
                };

                match link.exec(cmd) {
                    Ok(true) => (),
                    Ok(false) => break,
                    Err(e) => println!("Error: {:?}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Unhandled Error: {:?}", err);
                break;
            }
        }
    }

    println!("Exiting...");

    if let Err(e) = rl.save_history(HISTORY_PATH) {
        println!("Could not save the history: {}", e);
    }

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavLink {
    fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self> {
        let input = MonitoredSocket::new(
            ctx,
            zmq::PUSH,
            SocketOptions {
                block_on_first_connect: false,
                linger: 100,
                send_timeout: 500,
                ..Default::default()
            },
            &params.input_endpoint,
        )
        .wrap_err("Could not connect to the input endpoint")?;

        let mode = MonitoredSocket::new(
            ctx,
            zmq::REQ,
            SocketOptions {
                block_on_first_connect: false,
                linger: 0,
                recv_timeout: 1000,
                send_timeout: 500,
                req_correlate: true,
                req_relaxed: true,
                ..Default::default()
            },
            &params.mode_endpoint,
        )
        .wrap_err("Could not connect to the mode endpoint")?;

        Ok(Self { input, mode })
    }

    /// Execute a command, returning `false` if the console should exit.
    fn exec(&self, cmd: Command) -> Result<bool> {
        match cmd {
            Command::Ready => {
                let ready = self.query_ready(false)?;
                println!("Ready to change modes: {}", ready);
            }
            Command::Mode { mode } => {
                if self.query_ready(true)? {
                    self.send_input(&InputMsg::Control {
                        autonomous: mode == "auto",
                    })?;
                    println!("Mode change to {} sent", mode);
                } else {
                    println!("Navigation is busy, stop autonomous running before changing modes");
                }
            }
            Command::Start => {
                self.send_input(&InputMsg::Joy {
                    buttons: vec![0, 1],
                })?;
                self.send_input(&InputMsg::Joy {
                    buttons: vec![0, 0],
                })?;
                println!("Start button pressed");
            }
            Command::Heading { heading_deg } => {
                self.send_input(&InputMsg::Heading { heading_deg })?
            }
            Command::Fix {
                latitude_deg,
                longitude_deg,
            } => self.send_input(&InputMsg::Fix {
                latitude_deg,
                longitude_deg,
            })?,
            Command::Exit => return Ok(false),
        }

        Ok(true)
    }

    fn send_input(&self, msg: &InputMsg) -> Result<()> {
        let msg_str = msg.to_json()?;

        self.input
            .send(&msg_str, 0)
            .wrap_err("Could not send the input")
    }

    fn query_ready(&self, mode_change_requested: bool) -> Result<bool> {
        let request_str = serde_json::to_string(&ModeChangeRequest {
            mode_change_requested,
        })?;

        self.mode
            .send(&request_str, 0)
            .wrap_err("Could not send the mode change request")?;

        let response_str = match self.mode.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => return Err(eyre!("The response was not valid UTF-8")),
            Err(zmq::Error::EAGAIN) => return Err(eyre!("No response from the navigation exec")),
            Err(e) => return Err(e).wrap_err("Could not recieve the response"),
        };

        let response: ModeChangeResponse = serde_json::from_str(&response_str)?;

        Ok(response.ready_to_change)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
