//! # Input Client
//!
//! Receives sensor and operator inputs pushed to the exec.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    input::{InputMsg, InputParseError},
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Input client
pub struct InputClient {
    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum InputClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not recieve a message: {0}")]
    RecvError(zmq::Error),

    #[error("Could not parse the recieved input: {0}")]
    InputParseError(InputParseError),

    #[error("Recieved a message which was not valid UTF-8")]
    NonUtf8Message,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl InputClient {
    /// Create a new instance of the input client.
    ///
    /// This function will not block until a producer connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, InputClientError> {
        let socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            linger: 1,
            recv_timeout: 0,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::PULL, socket_options, &params.input_endpoint)
            .map_err(InputClientError::SocketError)?;

        Ok(Self { socket })
    }

    /// Returns true if at least one producer is connected.
    pub fn is_connected(&self) -> bool {
        self.socket.connected()
    }

    /// Recieve a single pending input.
    ///
    /// The protocol here is to call `recieve_input` in a loop until `Ok(None)` is returned,
    /// indicating that all pending inputs have been recieved.
    pub fn recieve_input(&self) -> Result<Option<InputMsg>, InputClientError> {
        let msg_str = match self.socket.recv_string(zmq::DONTWAIT) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => return Err(InputClientError::NonUtf8Message),
            Err(zmq::Error::EAGAIN) => return Ok(None),
            Err(e) => return Err(InputClientError::RecvError(e)),
        };

        InputMsg::from_json(&msg_str)
            .map(Some)
            .map_err(InputClientError::InputParseError)
    }
}
