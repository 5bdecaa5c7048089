//! # Demands Server
//!
//! Publishes the drive demands to the actuator multiplexer.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    eqpt::drive::DriveDems,
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drive demands server
pub struct DemsServer {
    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DemsServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send the demands: {0}")]
    SendError(zmq::Error),

    #[error("Could not serialize the demands: {0}")]
    SerializationError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DemsServer {
    /// Create a new instance of the demands server.
    ///
    /// This function will not block until a subscriber connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, DemsServerError> {
        let socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            linger: 1,
            send_timeout: 10,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::PUB, socket_options, &params.dems_endpoint)
            .map_err(DemsServerError::SocketError)?;

        Ok(Self { socket })
    }

    /// Publish the demands.
    pub fn send(&self, dems: &DriveDems) -> Result<(), DemsServerError> {
        let dems_str = serde_json::to_string(dems).map_err(DemsServerError::SerializationError)?;

        self.socket
            .send(&dems_str, 0)
            .map_err(DemsServerError::SendError)
    }
}
