//! # Mode Server
//!
//! Answers mode change readiness requests from the mode selection node.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::warn;

use comms_if::{
    mode::{ModeChangeRequest, ModeChangeResponse},
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Mode change readiness server
pub struct ModeServer {
    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ModeServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send the response: {0}")]
    SendError(zmq::Error),

    #[error("Could not recieve a request: {0}")]
    RecvError(zmq::Error),

    #[error("Could not serialize the response: {0}")]
    SerializationError(serde_json::Error),

    #[error("Could not parse the recieved request: {0}")]
    RequestParseError(serde_json::Error),

    #[error("Recieved a request which was not valid UTF-8")]
    NonUtf8Request,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ModeServer {
    /// Create a new instance of the mode server.
    ///
    /// This function will not block until a client connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, ModeServerError> {
        let socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            linger: 1,
            recv_timeout: 0,
            send_timeout: 10,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::REP, socket_options, &params.mode_endpoint)
            .map_err(ModeServerError::SocketError)?;

        Ok(Self { socket })
    }

    /// Recieve a single pending request.
    ///
    /// Call in a loop until `Ok(None)` is returned. After recieving a valid request a response
    /// must be sent with `.send_response()` before attempting to recieve another. If the request
    /// is invalid a not ready response is sent automatically by this function.
    pub fn recieve_request(&self) -> Result<Option<ModeChangeRequest>, ModeServerError> {
        let req_str = match self.socket.recv_string(zmq::DONTWAIT) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => {
                self.send_not_ready();
                return Err(ModeServerError::NonUtf8Request);
            }
            Err(zmq::Error::EAGAIN) => return Ok(None),
            Err(e) => return Err(ModeServerError::RecvError(e)),
        };

        serde_json::from_str(&req_str)
            .map(Some)
            .map_err(|e| {
                self.send_not_ready();
                ModeServerError::RequestParseError(e)
            })
    }

    /// Send the response to the last recieved request.
    pub fn send_response(&self, response: ModeChangeResponse) -> Result<(), ModeServerError> {
        let response_str =
            serde_json::to_string(&response).map_err(ModeServerError::SerializationError)?;

        self.socket
            .send(&response_str, 0)
            .map_err(ModeServerError::SendError)
    }

    /// Reply to an invalid request so the REP socket can accept the next one.
    fn send_not_ready(&self) {
        if let Err(e) = self.send_response(ModeChangeResponse {
            ready_to_change: false,
        }) {
            warn!("Could not reply to invalid mode change request: {}", e);
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::{thread, time::Duration};

    fn net_params(mode_endpoint: &str) -> NetParams {
        NetParams {
            input_endpoint: String::new(),
            mode_endpoint: mode_endpoint.into(),
            dems_endpoint: String::new(),
        }
    }

    /// Poll the server until a request (valid or not) has been taken off the socket.
    fn poll(server: &ModeServer) -> Result<Option<ModeChangeRequest>, ModeServerError> {
        for _ in 0..200 {
            match server.recieve_request() {
                Ok(None) => thread::sleep(Duration::from_millis(5)),
                r => return r,
            }
        }

        Ok(None)
    }

    #[test]
    fn test_invalid_request_gets_not_ready() {
        let ctx = zmq::Context::new();
        let endpoint = "inproc://test_invalid_request_gets_not_ready";

        let server = ModeServer::new(&ctx, &net_params(endpoint)).unwrap();

        let client = ctx.socket(zmq::REQ).unwrap();
        client.set_rcvtimeo(1000).unwrap();
        client.connect(endpoint).unwrap();

        // Invalid request is answered automatically
        client.send("not a request", 0).unwrap();
        assert!(matches!(
            poll(&server),
            Err(ModeServerError::RequestParseError(_))
        ));

        let reply: ModeChangeResponse =
            serde_json::from_str(&client.recv_string(0).unwrap().unwrap()).unwrap();
        assert!(!reply.ready_to_change);

        // The server can still take the next request
        client
            .send(r#"{"mode_change_requested": true}"#, 0)
            .unwrap();
        let request = poll(&server).unwrap().unwrap();
        assert!(request.mode_change_requested);

        server
            .send_response(ModeChangeResponse {
                ready_to_change: true,
            })
            .unwrap();

        let reply: ModeChangeResponse =
            serde_json::from_str(&client.recv_string(0).unwrap().unwrap()).unwrap();
        assert!(reply.ready_to_change);
    }
}
