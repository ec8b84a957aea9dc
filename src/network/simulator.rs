//! Device Simulator
//!
//! A UDP responder that emulates a Momit Cool, for tests and for trying the
//! CLI without hardware. Requests are served one at a time on the thread
//! calling [`DeviceSimulator::run`].

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::device::{Mode, SetState, STATE_CONTENT_FORMAT, STATE_PATH, TEMPERATURE_PATH};
use crate::error::Result;
use crate::protocol::{decode_request, encode_response, Request, RequestCode, Response};
use crate::MAX_DATAGRAM_SIZE;

/// How often the receive loop checks the shutdown flag
const POLL_INTERVAL_MS: u64 = 100;

/// Emulated device state
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    /// Last state change received
    pub state: SetState,

    /// Room temperature in tenths of a degree
    pub temperature_tenths: i32,

    /// Number of requests served
    pub requests: u64,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            state: SetState::off(),
            temperature_tenths: 220,
            requests: 0,
        }
    }
}

impl DeviceState {
    /// Payload served for a GET on the state resource
    pub fn state_payload(&self) -> String {
        format!("{}, out={}", self.state.to_payload(), self.state.effective_mode())
    }

    /// Running mode
    pub fn mode(&self) -> Mode {
        self.state.effective_mode()
    }
}

/// Handle for inspecting and stopping a running simulator from another thread
#[derive(Clone)]
pub struct SimulatorHandle {
    state: Arc<Mutex<DeviceState>>,
    shutdown: Arc<AtomicBool>,
}

impl SimulatorHandle {
    /// Snapshot of the current state
    pub fn state(&self) -> DeviceState {
        self.state.lock().clone()
    }

    /// Change the reported room temperature
    pub fn set_temperature_tenths(&self, tenths: i32) {
        self.state.lock().temperature_tenths = tenths;
    }

    /// Signal the receive loop to stop
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

/// Emulated Momit Cool
pub struct DeviceSimulator {
    socket: UdpSocket,
    state: Arc<Mutex<DeviceState>>,
    shutdown: Arc<AtomicBool>,
}

impl DeviceSimulator {
    /// Bind the simulator to a local address (host:port)
    pub fn bind(addr: &str) -> Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(Duration::from_millis(POLL_INTERVAL_MS)))?;

        Ok(Self {
            socket,
            state: Arc::new(Mutex::new(DeviceState::default())),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Address the simulator is listening on
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Get a handle for another thread
    pub fn handle(&self) -> SimulatorHandle {
        SimulatorHandle {
            state: Arc::clone(&self.state),
            shutdown: Arc::clone(&self.shutdown),
        }
    }

    /// Serve requests until [`SimulatorHandle::shutdown`] is called
    pub fn run(&self) -> Result<()> {
        tracing::info!("Simulator listening on {}", self.local_addr()?);

        // Requests may be as large as the transport allows
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        while !self.shutdown.load(Ordering::Relaxed) {
            let (len, peer) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(ref e)
                    if e.kind() == io::ErrorKind::WouldBlock
                        || e.kind() == io::ErrorKind::TimedOut =>
                {
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let Some(reply) = self.handle_datagram(&buf[..len]) else {
                continue;
            };

            if let Err(e) = self.socket.send_to(&reply, peer) {
                tracing::warn!("Error replying to {}: {}", peer, e);
            }
        }

        tracing::info!("Simulator stopped");
        Ok(())
    }

    /// Build the reply datagram for a request datagram
    ///
    /// Malformed datagrams are dropped without a reply, like the device does.
    pub fn handle_datagram(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        let (request, message_id, token) = match decode_request(bytes) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("Dropping malformed request ({} bytes): {}", bytes.len(), e);
                return None;
            }
        };

        tracing::debug!(
            "{} /{} << {}",
            request.code,
            request.options.path_string(),
            String::from_utf8_lossy(&request.payload)
        );

        let response = self.execute(&request, message_id, token);
        tracing::debug!("{} >> {}", response.code, String::from_utf8_lossy(&response.payload));

        Some(encode_response(&response))
    }

    /// Apply a request to the emulated state
    fn execute(&self, request: &Request, message_id: u16, token: u32) -> Response {
        let mut state = self.state.lock();
        state.requests += 1;

        let path = &request.options.path;
        let is_state = path.iter().map(String::as_str).eq(STATE_PATH);
        let is_temperature = path.iter().map(String::as_str).eq(TEMPERATURE_PATH);

        match request.code {
            RequestCode::Get if is_state => {
                Response::content(message_id, token, state.state_payload())
            }
            RequestCode::Get if is_temperature => {
                Response::content(message_id, token, state.temperature_tenths.to_string())
            }
            RequestCode::Put | RequestCode::Post
                if is_state && request.options.content_format == Some(STATE_CONTENT_FORMAT) =>
            {
                let parsed = std::str::from_utf8(&request.payload)
                    .ok()
                    .and_then(|payload| SetState::from_payload(payload).ok());
                match parsed {
                    Some(new_state) => {
                        state.state = new_state;
                        Response::changed(message_id, token)
                    }
                    None => {
                        tracing::warn!("Rejecting state payload {:?}", request.payload);
                        Response::not_found(message_id, token)
                    }
                }
            }
            _ => Response::not_found(message_id, token),
        }
    }
}
