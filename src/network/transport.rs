//! UDP Transport
//!
//! One blocking request/response round trip per call.

use std::io;
use std::net::UdpSocket;
use std::time::Duration;

use rand::Rng;

use crate::config::Config;
use crate::error::{CoapError, Result};
use crate::protocol::{decode_response, encode_request_with, Request, Response};
use crate::MAX_DATAGRAM_SIZE;

/// Sends requests to a single device
///
/// Holds no socket between calls. Every round trip binds its own socket and
/// drops it on return, so separate transports (or threads) never share one.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    config: Config,
}

impl UdpTransport {
    /// Create a transport for the configured device
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the transport configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a request and block until one response datagram is received
    pub fn round_trip(&self, request: &Request) -> Result<Response> {
        let mut rng = rand::thread_rng();
        let message_id: u16 = rng.gen();
        let token: u32 = rng.gen();

        let packet = encode_request_with(request, message_id, token);
        if packet.len() > MAX_DATAGRAM_SIZE {
            return Err(CoapError::Encode(format!(
                "Request of {} bytes exceeds the maximum datagram size of {}",
                packet.len(),
                MAX_DATAGRAM_SIZE
            )));
        }

        let destination = self.config.destination();
        tracing::debug!(
            "{} coap://{}/{} ({} bytes) >> {}",
            request.code,
            destination,
            request.options.path_string(),
            packet.len(),
            String::from_utf8_lossy(&request.payload)
        );
        tracing::trace!("Request id=0x{:04x} token=0x{:08x}", message_id, token);

        let socket = self.open_socket()?;

        let sent = socket.send_to(&packet, &destination)?;
        if sent != packet.len() {
            return Err(CoapError::Transport(format!(
                "Short send to {}: {} of {} bytes",
                destination,
                sent,
                packet.len()
            )));
        }

        let mut buf = vec![0u8; self.config.recv_buffer_size];
        let (len, peer) = socket.recv_from(&mut buf).map_err(recv_error)?;
        let response = decode_response(&buf[..len])?;

        tracing::debug!(
            "{} coap://{} ({} bytes) << {}",
            response.code,
            peer,
            response.payload.len(),
            String::from_utf8_lossy(&response.payload)
        );

        if self.config.verify_token && response.token != token {
            return Err(CoapError::TokenMismatch {
                expected: token,
                actual: response.token,
            });
        }

        Ok(response)
    }

    /// Bind the request socket and apply the receive timeout
    fn open_socket(&self) -> Result<UdpSocket> {
        if self.config.recv_buffer_size == 0 {
            return Err(CoapError::Config(
                "Receive buffer size must be greater than zero".to_string(),
            ));
        }

        let socket = UdpSocket::bind(&self.config.bind_addr)?;
        if self.config.read_timeout_ms > 0 {
            socket.set_read_timeout(Some(Duration::from_millis(self.config.read_timeout_ms)))?;
        }

        Ok(socket)
    }
}

/// Map receive errors, turning timeouts into [`CoapError::Timeout`]
fn recv_error(e: io::Error) -> CoapError {
    match e.kind() {
        // Unix reports WouldBlock on timeout, Windows uses TimedOut
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => CoapError::Timeout,
        _ => CoapError::Io(e),
    }
}
