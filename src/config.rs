//! Configuration for momitcool
//!
//! Centralized configuration with sensible defaults.

use crate::{DEFAULT_PORT, RECV_BUFFER_SIZE};

/// Configuration for a device round trip
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Destination
    // -------------------------------------------------------------------------
    /// Device host name or IP address
    pub host: String,

    /// Device UDP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Local Socket
    // -------------------------------------------------------------------------
    /// Local address the request socket binds to.
    /// The device answers on the protocol's default port, so the default
    /// binds `0.0.0.0:5683`. Use port 0 for an ephemeral port.
    pub bind_addr: String,

    /// Receive buffer size; longer datagrams are truncated by the OS
    pub recv_buffer_size: usize,

    // -------------------------------------------------------------------------
    // Hardening
    // -------------------------------------------------------------------------
    /// Receive timeout (milliseconds), 0 blocks until a datagram arrives
    pub read_timeout_ms: u64,

    /// Reject responses whose token differs from the request's
    pub verify_token: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            bind_addr: format!("0.0.0.0:{}", DEFAULT_PORT),
            recv_buffer_size: RECV_BUFFER_SIZE,
            read_timeout_ms: 0,
            verify_token: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` of the device
    pub fn destination(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the device port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the local bind address (host:port)
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.bind_addr = addr.into();
        self
    }

    /// Set the receive buffer size (in bytes)
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.config.recv_buffer_size = size;
        self
    }

    /// Set the receive timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Enable or disable token correlation checks
    pub fn verify_token(mut self, verify: bool) -> Self {
        self.config.verify_token = verify;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
