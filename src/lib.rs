//! # momitcool
//!
//! Client for the Momit Cool air-conditioning controller, which speaks a
//! narrow CoAP-like request/response protocol over UDP:
//! - Request encoding with the device's simplified option format
//! - Response decoding that skips options to reach the payload
//! - Single blocking UDP round trip per request
//! - Device operations: cool, off, mode, temperature
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CLI / MomitCool (device)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Request
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     UdpTransport                             │
//! │              (one socket per round trip)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Encode    │          │   Decode    │
//!   │  (request)  │          │ (response)  │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │   Options   │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod device;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CoapError, DecodeError, Result};
pub use config::Config;
pub use device::{Mode, MomitCool, SetState};
pub use network::UdpTransport;

// =============================================================================
// Protocol Constants
// =============================================================================

/// Default CoAP port; the device also replies to this port
pub const DEFAULT_PORT: u16 = 5683;

/// Default receive buffer size for a response datagram
pub const RECV_BUFFER_SIZE: usize = 1024;

/// Largest payload a UDP/IPv4 datagram can carry
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of momitcool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
