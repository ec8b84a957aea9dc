//! Error types for momitcool
//!
//! Provides a unified error type for all operations, plus the codec's
//! own decode error.

use thiserror::Error;

/// Result type alias using CoapError
pub type Result<T> = std::result::Result<T, CoapError>;

/// Errors raised while parsing a datagram
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Response/request code byte does not map to a known code
    #[error("Unknown message code: {0} (0x{0:02x})")]
    UnknownCode(u8),

    /// Datagram ended before a required field could be read
    #[error("Truncated message: {field} needs {needed} bytes, {available} available")]
    Truncated {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    /// Option marker byte is not URI-Path, Content-Format or END
    #[error("Unknown option marker: 0x{0:02x}")]
    UnknownOption(u8),

    /// URI-Path segment is not valid UTF-8
    #[error("Invalid UTF-8 in URI-Path segment")]
    InvalidUtf8,
}

impl DecodeError {
    /// Create a truncation error for a field
    pub fn truncated(field: &'static str, needed: usize, available: usize) -> Self {
        DecodeError::Truncated {
            field,
            needed,
            available,
        }
    }
}

/// Unified error type for momitcool operations
#[derive(Debug, Error)]
pub enum CoapError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode error: {0}")]
    Encode(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("No response received before timeout")]
    Timeout,

    #[error("Token mismatch: expected 0x{expected:08x}, got 0x{actual:08x}")]
    TokenMismatch { expected: u32, actual: u32 },

    // -------------------------------------------------------------------------
    // Device Errors
    // -------------------------------------------------------------------------
    #[error("Device error: {0}")]
    Device(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
