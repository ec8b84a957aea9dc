//! Response definitions
//!
//! Represents responses from the device.

use std::fmt;

use crate::error::DecodeError;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResponseCode {
    /// 2.04
    Changed = 68,
    /// 2.05
    Content = 69,
    /// 4.04
    NotFound = 132,
}

impl ResponseCode {
    /// Upper-case code name, as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            ResponseCode::Changed => "CHANGED",
            ResponseCode::Content => "CONTENT",
            ResponseCode::NotFound => "NOT_FOUND",
        }
    }

    /// Whether the code is in the 2.xx success class
    pub fn is_success(&self) -> bool {
        (*self as u8) >> 5 == 2
    }
}

impl TryFrom<u8> for ResponseCode {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            68 => Ok(ResponseCode::Changed),
            69 => Ok(ResponseCode::Content),
            132 => Ok(ResponseCode::NotFound),
            other => Err(DecodeError::UnknownCode(other)),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded response datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub code: ResponseCode,

    /// Message id echoed by the device
    pub message_id: u16,

    /// Token echoed by the device
    pub token: u32,

    /// Raw payload bytes (may be empty)
    pub payload: Vec<u8>,
}

impl Response {
    /// Create a response answering the given message id and token
    pub fn new(code: ResponseCode, message_id: u16, token: u32, payload: Vec<u8>) -> Self {
        Self {
            code,
            message_id,
            token,
            payload,
        }
    }

    /// Create a CONTENT response with a payload
    pub fn content(message_id: u16, token: u32, payload: impl Into<Vec<u8>>) -> Self {
        Self::new(ResponseCode::Content, message_id, token, payload.into())
    }

    /// Create an empty CHANGED response
    pub fn changed(message_id: u16, token: u32) -> Self {
        Self::new(ResponseCode::Changed, message_id, token, Vec::new())
    }

    /// Create an empty NOT_FOUND response
    pub fn not_found(message_id: u16, token: u32) -> Self {
        Self::new(ResponseCode::NotFound, message_id, token, Vec::new())
    }
}
