//! Request definitions
//!
//! Represents requests sent to the device.

use std::fmt;

use crate::error::DecodeError;
use super::OptionSet;

/// Request method codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestCode {
    Get = 1,
    Post = 2,
    Put = 3,
    Delete = 4,
}

impl RequestCode {
    /// Upper-case method name, as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            RequestCode::Get => "GET",
            RequestCode::Post => "POST",
            RequestCode::Put => "PUT",
            RequestCode::Delete => "DELETE",
        }
    }
}

impl TryFrom<u8> for RequestCode {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            1 => Ok(RequestCode::Get),
            2 => Ok(RequestCode::Post),
            3 => Ok(RequestCode::Put),
            4 => Ok(RequestCode::Delete),
            other => Err(DecodeError::UnknownCode(other)),
        }
    }
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request to send to the device
///
/// Message id and token are not part of the request; they are generated
/// fresh each time the request is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Method code
    pub code: RequestCode,

    /// URI-Path and Content-Format options
    pub options: OptionSet,

    /// Raw payload bytes
    pub payload: Vec<u8>,
}

impl Request {
    /// Create a request with no options and an empty payload
    pub fn new(code: RequestCode) -> Self {
        Self {
            code,
            options: OptionSet::new(),
            payload: Vec::new(),
        }
    }

    /// Create a GET request for a path
    pub fn get<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RequestCode::Get).with_path(path)
    }

    /// Create a PUT request for a path
    pub fn put<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RequestCode::Put).with_path(path)
    }

    /// Set the URI-Path segments
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_path(path);
        self
    }

    /// Set the Content-Format code
    pub fn with_content_format(mut self, format: u16) -> Self {
        self.options = self.options.with_content_format(format);
        self
    }

    /// Set the payload
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }
}
