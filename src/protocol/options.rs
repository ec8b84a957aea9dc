//! Request options
//!
//! The device uses a simplified option encoding: each option starts with a
//! fixed marker byte instead of CoAP's delta/length nibbles. It only works for
//! the fixed URI-Path then Content-Format request shape.
//!
//! ```text
//! [0xB5][seg][0x01][seg]...[0x12][cf_hi][cf_lo][0xFF]
//! ```

use bytes::{Buf, BufMut};

use crate::error::DecodeError;

/// URI-Path option marker
pub const OPTION_URI_PATH: u8 = 0xB5;

/// Separator between two URI-Path segments
pub const URI_PATH_SEPARATOR: u8 = 0x01;

/// Content-Format option marker
pub const OPTION_CONTENT_FORMAT: u8 = 0x12;

/// End of options, start of payload
pub const OPTION_END: u8 = 0xFF;

/// Options recognized by the device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    /// URI-Path segments, in order
    pub path: Vec<String>,

    /// Content-Format code, skipped when absent or zero
    pub content_format: Option<u16>,
}

impl OptionSet {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URI-Path segments
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Set the Content-Format code
    pub fn with_content_format(mut self, format: u16) -> Self {
        self.content_format = Some(format);
        self
    }

    /// Path joined with `/`, for logging
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }

    /// Encode these options, END marker included
    pub fn encode(&self) -> Vec<u8> {
        encode_options(self)
    }
}

/// Encode an option set
///
/// Always ends with [`OPTION_END`], even when no option is set.
pub fn encode_options(options: &OptionSet) -> Vec<u8> {
    let path_len: usize = options.path.iter().map(|s| s.len() + 1).sum();
    let mut buf = Vec::with_capacity(1 + path_len + 3 + 1);

    if !options.path.is_empty() {
        buf.put_u8(OPTION_URI_PATH);
        for (index, segment) in options.path.iter().enumerate() {
            if index > 0 {
                buf.put_u8(URI_PATH_SEPARATOR);
            }
            buf.put_slice(segment.as_bytes());
        }
    }

    match options.content_format {
        Some(format) if format != 0 => {
            buf.put_u8(OPTION_CONTENT_FORMAT);
            buf.put_u16(format);
        }
        _ => {}
    }

    buf.put_u8(OPTION_END);
    buf
}

/// Decode an option set produced by [`encode_options`]
///
/// Consumes everything up to and including the END marker; the buffer is
/// left positioned at the payload. Path segments must not contain the
/// marker bytes `0x01`, `0x12` or `0xFF`.
pub fn decode_options<B: Buf>(buf: &mut B) -> Result<OptionSet, DecodeError> {
    let mut options = OptionSet::new();

    loop {
        if !buf.has_remaining() {
            return Err(DecodeError::truncated("option end marker", 1, 0));
        }

        match buf.get_u8() {
            OPTION_END => return Ok(options),
            OPTION_URI_PATH => options.path = decode_path(buf)?,
            OPTION_CONTENT_FORMAT => {
                if buf.remaining() < 2 {
                    return Err(DecodeError::truncated(
                        "content-format",
                        2,
                        buf.remaining(),
                    ));
                }
                options.content_format = Some(buf.get_u16());
            }
            other => return Err(DecodeError::UnknownOption(other)),
        }
    }
}

/// Read URI-Path segments up to the next option marker (not consumed)
fn decode_path<B: Buf>(buf: &mut B) -> Result<Vec<String>, DecodeError> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    loop {
        let next = match buf.chunk().first() {
            Some(&byte) => byte,
            None => return Err(DecodeError::truncated("option end marker", 1, 0)),
        };

        match next {
            OPTION_CONTENT_FORMAT | OPTION_END => break,
            URI_PATH_SEPARATOR => {
                buf.advance(1);
                segments.push(take_segment(&mut current)?);
            }
            byte => {
                buf.advance(1);
                current.push(byte);
            }
        }
    }

    segments.push(take_segment(&mut current)?);
    Ok(segments)
}

fn take_segment(bytes: &mut Vec<u8>) -> Result<String, DecodeError> {
    String::from_utf8(std::mem::take(bytes)).map_err(|_| DecodeError::InvalidUtf8)
}
