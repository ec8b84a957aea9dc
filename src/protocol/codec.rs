//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌────────┬─────────┬────────────┬───────────┬────────────┬──────┬─────────┐
//! │ Hdr(1) │ Code(1) │ MsgId (2)  │ Token (4) │ Options... │ 0xFF │ Payload │
//! └────────┴─────────┴────────────┴───────────┴────────────┴──────┴─────────┘
//! ```
//!
//! All multi-byte fields are big-endian. Message id and token are opaque
//! values chosen by the client; the device echoes them back.
//!
//! The response decoder does not interpret options. Each option group is a
//! byte whose low nibble is the length of the value that follows, and the
//! whole group is skipped to reach the payload.

use bytes::{Buf, BufMut};
use rand::Rng;

use crate::error::DecodeError;
use super::options::{decode_options, encode_options, OPTION_END};
use super::{Request, RequestCode, Response, ResponseCode};

/// Request header byte: version 1, confirmable, token length 4
pub const REQUEST_HEADER: u8 = 0x44;

/// Response header byte: version 1, acknowledgement, token length 4
pub const RESPONSE_HEADER: u8 = 0x64;

/// Fixed part of every message: header (1) + code (1) + msg id (2) + token (4)
pub const HEADER_SIZE: usize = 8;

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request with a random message id and token
pub fn encode_request(request: &Request) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    encode_request_with(request, rng.gen(), rng.gen())
}

/// Encode a request with the given message id and token
///
/// Format: 0x44 + code (1) + msg_id (2) + token (4) + options + payload
pub fn encode_request_with(request: &Request, message_id: u16, token: u32) -> Vec<u8> {
    let options = encode_options(&request.options);

    let mut message = Vec::with_capacity(HEADER_SIZE + options.len() + request.payload.len());
    message.put_u8(REQUEST_HEADER);
    message.put_u8(request.code as u8);
    message.put_u16(message_id);
    message.put_u32(token);
    message.put_slice(&options);
    message.put_slice(&request.payload);

    message
}

/// Decode a request datagram
///
/// Returns the request together with its message id and token so that a
/// responder can echo them.
pub fn decode_request(bytes: &[u8]) -> Result<(Request, u16, u32), DecodeError> {
    let mut buf = bytes;
    let (code, message_id, token) = decode_header(&mut buf)?;
    let code = RequestCode::try_from(code)?;

    let options = decode_options(&mut buf)?;

    let request = Request {
        code,
        options,
        payload: buf.to_vec(),
    };
    Ok((request, message_id, token))
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response datagram
///
/// Format: 0x64 + code (1) + msg_id (2) + token (4) + 0xFF + payload
pub fn encode_response(response: &Response) -> Vec<u8> {
    let mut message = Vec::with_capacity(HEADER_SIZE + 1 + response.payload.len());
    message.put_u8(RESPONSE_HEADER);
    message.put_u8(response.code as u8);
    message.put_u16(response.message_id);
    message.put_u32(response.token);
    message.put_u8(OPTION_END);
    message.put_slice(&response.payload);

    message
}

/// Decode a response datagram
pub fn decode_response(bytes: &[u8]) -> Result<Response, DecodeError> {
    let mut buf = bytes;
    let (code, message_id, token) = decode_header(&mut buf)?;
    let code = ResponseCode::try_from(code)?;

    skip_options(&mut buf)?;

    Ok(Response {
        code,
        message_id,
        token,
        payload: buf.to_vec(),
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Read the fixed header, returning the raw code, message id and token
fn decode_header(buf: &mut &[u8]) -> Result<(u8, u16, u32), DecodeError> {
    if buf.remaining() < HEADER_SIZE {
        return Err(DecodeError::truncated("header", HEADER_SIZE, buf.remaining()));
    }

    // Version, type and token length are fixed for this device
    buf.advance(1);

    let code = buf.get_u8();
    let message_id = buf.get_u16();
    let token = buf.get_u32();

    Ok((code, message_id, token))
}

/// Skip option groups up to and including the END marker
///
/// A datagram that ends without an END marker simply has no payload.
fn skip_options(buf: &mut &[u8]) -> Result<(), DecodeError> {
    while let Some(&byte) = buf.first() {
        if byte == OPTION_END {
            buf.advance(1);
            break;
        }

        buf.advance(1);
        let length = (byte & 0x0F) as usize;
        if buf.remaining() < length {
            return Err(DecodeError::truncated("option value", length, buf.remaining()));
        }
        buf.advance(length);
    }

    Ok(())
}
