//! Protocol Module
//!
//! Wire format of the Momit Cool's CoAP-like UDP protocol. Only the narrow
//! profile the device speaks is supported: two request options, no
//! delta-coded option numbers, no reliability layer.
//!
//! ### Request Format
//! ```text
//! ┌──────┬─────────┬────────────┬───────────┬────────────┬──────┬─────────┐
//! │ 0x44 │ Code(1) │ MsgId (2)  │ Token (4) │ Options... │ 0xFF │ Payload │
//! └──────┴─────────┴────────────┴───────────┴────────────┴──────┴─────────┘
//! ```
//!
//! ### Response Format
//! ```text
//! ┌────────┬─────────┬────────────┬───────────┬────────────┬──────┬─────────┐
//! │ Hdr(1) │ Code(1) │ MsgId (2)  │ Token (4) │ Options... │ 0xFF │ Payload │
//! └────────┴─────────┴────────────┴───────────┴────────────┴──────┴─────────┘
//! ```
//!
//! ### Options
//! - 0xB5: URI-Path, followed by segments separated by 0x01
//! - 0x12: Content-Format, followed by a big-endian u16
//! - 0xFF: end of options / start of payload
//!
//! ### Codes
//! - Requests: GET=1, POST=2, PUT=3, DELETE=4
//! - Responses: CHANGED=68, CONTENT=69, NOT_FOUND=132

mod request;
mod response;
mod options;
mod codec;

pub use request::{Request, RequestCode};
pub use response::{Response, ResponseCode};
pub use options::{
    decode_options, encode_options, OptionSet, OPTION_CONTENT_FORMAT, OPTION_END,
    OPTION_URI_PATH, URI_PATH_SEPARATOR,
};
pub use codec::{
    decode_request, decode_response, encode_request, encode_request_with, encode_response,
    HEADER_SIZE, REQUEST_HEADER, RESPONSE_HEADER,
};
