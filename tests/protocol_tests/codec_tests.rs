//! Codec Tests
//!
//! Tests for request encoding and response decoding.

use momitcool::protocol::{
    decode_request, decode_response, encode_options, encode_request, encode_request_with,
    encode_response, Request, RequestCode, Response, ResponseCode, HEADER_SIZE,
};
use momitcool::DecodeError;

const STATE_PATH: [&str; 3] = ["10242", "0", "0"];

fn state_request(payload: &str) -> Request {
    Request::put(STATE_PATH)
        .with_content_format(1541)
        .with_payload(payload)
}

/// Response header with code 69, message id 1 and token 2
fn content_header() -> Vec<u8> {
    vec![0x64, 69, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02]
}

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_wire_format_state_request() {
    let request = state_request("cm=cool,t=472,sp=200");
    let encoded = encode_request_with(&request, 0x1234, 0xDEAD_BEEF);

    let mut expected = vec![
        0x44, 0x03, // header, PUT
        0x12, 0x34, // message id
        0xDE, 0xAD, 0xBE, 0xEF, // token
        0xB5, b'1', b'0', b'2', b'4', b'2', 0x01, b'0', 0x01, b'0', // URI-Path
        0x12, 0x06, 0x05, // Content-Format 1541
        0xFF,
    ];
    expected.extend_from_slice(b"cm=cool,t=472,sp=200");

    assert_eq!(encoded, expected);
}

#[test]
fn test_wire_format_request_codes() {
    let cases = [
        (RequestCode::Get, 1u8),
        (RequestCode::Post, 2),
        (RequestCode::Put, 3),
        (RequestCode::Delete, 4),
    ];

    for (code, byte) in cases {
        let encoded = encode_request_with(&Request::new(code), 0, 0);
        assert_eq!(encoded, vec![0x44, byte, 0, 0, 0, 0, 0, 0, 0xFF]);
    }
}

#[test]
fn test_encode_request_layout_with_random_ids() {
    let request = Request::get(["10241", "0", "0"]);
    let encoded = encode_request(&request);
    let options = encode_options(&request.options);

    assert_eq!(encoded[0], 0x44);
    assert_eq!(encoded[1], RequestCode::Get as u8);
    assert_eq!(encoded.len(), HEADER_SIZE + options.len());
    assert_eq!(&encoded[HEADER_SIZE..], options.as_slice());
}

#[test]
fn test_encode_request_never_omits_end_marker() {
    let requests = vec![
        Request::new(RequestCode::Get),
        Request::get(["a"]),
        Request::new(RequestCode::Post).with_content_format(0xFFFF),
        state_request(""),
    ];

    for request in requests {
        let encoded = encode_request_with(&request, 7, 7);
        assert_eq!(*encoded.last().unwrap(), 0xFF, "request {:?}", request);
    }
}

#[test]
fn test_encode_request_random_ids_vary() {
    let request = Request::get(["10241", "0", "0"]);
    let headers: Vec<Vec<u8>> = (0..16)
        .map(|_| encode_request(&request)[2..HEADER_SIZE].to_vec())
        .collect();

    // 16 draws of 48 random bits colliding on every draw is not a realistic outcome
    assert!(headers.iter().any(|h| *h != headers[0]));
}

// =============================================================================
// Response Decoding Tests
// =============================================================================

#[test]
fn test_decode_content_without_options() {
    let mut bytes = content_header();
    bytes.push(0xFF);
    bytes.extend_from_slice(b"220,...");

    let response = decode_response(&bytes).unwrap();
    assert_eq!(response.code, ResponseCode::Content);
    assert_eq!(response.message_id, 1);
    assert_eq!(response.token, 2);
    assert_eq!(response.payload, b"220,...");
}

#[test]
fn test_decode_response_codes() {
    for (byte, code) in [
        (68u8, ResponseCode::Changed),
        (69, ResponseCode::Content),
        (132, ResponseCode::NotFound),
    ] {
        let bytes = [0x64, byte, 0, 0, 0, 0, 0, 0, 0xFF];
        assert_eq!(decode_response(&bytes).unwrap().code, code);
    }
}

#[test]
fn test_decode_skips_single_option() {
    let mut bytes = content_header();
    bytes.extend_from_slice(&[0x61, 0x3C]); // one option, 1 byte value
    bytes.push(0xFF);
    bytes.extend_from_slice(b"abc");

    let response = decode_response(&bytes).unwrap();
    assert_eq!(response.payload, b"abc");
}

#[test]
fn test_decode_skips_multiple_options() {
    let mut bytes = content_header();
    bytes.extend_from_slice(&[0xC2, 0x06, 0x05]); // 2 byte value
    bytes.extend_from_slice(&[0x13, 0xFF, 0xFF, 0xFF]); // value bytes look like END
    bytes.push(0x10); // empty value
    bytes.push(0xFF);
    bytes.extend_from_slice(b"out=cool");

    let response = decode_response(&bytes).unwrap();
    assert_eq!(response.payload, b"out=cool");
}

#[test]
fn test_decode_payload_may_contain_end_marker() {
    let mut bytes = content_header();
    bytes.push(0xFF);
    bytes.extend_from_slice(&[0x01, 0xFF, 0x00, 0xFF]);

    let response = decode_response(&bytes).unwrap();
    assert_eq!(response.payload, vec![0x01, 0xFF, 0x00, 0xFF]);
}

#[test]
fn test_decode_header_only() {
    let response = decode_response(&content_header()).unwrap();
    assert_eq!(response.code, ResponseCode::Content);
    assert!(response.payload.is_empty());
}

#[test]
fn test_decode_options_without_end_marker() {
    let mut bytes = content_header();
    bytes.extend_from_slice(&[0x62, 0x01, 0x02]);

    let response = decode_response(&bytes).unwrap();
    assert!(response.payload.is_empty());
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_decode_truncated_header() {
    let full = content_header();
    for len in 0..HEADER_SIZE {
        let err = decode_response(&full[..len]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                field: "header",
                needed: HEADER_SIZE,
                available: len,
            }
        );
    }
}

#[test]
fn test_decode_unknown_response_code() {
    let bytes = [0x64, 0x99, 0, 1, 0, 0, 0, 2, 0xFF];
    let err = decode_response(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::UnknownCode(0x99));
    assert!(err.to_string().contains("Unknown message code"));
}

#[test]
fn test_decode_request_code_is_not_a_response_code() {
    let encoded = encode_request_with(&Request::new(RequestCode::Get), 1, 1);
    assert_eq!(
        decode_response(&encoded).unwrap_err(),
        DecodeError::UnknownCode(1)
    );
}

#[test]
fn test_decode_truncated_option_value() {
    let mut bytes = content_header();
    bytes.extend_from_slice(&[0x64, 0x01, 0x02]); // announces 4 bytes, only 2 follow

    let err = decode_response(&bytes).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            field: "option value",
            needed: 4,
            available: 2,
        }
    );
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_request_framing_preserves_payload() {
    let payloads: [&[u8]; 4] = [b"", b"cm=cool,t=472,sp=200", b"cm=cool,t=0,sp=off", &[0x00, 0xFF, 0x7F]];

    for payload in payloads {
        let request = state_request("").with_payload(payload);
        let mut encoded = encode_request(&request);

        // Reframe the request as a CONTENT response
        encoded[1] = ResponseCode::Content as u8;

        let decoded = decode_response(&encoded).unwrap();
        assert_eq!(decoded.payload, payload);
    }
}

#[test]
fn test_decode_request_round_trip() {
    let request = state_request("cm=cool,t=472,sp=200");
    let encoded = encode_request_with(&request, 0xBEEF, 42);

    let (decoded, message_id, token) = decode_request(&encoded).unwrap();
    assert_eq!(decoded, request);
    assert_eq!(message_id, 0xBEEF);
    assert_eq!(token, 42);
}

#[test]
fn test_decode_request_unknown_option() {
    let bytes = [0x44, 0x01, 0, 0, 0, 0, 0, 0, 0x33, 0xFF];
    assert_eq!(
        decode_request(&bytes).unwrap_err(),
        DecodeError::UnknownOption(0x33)
    );
}

#[test]
fn test_decode_request_unknown_code() {
    let bytes = [0x44, 0x09, 0, 0, 0, 0, 0, 0, 0xFF];
    assert_eq!(
        decode_request(&bytes).unwrap_err(),
        DecodeError::UnknownCode(9)
    );
}

#[test]
fn test_encode_response_wire_format() {
    let response = Response::content(0x0102, 0x0304_0506, "220");
    let encoded = encode_response(&response);

    assert_eq!(
        encoded,
        vec![0x64, 69, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0xFF, b'2', b'2', b'0']
    );
    assert_eq!(decode_response(&encoded).unwrap(), response);
}

#[test]
fn test_response_code_success_class() {
    assert!(ResponseCode::Changed.is_success());
    assert!(ResponseCode::Content.is_success());
    assert!(!ResponseCode::NotFound.is_success());
}
