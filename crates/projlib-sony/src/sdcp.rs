//! SDCP (Simple Display Control Protocol) over TCP.
//!
//! # Request format
//!
//! ```text
//! 02 0A <community:4> <00 set | 01 get> <item:2> 02 <data:2>
//! ```
//!
//! # Response format
//!
//! ```text
//! 02 0A <community:4> <01 ok | 00 error> <item:2> <len> <data:len>
//! ```
//!
//! On error the data carries a two-byte error code, see [`error_message`].

use bytes::{BufMut, BytesMut};
use tracing::trace;

use projlib_core::error::{Error, Result};
use projlib_core::{Code, decode16};

use crate::codec::{Command, DecodeResult, FrameCodec};

/// Default SDCP TCP port.
pub const DEFAULT_PORT: u16 = 53484;

/// Default community string.
pub const DEFAULT_COMMUNITY: [u8; 4] = *b"SONY";

pub const VERSION: u8 = 0x02;
pub const CATEGORY: u8 = 0x0A;

const HEADER_LEN: usize = 10;
const REQUEST_LEN: usize = 12;
const RESULT_OK: u8 = 0x01;
const RESULT_ERROR: u8 = 0x00;

/// Message for an SDCP error code.
pub fn error_message(code: u16) -> &'static str {
    match code {
        0x0101 => "Invalid item",
        0x0102 => "Invalid item request",
        0x0103 => "Invalid length",
        0x0104 => "Invalid data",
        0x0111 => "Short data",
        0x0180 => "Not applicable item",
        0x0201 => "Different community",
        0x1001 => "Invalid version",
        0x1002 => "Invalid category",
        0x1003 => "Invalid request",
        0x1011 => "Short header",
        0x1012 => "Short community",
        0x1013 => "Short command",
        0x2001 => "Timeout",
        0xF001 => "Timeout",
        0xF010 => "Checksum error",
        0xF020 => "Framing error",
        0xF030 => "Parity error",
        0xF040 => "Over run error",
        0xF050 => "Other comm error",
        0xF0F0 => "Unknown response",
        0xF110 => "NV memory read error",
        0xF120 => "NV memory write error",
        _ => "Unknown error",
    }
}

/// SDCP framing with a fixed community.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdcpCodec {
    community: [u8; 4],
}

impl SdcpCodec {
    pub fn new(community: [u8; 4]) -> Self {
        SdcpCodec { community }
    }

    pub fn community(&self) -> [u8; 4] {
        self.community
    }
}

impl Default for SdcpCodec {
    fn default() -> Self {
        SdcpCodec::new(DEFAULT_COMMUNITY)
    }
}

fn invalid(reason: &str, frame: &[u8]) -> Error {
    Error::InvalidResponse {
        reason: reason.to_string(),
        bytes: frame.to_vec(),
    }
}

impl FrameCodec for SdcpCodec {
    fn name(&self) -> &'static str {
        "SDCP"
    }

    fn encode(&self, command: Command, item: Code, data: Code) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(REQUEST_LEN);
        buf.put_u8(VERSION);
        buf.put_u8(CATEGORY);
        buf.put_slice(&self.community);
        buf.put_u8(match command {
            Command::Set => 0x00,
            Command::Get => 0x01,
        });
        buf.put_slice(&item);
        buf.put_u8(data.len() as u8);
        buf.put_slice(&data);
        buf.to_vec()
    }

    fn decode(&self, buf: &[u8]) -> DecodeResult {
        if buf.len() < HEADER_LEN {
            return DecodeResult::Incomplete;
        }
        let total = HEADER_LEN + buf[HEADER_LEN - 1] as usize;
        if buf.len() < total {
            DecodeResult::Incomplete
        } else {
            DecodeResult::Complete(total)
        }
    }

    fn validate<'a>(&self, frame: &'a [u8], _command: Command, item: Code) -> Result<&'a [u8]> {
        trace!(frame = ?frame, "validating SDCP response");

        if frame.len() < HEADER_LEN || frame.len() != HEADER_LEN + frame[HEADER_LEN - 1] as usize
        {
            return Err(invalid("unexpected frame length", frame));
        }
        if frame[0] != VERSION {
            return Err(invalid("unexpected version", frame));
        }
        if frame[1] != CATEGORY {
            return Err(invalid("unexpected category", frame));
        }
        if frame[2..6] != self.community {
            return Err(invalid("unexpected community", frame));
        }

        let data = &frame[HEADER_LEN..];
        match frame[6] {
            RESULT_OK => {}
            RESULT_ERROR => {
                if data.len() < 2 {
                    return Err(invalid("error response without an error code", frame));
                }
                let code = decode16([data[0], data[1]]);
                return Err(Error::DeviceError {
                    code,
                    message: error_message(code),
                });
            }
            _ => return Err(invalid("unexpected result byte", frame)),
        }

        if frame[7..9] != item {
            return Err(invalid("item does not match the request", frame));
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(result: u8, item: Code, data: &[u8]) -> Vec<u8> {
        let mut frame = vec![VERSION, CATEGORY, b'S', b'O', b'N', b'Y', result];
        frame.extend_from_slice(&item);
        frame.push(data.len() as u8);
        frame.extend_from_slice(data);
        frame
    }

    #[test]
    fn encode_get_request() {
        let codec = SdcpCodec::default();
        let frame = codec.encode(Command::Get, [0x01, 0x02], [0x00, 0x00]);
        assert_eq!(
            frame,
            vec![0x02, 0x0A, b'S', b'O', b'N', b'Y', 0x01, 0x01, 0x02, 0x02, 0x00, 0x00]
        );
    }

    #[test]
    fn encode_set_request_with_custom_community() {
        let codec = SdcpCodec::new(*b"ABCD");
        let frame = codec.encode(Command::Set, [0x00, 0x20], [0x00, 0x0E]);
        assert_eq!(
            frame,
            vec![0x02, 0x0A, b'A', b'B', b'C', b'D', 0x00, 0x00, 0x20, 0x02, 0x00, 0x0E]
        );
    }

    #[test]
    fn ir_frame_uses_set_layout() {
        let codec = SdcpCodec::default();
        let frame = codec.encode_ir([0x17, 0x2E]);
        assert_eq!(&frame[6..], &[0x00, 0x17, 0x2E, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn decode_waits_for_declared_length() {
        let codec = SdcpCodec::default();
        let frame = response(RESULT_OK, [0x00, 0x10], &[0x00, 0x32]);
        assert_eq!(codec.decode(&frame[..5]), DecodeResult::Incomplete);
        assert_eq!(codec.decode(&frame[..11]), DecodeResult::Incomplete);
        assert_eq!(codec.decode(&frame), DecodeResult::Complete(12));
    }

    #[test]
    fn validate_ok_returns_payload() {
        let codec = SdcpCodec::default();
        let frame = response(RESULT_OK, [0x00, 0x10], &[0x00, 0x32]);
        let data = codec.validate(&frame, Command::Get, [0x00, 0x10]).unwrap();
        assert_eq!(data, &[0x00, 0x32]);
    }

    #[test]
    fn validate_variable_length_payload() {
        let codec = SdcpCodec::default();
        let frame = response(RESULT_OK, [0x80, 0x01], b"VPL-VW520");
        let data = codec.validate(&frame, Command::Get, [0x80, 0x01]).unwrap();
        assert_eq!(data, b"VPL-VW520");
    }

    #[test]
    fn validate_device_error() {
        let codec = SdcpCodec::default();
        let frame = response(RESULT_ERROR, [0x00, 0x10], &[0x01, 0x80]);
        let err = codec
            .validate(&frame, Command::Get, [0x00, 0x10])
            .unwrap_err();
        match err {
            Error::DeviceError { code, message } => {
                assert_eq!(code, 0x0180);
                assert_eq!(message, "Not applicable item");
            }
            other => panic!("expected DeviceError, got {other:?}"),
        }
    }

    #[test]
    fn validate_item_mismatch() {
        let codec = SdcpCodec::default();
        let frame = response(RESULT_OK, [0x00, 0x11], &[0x00, 0x32]);
        let err = codec
            .validate(&frame, Command::Get, [0x00, 0x10])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponse { .. }));
        assert_eq!(err.response_bytes(), Some(frame.as_slice()));
    }

    #[test]
    fn validate_header_checks() {
        let codec = SdcpCodec::default();
        let good = response(RESULT_OK, [0x00, 0x10], &[0x00, 0x32]);

        let mut bad_version = good.clone();
        bad_version[0] = 0x03;
        let mut bad_category = good.clone();
        bad_category[1] = 0x0B;
        let mut bad_community = good.clone();
        bad_community[2] = b'X';
        let truncated = &good[..11];

        for frame in [&bad_version[..], &bad_category[..], &bad_community[..], truncated] {
            let err = codec
                .validate(frame, Command::Get, [0x00, 0x10])
                .unwrap_err();
            assert!(matches!(err, Error::InvalidResponse { .. }), "{err}");
        }
    }

    #[test]
    fn unknown_error_code_message() {
        assert_eq!(error_message(0x1234), "Unknown error");
        assert_eq!(error_message(0x0201), "Different community");
    }
}
