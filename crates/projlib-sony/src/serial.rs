//! Sony serial control protocol (RS-232C, or a serial-to-Ethernet adapter).
//!
//! Every frame is eight bytes:
//!
//! ```text
//! A9 <item:2> <type> <data:2> <checksum> 9A
//! ```
//!
//! - `type`: `00` set, `01` get in requests; `02` item reply, `03` ACK/NAK
//!   in responses.
//! - `checksum`: bitwise OR of bytes 1 through 5.
//!
//! An ACK carries `00 00` as data; a NAK carries an error code instead,
//! see [`nak_message`].

use bytes::{BufMut, BytesMut};
use tracing::trace;

use projlib_core::error::{Error, Result};
use projlib_core::{Code, decode16};

use crate::codec::{Command, DecodeResult, FrameCodec};

pub const START_CODE: u8 = 0xA9;
pub const END_CODE: u8 = 0x9A;
pub const FRAME_LEN: usize = 8;

const TYPE_SET: u8 = 0x00;
const TYPE_GET: u8 = 0x01;
const TYPE_REPLY: u8 = 0x02;
const TYPE_ACK: u8 = 0x03;

/// Message for a NAK error code.
pub fn nak_message(code: u16) -> &'static str {
    match code {
        0x0101 => "Undefined control command",
        0x0104 => "Size error",
        0x0105 => "Select error",
        0x0106 => "Range over",
        0x010A => "Not applicable",
        0xF010 => "Checksum error",
        0xF020 => "Framing error",
        0xF030 => "Parity error",
        0xF040 => "Over run error",
        0xF050 => "Other comm error",
        _ => "Unknown error",
    }
}

/// Checksum over bytes 1..=5 of a frame.
pub fn checksum(frame: &[u8]) -> u8 {
    frame[1..6].iter().fold(0, |acc, b| acc | b)
}

/// Serial protocol framing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerialCodec;

fn invalid(reason: &str, frame: &[u8]) -> Error {
    Error::InvalidResponse {
        reason: reason.to_string(),
        bytes: frame.to_vec(),
    }
}

impl FrameCodec for SerialCodec {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn encode(&self, command: Command, item: Code, data: Code) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(FRAME_LEN);
        buf.put_u8(START_CODE);
        buf.put_slice(&item);
        buf.put_u8(match command {
            Command::Set => TYPE_SET,
            Command::Get => TYPE_GET,
        });
        buf.put_slice(&data);
        let sum = checksum(&buf);
        buf.put_u8(sum);
        buf.put_u8(END_CODE);
        buf.to_vec()
    }

    fn decode(&self, buf: &[u8]) -> DecodeResult {
        if buf.len() < FRAME_LEN {
            DecodeResult::Incomplete
        } else {
            DecodeResult::Complete(FRAME_LEN)
        }
    }

    fn validate<'a>(&self, frame: &'a [u8], command: Command, item: Code) -> Result<&'a [u8]> {
        trace!(frame = ?frame, "validating serial response");

        if frame.len() != FRAME_LEN {
            return Err(invalid("unexpected frame length", frame));
        }
        if frame[0] != START_CODE {
            return Err(invalid("unexpected start code", frame));
        }
        if frame[7] != END_CODE {
            return Err(invalid("unexpected end code", frame));
        }
        if frame[6] != checksum(frame) {
            return Err(invalid("invalid checksum", frame));
        }

        let data = &frame[4..6];
        match frame[3] {
            TYPE_ACK => {
                let code = decode16([data[0], data[1]]);
                if code != 0 {
                    return Err(Error::DeviceError {
                        code,
                        message: nak_message(code),
                    });
                }
                if command == Command::Get {
                    return Err(invalid("acknowledge without data for a get request", frame));
                }
                Ok(data)
            }
            TYPE_REPLY => {
                if frame[1..3] != item {
                    return Err(invalid("item does not match the request", frame));
                }
                Ok(data)
            }
            _ => Err(invalid("unexpected response type", frame)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(item: Code, data: Code) -> Vec<u8> {
        let mut frame = vec![START_CODE, item[0], item[1], TYPE_REPLY, data[0], data[1], 0, END_CODE];
        frame[6] = checksum(&frame);
        frame
    }

    fn ack(code: Code) -> Vec<u8> {
        let mut frame = vec![START_CODE, 0x00, 0x00, TYPE_ACK, code[0], code[1], 0, END_CODE];
        frame[6] = checksum(&frame);
        frame
    }

    #[test]
    fn encode_get_power_status() {
        let frame = SerialCodec.encode(Command::Get, [0x01, 0x02], [0x00, 0x00]);
        assert_eq!(frame, vec![0xA9, 0x01, 0x02, 0x01, 0x00, 0x00, 0x03, 0x9A]);
    }

    #[test]
    fn encode_set_aspect() {
        let frame = SerialCodec.encode(Command::Set, [0x00, 0x20], [0x00, 0x0E]);
        assert_eq!(frame, vec![0xA9, 0x00, 0x20, 0x00, 0x00, 0x0E, 0x2E, 0x9A]);
    }

    #[test]
    fn encode_ir_power_on() {
        let frame = SerialCodec.encode_ir([0x17, 0x2E]);
        assert_eq!(frame, vec![0xA9, 0x17, 0x2E, 0x00, 0x00, 0x00, 0x3F, 0x9A]);
    }

    #[test]
    fn decode_is_fixed_length() {
        let frame = reply([0x00, 0x10], [0x00, 0x32]);
        assert_eq!(SerialCodec.decode(&frame[..7]), DecodeResult::Incomplete);
        assert_eq!(SerialCodec.decode(&frame), DecodeResult::Complete(8));
    }

    #[test]
    fn validate_reply() {
        let frame = reply([0x00, 0x10], [0x00, 0x32]);
        let data = SerialCodec
            .validate(&frame, Command::Get, [0x00, 0x10])
            .unwrap();
        assert_eq!(data, &[0x00, 0x32]);
    }

    #[test]
    fn validate_reply_item_mismatch() {
        let frame = reply([0x00, 0x11], [0x00, 0x32]);
        let err = SerialCodec
            .validate(&frame, Command::Get, [0x00, 0x10])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponse { .. }));
    }

    #[test]
    fn ack_accepted_for_set_only() {
        let frame = ack([0x00, 0x00]);
        assert!(SerialCodec.validate(&frame, Command::Set, [0x00, 0x20]).is_ok());
        assert!(matches!(
            SerialCodec.validate(&frame, Command::Get, [0x00, 0x20]),
            Err(Error::InvalidResponse { .. })
        ));
    }

    #[test]
    fn nak_is_device_error() {
        let frame = ack([0x01, 0x06]);
        let err = SerialCodec
            .validate(&frame, Command::Set, [0x00, 0x10])
            .unwrap_err();
        match err {
            Error::DeviceError { code, message } => {
                assert_eq!(code, 0x0106);
                assert_eq!(message, "Range over");
            }
            other => panic!("expected DeviceError, got {other:?}"),
        }
    }

    #[test]
    fn framing_errors() {
        let good = reply([0x00, 0x10], [0x00, 0x32]);

        let mut bad_start = good.clone();
        bad_start[0] = 0x00;
        let mut bad_end = good.clone();
        bad_end[7] = 0x00;
        let mut bad_sum = good.clone();
        bad_sum[6] ^= 0xFF;
        let mut bad_type = good.clone();
        bad_type[3] = 0x05;
        bad_type[6] = checksum(&bad_type);

        for frame in [bad_start, bad_end, bad_sum, bad_type] {
            let err = SerialCodec
                .validate(&frame, Command::Get, [0x00, 0x10])
                .unwrap_err();
            assert!(matches!(err, Error::InvalidResponse { .. }), "{err}");
        }
    }
}
