//! Wire conversion and formatting helpers.
//!
//! Every setting value travels as exactly two bytes. Numeric settings use a
//! big-endian unsigned 16-bit integer; table-backed settings use an opaque
//! two-byte code.

use std::fmt::Write;

use crate::error::{Error, Result};

/// A two-byte value as carried in a command or response frame.
pub type Code = [u8; 2];

/// Encode a 16-bit value as two big-endian bytes.
///
/// # Example
///
/// ```
/// use projlib_core::encode16;
///
/// assert_eq!(encode16(0x1234), [0x12, 0x34]);
/// assert_eq!(encode16(50), [0x00, 0x32]);
/// ```
pub const fn encode16(value: u16) -> Code {
    value.to_be_bytes()
}

/// Decode two big-endian bytes into a 16-bit value.
pub const fn decode16(code: Code) -> u16 {
    u16::from_be_bytes(code)
}

/// Encode a signed 16-bit value in two's complement.
///
/// Some older projectors express relative adjustments (-3..3) this way.
pub const fn encode_signed16(value: i16) -> Code {
    value.to_be_bytes()
}

/// Encode a caller-supplied integer, rejecting anything that does not fit
/// in an unsigned 16-bit field.
///
/// ```
/// use projlib_core::checked_encode16;
///
/// assert_eq!(checked_encode16(300).unwrap(), [0x01, 0x2C]);
/// assert!(checked_encode16(70_000).is_err());
/// assert!(checked_encode16(-1).is_err());
/// ```
pub fn checked_encode16(value: i64) -> Result<Code> {
    u16::try_from(value)
        .map(encode16)
        .map_err(|_| Error::InvalidParameter(format!("value {value} is outside 0..=65535")))
}

/// Format bytes as contiguous uppercase hex, e.g. `"A9001001"`.
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02X}");
        out
    })
}
