//! Framing strategy shared by the SDCP and serial protocols.
//!
//! The connector is protocol-agnostic: it asks a [`FrameCodec`] to build a
//! request, feeds received bytes to [`FrameCodec::decode`] until a frame is
//! complete, and then hands the frame to [`FrameCodec::validate`] to extract
//! the payload.

use projlib_core::Code;
use projlib_core::error::Result;

/// Direction of a data exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Get,
    Set,
}

impl Command {
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Get => "get",
            Command::Set => "set",
        }
    }
}

/// Result of checking a receive buffer for a complete frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeResult {
    /// The first `len` bytes of the buffer form one frame.
    Complete(usize),
    /// More data is needed.
    Incomplete,
}

/// Builds request frames and validates response frames for one protocol.
pub trait FrameCodec: Send + Sync {
    /// Short protocol name for logs.
    fn name(&self) -> &'static str;

    /// Build a request frame.
    fn encode(&self, command: Command, item: Code, data: Code) -> Vec<u8>;

    /// Build an infrared emulation frame.
    ///
    /// IR frames use the SET layout with the IR code in the item position
    /// and a zero payload. The projector does not answer them.
    fn encode_ir(&self, ir_code: Code) -> Vec<u8> {
        self.encode(Command::Set, ir_code, [0x00, 0x00])
    }

    /// Check whether `buf` starts with a complete response frame.
    fn decode(&self, buf: &[u8]) -> DecodeResult;

    /// Validate a complete response to `command` on `item` and return its
    /// payload.
    ///
    /// Fails with [`InvalidResponse`](projlib_core::Error::InvalidResponse)
    /// for malformed or mismatched frames and with
    /// [`DeviceError`](projlib_core::Error::DeviceError) when the projector
    /// reports an error.
    fn validate<'a>(&self, frame: &'a [u8], command: Command, item: Code) -> Result<&'a [u8]>;
}
