//! Transport trait for projector communication.
//!
//! The [`Transport`] trait abstracts over the physical link to a projector.
//! Implementations exist for serial ports, TCP sockets (SDCP and
//! serial-over-IP adapters), and mock transports for testing.
//!
//! Unlike a link that is connected once for the lifetime of a driver,
//! projector sessions are short: the connector opens the transport at the
//! start of a command and closes it again at the end, unless the caller
//! holds an explicit session open. A transport is therefore constructed
//! closed and may be opened and closed any number of times.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to a projector.
///
/// Implementations handle buffering and error recovery at the physical
/// layer. Framing, checksums, and response validation are handled by the
/// protocol codecs that consume this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the underlying link.
    ///
    /// Calling `open()` on a transport that is already open is a no-op.
    async fn open(&mut self) -> Result<()>;

    /// Send raw bytes to the projector.
    ///
    /// Implementations should not return until all bytes have been written
    /// and flushed to the underlying link.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the projector into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Will wait up to `timeout`
    /// for data to arrive; returns [`Error::Timeout`](crate::error::Error::Timeout)
    /// if no data is received within the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the link.
    ///
    /// After calling `close()`, subsequent `send()` and `receive()` calls
    /// should return [`Error::NotConnected`](crate::error::Error::NotConnected)
    /// until the transport is opened again.
    async fn close(&mut self) -> Result<()>;

    /// Check whether the link is currently open.
    fn is_connected(&self) -> bool;
}
