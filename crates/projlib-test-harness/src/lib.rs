//! projlib-test-harness: Test utilities and mock transports for projlib.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! protocol engines without a real projector, and [`MockTcpServer`] for
//! testing protocol engines that communicate over TCP.

pub mod mock_tcp;
pub mod mock_transport;

pub use mock_tcp::MockTcpServer;
pub use mock_transport::{MockEvent, MockTransport};
