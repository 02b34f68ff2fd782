//! Transport implementations for projlib.
//!
//! This crate provides concrete implementations of the
//! [`Transport`](projlib_core::Transport) trait from `projlib-core`:
//!
//! - [`SerialTransport`]: RS-232 control ports (directly or via USB adapter)
//! - [`TcpTransport`]: SDCP over Ethernet, and serial-to-Ethernet adapters
//!
//! Both transports are created closed and opened on demand, because the
//! projector connector scopes each connection to a single command session.

pub mod serial;
pub mod tcp;

pub use serial::{DataBits, FlowControl, Parity, SerialConfig, SerialTransport, StopBits};
pub use tcp::{DEFAULT_CONNECT_TIMEOUT, TcpTransport};
