//! projlib-core: Core traits, capability tables, and error definitions for
//! projlib.
//!
//! This crate defines the vendor-agnostic pieces that projector backends
//! build on. Applications can depend on these types without pulling in a
//! specific driver.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level communication channel
//! - [`CapabilityTable`] -- model-scoped name/code mapping for a setting
//! - [`Error`] / [`Result`] -- error handling

pub mod capability;
pub mod error;
pub mod helpers;
pub mod transport;

// Re-export key types at crate root for ergonomic `use projlib_core::*`.
pub use capability::{CapabilityTable, Variant};
pub use error::{Error, Result};
pub use helpers::{Code, checked_encode16, decode16, encode_signed16, encode16, hex};
pub use transport::Transport;
