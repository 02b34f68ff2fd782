//! Sony projector backend for projlib.
//!
//! This crate implements the two control protocols spoken by Sony home
//! cinema projectors. It provides:
//!
//! - **Codecs** ([`sdcp`], [`serial`]) -- build request frames, detect frame
//!   boundaries, and validate responses, behind the [`codec::FrameCodec`]
//!   trait.
//! - **Command catalog** ([`items`]) -- every data item and IR code, with its
//!   capability table where values are symbolic.
//! - **Capability data** ([`tables`], [`models`]) -- per-category value tables
//!   and the per-model availability rows.
//! - **Connector** ([`projector`]) -- serialized get/set exchanges, the IR
//!   path, power sequencing, and polling.
//! - **Builder** ([`builder`]) -- fluent construction of [`SonyProjector`]
//!   over SDCP, a serial port, or a serial-to-Ethernet adapter.
//!
//! # SDCP vs serial
//!
//! Both protocols address the same two-byte items with two-byte data, but:
//! - SDCP frames carry a version, category, and four-byte community, and
//!   answer with a length-prefixed payload of any size
//! - Serial frames are a fixed eight bytes with an OR checksum, and a SET is
//!   answered with an ACK/NAK frame instead of an item reply
//! - Only SDCP can report the model name
//!
//! # Example
//!
//! ```
//! use projlib_sony::codec::{Command, FrameCodec};
//! use projlib_sony::serial::SerialCodec;
//!
//! // Request the power status over the serial protocol
//! let frame = SerialCodec.encode(Command::Get, [0x01, 0x02], [0x00, 0x00]);
//! assert_eq!(frame, [0xA9, 0x01, 0x02, 0x01, 0x00, 0x00, 0x03, 0x9A]);
//! ```

pub mod builder;
pub mod codec;
pub mod items;
pub mod models;
pub mod projector;
pub mod sdcp;
pub mod serial;
pub mod state;
pub mod status;
pub mod tables;

// Re-export the primary types for ergonomic `use projlib_sony::*`.
pub use builder::{Protocol, SonyProjectorBuilder};
pub use items::Item;
pub use models::{Capabilities, ProjectorModel, Setting, SettingKind};
pub use projector::SonyProjector;
pub use state::{ProjectorState, SettingValue};
pub use status::{ErrorStatus, PowerStatus};
