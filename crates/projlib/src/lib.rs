//! # projlib -- Projector Control over SDCP and RS-232C
//!
//! `projlib` is an asynchronous Rust library for controlling Sony home
//! cinema projectors. It speaks SDCP over Ethernet and the eight-byte
//! serial protocol over RS-232C or a serial-to-Ethernet adapter, and knows
//! which picture settings and values each model supports.
//!
//! ## Quick Start
//!
//! ```no_run
//! use projlib::sony::{SonyProjectorBuilder, models::VW520};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let projector = SonyProjectorBuilder::new(VW520)
//!         .host("192.168.1.40")
//!         .build()
//!         .await?;
//!
//!     println!("power: {}", projector.power_status().await?);
//!     projector.set_aspect("Stretch").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! | Crate                | Purpose                                         |
//! |----------------------|-------------------------------------------------|
//! | `projlib-core`       | Errors, [`Transport`] trait, capability tables  |
//! | `projlib-transport`  | Serial and TCP transport implementations        |
//! | `projlib-sony`       | Sony SDCP and serial protocol connector         |
//! | **`projlib`**        | This facade crate -- re-exports everything      |
//!
//! ## Feature Flags
//!
//! | Feature     | Enables                              | Default |
//! |-------------|--------------------------------------|---------|
//! | `sony`      | [`sony`] module (SDCP and serial)    | yes     |
//! | `transport` | [`transport`] module                 | yes     |

pub use projlib_core::*;

/// Sony projector backend.
///
/// Provides [`SonyProjector`](sony::SonyProjector) and
/// [`SonyProjectorBuilder`](sony::SonyProjectorBuilder), the command
/// catalog, and the per-model capability rows.
#[cfg(feature = "sony")]
pub mod sony {
    pub use projlib_sony::*;
}

/// Serial and TCP transports.
#[cfg(feature = "transport")]
pub mod transport {
    pub use projlib_transport::*;
}

/// A supported projector model, as listed by [`supported_projectors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectorDefinition {
    pub manufacturer: &'static str,
    pub model_name: &'static str,
    /// Whether the model switches power with a data command rather than
    /// the IR power codes.
    pub has_power_command: bool,
}

/// Returns a flat list of all supported projector models across the enabled
/// backends.
///
/// # Example
///
/// ```
/// for projector in projlib::supported_projectors() {
///     println!("{} {}", projector.manufacturer, projector.model_name);
/// }
/// ```
pub fn supported_projectors() -> Vec<ProjectorDefinition> {
    #[allow(unused_mut)]
    let mut projectors = Vec::new();

    #[cfg(feature = "sony")]
    {
        projectors.extend(sony::models::ALL_MODELS.iter().map(|model| ProjectorDefinition {
            manufacturer: "Sony",
            model_name: model.name,
            has_power_command: model.power_command,
        }));
    }

    projectors
}

#[cfg(all(test, feature = "sony"))]
mod tests {
    use super::*;

    #[test]
    fn lists_sony_models() {
        let projectors = supported_projectors();
        assert_eq!(projectors.len(), sony::models::ALL_MODELS.len());
        let vw520 = projectors
            .iter()
            .find(|p| p.model_name == "VPL-VW520")
            .unwrap();
        assert!(vw520.has_power_command);
        assert!(projectors.iter().all(|p| p.manufacturer == "Sony"));
    }
}
