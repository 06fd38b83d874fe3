//! Core data types for part assembly state tracking.
//!
//! This crate provides the foundational types for a detachable part
//! assembly:
//!
//! - [`Pose`] - Position and orientation of parts and sockets
//! - [`PartSpec`] / [`PartCatalog`] - Load-time part definitions
//! - [`DetachedPartHandle`] - Token representing a free-floating part
//! - [`SnapTolerances`] / [`DragConfig`] / [`ShowcaseConfig`] - Tuning knobs
//! - [`AssemblyError`] - Error taxonomy for assembly operations
//! - [`AssemblyObserver`] - Event surface for rendering/VFX collaborators
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no attachment logic, no spatial
//! search, no timers. They are the common language between:
//!
//! - The assembly runtime (`assembly-core`)
//! - Host-engine glue (rendering, input, VFX)
//! - Tests and replay tooling
//!
//! The crate has no engine dependencies and can be used headless.
//!
//! # Example
//!
//! ```
//! use assembly_types::{PartCatalog, PartSpec, Pose};
//! use nalgebra::Point3;
//!
//! let catalog = PartCatalog::from_parts(vec![
//!     PartSpec::new("Torso").with_socket("S1", Pose::from_position(Point3::new(0.0, 0.0, 40.0))),
//!     PartSpec::new("Head").with_parent("Torso").with_parent_socket("S1"),
//! ]);
//!
//! assert!(catalog.validate().is_ok());
//! assert_eq!(catalog.len(), 2);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod event;
mod handle;
mod pose;

pub use catalog::{PartCatalog, PartName, PartSpec, SocketSpec};
pub use config::{DragConfig, ShowcaseConfig, SnapTolerances};
pub use error::AssemblyError;
pub use event::{AssemblyObserver, AttachmentState};
pub use handle::{DetachedPartHandle, DetachedPayload, HandleId};
pub use pose::Pose;

/// Result alias for assembly operations.
pub type Result<T> = std::result::Result<T, AssemblyError>;
