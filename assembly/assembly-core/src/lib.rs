//! Detach/reattach runtime for part assemblies.
//!
//! This crate provides the runtime half of the assembly stack. It builds
//! on [`assembly_types`] for the data structures.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              DragSession / Sequencers                    │
//! │  Drag: grab, per-frame follow, attach attempt on release │
//! │  Scramble: randomized detach-and-redistribute            │
//! │  Showcase: timed ordered disassembly/reassembly          │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                   AssemblyRegistry                       │
//! │  Source of truth: topology, attachment state, overrides  │
//! │  Detach / reattach / free-attach, nearest-target search  │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Snap matcher                          │
//! │  Pure distance + angle predicate, caller-supplied         │
//! │  tolerances                                               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate is single-threaded and frame-driven: every mutation happens
//! synchronously inside whichever tick or input callback invoked it. Hosts
//! feed discrete press/release/wheel events to the drag session and call
//! the sequencer tick functions from their frame loop.
//!
//! # Quick Start
//!
//! ```
//! use assembly_core::AssemblyRegistry;
//! use assembly_types::{PartCatalog, PartSpec, Pose};
//! use nalgebra::Point3;
//!
//! let catalog = PartCatalog::from_parts(vec![
//!     PartSpec::new("Torso")
//!         .with_detachable(false)
//!         .with_socket("S1", Pose::from_position(Point3::new(0.0, 0.0, 40.0))),
//!     PartSpec::new("Arm").with_parent("Torso").with_parent_socket("S1"),
//! ]);
//!
//! let mut registry = AssemblyRegistry::new();
//! registry.build(catalog)?;
//!
//! let handle = registry.detach(&"Arm".into())?;
//! assert!(registry.is_detached(&"Arm".into()));
//!
//! registry.reattach(handle)?;
//! assert!(!registry.is_detached(&"Arm".into()));
//! # Ok::<(), assembly_types::AssemblyError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

mod drag;
mod registry;
mod scramble;
mod showcase;
pub mod snap;

pub use drag::{AttachOutcome, DragSession};
pub use registry::{AssemblyRegistry, AttachTarget};
pub use scramble::scramble;
pub use showcase::{ShowcasePhase, ShowcaseSequencer};
