//! Error types for assembly operations.
//!
//! Failed detach, reattach and snap attempts are expected and frequent in
//! an interactive session, so every variant here is recoverable. Only
//! catalog structure faults (duplicates, cycles) indicate an integration
//! bug and are surfaced at load time.

use thiserror::Error;

/// Errors that can occur during assembly operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// Part name not present in the catalog.
    #[error("unknown part: {name}")]
    UnknownPart {
        /// Name that failed to resolve.
        name: String,
    },

    /// Detach refused by policy (catalog flag or runtime override).
    #[error("part is not detachable: {name}")]
    NotDetachable {
        /// The refused part.
        name: String,
    },

    /// Detach attempted on an already detached part.
    #[error("part is already detached: {name}")]
    AlreadyDetached {
        /// The offending part.
        name: String,
    },

    /// Reattach attempted on a part that is not detached.
    #[error("part is not detached: {name}")]
    NotDetached {
        /// The offending part.
        name: String,
    },

    /// Handle does not match the one recorded at detach time.
    #[error("stale or foreign handle for part: {name}")]
    HandleMismatch {
        /// The part the handle claims to represent.
        name: String,
    },

    /// Nearest-target search found no candidates.
    #[error("no attach target found")]
    NoAttachTarget,

    /// Two catalog entries share a name.
    #[error("duplicate part name in catalog: {name}")]
    DuplicatePart {
        /// The duplicated name.
        name: String,
    },

    /// Parent chain loops back on itself.
    #[error("parent cycle in catalog involving part: {name}")]
    CatalogCycle {
        /// A part on the cycle.
        name: String,
    },

    /// A drag session is already active.
    #[error("a part is already being dragged: {name}")]
    DragInProgress {
        /// The part currently held.
        name: String,
    },

    /// Drag operation requested with no active session.
    #[error("no active drag session")]
    NoActiveDrag,

    /// Invalid configuration value.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl AssemblyError {
    /// Create an unknown-part error.
    #[must_use]
    pub fn unknown_part(name: impl Into<String>) -> Self {
        Self::UnknownPart { name: name.into() }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Whether this error is a state precondition failure
    /// (already/not detached) rather than a policy or lookup failure.
    #[must_use]
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyDetached { .. } | Self::NotDetached { .. }
        )
    }

    /// Whether this error indicates a catalog structure fault.
    #[must_use]
    pub fn is_catalog_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicatePart { .. } | Self::CatalogCycle { .. }
        )
    }
}
