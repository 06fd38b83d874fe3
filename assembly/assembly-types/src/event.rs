//! Observer surface for attachment state changes.
//!
//! Rendering, VFX and UI layers subscribe here instead of being called
//! directly by the core. All methods have no-op defaults so a collaborator
//! implements only what it cares about.

use crate::catalog::PartName;
use crate::handle::DetachedPartHandle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether a part is currently owned by the assembly or free-floating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttachmentState {
    /// Part is attached to its parent (or the assembly root).
    Attached,
    /// Part is detached and represented by a host-side proxy.
    Detached,
}

impl std::fmt::Display for AttachmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attached => f.write_str("attached"),
            Self::Detached => f.write_str("detached"),
        }
    }
}

/// Callbacks raised by the assembly registry on state transitions.
///
/// Implementations must not call back into the registry; events fire
/// synchronously inside the mutating operation.
pub trait AssemblyObserver {
    /// A part left the assembly. The handle describes the proxy the host
    /// should spawn.
    fn on_part_detached(&mut self, name: &PartName, handle: &DetachedPartHandle) {
        let _ = (name, handle);
    }

    /// A part returned to the assembly (origin snap or free attach).
    fn on_part_reattached(&mut self, name: &PartName) {
        let _ = name;
    }

    /// Any attachment state change, for collaborators that only need the
    /// coarse signal (highlight, status UI).
    fn on_part_state_changed(&mut self, name: &PartName, state: AttachmentState) {
        let _ = (name, state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    struct Recorder {
        log: Vec<String>,
    }

    impl AssemblyObserver for Recorder {
        fn on_part_state_changed(&mut self, name: &PartName, state: AttachmentState) {
            self.log.push(format!("{name}:{state}"));
        }
    }

    #[test]
    fn test_default_methods_are_noops() {
        struct Silent;
        impl AssemblyObserver for Silent {}
        let mut observer = Silent;
        observer.on_part_reattached(&PartName::from("Arm"));
    }

    #[test]
    fn test_state_display() {
        let mut recorder = Recorder { log: Vec::new() };
        recorder.on_part_state_changed(&PartName::from("Arm"), AttachmentState::Detached);
        assert_eq!(recorder.log, vec!["Arm:detached".to_string()]);
    }
}
