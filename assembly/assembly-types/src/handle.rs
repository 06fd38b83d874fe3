//! Detached part handles.
//!
//! A [`DetachedPartHandle`] is the token a caller receives when a part
//! leaves the assembly. It carries everything the host needs to spawn a
//! free-floating proxy (pose, physics flag, collision profile) and is the
//! only way to put the part back: reattach operations verify the handle
//! against the one recorded at detach time, which catches stale callers.

use crate::catalog::PartName;
use crate::pose::Pose;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a detach event.
///
/// A fresh id is issued on every detach, so a handle from an earlier
/// detach/reattach cycle of the same part will not validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandleId(pub u64);

impl HandleId {
    /// Create a handle id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for HandleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

/// Payload for the host-side detached proxy. Opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetachedPayload {
    /// Whether the proxy should simulate physics.
    pub simulate_physics: bool,
    /// Collision profile tag for the proxy.
    pub collision_profile: String,
}

/// Token representing one detached part.
///
/// Created by detach, consumed by reattach or free-attach. When a drag
/// ends without attaching, the handle is handed back to the caller inside
/// the release outcome, so no exit path leaves it dangling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetachedPartHandle {
    /// The detached part.
    pub part: PartName,
    /// Identity of this detach event.
    pub id: HandleId,
    /// World pose of the part at the moment of detach. Updated by the
    /// drag session as the proxy moves.
    pub pose: Pose,
    /// Proxy spawn payload taken from the part spec.
    pub payload: DetachedPayload,
    /// Registry clock value at detach time, for cooldown checks.
    pub detached_at: f64,
}

impl DetachedPartHandle {
    /// Seconds elapsed since detach, given the current registry clock.
    #[must_use]
    pub fn age(&self, now: f64) -> f64 {
        (now - self.detached_at).max(0.0)
    }
}
