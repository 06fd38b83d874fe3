//! Load-time part definitions.
//!
//! A [`PartCatalog`] is the immutable description of an assembly: which
//! parts exist, where each attaches on its parent, and the per-part
//! detach policy. The runtime builds its node table from a validated
//! catalog and never mutates it afterwards.

use std::collections::HashSet;

use tracing::warn;

use crate::error::AssemblyError;
use crate::pose::Pose;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique logical name of a part (e.g. `Torso`, `Upperarm_Left`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartName(String);

impl PartName {
    /// Create a part name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for PartName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for PartName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named attachment point on a part, with its parent-local offset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SocketSpec {
    /// Socket name (e.g. `S_Upperarm_L`).
    pub name: String,
    /// Offset from the owning part's origin.
    pub local_pose: Pose,
}

impl SocketSpec {
    /// Create a socket spec.
    #[must_use]
    pub fn new(name: impl Into<String>, local_pose: Pose) -> Self {
        Self {
            name: name.into(),
            local_pose,
        }
    }
}

/// Immutable definition of one part in the assembly.
///
/// Built with a fluent API:
///
/// ```
/// use assembly_types::{PartSpec, Pose};
/// use nalgebra::Point3;
///
/// let arm = PartSpec::new("Arm")
///     .with_parent("Torso")
///     .with_parent_socket("S1")
///     .with_relative_transform(Pose::from_position(Point3::new(0.0, 0.0, 5.0)));
/// assert!(arm.detachable);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartSpec {
    /// Unique name of this part.
    pub name: PartName,
    /// Parent part name. `None` attaches to the assembly root.
    pub parent: Option<PartName>,
    /// Optional socket on the parent to attach to.
    pub parent_socket: Option<String>,
    /// Additional local offset relative to the parent/socket.
    pub relative_transform: Pose,
    /// Whether this part may be detached at runtime.
    pub detachable: bool,
    /// Whether a detached proxy should simulate physics.
    pub simulate_physics_when_detached: bool,
    /// Collision profile tag for the detached proxy. Opaque to the core.
    pub detached_collision_profile: String,
    /// Whether this part responds to highlight changes. Cosmetic
    /// pass-through for the host; the core never reads it.
    pub affects_highlight: bool,
    /// Attachment points this part offers to other parts.
    pub sockets: Vec<SocketSpec>,
}

impl PartSpec {
    /// Create a root-attached, detachable part with default policy.
    #[must_use]
    pub fn new(name: impl Into<PartName>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            parent_socket: None,
            relative_transform: Pose::identity(),
            detachable: true,
            simulate_physics_when_detached: false,
            detached_collision_profile: "PhysicsActor".to_string(),
            affects_highlight: true,
            sockets: Vec::new(),
        }
    }

    /// Set the parent part.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<PartName>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the socket on the parent to attach to.
    #[must_use]
    pub fn with_parent_socket(mut self, socket: impl Into<String>) -> Self {
        self.parent_socket = Some(socket.into());
        self
    }

    /// Set the local offset relative to the parent/socket.
    #[must_use]
    pub fn with_relative_transform(mut self, transform: Pose) -> Self {
        self.relative_transform = transform;
        self
    }

    /// Set whether the part may be detached.
    #[must_use]
    pub fn with_detachable(mut self, detachable: bool) -> Self {
        self.detachable = detachable;
        self
    }

    /// Enable physics simulation on the detached proxy.
    #[must_use]
    pub fn with_physics_when_detached(mut self, simulate: bool) -> Self {
        self.simulate_physics_when_detached = simulate;
        self
    }

    /// Set the collision profile tag used while detached.
    #[must_use]
    pub fn with_collision_profile(mut self, profile: impl Into<String>) -> Self {
        self.detached_collision_profile = profile.into();
        self
    }

    /// Set whether the part participates in highlight operations.
    #[must_use]
    pub fn with_affects_highlight(mut self, affects: bool) -> Self {
        self.affects_highlight = affects;
        self
    }

    /// Add an attachment socket to this part.
    #[must_use]
    pub fn with_socket(mut self, name: impl Into<String>, local_pose: Pose) -> Self {
        self.sockets.push(SocketSpec::new(name, local_pose));
        self
    }

    /// Look up one of this part's sockets by name.
    #[must_use]
    pub fn socket(&self, name: &str) -> Option<&SocketSpec> {
        self.sockets.iter().find(|s| s.name == name)
    }
}

/// Ordered, immutable collection of part specs.
///
/// The order is the build order; parents should precede children but the
/// runtime tolerates forward references by falling back to root attachment
/// for parents it cannot resolve.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartCatalog {
    parts: Vec<PartSpec>,
}

impl PartCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from a list of part specs.
    #[must_use]
    pub fn from_parts(parts: Vec<PartSpec>) -> Self {
        Self { parts }
    }

    /// Add a part spec.
    pub fn push(&mut self, spec: PartSpec) {
        self.parts.push(spec);
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate over part specs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &PartSpec> {
        self.parts.iter()
    }

    /// Look up a part spec by name.
    #[must_use]
    pub fn get(&self, name: &PartName) -> Option<&PartSpec> {
        self.parts.iter().find(|p| &p.name == name)
    }

    /// Validate the catalog structure.
    ///
    /// Checks:
    /// - No duplicate part names (hard error)
    /// - No parent cycles, including self-parenting (hard error)
    /// - Parents that do not resolve to a known part produce a warning
    ///   only; the runtime attaches such parts to the root
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::DuplicatePart`] or
    /// [`AssemblyError::CatalogCycle`] on structural faults.
    pub fn validate(&self) -> crate::Result<()> {
        let mut seen: HashSet<&PartName> = HashSet::new();
        for spec in &self.parts {
            if !seen.insert(&spec.name) {
                return Err(AssemblyError::DuplicatePart {
                    name: spec.name.to_string(),
                });
            }
        }

        for spec in &self.parts {
            if let Some(parent) = &spec.parent {
                if self.get(parent).is_none() {
                    warn!(
                        part = %spec.name,
                        parent = %parent,
                        "unresolved parent, part will attach to root"
                    );
                }
            }
        }

        // Walk each parent chain; more hops than parts means a cycle.
        for spec in &self.parts {
            let mut hops = 0usize;
            let mut current = spec;
            while let Some(parent) = &current.parent {
                let Some(next) = self.get(parent) else {
                    break; // unresolved parent ends the chain at root
                };
                hops += 1;
                if hops > self.parts.len() {
                    return Err(AssemblyError::CatalogCycle {
                        name: spec.name.to_string(),
                    });
                }
                current = next;
            }
        }

        Ok(())
    }

    /// Names of all parts whose static policy allows detaching.
    #[must_use]
    pub fn detachable_parts(&self) -> Vec<PartName> {
        self.parts
            .iter()
            .filter(|p| p.detachable)
            .map(|p| p.name.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a PartCatalog {
    type Item = &'a PartSpec;
    type IntoIter = std::slice::Iter<'a, PartSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn torso_arm() -> PartCatalog {
        PartCatalog::from_parts(vec![
            PartSpec::new("Torso")
                .with_detachable(false)
                .with_socket("S1", Pose::from_position(Point3::new(0.0, 0.0, 40.0))),
            PartSpec::new("Arm")
                .with_parent("Torso")
                .with_parent_socket("S1"),
        ])
    }

    #[test]
    fn test_valid_catalog() {
        assert!(torso_arm().validate().is_ok());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let catalog = PartCatalog::from_parts(vec![
            PartSpec::new("Torso"),
            PartSpec::new("Torso"),
        ]);
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, AssemblyError::DuplicatePart { .. }));
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let catalog = PartCatalog::from_parts(vec![PartSpec::new("Torso").with_parent("Torso")]);
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, AssemblyError::CatalogCycle { .. }));
    }

    #[test]
    fn test_two_part_cycle_rejected() {
        let catalog = PartCatalog::from_parts(vec![
            PartSpec::new("A").with_parent("B"),
            PartSpec::new("B").with_parent("A"),
        ]);
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, AssemblyError::CatalogCycle { .. }));
    }

    #[test]
    fn test_unresolved_parent_is_lenient() {
        // Unknown parents fall back to root at build time, not an error.
        let catalog = PartCatalog::from_parts(vec![PartSpec::new("Arm").with_parent("Missing")]);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_socket_lookup() {
        let catalog = torso_arm();
        let torso = catalog.get(&PartName::from("Torso")).unwrap();
        assert!(torso.socket("S1").is_some());
        assert!(torso.socket("S2").is_none());
    }

    #[test]
    fn test_detachable_parts() {
        let parts = torso_arm().detachable_parts();
        assert_eq!(parts, vec![PartName::from("Arm")]);
    }
}
