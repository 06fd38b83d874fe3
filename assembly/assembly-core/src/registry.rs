//! Assembly registry: topology and attachment state.
//!
//! The [`AssemblyRegistry`] is the source of truth for which parts exist,
//! how they chain to their parents, and whether each one is attached or
//! free-floating. Everything else in the crate (drag, scramble, showcase)
//! mutates state exclusively through it.

use hashbrown::HashMap;
use nalgebra::Point3;
use tracing::{debug, warn};

use assembly_types::{
    AssemblyError, AssemblyObserver, AttachmentState, DetachedPartHandle, DetachedPayload,
    HandleId, PartCatalog, PartName, Pose, Result,
};

/// Runtime record for one part.
#[derive(Debug)]
struct AssemblyNode {
    /// Parent resolved at build time; unknown names fall back to root.
    base_parent: Option<PartName>,
    state: AttachmentState,
    /// World pose while detached.
    detached_pose: Option<Pose>,
    /// Identity of the outstanding detach handle, if any.
    handle_id: Option<HandleId>,
    /// New reattach anchor recorded by a free attach. Outer `None` means
    /// no override; inner `None` means root.
    parent_override: Option<Option<PartName>>,
    socket_override: Option<Option<String>>,
    /// Runtime enable/disable of detachability; wins over the catalog.
    detach_enabled_override: Option<bool>,
}

/// Result of a nearest-target search.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachTarget {
    /// Part to attach under.
    pub parent: PartName,
    /// Socket on the parent, or `None` for its origin.
    pub socket: Option<String>,
    /// Straight-line distance from the query position.
    pub distance: f64,
}

/// Source of truth for part topology and attachment state.
///
/// Built once from a validated [`PartCatalog`]; nodes then flip between
/// attached and detached for the life of the session. All expected
/// interaction failures come back as [`AssemblyError`] values, never
/// panics.
#[derive(Default)]
pub struct AssemblyRegistry {
    catalog: PartCatalog,
    nodes: HashMap<PartName, AssemblyNode>,
    /// Catalog order, for deterministic iteration.
    order: Vec<PartName>,
    observers: Vec<Box<dyn AssemblyObserver>>,
    /// Frame clock advanced by the host, used for detach timestamps.
    clock: f64,
    next_handle: u64,
}

impl std::fmt::Debug for AssemblyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssemblyRegistry")
            .field("parts", &self.order.len())
            .field("observers", &self.observers.len())
            .field("clock", &self.clock)
            .finish()
    }
}

impl AssemblyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the node table from a catalog, replacing any previous state.
    ///
    /// Parents that do not resolve to a catalog entry attach to the root
    /// with a warning; this leniency is intended behavior, not an error.
    ///
    /// # Errors
    ///
    /// Returns a catalog validation error (duplicate name or parent
    /// cycle). The registry is left empty in that case.
    pub fn build(&mut self, catalog: PartCatalog) -> Result<()> {
        self.nodes.clear();
        self.order.clear();
        self.catalog = PartCatalog::new();

        catalog.validate()?;

        for spec in &catalog {
            let base_parent = match &spec.parent {
                Some(parent) if catalog.get(parent).is_some() => Some(parent.clone()),
                Some(parent) => {
                    warn!(part = %spec.name, parent = %parent, "unresolved parent, attaching to root");
                    None
                }
                None => None,
            };
            self.nodes.insert(
                spec.name.clone(),
                AssemblyNode {
                    base_parent,
                    state: AttachmentState::Attached,
                    detached_pose: None,
                    handle_id: None,
                    parent_override: None,
                    socket_override: None,
                    detach_enabled_override: None,
                },
            );
            self.order.push(spec.name.clone());
        }
        self.catalog = catalog;
        debug!(parts = self.order.len(), "assembly built");
        Ok(())
    }

    /// Register an observer for attachment state changes.
    pub fn add_observer(&mut self, observer: Box<dyn AssemblyObserver>) {
        self.observers.push(observer);
    }

    /// Advance the registry clock. Call once per frame.
    pub fn advance_time(&mut self, dt: f64) {
        self.clock += dt.max(0.0);
    }

    /// Current registry clock in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.clock
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry holds no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Part names in catalog order.
    #[must_use]
    pub fn part_names(&self) -> &[PartName] {
        &self.order
    }

    /// Whether the part exists.
    #[must_use]
    pub fn contains(&self, name: &PartName) -> bool {
        self.nodes.contains_key(name)
    }

    /// Whether the part is currently detached. Unknown names are reported
    /// as not detached.
    #[must_use]
    pub fn is_detached(&self, name: &PartName) -> bool {
        self.nodes
            .get(name)
            .is_some_and(|n| n.state == AttachmentState::Detached)
    }

    /// Whether the part may be detached right now. A runtime override
    /// wins over the catalog flag; unknown names are not detachable.
    #[must_use]
    pub fn is_detachable(&self, name: &PartName) -> bool {
        let Some(node) = self.nodes.get(name) else {
            return false;
        };
        if let Some(enabled) = node.detach_enabled_override {
            return enabled;
        }
        self.catalog.get(name).is_some_and(|s| s.detachable)
    }

    /// Override detachability for one part.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::UnknownPart`] for unknown names.
    pub fn set_detach_enabled(&mut self, name: &PartName, enabled: bool) -> Result<()> {
        let node = self
            .nodes
            .get_mut(name)
            .ok_or_else(|| AssemblyError::unknown_part(name.as_str()))?;
        node.detach_enabled_override = Some(enabled);
        Ok(())
    }

    /// Override detachability for every part.
    pub fn set_detach_enabled_all(&mut self, enabled: bool) {
        for node in self.nodes.values_mut() {
            node.detach_enabled_override = Some(enabled);
        }
    }

    /// Drop all runtime detach overrides, restoring catalog policy.
    pub fn clear_detach_overrides(&mut self) {
        for node in self.nodes.values_mut() {
            node.detach_enabled_override = None;
        }
    }

    /// Parts whose current policy allows detaching, in catalog order.
    #[must_use]
    pub fn detachable_parts(&self) -> Vec<PartName> {
        self.order
            .iter()
            .filter(|name| self.is_detachable(name))
            .cloned()
            .collect()
    }

    /// Currently detached parts, in catalog order.
    #[must_use]
    pub fn detached_parts(&self) -> Vec<PartName> {
        self.order
            .iter()
            .filter(|name| self.is_detached(name))
            .cloned()
            .collect()
    }

    /// Currently attached parts, in catalog order. Any of these can serve
    /// as a free-attach target (with any of its sockets, or none).
    #[must_use]
    pub fn all_attach_targets(&self) -> Vec<PartName> {
        self.order
            .iter()
            .filter(|name| !self.is_detached(name))
            .cloned()
            .collect()
    }

    /// Current reattach anchor for a part: parent (root as `None`) and
    /// socket, override-aware. `None` for unknown parts.
    #[must_use]
    pub fn attach_parent_and_socket(
        &self,
        name: &PartName,
    ) -> Option<(Option<PartName>, Option<String>)> {
        self.nodes.get(name)?;
        Some(self.resolved_target(name))
    }

    /// World pose of a part. Detached parts report their stored proxy
    /// pose; attached parts resolve through the parent chain.
    #[must_use]
    pub fn part_world_pose(&self, name: &PartName) -> Option<Pose> {
        self.nodes.get(name)?;
        Some(self.world_pose_inner(name, 0))
    }

    /// World location of a part, for VFX spawn points and the like.
    #[must_use]
    pub fn part_world_location(&self, name: &PartName) -> Option<Point3<f64>> {
        self.part_world_pose(name).map(|p| p.position)
    }

    /// World pose of an attachment anchor: a parent's socket, the parent
    /// origin when no socket is given, or the assembly root.
    ///
    /// Unknown parents and unknown socket names degrade leniently (root
    /// and parent origin respectively), with a warning.
    #[must_use]
    pub fn socket_world_pose(&self, parent: Option<&PartName>, socket: Option<&str>) -> Pose {
        self.socket_world_pose_inner(parent, socket, 0)
    }

    /// Detach a part.
    ///
    /// On success the node is marked detached and the returned handle
    /// carries the part's last world pose plus the proxy payload from its
    /// spec. The caller owns the host-side proxy.
    ///
    /// # Errors
    ///
    /// [`AssemblyError::UnknownPart`], [`AssemblyError::NotDetachable`] or
    /// [`AssemblyError::AlreadyDetached`].
    pub fn detach(&mut self, name: &PartName) -> Result<DetachedPartHandle> {
        if !self.contains(name) {
            return Err(AssemblyError::unknown_part(name.as_str()));
        }
        if !self.is_detachable(name) {
            return Err(AssemblyError::NotDetachable {
                name: name.to_string(),
            });
        }
        if self.is_detached(name) {
            return Err(AssemblyError::AlreadyDetached {
                name: name.to_string(),
            });
        }

        let pose = self.world_pose_inner(name, 0);
        let payload = match self.catalog.get(name) {
            Some(spec) => DetachedPayload {
                simulate_physics: spec.simulate_physics_when_detached,
                collision_profile: spec.detached_collision_profile.clone(),
            },
            None => DetachedPayload {
                simulate_physics: false,
                collision_profile: String::new(),
            },
        };

        self.next_handle += 1;
        let handle = DetachedPartHandle {
            part: name.clone(),
            id: HandleId::new(self.next_handle),
            pose,
            payload,
            detached_at: self.clock,
        };

        if let Some(node) = self.nodes.get_mut(name) {
            node.state = AttachmentState::Detached;
            node.detached_pose = Some(pose);
            node.handle_id = Some(handle.id);
        }
        debug!(part = %name, handle = %handle.id, "part detached");

        for observer in &mut self.observers {
            observer.on_part_detached(name, &handle);
            observer.on_part_state_changed(name, AttachmentState::Detached);
        }
        Ok(handle)
    }

    /// Reattach a detached part to its current anchor (original socket,
    /// or the free-attach target recorded by an earlier [`Self::attach_to`]).
    ///
    /// A corrupt anchor pointing a part at itself is redirected to the
    /// root rather than rejected, to keep the session running.
    ///
    /// # Errors
    ///
    /// [`AssemblyError::UnknownPart`], [`AssemblyError::NotDetached`] or
    /// [`AssemblyError::HandleMismatch`].
    pub fn reattach(&mut self, handle: DetachedPartHandle) -> Result<()> {
        let name = handle.part.clone();
        self.check_reattach_preconditions(&name, &handle)?;

        let (parent, _) = self.resolved_target(&name);
        if parent.as_ref() == Some(&name) {
            warn!(part = %name, "self-attach redirected to root");
            if let Some(node) = self.nodes.get_mut(&name) {
                node.parent_override = Some(None);
            }
        }
        self.mark_attached(&name);
        Ok(())
    }

    /// Attach a detached part to an arbitrary target. The new parent and
    /// socket become the part's reattach anchor from now on.
    ///
    /// Self-attach and unknown parents redirect to the root with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`Self::reattach`].
    pub fn attach_to(
        &mut self,
        handle: DetachedPartHandle,
        new_parent: Option<PartName>,
        new_socket: Option<String>,
    ) -> Result<()> {
        let name = handle.part.clone();
        self.check_reattach_preconditions(&name, &handle)?;

        let mut parent = new_parent;
        if parent.as_ref() == Some(&name) {
            warn!(part = %name, "self-attach redirected to root");
            parent = None;
        }
        if let Some(p) = &parent {
            if !self.contains(p) {
                warn!(part = %name, parent = %p, "unknown attach parent, attaching to root");
                parent = None;
            }
        }

        if let Some(node) = self.nodes.get_mut(&name) {
            node.parent_override = Some(parent);
            node.socket_override = Some(new_socket);
        }
        self.mark_attached(&name);
        Ok(())
    }

    /// Update the stored world pose of a detached part (drag follow).
    ///
    /// # Errors
    ///
    /// [`AssemblyError::UnknownPart`] or [`AssemblyError::NotDetached`].
    pub fn set_detached_pose(&mut self, name: &PartName, pose: Pose) -> Result<()> {
        let node = self
            .nodes
            .get_mut(name)
            .ok_or_else(|| AssemblyError::unknown_part(name.as_str()))?;
        if node.state != AttachmentState::Detached {
            return Err(AssemblyError::NotDetached {
                name: name.to_string(),
            });
        }
        node.detached_pose = Some(pose);
        Ok(())
    }

    /// Find the attached part or socket closest to a world position.
    ///
    /// Scans every attached node's own position and all of its sockets
    /// and returns the global minimum. Linear in parts times sockets,
    /// which is fine at interactive-demo scale (tens of parts); a spatial
    /// index would be needed well beyond that.
    #[must_use]
    pub fn find_nearest_attach_target(
        &self,
        from: &Point3<f64>,
        exclude: Option<&PartName>,
    ) -> Option<AttachTarget> {
        let mut best: Option<AttachTarget> = None;

        for name in &self.order {
            if Some(name) == exclude || self.is_detached(name) {
                continue;
            }
            let pose = self.world_pose_inner(name, 0);

            let mut consider = |socket: Option<String>, position: Point3<f64>| {
                let distance = (position - from).norm();
                if best.as_ref().map_or(true, |b| distance < b.distance) {
                    best = Some(AttachTarget {
                        parent: name.clone(),
                        socket,
                        distance,
                    });
                }
            };

            consider(None, pose.position);
            if let Some(spec) = self.catalog.get(name) {
                for socket in &spec.sockets {
                    let world = pose.compose(&socket.local_pose);
                    consider(Some(socket.name.clone()), world.position);
                }
            }
        }
        best
    }

    /// Detach every listed part that the current policy allows, returning
    /// the handles in the order they detached.
    pub fn detach_parts(&mut self, names: &[PartName]) -> Vec<DetachedPartHandle> {
        let mut handles = Vec::new();
        for name in names {
            match self.detach(name) {
                Ok(handle) => handles.push(handle),
                Err(err) => debug!(part = %name, %err, "batch detach skipped"),
            }
        }
        handles
    }

    /// Reattach every detached part to its current anchor, without
    /// requiring the outstanding handles. Any handles still held by the
    /// caller become stale. Returns the number of parts reattached.
    pub fn reattach_all_detached(&mut self) -> usize {
        let detached = self.detached_parts();
        for name in &detached {
            let (parent, _) = self.resolved_target(name);
            if parent.as_ref() == Some(name) {
                warn!(part = %name, "self-attach redirected to root");
                if let Some(node) = self.nodes.get_mut(name) {
                    node.parent_override = Some(None);
                }
            }
            self.mark_attached(name);
        }
        detached.len()
    }

    fn check_reattach_preconditions(
        &self,
        name: &PartName,
        handle: &DetachedPartHandle,
    ) -> Result<()> {
        let node = self
            .nodes
            .get(name)
            .ok_or_else(|| AssemblyError::unknown_part(name.as_str()))?;
        if node.state != AttachmentState::Detached {
            return Err(AssemblyError::NotDetached {
                name: name.to_string(),
            });
        }
        if node.handle_id != Some(handle.id) {
            return Err(AssemblyError::HandleMismatch {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Flip a node back to attached and notify observers.
    fn mark_attached(&mut self, name: &PartName) {
        if let Some(node) = self.nodes.get_mut(name) {
            node.state = AttachmentState::Attached;
            node.detached_pose = None;
            node.handle_id = None;
        }
        debug!(part = %name, "part reattached");
        for observer in &mut self.observers {
            observer.on_part_reattached(name);
            observer.on_part_state_changed(name, AttachmentState::Attached);
        }
    }

    /// Current anchor for a part, override-aware.
    fn resolved_target(&self, name: &PartName) -> (Option<PartName>, Option<String>) {
        let Some(node) = self.nodes.get(name) else {
            return (None, None);
        };
        let parent = match &node.parent_override {
            Some(overridden) => overridden.clone(),
            None => node.base_parent.clone(),
        };
        let socket = match &node.socket_override {
            Some(overridden) => overridden.clone(),
            None => self.catalog.get(name).and_then(|s| s.parent_socket.clone()),
        };
        (parent, socket)
    }

    fn world_pose_inner(&self, name: &PartName, depth: usize) -> Pose {
        if depth > self.order.len() {
            // Catalog cycles are rejected at build time, but free-attach
            // overrides can legally chain parts into a loop. Resolution
            // bottoms out at the root instead of recursing forever.
            warn!(part = %name, "parent chain loops, treating as root");
            return Pose::identity();
        }
        let Some(node) = self.nodes.get(name) else {
            return Pose::identity();
        };
        if let Some(pose) = node.detached_pose {
            return pose;
        }
        let (parent, socket) = self.resolved_target(name);
        let anchor = self.socket_world_pose_inner(parent.as_ref(), socket.as_deref(), depth);
        match self.catalog.get(name) {
            Some(spec) => anchor.compose(&spec.relative_transform),
            None => anchor,
        }
    }

    fn socket_world_pose_inner(
        &self,
        parent: Option<&PartName>,
        socket: Option<&str>,
        depth: usize,
    ) -> Pose {
        let Some(parent) = parent else {
            return Pose::identity();
        };
        if !self.contains(parent) {
            warn!(parent = %parent, "unknown anchor parent, using root");
            return Pose::identity();
        }
        let base = self.world_pose_inner(parent, depth + 1);
        let Some(socket) = socket else {
            return base;
        };
        match self.catalog.get(parent).and_then(|s| s.socket(socket)) {
            Some(spec) => base.compose(&spec.local_pose),
            None => {
                warn!(parent = %parent, socket, "unknown socket, using parent origin");
                base
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use assembly_types::PartSpec;

    fn robot() -> AssemblyRegistry {
        let catalog = PartCatalog::from_parts(vec![
            PartSpec::new("Torso")
                .with_detachable(false)
                .with_socket("S1", Pose::from_position(Point3::new(0.0, 0.0, 40.0)))
                .with_socket("S2", Pose::from_position(Point3::new(0.0, 0.0, -40.0))),
            PartSpec::new("Arm").with_parent("Torso").with_parent_socket("S1"),
            PartSpec::new("Leg").with_parent("Torso").with_parent_socket("S2"),
        ]);
        let mut registry = AssemblyRegistry::new();
        registry.build(catalog).unwrap();
        registry
    }

    #[test]
    fn test_build_and_queries() {
        let registry = robot();
        assert_eq!(registry.len(), 3);
        assert!(registry.is_detachable(&"Arm".into()));
        assert!(!registry.is_detachable(&"Torso".into()));
        assert!(!registry.is_detachable(&"Nope".into()));
        assert!(!registry.is_detached(&"Arm".into()));
    }

    #[test]
    fn test_world_pose_through_socket() {
        let registry = robot();
        let pose = registry.part_world_pose(&"Arm".into()).unwrap();
        assert_relative_eq!(pose.position.z, 40.0);
    }

    #[test]
    fn test_detach_reattach_roundtrip() {
        let mut registry = robot();
        let name = PartName::from("Arm");
        let before = registry.attach_parent_and_socket(&name).unwrap();

        let handle = registry.detach(&name).unwrap();
        assert!(registry.is_detached(&name));
        assert_relative_eq!(handle.pose.position.z, 40.0);

        registry.reattach(handle).unwrap();
        assert!(!registry.is_detached(&name));
        assert_eq!(registry.attach_parent_and_socket(&name).unwrap(), before);
    }

    #[test]
    fn test_detach_refusals() {
        let mut registry = robot();
        assert!(matches!(
            registry.detach(&"Torso".into()),
            Err(AssemblyError::NotDetachable { .. })
        ));
        assert!(matches!(
            registry.detach(&"Nope".into()),
            Err(AssemblyError::UnknownPart { .. })
        ));

        let _handle = registry.detach(&"Arm".into()).unwrap();
        assert!(matches!(
            registry.detach(&"Arm".into()),
            Err(AssemblyError::AlreadyDetached { .. })
        ));
    }

    #[test]
    fn test_detach_override_beats_catalog() {
        let mut registry = robot();
        registry.set_detach_enabled(&"Torso".into(), true).unwrap();
        assert!(registry.is_detachable(&"Torso".into()));
        registry.set_detach_enabled_all(false);
        assert!(!registry.is_detachable(&"Arm".into()));
        registry.clear_detach_overrides();
        assert!(registry.is_detachable(&"Arm".into()));
        assert!(!registry.is_detachable(&"Torso".into()));
    }

    #[test]
    fn test_stale_handle_rejected() {
        let mut registry = robot();
        let name = PartName::from("Arm");
        let stale = registry.detach(&name).unwrap();
        registry.reattach(stale.clone()).unwrap();

        let _fresh = registry.detach(&name).unwrap();
        assert!(matches!(
            registry.reattach(stale),
            Err(AssemblyError::HandleMismatch { .. })
        ));
    }

    #[test]
    fn test_free_attach_records_new_anchor() {
        let mut registry = robot();
        let name = PartName::from("Arm");
        let handle = registry.detach(&name).unwrap();
        registry
            .attach_to(handle, Some("Leg".into()), None)
            .unwrap();

        let (parent, socket) = registry.attach_parent_and_socket(&name).unwrap();
        assert_eq!(parent, Some(PartName::from("Leg")));
        assert_eq!(socket, None);

        // The new anchor persists across the next detach cycle.
        let handle = registry.detach(&name).unwrap();
        registry.reattach(handle).unwrap();
        let (parent, _) = registry.attach_parent_and_socket(&name).unwrap();
        assert_eq!(parent, Some(PartName::from("Leg")));
    }

    #[test]
    fn test_self_attach_redirected_to_root() {
        let mut registry = robot();
        let name = PartName::from("Arm");
        let handle = registry.detach(&name).unwrap();
        registry
            .attach_to(handle, Some(name.clone()), None)
            .unwrap();
        let (parent, _) = registry.attach_parent_and_socket(&name).unwrap();
        assert_eq!(parent, None);
    }

    #[test]
    fn test_unknown_attach_parent_falls_back_to_root() {
        let mut registry = robot();
        let name = PartName::from("Arm");
        let handle = registry.detach(&name).unwrap();
        registry
            .attach_to(handle, Some("Ghost".into()), Some("S9".to_string()))
            .unwrap();
        let (parent, _) = registry.attach_parent_and_socket(&name).unwrap();
        assert_eq!(parent, None);
    }

    #[test]
    fn test_nearest_target_excludes_self() {
        let mut registry = robot();
        let name = PartName::from("Arm");
        let handle = registry.detach(&name).unwrap();
        let from = handle.pose.position;

        let target = registry
            .find_nearest_attach_target(&from, Some(&name))
            .unwrap();
        assert_ne!(target.parent, name);
        // Exactly at Torso's S1 socket.
        assert_eq!(target.parent, PartName::from("Torso"));
        assert_eq!(target.socket.as_deref(), Some("S1"));
        assert_relative_eq!(target.distance, 0.0);
    }

    #[test]
    fn test_nearest_target_empty_when_all_excluded() {
        let mut registry = AssemblyRegistry::new();
        registry
            .build(PartCatalog::from_parts(vec![PartSpec::new("Solo")]))
            .unwrap();
        let handle = registry.detach(&"Solo".into()).unwrap();
        let target =
            registry.find_nearest_attach_target(&handle.pose.position, Some(&"Solo".into()));
        assert!(target.is_none());
    }

    #[test]
    fn test_batch_detach_and_reattach_all() {
        let mut registry = robot();
        let handles =
            registry.detach_parts(&["Torso".into(), "Arm".into(), "Leg".into()]);
        // Torso is not detachable, the other two go.
        assert_eq!(handles.len(), 2);
        assert_eq!(registry.detached_parts().len(), 2);

        assert_eq!(registry.reattach_all_detached(), 2);
        assert!(registry.detached_parts().is_empty());
    }

    #[test]
    fn test_detach_timestamp_uses_clock() {
        let mut registry = robot();
        registry.advance_time(1.5);
        let handle = registry.detach(&"Arm".into()).unwrap();
        assert_eq!(handle.detached_at, 1.5);
        assert_eq!(handle.age(2.0), 0.5);
    }

    #[test]
    fn test_observer_notified() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Recorder(Rc<RefCell<Vec<String>>>);
        impl AssemblyObserver for Recorder {
            fn on_part_detached(&mut self, name: &PartName, _handle: &DetachedPartHandle) {
                self.0.borrow_mut().push(format!("detach:{name}"));
            }
            fn on_part_reattached(&mut self, name: &PartName) {
                self.0.borrow_mut().push(format!("reattach:{name}"));
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = robot();
        registry.add_observer(Box::new(Recorder(Rc::clone(&log))));

        let handle = registry.detach(&"Arm".into()).unwrap();
        registry.reattach(handle).unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["detach:Arm".to_string(), "reattach:Arm".to_string()]
        );
    }
}
