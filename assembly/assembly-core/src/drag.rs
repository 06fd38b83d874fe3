//! Drag sessions: one part held and moved at a time.
//!
//! The session owns the detach handle while the part is in flight and
//! mirrors the host proxy's pose. Per-frame motion is display-only; the
//! registry is touched only when the drag ends and an attach is attempted.

use tracing::debug;

use assembly_types::{
    AssemblyError, DetachedPartHandle, DragConfig, PartName, Pose, Result,
};

use crate::registry::AssemblyRegistry;
use crate::snap::can_snap;

/// How a drag ended.
#[derive(Debug)]
pub enum AttachOutcome {
    /// Part snapped back onto its reattach anchor.
    SnappedBack,
    /// Part attached to the nearest free target instead.
    FreeAttached {
        /// The new parent part.
        parent: PartName,
        /// Socket on the new parent, or `None` for its origin.
        socket: Option<String>,
    },
    /// Neither attach succeeded; the part stays detached at its dragged
    /// pose and the handle goes back to the caller.
    Released {
        /// The still-live detach handle.
        handle: DetachedPartHandle,
    },
}

/// State for the single in-flight drag.
#[derive(Debug)]
struct ActiveDrag {
    part: PartName,
    handle: DetachedPartHandle,
    grab_distance: f64,
    proxy_pose: Pose,
}

/// Tracks at most one part being manipulated.
///
/// `Idle -> Dragging -> {SnappedBack, FreeAttached, Released} -> Idle`.
#[derive(Debug)]
pub struct DragSession {
    config: DragConfig,
    active: Option<ActiveDrag>,
}

impl DragSession {
    /// Create an idle session with the given tuning.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Whether a part is currently held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Name of the held part, if any.
    #[must_use]
    pub fn dragged_part(&self) -> Option<&PartName> {
        self.active.as_ref().map(|d| &d.part)
    }

    /// Current proxy pose of the held part, for the host to render.
    #[must_use]
    pub fn proxy_pose(&self) -> Option<Pose> {
        self.active.as_ref().map(|d| d.proxy_pose)
    }

    /// Current grab distance, if dragging.
    #[must_use]
    pub fn grab_distance(&self) -> Option<f64> {
        self.active.as_ref().map(|d| d.grab_distance)
    }

    /// The drag tuning this session was created with.
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Begin dragging a detached part.
    ///
    /// The grab distance starts at the viewer-to-part distance, clamped
    /// into the configured range.
    ///
    /// # Errors
    ///
    /// [`AssemblyError::DragInProgress`] when a part is already held
    /// (one drag at a time).
    pub fn begin(&mut self, handle: DetachedPartHandle, viewer: &Pose) -> Result<()> {
        if let Some(active) = &self.active {
            return Err(AssemblyError::DragInProgress {
                name: active.part.to_string(),
            });
        }
        let distance = (handle.pose.position - viewer.position).norm();
        let grab_distance = distance.clamp(
            self.config.min_grab_distance,
            self.config.max_grab_distance,
        );
        debug!(part = %handle.part, grab_distance, "drag started");
        self.active = Some(ActiveDrag {
            part: handle.part.clone(),
            proxy_pose: handle.pose,
            handle,
            grab_distance,
        });
        Ok(())
    }

    /// Per-frame update. Moves the proxy toward the point `grab_distance`
    /// units along the viewer's forward ray, with frame-rate-independent
    /// exponential smoothing. Does not mutate registry state.
    pub fn tick(&mut self, viewer: &Pose, dt: f64) {
        let rate = self.config.smoothing_rate;
        let Some(active) = &mut self.active else {
            return;
        };
        let desired = viewer.position + viewer.forward() * active.grab_distance;
        let alpha = 1.0 - (-rate * dt.max(0.0)).exp();
        active.proxy_pose.position = Pose::from_position(active.proxy_pose.position)
            .lerp(&Pose::from_position(desired), alpha)
            .position;
    }

    /// Nudge the grab distance (mouse wheel), clamped into range.
    pub fn adjust_grab_distance(&mut self, delta: f64) {
        let (min, max) = (
            self.config.min_grab_distance,
            self.config.max_grab_distance,
        );
        if let Some(active) = &mut self.active {
            active.grab_distance = (active.grab_distance + delta).clamp(min, max);
        }
    }

    /// End the drag with an attach attempt.
    ///
    /// Tries the part's current anchor first with the tight snap
    /// tolerances; on failure, and when free attach is allowed, the
    /// nearest attached target within `free_attach_max_distance` is used
    /// instead. Otherwise the part stays detached where it was dropped.
    /// The session is idle afterwards in every case.
    ///
    /// # Errors
    ///
    /// [`AssemblyError::NoActiveDrag`] when nothing is held.
    pub fn end_attempt(&mut self, registry: &mut AssemblyRegistry) -> Result<AttachOutcome> {
        let Some(mut active) = self.active.take() else {
            return Err(AssemblyError::NoActiveDrag);
        };

        // Leave the registry's idea of the part where the drag put it.
        active.handle.pose = active.proxy_pose;
        registry.set_detached_pose(&active.part, active.proxy_pose)?;

        let anchor = registry
            .attach_parent_and_socket(&active.part)
            .unwrap_or((None, None));
        let target = registry.socket_world_pose(anchor.0.as_ref(), anchor.1.as_deref());

        if can_snap(&active.proxy_pose, &target, &self.config.snap) {
            registry.reattach(active.handle)?;
            debug!(part = %active.part, "drag ended: snapped back");
            return Ok(AttachOutcome::SnappedBack);
        }

        if self.config.allow_free_attach {
            if let Some(found) = registry
                .find_nearest_attach_target(&active.proxy_pose.position, Some(&active.part))
            {
                if found.distance <= self.config.free_attach_max_distance {
                    registry.attach_to(
                        active.handle,
                        Some(found.parent.clone()),
                        found.socket.clone(),
                    )?;
                    debug!(part = %active.part, parent = %found.parent, "drag ended: free attached");
                    return Ok(AttachOutcome::FreeAttached {
                        parent: found.parent,
                        socket: found.socket,
                    });
                }
            }
        }

        debug!(part = %active.part, "drag ended: released in place");
        Ok(AttachOutcome::Released {
            handle: active.handle,
        })
    }

    /// Drop the held part immediately, optionally with a final attach
    /// attempt. Safe to call from any state; returns `None` when idle.
    pub fn force_drop(
        &mut self,
        registry: &mut AssemblyRegistry,
        try_snap: bool,
    ) -> Option<Result<AttachOutcome>> {
        self.active.as_ref()?;
        if try_snap {
            return Some(self.end_attempt(registry));
        }
        // Plain cancel: part stays detached at its dragged pose.
        let mut active = self.active.take()?;
        active.handle.pose = active.proxy_pose;
        if let Err(err) = registry.set_detached_pose(&active.part, active.proxy_pose) {
            debug!(part = %active.part, %err, "force drop on stale part");
        }
        debug!(part = %active.part, "drag cancelled");
        Some(Ok(AttachOutcome::Released {
            handle: active.handle,
        }))
    }
}
