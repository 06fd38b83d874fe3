//! Showcase: timed ordered disassembly and reassembly.
//!
//! The sequencer detaches every detachable part one step at a time,
//! pushes each a little outward for visibility, holds for one pause
//! step, then reattaches everything and goes idle. The host drives it
//! from its frame loop via [`ShowcaseSequencer::tick`]; each step fires
//! after `detach_interval` seconds, with `initial_delay` before the
//! first.

use nalgebra::Point3;
use tracing::debug;

use assembly_types::{DetachedPartHandle, PartName, ShowcaseConfig};

use crate::registry::AssemblyRegistry;

/// Where the sequencer currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcasePhase {
    /// Not running.
    Idle,
    /// Stepping through the detach order.
    Detaching,
    /// One no-op step between the last detach and the reattach pass,
    /// so the rebuild does not look instant.
    Pausing,
    /// The next step performs the bulk reattach.
    Reattaching,
}

/// Timed sequential disassembly/reassembly of the whole assembly.
#[derive(Debug)]
pub struct ShowcaseSequencer {
    config: ShowcaseConfig,
    order: Vec<PartName>,
    index: usize,
    held: Vec<DetachedPartHandle>,
    elapsed: f64,
    steps_fired: usize,
    active: bool,
}

impl ShowcaseSequencer {
    /// Create an idle sequencer.
    #[must_use]
    pub fn new(config: ShowcaseConfig) -> Self {
        Self {
            config,
            order: Vec::new(),
            index: 0,
            held: Vec::new(),
            elapsed: 0.0,
            steps_fired: 0,
            active: false,
        }
    }

    /// Whether a showcase run is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ShowcasePhase {
        if !self.active {
            ShowcasePhase::Idle
        } else if self.index < self.order.len() {
            ShowcasePhase::Detaching
        } else if self.index == self.order.len() {
            ShowcasePhase::Pausing
        } else {
            ShowcasePhase::Reattaching
        }
    }

    /// The detach order of the current run.
    #[must_use]
    pub fn order(&self) -> &[PartName] {
        &self.order
    }

    /// Begin a run: sort the detachable parts, force the anchor part
    /// (torso by default) last, and reset the step index.
    ///
    /// Returns `false` without activating when already running or when
    /// no part is detachable.
    pub fn start(&mut self, registry: &AssemblyRegistry) -> bool {
        if self.active {
            return false;
        }
        let mut order = registry.detachable_parts();
        order.sort();
        if let Some(anchor) = &self.config.anchor_part {
            if let Some(pos) = order.iter().position(|n| n == anchor) {
                let anchor = order.remove(pos);
                order.push(anchor);
            }
        }
        if order.is_empty() {
            return false;
        }
        debug!(parts = order.len(), "showcase started");
        self.order = order;
        self.index = 0;
        self.held.clear();
        self.elapsed = 0.0;
        self.steps_fired = 0;
        self.active = true;
        true
    }

    /// Frame-driven entry point: accumulates time and fires [`Self::step`]
    /// whenever the configured interval elapses.
    pub fn tick(&mut self, registry: &mut AssemblyRegistry, dt: f64) {
        if !self.active {
            return;
        }
        self.elapsed += dt.max(0.0);
        let ready = |fired: usize, elapsed: f64, config: &ShowcaseConfig| {
            elapsed >= config.initial_delay + fired as f64 * config.detach_interval
        };
        while self.active && ready(self.steps_fired, self.elapsed, &self.config) {
            self.steps_fired += 1;
            self.step(registry);
        }
    }

    /// Advance one step: detach the next part, pause once after the last
    /// detach, then reattach everything and go idle.
    ///
    /// Callable directly for hosts that schedule their own timers.
    pub fn step(&mut self, registry: &mut AssemblyRegistry) {
        if !self.active {
            return;
        }
        if self.index < self.order.len() {
            let name = self.order[self.index].clone();
            if !registry.is_detached(&name) {
                if let Ok(mut handle) = registry.detach(&name) {
                    self.push_outward(registry, &mut handle);
                    self.held.push(handle);
                }
            }
            self.index += 1;
        } else if self.index == self.order.len() {
            // Pause step between disassembly and rebuild.
            self.index += 1;
        } else {
            for handle in self.held.drain(..) {
                let name = handle.part.clone();
                if let Err(err) = registry.reattach(handle) {
                    debug!(part = %name, %err, "showcase reattach skipped");
                }
            }
            debug!("showcase complete");
            self.reset();
        }
    }

    /// Cancel the run from any phase. Parts already detached stay
    /// detached; their handles are returned so the caller keeps owning
    /// the proxies.
    pub fn stop(&mut self) -> Vec<DetachedPartHandle> {
        let held = std::mem::take(&mut self.held);
        if self.active {
            debug!(held = held.len(), "showcase stopped");
        }
        self.reset();
        held
    }

    fn reset(&mut self) {
        self.active = false;
        self.order.clear();
        self.index = 0;
        self.elapsed = 0.0;
        self.steps_fired = 0;
    }

    /// Move a freshly detached part outward from the assembly origin so
    /// the disassembly reads visually.
    fn push_outward(&self, registry: &mut AssemblyRegistry, handle: &mut DetachedPartHandle) {
        let offset = self.config.detach_offset;
        let radial = handle.pose.position - Point3::origin();
        let norm = radial.norm();
        if norm <= f64::EPSILON || offset == 0.0 {
            return; // part sits at the origin, nowhere to push
        }
        let mut pose = handle.pose;
        pose.position += radial / norm * offset;
        handle.pose = pose;
        if let Err(err) = registry.set_detached_pose(&handle.part, pose) {
            debug!(part = %handle.part, %err, "showcase offset skipped");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use assembly_types::{PartCatalog, PartSpec, Pose};

    fn robot() -> AssemblyRegistry {
        let catalog = PartCatalog::from_parts(vec![
            PartSpec::new("Torso")
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
    fn test_order_sorted_with_anchor_last() {
        let registry = robot();
        let mut sequencer = ShowcaseSequencer::new(ShowcaseConfig::default());
        assert!(sequencer.start(&registry));
        let names: Vec<_> = sequencer.order().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Arm", "Leg", "Torso"]);
    }

    #[test]
    fn test_no_detachable_parts_is_noop() {
        let catalog = PartCatalog::from_parts(vec![PartSpec::new("Base").with_detachable(false)]);
        let mut registry = AssemblyRegistry::new();
        registry.build(catalog).unwrap();

        let mut sequencer = ShowcaseSequencer::new(ShowcaseConfig::default());
        assert!(!sequencer.start(&registry));
        assert!(!sequencer.is_active());
        assert_eq!(sequencer.phase(), ShowcasePhase::Idle);
    }

    #[test]
    fn test_full_cycle_via_step() {
        let mut registry = robot();
        let mut sequencer = ShowcaseSequencer::new(ShowcaseConfig::default());
        assert!(sequencer.start(&registry));

        // Three detach steps.
        for expected in 1..=3 {
            sequencer.step(&mut registry);
            assert_eq!(registry.detached_parts().len(), expected);
        }
        assert_eq!(sequencer.phase(), ShowcasePhase::Pausing);

        // Pause step, then the reattach pass.
        sequencer.step(&mut registry);
        assert_eq!(registry.detached_parts().len(), 3);
        assert_eq!(sequencer.phase(), ShowcasePhase::Reattaching);
        sequencer.step(&mut registry);
        assert!(registry.detached_parts().is_empty());
        assert!(!sequencer.is_active());
    }

    #[test]
    fn test_detached_parts_pushed_outward() {
        let mut registry = robot();
        let mut sequencer = ShowcaseSequencer::new(ShowcaseConfig::default());
        sequencer.start(&registry);
        sequencer.step(&mut registry); // detaches Arm at (0, 0, 40)

        let pose = registry.part_world_pose(&"Arm".into()).unwrap();
        assert_relative_eq!(pose.position.z, 75.0); // 40 + 35 outward
    }

    #[test]
    fn test_tick_honors_delay_and_interval() {
        let mut registry = robot();
        let mut sequencer = ShowcaseSequencer::new(ShowcaseConfig::default());
        sequencer.start(&registry);

        // Before the initial delay nothing happens.
        sequencer.tick(&mut registry, 0.4);
        assert!(registry.detached_parts().is_empty());

        // Crossing the delay fires the first step only.
        sequencer.tick(&mut registry, 0.2);
        assert_eq!(registry.detached_parts().len(), 1);

        // One interval later the second step fires.
        sequencer.tick(&mut registry, 0.6);
        assert_eq!(registry.detached_parts().len(), 2);
    }

    #[test]
    fn test_stop_mid_sequence_leaves_parts_detached() {
        let mut registry = robot();
        let mut sequencer = ShowcaseSequencer::new(ShowcaseConfig::default());
        sequencer.start(&registry);
        sequencer.step(&mut registry);
        sequencer.step(&mut registry);

        let handles = sequencer.stop();
        assert_eq!(handles.len(), 2);
        assert!(!sequencer.is_active());
        assert_eq!(registry.detached_parts().len(), 2);

        // The returned handles are still live.
        for handle in handles {
            registry.reattach(handle).unwrap();
        }
        assert!(registry.detached_parts().is_empty());
    }

    #[test]
    fn test_restart_after_stop() {
        let mut registry = robot();
        let mut sequencer = ShowcaseSequencer::new(ShowcaseConfig::default());
        sequencer.start(&registry);
        assert!(!sequencer.start(&registry)); // already running
        let _ = sequencer.stop();
        assert!(sequencer.start(&registry));
    }
}
