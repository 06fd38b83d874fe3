//! Configuration types for assembly interaction.
//!
//! All tolerances and timings live here so the same snap predicate can be
//! driven with different tolerance sets (tight for origin snap, loose for
//! free attach). Defaults match the tuning of the reference demo.

use crate::catalog::PartName;
use crate::error::AssemblyError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position and orientation tolerances for the snap predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnapTolerances {
    /// Maximum positional error (world units).
    pub pos_tolerance: f64,
    /// Maximum orientation error (degrees, minimal rotation angle).
    pub angle_tolerance_deg: f64,
}

impl Default for SnapTolerances {
    fn default() -> Self {
        Self {
            pos_tolerance: 8.0,
            angle_tolerance_deg: 10.0,
        }
    }
}

impl SnapTolerances {
    /// Create tolerances from explicit values.
    #[must_use]
    pub const fn new(pos_tolerance: f64, angle_tolerance_deg: f64) -> Self {
        Self {
            pos_tolerance,
            angle_tolerance_deg,
        }
    }

    /// Validate the tolerance values.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::InvalidConfig`] for negative or
    /// non-finite tolerances.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.pos_tolerance.is_finite() || self.pos_tolerance < 0.0 {
            return Err(AssemblyError::invalid_config(format!(
                "pos_tolerance must be finite and non-negative, got {}",
                self.pos_tolerance
            )));
        }
        if !self.angle_tolerance_deg.is_finite() || self.angle_tolerance_deg < 0.0 {
            return Err(AssemblyError::invalid_config(format!(
                "angle_tolerance_deg must be finite and non-negative, got {}",
                self.angle_tolerance_deg
            )));
        }
        Ok(())
    }
}

/// Tuning for drag sessions and release-time attach attempts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DragConfig {
    /// Tolerances for snapping back to the original socket.
    pub snap: SnapTolerances,
    /// Whether a failed snap may fall back to the nearest free target.
    pub allow_free_attach: bool,
    /// Maximum distance for the free-attach fallback (world units).
    pub free_attach_max_distance: f64,
    /// Minimum grab distance from the viewer.
    pub min_grab_distance: f64,
    /// Maximum grab distance from the viewer.
    pub max_grab_distance: f64,
    /// Exponential smoothing rate for proxy motion (per second).
    pub smoothing_rate: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            snap: SnapTolerances::default(),
            allow_free_attach: true,
            free_attach_max_distance: 25.0,
            min_grab_distance: 50.0,
            max_grab_distance: 500.0,
            smoothing_rate: 8.0,
        }
    }
}

impl DragConfig {
    /// Disable the free-attach fallback.
    #[must_use]
    pub fn no_free_attach(mut self) -> Self {
        self.allow_free_attach = false;
        self
    }

    /// Set the snap tolerances.
    #[must_use]
    pub fn with_snap(mut self, snap: SnapTolerances) -> Self {
        self.snap = snap;
        self
    }

    /// Set the grab distance range.
    #[must_use]
    pub fn with_grab_range(mut self, min: f64, max: f64) -> Self {
        self.min_grab_distance = min;
        self.max_grab_distance = max;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::InvalidConfig`] when ranges are inverted
    /// or values are not finite.
    pub fn validate(&self) -> crate::Result<()> {
        self.snap.validate()?;
        if self.min_grab_distance > self.max_grab_distance {
            return Err(AssemblyError::invalid_config(format!(
                "grab range inverted: [{}, {}]",
                self.min_grab_distance, self.max_grab_distance
            )));
        }
        if !self.smoothing_rate.is_finite() || self.smoothing_rate < 0.0 {
            return Err(AssemblyError::invalid_config(format!(
                "smoothing_rate must be finite and non-negative, got {}",
                self.smoothing_rate
            )));
        }
        Ok(())
    }
}

/// Timing and ordering for the showcase sequencer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShowcaseConfig {
    /// Seconds between detach steps.
    pub detach_interval: f64,
    /// Seconds before the first detach step.
    pub initial_delay: f64,
    /// Outward positional offset applied to each detached part.
    pub detach_offset: f64,
    /// Part forced to the end of the detach order, if present.
    pub anchor_part: Option<PartName>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            detach_interval: 0.6,
            initial_delay: 0.5,
            detach_offset: 35.0,
            anchor_part: Some(PartName::from("Torso")),
        }
    }
}

impl ShowcaseConfig {
    /// Set the detach interval.
    #[must_use]
    pub fn with_interval(mut self, seconds: f64) -> Self {
        self.detach_interval = seconds;
        self
    }

    /// Set the part forced last in the detach order.
    #[must_use]
    pub fn with_anchor(mut self, part: impl Into<PartName>) -> Self {
        self.anchor_part = Some(part.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tolerances() {
        let snap = SnapTolerances::default();
        assert_eq!(snap.pos_tolerance, 8.0);
        assert_eq!(snap.angle_tolerance_deg, 10.0);
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let snap = SnapTolerances::new(-1.0, 10.0);
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_drag_config_defaults() {
        let config = DragConfig::default();
        assert!(config.allow_free_attach);
        assert_eq!(config.free_attach_max_distance, 25.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_grab_range_rejected() {
        let config = DragConfig::default().with_grab_range(500.0, 50.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_showcase_defaults() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.detach_interval, 0.6);
        assert_eq!(config.initial_delay, 0.5);
        assert_eq!(config.anchor_part, Some(PartName::from("Torso")));
    }
}
