//! Spatial snap matching.
//!
//! A snap test decides whether a candidate pose is close enough to a
//! target socket pose to reattach. The predicate is pure; both tolerances
//! come from the caller, so the same function serves the tight
//! reattach-to-origin check and the loose free-attach check.

use assembly_types::{Pose, SnapTolerances};
use nalgebra::UnitQuaternion;

/// Minimal rotation angle between two orientations, in degrees.
///
/// Result is in `[0, 180]`.
#[must_use]
pub fn angular_distance_deg(a: &UnitQuaternion<f64>, b: &UnitQuaternion<f64>) -> f64 {
    a.angle_to(b).to_degrees()
}

/// Whether `candidate` is within position and orientation tolerance of
/// `target`.
///
/// Symmetric in its pose arguments and monotonic in both tolerances:
/// widening either tolerance never turns a passing result into a failure.
#[must_use]
pub fn can_snap(candidate: &Pose, target: &Pose, tolerances: &SnapTolerances) -> bool {
    candidate.distance_to(target) <= tolerances.pos_tolerance
        && angular_distance_deg(&candidate.rotation, &target.rotation)
            <= tolerances.angle_tolerance_deg
}
