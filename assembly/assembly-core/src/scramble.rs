//! Scramble: bulk randomized detach-and-redistribute.

use rand::Rng;
use tracing::{debug, warn};

use crate::registry::AssemblyRegistry;

/// Detach every detachable part and redistribute it across the assembly.
///
/// For each of `iterations` passes, every part that is detachable and
/// currently attached is detached and immediately reattached elsewhere:
///
/// - when `search_radius > 0` and the nearest attach target lies within
///   that radius, the part goes there;
/// - otherwise it goes to a uniformly random attached part (no socket).
///
/// Each pass operates on the state the previous pass left behind, so a
/// part moved in pass one can move again in pass two. Parts already
/// detached when a pass starts are skipped; an in-progress drag is never
/// hijacked. Deterministic given a seeded `rng`.
///
/// Returns the number of part moves performed.
pub fn scramble<R: Rng>(
    registry: &mut AssemblyRegistry,
    iterations: u32,
    search_radius: f64,
    rng: &mut R,
) -> usize {
    let mut moves = 0;
    for pass in 0..iterations {
        let names = registry.part_names().to_vec();
        for name in names {
            if !registry.is_detachable(&name) || registry.is_detached(&name) {
                continue;
            }
            let Ok(handle) = registry.detach(&name) else {
                continue;
            };
            let from = handle.pose.position;

            let near = registry
                .find_nearest_attach_target(&from, Some(&name))
                .filter(|t| search_radius > 0.0 && t.distance <= search_radius);

            let result = if let Some(target) = near {
                registry.attach_to(handle, Some(target.parent), target.socket)
            } else {
                let targets = registry.all_attach_targets();
                if targets.is_empty() {
                    // Nothing to land on; put the part back where it was.
                    registry.reattach(handle)
                } else {
                    let pick = targets[rng.gen_range(0..targets.len())].clone();
                    registry.attach_to(handle, Some(pick), None)
                }
            };
            match result {
                Ok(()) => moves += 1,
                Err(err) => warn!(part = %name, %err, "scramble attach failed"),
            }
        }
        debug!(pass, moves, "scramble pass complete");
    }
    moves
}
