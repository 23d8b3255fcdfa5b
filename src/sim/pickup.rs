//! Fragment pickup
//!
//! Proximity based: any uncollected fragment strictly inside the pickup radius
//! of the player's center is collected. Collection is one-way, so the result
//! does not depend on iteration order.

use glam::Vec2;

use super::collision::within_radius;
use super::state::Fragment;

/// Collect every fragment within `radius` of `player_pos`.
///
/// Returns the indices collected this call.
pub fn collect_fragments(fragments: &mut [Fragment], player_pos: Vec2, radius: f32) -> Vec<usize> {
    let mut collected = Vec::new();
    for (i, fragment) in fragments.iter_mut().enumerate() {
        if !fragment.collected && within_radius(player_pos, fragment.pos, radius) {
            fragment.collected = true;
            collected.push(i);
        }
    }
    collected
}
