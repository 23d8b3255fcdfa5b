//! Player integration and platform resolution
//!
//! Explicit Euler, one step per tick. Platforms are one-way landing surfaces:
//! they only stop a falling player and never block sideways movement.

use super::collision::box_overlaps_rect;
use super::input::{Action, ActionSet};
use super::level::Platform;
use super::state::Player;
use crate::tuning::Tuning;

/// What happened to the player during a physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsReport {
    /// A jump started this tick
    pub jumped: bool,
    /// Index of the platform the player landed on, if any
    pub landed_on: Option<usize>,
}

/// Advance the player by one tick
pub fn step_player(
    player: &mut Player,
    actions: ActionSet,
    platforms: &[Platform],
    tuning: &Tuning,
) -> PhysicsReport {
    let mut report = PhysicsReport::default();

    player.vel.y += tuning.gravity;

    // Left is checked first, so it wins when both are held
    if actions.is_active(Action::MoveLeft) {
        player.vel.x = (player.vel.x - tuning.move_accel).max(-tuning.max_run_speed);
    } else if actions.is_active(Action::MoveRight) {
        player.vel.x = (player.vel.x + tuning.move_accel).min(tuning.max_run_speed);
    } else {
        player.vel.x *= tuning.friction;
    }

    // No buffering: an airborne jump request is dropped
    if actions.is_active(Action::Jump) && player.grounded {
        player.vel.y = -tuning.jump_force;
        player.grounded = false;
        report.jumped = true;
    }

    player.pos += player.vel;

    report.landed_on = resolve_platforms(player, platforms, tuning);

    player.pos.x = player.pos.x.max(tuning.world_min_x);

    report
}

/// Recompute `grounded` from scratch and snap a falling player onto any
/// platform it overlaps. Returns the last platform landed on.
pub fn resolve_platforms(
    player: &mut Player,
    platforms: &[Platform],
    tuning: &Tuning,
) -> Option<usize> {
    let half = tuning.player_half_extents();
    let mut landed_on = None;

    player.grounded = false;
    for (i, platform) in platforms.iter().enumerate() {
        if box_overlaps_rect(player.pos, half, &platform.rect) && player.vel.y > 0.0 {
            player.pos.y = platform.rect.y - half.y;
            player.vel.y = 0.0;
            player.grounded = true;
            landed_on = Some(i);
        }
    }

    landed_on
}
