//! Hazard behavior
//!
//! Patrol hazards move every tick and kill on box overlap. Gravity wells are
//! radial: the kill radius is fatal, the pull radius drags the player's
//! velocity toward the center. Pull runs after the player's position has been
//! integrated, so it shows up in the player's motion on the following tick.

use glam::Vec2;

use super::collision::{boxes_overlap, within_radius};
use super::state::{GravityWell, Hazard, PatrolHazard, Player};
use crate::clamp_components;
use crate::tuning::Tuning;

/// Result of evaluating hazards against the player
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HazardReport {
    /// Index of the hazard that killed the player
    pub fatal: Option<usize>,
    /// Number of wells that pulled the player this tick
    pub pulls: u32,
}

/// Advance every patrol hazard by one tick
pub fn advance(hazards: &mut [Hazard]) {
    for hazard in hazards.iter_mut() {
        if let Hazard::Patrol(patrol) = hazard {
            patrol.step();
        }
    }
}

/// Test every hazard against the player, applying well pulls as a side effect.
///
/// Stops at the first fatal hazard; the run ends on that tick anyway.
pub fn evaluate(hazards: &[Hazard], player: &mut Player, tuning: &Tuning) -> HazardReport {
    let mut report = HazardReport::default();
    let half = tuning.player_half_extents();

    for (i, hazard) in hazards.iter().enumerate() {
        let fatal = match hazard {
            Hazard::Patrol(patrol) => patrol_hits(patrol, player.pos, half),
            Hazard::GravityWell(well) => match well_effect(well, player.pos, tuning) {
                WellEffect::Kill => true,
                WellEffect::Pull(impulse) => {
                    player.vel = clamp_components(player.vel + impulse, tuning.well_max_velocity);
                    report.pulls += 1;
                    false
                }
                WellEffect::None => false,
            },
        };

        if fatal {
            report.fatal = Some(i);
            return report;
        }
    }

    report
}

#[inline]
fn patrol_hits(patrol: &PatrolHazard, player_pos: Vec2, player_half: Vec2) -> bool {
    boxes_overlap(patrol.pos, patrol.half_extents, player_pos, player_half)
}

/// What a gravity well does to a player at a given position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WellEffect {
    None,
    /// Velocity impulse toward the well center
    Pull(Vec2),
    Kill,
}

/// Kill radius takes precedence over pull
pub fn well_effect(well: &GravityWell, player_pos: Vec2, tuning: &Tuning) -> WellEffect {
    if within_radius(player_pos, well.pos, well.kill_radius) {
        return WellEffect::Kill;
    }
    if !within_radius(player_pos, well.pos, well.pull_radius) {
        return WellEffect::None;
    }

    let to_center = well.pos - player_pos;
    let dist = to_center.length();
    // No direction at the exact center
    if dist <= 0.0 {
        return WellEffect::None;
    }

    let proximity = ((well.pull_radius - dist) / well.pull_radius).max(tuning.well_min_pull);
    WellEffect::Pull(to_center / dist * tuning.well_pull_strength * proximity)
}
