//! Data-driven gameplay balance
//!
//! Every per-tick constant the simulation reads lives here so a level pack
//! can ship its own feel. Defaults match `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants, all in world units per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration added every tick
    pub gravity: f32,
    /// Horizontal acceleration while a move action is held
    pub move_accel: f32,
    /// Horizontal speed cap
    pub max_run_speed: f32,
    /// Horizontal decay factor when no move action is held
    pub friction: f32,
    /// Upward speed applied on jump
    pub jump_force: f32,
    pub player_half_width: f32,
    pub player_half_height: f32,
    /// Leftmost allowed player x
    pub world_min_x: f32,

    // === Fragments ===
    pub pickup_radius: f32,
    pub fragment_score: u64,

    // === Failure ===
    /// Distance below the world height before the player counts as fallen
    pub fall_margin: f32,
    /// Distance above ground level where a pit becomes fatal
    pub pit_margin: f32,

    // === Gravity wells ===
    /// Velocity impulse at the well center (scaled by proximity)
    pub well_pull_strength: f32,
    /// Floor on the proximity factor inside the pull radius
    pub well_min_pull: f32,
    /// Per-component cap on player velocity after a pull
    pub well_max_velocity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_accel: MOVE_ACCEL,
            max_run_speed: MAX_RUN_SPEED,
            friction: FRICTION,
            jump_force: JUMP_FORCE,
            player_half_width: PLAYER_HALF_WIDTH,
            player_half_height: PLAYER_HALF_HEIGHT,
            world_min_x: WORLD_MIN_X,

            pickup_radius: PICKUP_RADIUS,
            fragment_score: FRAGMENT_SCORE,

            fall_margin: FALL_MARGIN,
            pit_margin: PIT_MARGIN,

            well_pull_strength: WELL_PULL_STRENGTH,
            well_min_pull: WELL_MIN_PULL,
            well_max_velocity: WELL_MAX_VELOCITY,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Player half extents as a vector
    pub fn player_half_extents(&self) -> glam::Vec2 {
        glam::Vec2::new(self.player_half_width, self.player_half_height)
    }
}
