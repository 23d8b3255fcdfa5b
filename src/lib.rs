//! Stellar Run - a side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, hazards, pickups, camera, outcome)
//! - `engine`: Engine instance driven by the host (start/tick/reset, callbacks)
//! - `tuning`: Data-driven gameplay constants
//! - `settings`: Host/engine settings (viewport, timestep, completion delay)
//! - `highscores`: Best-score board used by the host application

pub mod engine;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::{Completion, Engine};
pub use highscores::HighScores;
pub use settings::{Settings, SettingsError, Timestep};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal display rate the per-tick constants were tuned against
    pub const NOMINAL_HZ: f32 = 60.0;
    /// Fixed simulation timestep used by `Timestep::Fixed` at the nominal rate
    pub const SIM_DT: f32 = 1.0 / NOMINAL_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport width (px)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    /// Camera deadzone (fractions of viewport width)
    pub const DEADZONE_LEFT: f32 = 0.3;
    pub const DEADZONE_RIGHT: f32 = 0.6;

    /// Player physics (units per tick)
    pub const GRAVITY: f32 = 0.8;
    pub const MOVE_ACCEL: f32 = 0.5;
    pub const MAX_RUN_SPEED: f32 = 5.0;
    pub const FRICTION: f32 = 0.8;
    pub const JUMP_FORCE: f32 = 15.0;
    /// Player is a 32x32 box centered on its position
    pub const PLAYER_HALF_WIDTH: f32 = 16.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 16.0;
    /// Hard left edge of the world (player center)
    pub const WORLD_MIN_X: f32 = 16.0;

    /// Fragments
    pub const PICKUP_RADIUS: f32 = 30.0;
    pub const FRAGMENT_SCORE: u64 = 100;

    /// Failure thresholds
    pub const FALL_MARGIN: f32 = 50.0;
    pub const PIT_MARGIN: f32 = 8.0;

    /// Gravity wells
    pub const WELL_PULL_STRENGTH: f32 = 0.6;
    pub const WELL_MIN_PULL: f32 = 0.15;
    pub const WELL_MAX_VELOCITY: f32 = 12.0;

    /// Ticks between a terminal transition and the completion callback
    pub const COMPLETION_DELAY_TICKS: u32 = 60;
}

/// Clamp each component of `v` into `[-max, max]`
#[inline]
pub fn clamp_components(v: Vec2, max: f32) -> Vec2 {
    Vec2::new(v.x.clamp(-max, max), v.y.clamp(-max, max))
}
