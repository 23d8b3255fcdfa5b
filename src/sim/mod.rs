//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per call, no clocks, no I/O
//! - No randomness
//! - Stable iteration order (level order)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod hazards;
pub mod input;
pub mod level;
pub mod outcome;
pub mod physics;
pub mod pickup;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use input::{Action, ActionSet, InputHandle};
pub use level::{LevelData, LevelError, Pit, Platform, PlatformKind};
pub use outcome::Transition;
pub use state::{
    Camera, Cue, FailureCause, Fragment, GameState, GravityWell, Hazard, Outcome, PatrolHazard,
    Player, Scoreboard,
};
pub use tick::{TickReport, tick};
