//! Simulation state and entity types
//!
//! `GameState` is the per-run snapshot handed to renderers. The static level
//! is shared behind an `Arc`; everything else mutates once per tick while the
//! run is `Playing` and is frozen afterwards.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::LevelData;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// The player-controlled entity (a box centered on `pos`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Standing on a platform this tick
    pub grounded: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            grounded: false,
        }
    }
}

/// A star fragment pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub pos: Vec2,
    /// One-way: false -> true
    #[serde(default)]
    pub collected: bool,
}

impl Fragment {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            collected: false,
        }
    }
}

/// A hazard that shuttles horizontally between two bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolHazard {
    pub pos: Vec2,
    /// Horizontal velocity (units per tick), sign flips at the bounds
    pub vx: f32,
    pub half_extents: Vec2,
    pub min_x: f32,
    pub max_x: f32,
}

impl PatrolHazard {
    /// Advance one tick, reflecting off the patrol bounds
    pub fn step(&mut self) {
        self.pos.x += self.vx;
        if self.pos.x <= self.min_x || self.pos.x >= self.max_x {
            self.vx = -self.vx;
            self.pos.x = self.pos.x.clamp(self.min_x, self.max_x);
        }
    }
}

/// A stationary attractor with a lethal core
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityWell {
    pub pos: Vec2,
    /// Outer radius: pulls the player in
    pub pull_radius: f32,
    /// Inner radius: instantly fatal
    pub kill_radius: f32,
    /// Render-only extents; never used for collision
    pub half_extents: Vec2,
}

/// Hazard variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Hazard {
    Patrol(PatrolHazard),
    GravityWell(GravityWell),
}

impl Hazard {
    pub fn pos(&self) -> Vec2 {
        match self {
            Hazard::Patrol(p) => p.pos,
            Hazard::GravityWell(w) => w.pos,
        }
    }
}

/// Horizontal scroll state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World x of the viewport's left edge, never negative
    pub x: f32,
    /// Deadzone bounds in screen pixels
    pub deadzone_left: f32,
    pub deadzone_right: f32,
}

impl Camera {
    pub fn new(settings: &Settings) -> Self {
        let (deadzone_left, deadzone_right) = settings.deadzone_px();
        Self {
            x: 0.0,
            deadzone_left,
            deadzone_right,
        }
    }

    /// Player x relative to the viewport's left edge
    #[inline]
    pub fn screen_x(&self, world_x: f32) -> f32 {
        world_x - self.x
    }
}

/// Run outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Simulation is live
    #[default]
    Playing,
    /// Goal reached
    Cleared,
    /// Player died
    Over,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Playing)
    }
}

/// Why a run ended in `Outcome::Over`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCause {
    /// Dropped below the world
    FellOut,
    /// Fell into a pit
    Pit,
    /// Touched a patrol hazard or a well's kill radius
    Hazard,
}

impl FailureCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCause::FellOut => "fell out of the world",
            FailureCause::Pit => "fell into a pit",
            FailureCause::Hazard => "hit a hazard",
        }
    }
}

/// Named audio cues emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Jump,
    Collect,
    Goal,
    GameOver,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::Collect => "collect",
            Cue::Goal => "goal",
            Cue::GameOver => "gameOver",
        }
    }
}

/// Score bookkeeping for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Non-decreasing within a run
    pub score: u64,
    /// Set once every fragment has been picked up
    pub perfect: bool,
    /// Score that marks a perfect run (fragment count * fragment score)
    pub perfect_threshold: u64,
}

impl Scoreboard {
    pub fn new(fragment_count: usize, fragment_score: u64) -> Self {
        Self {
            score: 0,
            perfect: false,
            perfect_threshold: fragment_count as u64 * fragment_score,
        }
    }

    /// Credit `count` pickups; returns true if this call made the run perfect
    pub fn award(&mut self, count: u32, fragment_score: u64) -> bool {
        if count == 0 {
            return false;
        }
        self.score += count as u64 * fragment_score;
        if !self.perfect && self.perfect_threshold > 0 && self.score >= self.perfect_threshold {
            self.perfect = true;
            return true;
        }
        false
    }
}

/// Complete per-run simulation state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Static world geometry (shared, never mutated)
    pub level: Arc<LevelData>,
    pub player: Player,
    /// Fragments in level order
    pub fragments: Vec<Fragment>,
    /// Hazards in level order
    pub hazards: Vec<Hazard>,
    pub camera: Camera,
    pub scoreboard: Scoreboard,
    pub outcome: Outcome,
    /// Set together with `Outcome::Over`
    pub failure: Option<FailureCause>,
    /// Ticks simulated while `Playing`
    pub time_ticks: u64,
    /// Cues emitted by the most recent tick
    pub cues: Vec<Cue>,
}

impl GameState {
    /// Fresh run at the level's start position
    pub fn new(level: Arc<LevelData>, tuning: &Tuning, settings: &Settings) -> Self {
        let fragments: Vec<Fragment> = level.fragments.iter().copied().map(Fragment::new).collect();
        let scoreboard = Scoreboard::new(fragments.len(), tuning.fragment_score);
        Self {
            player: Player::new(level.player_start),
            fragments,
            hazards: level.hazards.clone(),
            camera: Camera::new(settings),
            scoreboard,
            outcome: Outcome::Playing,
            failure: None,
            time_ticks: 0,
            cues: Vec::new(),
            level,
        }
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score
    }

    pub fn collected_count(&self) -> usize {
        self.fragments.iter().filter(|f| f.collected).count()
    }
}
