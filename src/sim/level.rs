//! Static level data (the world model)
//!
//! Levels are fully described data: platforms, pits, fragments, hazards and
//! a goal. They are loaded once, validated, and shared read-only by every run.

use std::fmt;
use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{GravityWell, Hazard, PatrolHazard};

/// Platform material. Affects rendering only; collision is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    #[default]
    Ground,
    Star,
    Cloud,
    Ice,
}

/// A one-way landing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub kind: PlatformKind,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32, height: f32, kind: PlatformKind) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind,
        }
    }
}

/// A gap in the ground, `[x, x + width)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pit {
    pub x: f32,
    pub width: f32,
}

impl Pit {
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.x && x < self.x + self.width
    }
}

/// Level loading/validation failure
#[derive(Debug)]
pub enum LevelError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(e) => write!(f, "failed to read level: {}", e),
            LevelError::Parse(e) => write!(f, "failed to parse level: {}", e),
            LevelError::Invalid(msg) => write!(f, "invalid level: {}", msg),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(e) => Some(e),
            LevelError::Parse(e) => Some(e),
            LevelError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e)
    }
}

/// A complete level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    /// World extent (the goal normally sits near `width`)
    pub width: f32,
    /// Falling below `height` (plus margin) ends the run
    pub height: f32,
    /// Top of the ground strip; pits are judged against it
    pub ground_level: f32,
    pub player_start: Vec2,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub pits: Vec<Pit>,
    /// Fragment positions
    #[serde(default)]
    pub fragments: Vec<Vec2>,
    /// Initial hazard states
    #[serde(default)]
    pub hazards: Vec<Hazard>,
    pub goal: Rect,
}

impl LevelData {
    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Read, parse and validate a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let level = Self::from_json(&contents)?;
        log::info!(
            "Loaded level '{}' from {} ({} platforms, {} fragments, {} hazards)",
            level.name,
            path.as_ref().display(),
            level.platforms.len(),
            level.fragments.len(),
            level.hazards.len()
        );
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Structural checks only; reachability is a content concern
    pub fn validate(&self) -> Result<(), LevelError> {
        let invalid = |msg: String| -> Result<(), LevelError> { Err(LevelError::Invalid(msg)) };

        if !(self.width > 0.0 && self.height > 0.0) {
            return invalid(format!(
                "world size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.platforms.is_empty() {
            return invalid("level has no platforms".to_string());
        }
        if let Some(i) = self.platforms.iter().position(|p| !p.rect.is_valid()) {
            return invalid(format!("platform {} has a non-positive size", i));
        }
        if let Some(i) = self.pits.iter().position(|p| p.width <= 0.0) {
            return invalid(format!("pit {} has a non-positive width", i));
        }
        if !self.goal.is_valid() {
            return invalid("goal has a non-positive size".to_string());
        }

        for (i, hazard) in self.hazards.iter().enumerate() {
            match hazard {
                Hazard::Patrol(p) => {
                    if p.min_x >= p.max_x {
                        return invalid(format!(
                            "patrol hazard {} has inverted bounds [{}, {}]",
                            i, p.min_x, p.max_x
                        ));
                    }
                    if p.half_extents.x <= 0.0 || p.half_extents.y <= 0.0 {
                        return invalid(format!("patrol hazard {} has a non-positive size", i));
                    }
                }
                Hazard::GravityWell(w) => {
                    if w.kill_radius < 0.0 || w.pull_radius <= 0.0 {
                        return invalid(format!("gravity well {} has a negative radius", i));
                    }
                    if w.kill_radius > w.pull_radius {
                        return invalid(format!(
                            "gravity well {} kill radius {} exceeds pull radius {}",
                            i, w.kill_radius, w.pull_radius
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// The built-in level: eight sections of star, cloud and ice platforms
    /// over a ground strip broken by pits, ending at the goal.
    pub fn stellar() -> Self {
        use PlatformKind::*;

        const H: f32 = 600.0;
        const GROUND: f32 = H - 32.0;

        let platforms = vec![
            // Ground strip, split around the pits
            Platform::new(0.0, GROUND, 900.0, 32.0, Ground),
            Platform::new(980.0, GROUND, 540.0, 32.0, Ground),
            Platform::new(1600.0, GROUND, 700.0, 32.0, Ground),
            Platform::new(2390.0, GROUND, 630.0, 32.0, Ground),
            Platform::new(3100.0, GROUND, 900.0, 32.0, Ground),
            // Section 1: guiding stars
            Platform::new(200.0, H - 120.0, 128.0, 32.0, Star),
            Platform::new(400.0, H - 200.0, 128.0, 32.0, Star),
            // Section 2: floating clouds
            Platform::new(600.0, H - 280.0, 128.0, 32.0, Cloud),
            Platform::new(800.0, H - 160.0, 128.0, 32.0, Cloud),
            Platform::new(1000.0, H - 240.0, 128.0, 32.0, Cloud),
            // Section 3: ice trial
            Platform::new(1200.0, H - 180.0, 128.0, 32.0, Ice),
            Platform::new(1400.0, H - 300.0, 128.0, 32.0, Ice),
            Platform::new(1600.0, H - 220.0, 128.0, 32.0, Ice),
            // Section 4: mixed
            Platform::new(1800.0, H - 150.0, 128.0, 32.0, Star),
            Platform::new(2000.0, H - 280.0, 128.0, 32.0, Cloud),
            Platform::new(2200.0, H - 200.0, 128.0, 32.0, Ice),
            // Section 5: the climb
            Platform::new(2400.0, H - 150.0, 96.0, 32.0, Star),
            Platform::new(2500.0, H - 220.0, 96.0, 32.0, Star),
            Platform::new(2600.0, H - 290.0, 96.0, 32.0, Star),
            Platform::new(2700.0, H - 360.0, 96.0, 32.0, Star),
            // Section 6: floating continent
            Platform::new(2900.0, H - 300.0, 160.0, 32.0, Cloud),
            Platform::new(3100.0, H - 280.0, 160.0, 32.0, Cloud),
            Platform::new(3300.0, H - 260.0, 160.0, 32.0, Cloud),
            // Section 7: final trial
            Platform::new(3500.0, H - 200.0, 96.0, 32.0, Ice),
            Platform::new(3600.0, H - 280.0, 96.0, 32.0, Star),
            Platform::new(3700.0, H - 360.0, 96.0, 32.0, Cloud),
            // Section 8: goal approach
            Platform::new(3800.0, H - 150.0, 200.0, 32.0, Star),
        ];

        let pits = vec![
            Pit { x: 900.0, width: 80.0 },
            Pit { x: 1520.0, width: 80.0 },
            Pit { x: 2300.0, width: 90.0 },
            Pit { x: 3020.0, width: 80.0 },
        ];

        let fragments = [
            (250.0, 150.0),
            (450.0, 230.0),
            (350.0, 100.0),
            (650.0, 310.0),
            (850.0, 190.0),
            (1050.0, 270.0),
            (1250.0, 210.0),
            (1450.0, 330.0),
            (1650.0, 250.0),
            (1850.0, 180.0),
            (2050.0, 310.0),
            (2250.0, 230.0),
            (2450.0, 180.0),
            (2550.0, 250.0),
            (2650.0, 320.0),
            (2750.0, 390.0),
            (2950.0, 330.0),
            (3150.0, 310.0),
            (3350.0, 290.0),
            (3550.0, 230.0),
            (3650.0, 310.0),
            (3750.0, 390.0),
            (3850.0, 180.0),
            (3900.0, 180.0),
            (3950.0, 180.0),
        ]
        .into_iter()
        .map(|(x, above)| Vec2::new(x, H - above))
        .collect();

        let meteor = |x: f32, y: f32, vx: f32, min_x: f32, max_x: f32| {
            Hazard::Patrol(PatrolHazard {
                pos: Vec2::new(x, y),
                vx,
                half_extents: Vec2::new(14.0, 14.0),
                min_x,
                max_x,
            })
        };
        let black_hole = |x: f32, y: f32, pull_radius: f32, kill_radius: f32| {
            Hazard::GravityWell(GravityWell {
                pos: Vec2::new(x, y),
                pull_radius,
                kill_radius,
                half_extents: Vec2::new(24.0, 24.0),
            })
        };

        let hazards = vec![
            meteor(1300.0, GROUND - 28.0, 1.5, 1150.0, 1450.0),
            black_hole(2120.0, 200.0, 110.0, 22.0),
            meteor(2700.0, GROUND - 28.0, 2.0, 2450.0, 2950.0),
            meteor(3200.0, 400.0, 1.2, 3100.0, 3450.0),
            black_hole(3400.0, 180.0, 120.0, 24.0),
        ];

        Self {
            name: "stellar".to_string(),
            width: 4000.0,
            height: H,
            ground_level: GROUND,
            player_start: Vec2::new(50.0, H - 132.0),
            platforms,
            pits,
            fragments,
            hazards,
            goal: Rect::new(3920.0, GROUND - 100.0, 50.0, 100.0),
        }
    }
}

impl Default for LevelData {
    fn default() -> Self {
        Self::stellar()
    }
}
