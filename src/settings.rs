//! Engine and host settings
//!
//! Separate from `Tuning`: these describe how the host drives the engine,
//! not how the game plays.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How host frames map onto simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Timestep {
    /// One tick per rendered frame, whatever the display rate
    #[default]
    PerFrame,
    /// Fixed-rate ticks driven by an accumulator over real frame time
    Fixed { hz: f32, max_substeps: u32 },
}

impl Timestep {
    /// Fixed timestep at the rate the constants were tuned for
    pub fn nominal_fixed() -> Self {
        Timestep::Fixed {
            hz: NOMINAL_HZ,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timestep::PerFrame => "per-frame",
            Timestep::Fixed { .. } => "fixed",
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub viewport_width: f32,
    /// Left edge of the camera deadzone (fraction of viewport width)
    pub deadzone_left: f32,
    /// Right edge of the camera deadzone (fraction of viewport width)
    pub deadzone_right: f32,

    // === Loop ===
    pub timestep: Timestep,
    /// Ticks between a terminal transition and the completion callback
    pub completion_delay_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            deadzone_left: DEADZONE_LEFT,
            deadzone_right: DEADZONE_RIGHT,

            timestep: Timestep::PerFrame,
            completion_delay_ticks: COMPLETION_DELAY_TICKS,
        }
    }
}

/// Settings parse/validation failure
#[derive(Debug)]
pub enum SettingsError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Parse and validate settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| -> Result<(), SettingsError> { Err(SettingsError::Invalid(msg)) };

        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return invalid(format!(
                "viewport width must be positive, got {}",
                self.viewport_width
            ));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.deadzone_left)
            || !unit.contains(&self.deadzone_right)
            || self.deadzone_left >= self.deadzone_right
        {
            return invalid(format!(
                "deadzone must satisfy 0 <= left < right <= 1, got [{}, {}]",
                self.deadzone_left, self.deadzone_right
            ));
        }
        if let Timestep::Fixed { hz, max_substeps } = self.timestep {
            if !(hz.is_finite() && hz > 0.0) {
                return invalid(format!("fixed timestep rate must be positive, got {} Hz", hz));
            }
            if max_substeps == 0 {
                return invalid("fixed timestep needs at least one substep per frame".to_string());
            }
        }

        Ok(())
    }

    /// Deadzone bounds in whole screen pixels `(left, right)`.
    ///
    /// The right bound rounds down so the player never sits past
    /// `deadzone_right * viewport_width`.
    pub fn deadzone_px(&self) -> (f32, f32) {
        (
            (self.viewport_width * self.deadzone_left).round(),
            (self.viewport_width * self.deadzone_right).floor(),
        )
    }
}
