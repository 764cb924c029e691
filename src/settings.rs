//! Simulation tuning
//!
//! Every number the motion and camera code depends on lives here so a
//! course can be re-tuned from a JSON file without a rebuild.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PlatformerError, Result};

/// Tuning values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Fixed tick rate; gravity ramp and hit duration are measured in ticks
    pub fps: u32,
    /// Ticks each animation frame stays on screen
    pub animation_delay: u32,
    /// Seconds the hit state lasts
    pub hit_duration_secs: u32,

    // === Movement ===
    /// Horizontal run speed (pixels per tick)
    pub player_vel: i32,
    /// Gravity constant
    pub gravity: f32,
    /// Jump launch speed as a multiple of gravity
    pub jump_strength: f32,
    /// Fall animation threshold as a multiple of gravity
    pub fall_threshold: f32,
    /// Jump budget restored on landing
    pub max_jumps: u8,

    // === Viewport ===
    pub viewport_width: i32,
    pub viewport_height: i32,
    /// Camera deadzone measured in from each viewport edge
    pub scroll_area_width: i32,

    // === Course ===
    /// Terrain tile edge length used by the stock course
    pub block_size: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            animation_delay: ANIMATION_DELAY,
            hit_duration_secs: HIT_DURATION_SECS,

            player_vel: PLAYER_VEL,
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            fall_threshold: FALL_THRESHOLD,
            max_jumps: MAX_JUMPS,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            scroll_area_width: SCROLL_AREA_WIDTH,

            block_size: BLOCK_SIZE,
        }
    }
}

impl Settings {
    /// Upward launch velocity applied by a jump
    pub fn jump_velocity(&self) -> f32 {
        -self.gravity * self.jump_strength
    }

    /// Downward speed above which the fall animation plays
    pub fn fall_speed(&self) -> f32 {
        self.gravity * self.fall_threshold
    }

    /// Ticks the hit flag stays set before clearing
    pub fn hit_duration_ticks(&self) -> u32 {
        self.fps.saturating_mul(self.hit_duration_secs)
    }

    /// Horizontal probe distance used for left/right blocking
    pub fn probe_distance(&self) -> i32 {
        self.player_vel * 2
    }

    /// Reject values that would divide by zero or break the camera
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(PlatformerError::InvalidSettings("fps must be positive".into()));
        }
        if self.animation_delay == 0 {
            return Err(PlatformerError::InvalidSettings(
                "animation_delay must be positive".into(),
            ));
        }
        if self.player_vel < 0 {
            return Err(PlatformerError::InvalidSettings(
                "player_vel must not be negative".into(),
            ));
        }
        if self.fps.checked_mul(self.hit_duration_secs).is_none() {
            return Err(PlatformerError::InvalidSettings(format!(
                "hit duration of {}s at {} fps overflows the tick counter",
                self.hit_duration_secs, self.fps
            )));
        }
        if !(self.gravity.is_finite() && self.jump_strength.is_finite() && self.fall_threshold.is_finite()) {
            return Err(PlatformerError::InvalidSettings(
                "gravity, jump_strength and fall_threshold must be finite".into(),
            ));
        }
        if self.gravity < 0.0 {
            return Err(PlatformerError::InvalidSettings(format!(
                "gravity {} must not be negative",
                self.gravity
            )));
        }
        if self.viewport_width <= 0 || self.viewport_height <= 0 {
            return Err(PlatformerError::InvalidSettings(format!(
                "viewport {}x{} is empty",
                self.viewport_width, self.viewport_height
            )));
        }
        if self.scroll_area_width < 0 || self.scroll_area_width * 2 > self.viewport_width {
            return Err(PlatformerError::InvalidSettings(format!(
                "scroll area {} does not fit a {} wide viewport",
                self.scroll_area_width, self.viewport_width
            )));
        }
        if self.block_size <= 0 {
            return Err(PlatformerError::InvalidSettings("block_size must be positive".into()));
        }
        Ok(())
    }

    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
