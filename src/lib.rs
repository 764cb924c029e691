//! Pixel Platformer - motion, collision and animation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, pixel-mask collisions, player state machine)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Construction-time and configuration failures

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{PlatformerError, Result};
pub use settings::Settings;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const FPS: u32 = 60;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: i32 = 1000;
    pub const VIEWPORT_HEIGHT: i32 = 800;

    /// Horizontal run speed (pixels per tick)
    pub const PLAYER_VEL: i32 = 5;
    /// Gravity constant; scales the fall ramp, jump launch and fall threshold
    pub const GRAVITY: f32 = 1.0;
    /// Jump launch speed as a multiple of gravity (upward)
    pub const JUMP_STRENGTH: f32 = 8.0;
    /// Descending faster than this multiple of gravity shows the fall animation
    pub const FALL_THRESHOLD: f32 = 2.0;
    /// Per-tick cap on the gravity ramp
    pub const MAX_GRAVITY_STEP: f32 = 1.0;
    /// Single + double jump
    pub const MAX_JUMPS: u8 = 2;
    /// Ticks per animation frame
    pub const ANIMATION_DELAY: u32 = 3;
    /// How long the hit state lasts
    pub const HIT_DURATION_SECS: u32 = 2;

    /// Terrain tile edge length
    pub const BLOCK_SIZE: i32 = 96;
    /// Camera deadzone from each viewport edge
    pub const SCROLL_AREA_WIDTH: i32 = 200;

    /// Alpha above this counts as solid when building masks
    pub const MASK_ALPHA_THRESHOLD: u8 = 127;
}
