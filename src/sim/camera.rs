//! Horizontal scrolling camera
//!
//! The camera does nothing until the player pushes into the deadzone at
//! either viewport edge while moving toward it; from then on it moves in
//! lockstep with the player's horizontal velocity.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::Rect;
use crate::settings::Settings;

/// How far the camera scrolls this tick for a player at `player` moving
/// at `x_vel`, given the current `offset_x`
pub fn scroll_step(player: Rect, x_vel: f32, offset_x: i32, viewport_width: i32, deadzone: i32) -> i32 {
    let pushing_right = player.right() - offset_x >= viewport_width - deadzone && x_vel > 0.0;
    let pushing_left = player.left() - offset_x <= deadzone && x_vel < 0.0;
    if pushing_right || pushing_left {
        x_vel as i32
    } else {
        0
    }
}

/// World-to-screen horizontal offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub offset_x: i32,
    pub viewport_width: i32,
    pub deadzone: i32,
}

impl Camera {
    pub fn new(viewport_width: i32, deadzone: i32) -> Self {
        Self {
            offset_x: 0,
            viewport_width,
            deadzone,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.viewport_width, settings.scroll_area_width)
    }

    /// Scroll for this tick; returns true if the offset changed
    pub fn follow(&mut self, player: Rect, x_vel: f32) -> bool {
        let step = scroll_step(player, x_vel, self.offset_x, self.viewport_width, self.deadzone);
        self.offset_x += step;
        step != 0
    }

    /// Screen position of a world position
    pub fn to_screen(&self, world: IVec2) -> IVec2 {
        IVec2::new(world.x - self.offset_x, world.y)
    }
}
