//! Fixed timestep simulation tick
//!
//! Advances a level by one frame. Given the same starting level and the
//! same input sequence, the outcome is identical on every run.

use serde::{Deserialize, Serialize};

use super::body::Collidable;
use super::collision::handle_move;
use super::state::Level;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Left held
    pub move_left: bool,
    /// Right held; wins if both are held
    pub move_right: bool,
    /// Jump pressed this tick
    pub jump: bool,
}

/// Advance the level by one fixed timestep.
///
/// Order: jump intent, player update (gravity, movement, hit timer,
/// animation), hazard animation, collision resolution, camera.
pub fn tick(level: &mut Level, input: &TickInput) {
    // Jump intents beyond the budget are dropped before the update
    if input.jump && level.player.can_jump() {
        level.player.jump();
    }

    level.player.tick(level.settings.fps);

    for obj in &mut level.objects {
        obj.tick();
    }

    level.last_contacts = handle_move(
        &mut level.player,
        &level.objects,
        input,
        level.settings.player_vel,
        level.settings.probe_distance(),
    );

    let player_rect = level.player.rect();
    let x_vel = level.player.vel().x;
    if level.camera.follow(player_rect, x_vel) {
        log::trace!("camera offset now {}", level.camera.offset_x);
    }

    level.time_ticks += 1;
}
