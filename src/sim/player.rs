//! The player: a kinematic body driven by a small state machine
//!
//! Physical state (velocity, jump budget, hit timer) is the only stored
//! truth. The animation state is re-derived from it every tick and picks
//! the frame sequence together with the facing direction.

use std::sync::Arc;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::body::{Collidable, KinematicBody, Rect};
use super::mask::Mask;
use super::sprite::{Frame, SheetKey, SpriteSheets};
use crate::consts::MAX_GRAVITY_STEP;
use crate::settings::Settings;

/// Which way the player faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// Animation/behaviour state, derived each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimState {
    Idle,
    Run,
    Jump,
    DoubleJump,
    Fall,
    Hit,
}

impl AnimState {
    pub const ALL: [AnimState; 6] = [
        AnimState::Idle,
        AnimState::Run,
        AnimState::Jump,
        AnimState::DoubleJump,
        AnimState::Fall,
        AnimState::Hit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Run => "run",
            AnimState::Jump => "jump",
            AnimState::DoubleJump => "double_jump",
            AnimState::Fall => "fall",
            AnimState::Hit => "hit",
        }
    }
}

/// Key into the player's sprite table: state × facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerSheet {
    pub state: AnimState,
    pub facing: Facing,
}

impl PlayerSheet {
    pub const fn new(state: AnimState, facing: Facing) -> Self {
        Self { state, facing }
    }
}

macro_rules! player_sheets {
    ($($state:ident),*) => {
        &[$(
            PlayerSheet::new(AnimState::$state, Facing::Left),
            PlayerSheet::new(AnimState::$state, Facing::Right),
        )*]
    };
}

impl SheetKey for PlayerSheet {
    const ALL: &'static [Self] = player_sheets!(Idle, Run, Jump, DoubleJump, Fall, Hit);

    fn index(self) -> usize {
        self.state as usize * 2 + self.facing as usize
    }

    fn name(self) -> String {
        format!("{}_{}", self.state.as_str(), self.facing.as_str())
    }
}

/// Movement constants the player needs from [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub fall_speed: f32,
    pub animation_delay: u32,
    pub max_jumps: u8,
    /// The hit flag clears once the hit counter exceeds this
    pub hit_duration_ticks: u32,
}

impl From<&Settings> for PlayerTuning {
    fn from(s: &Settings) -> Self {
        Self {
            gravity: s.gravity,
            jump_velocity: s.jump_velocity(),
            fall_speed: s.fall_speed(),
            animation_delay: s.animation_delay.max(1),
            max_jumps: s.max_jumps,
            hit_duration_ticks: s.hit_duration_ticks(),
        }
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// The player-controlled entity
#[derive(Debug, Clone)]
pub struct Player {
    body: KinematicBody,
    facing: Facing,
    /// Ticks since the current animation started
    animation_count: u32,
    /// Ticks since last landing/head bump; drives the gravity ramp
    fall_count: u32,
    jump_count: u8,
    hit: bool,
    hit_count: u32,
    state: AnimState,
    frame_index: usize,
    tuning: PlayerTuning,
    sheets: Arc<SpriteSheets<PlayerSheet>>,
}

impl Player {
    /// Spawn at `pos` facing left, idle, sized to the first idle frame
    pub fn new(pos: IVec2, sheets: Arc<SpriteSheets<PlayerSheet>>, tuning: PlayerTuning) -> Self {
        let facing = Facing::Left;
        let size = sheets.frame(PlayerSheet::new(AnimState::Idle, facing), 0).size();
        Self {
            body: KinematicBody::new(pos, size),
            facing,
            animation_count: 0,
            fall_count: 0,
            jump_count: 0,
            hit: false,
            hit_count: 0,
            state: AnimState::Idle,
            frame_index: 0,
            tuning,
            sheets,
        }
    }

    // === Accessors ===

    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn state(&self) -> AnimState {
        self.state
    }

    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    pub fn fall_count(&self) -> u32 {
        self.fall_count
    }

    pub fn animation_count(&self) -> u32 {
        self.animation_count
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn sheet(&self) -> PlayerSheet {
        PlayerSheet::new(self.state, self.facing)
    }

    /// The frame currently shown (and collided with)
    pub fn frame(&self) -> &Frame {
        self.sheets.frame(self.sheet(), self.frame_index)
    }

    pub fn can_jump(&self) -> bool {
        self.jump_count < self.tuning.max_jumps
    }

    // === Triggers ===

    /// Launch upward. Refused silently once the jump budget is spent.
    pub fn jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.body.vel.y = self.tuning.jump_velocity;
        self.animation_count = 0;
        self.jump_count += 1;
        if self.jump_count == 1 {
            self.fall_count = 0;
        }
        log::debug!("jump {} of {}", self.jump_count, self.tuning.max_jumps);
        true
    }

    /// Downward contact: stop falling and restore the jump budget
    pub fn land(&mut self) {
        self.fall_count = 0;
        self.body.vel.y = 0.0;
        self.jump_count = 0;
    }

    /// Upward contact: bounce back down
    pub fn hit_head(&mut self) {
        self.fall_count = 0;
        self.body.vel.y = -self.body.vel.y;
    }

    /// Hazard contact: (re)start the hit timer
    pub fn make_hit(&mut self) {
        if !self.hit {
            log::debug!("player hit");
        }
        self.hit = true;
        self.hit_count = 0;
    }

    pub fn move_left(&mut self, speed: i32) {
        self.body.vel.x = -(speed as f32);
        self.face(Facing::Left);
    }

    pub fn move_right(&mut self, speed: i32) {
        self.body.vel.x = speed as f32;
        self.face(Facing::Right);
    }

    /// Drop horizontal intent; re-applied each tick from input
    pub fn stop_horizontal(&mut self) {
        self.body.vel.x = 0.0;
    }

    fn face(&mut self, facing: Facing) {
        if self.facing != facing {
            self.facing = facing;
            self.animation_count = 0;
        }
    }

    /// Move by exactly (dx, dy)
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.body.translate(dx, dy);
    }

    pub(crate) fn snap_bottom(&mut self, bottom: i32) {
        self.body.rect.set_bottom(bottom);
    }

    pub(crate) fn snap_top(&mut self, top: i32) {
        self.body.rect.set_top(top);
    }

    // === Per-tick update ===

    /// Advance one tick: gravity, movement, hit timer, animation
    pub fn tick(&mut self, fps: u32) {
        let fps = fps.max(1);

        let ramp = self.fall_count as f32 / fps as f32 * self.tuning.gravity;
        self.body.vel.y += ramp.min(MAX_GRAVITY_STEP);

        self.body.advance();

        if self.hit {
            self.hit_count = self.hit_count.saturating_add(1);
        }
        if self.hit_count > self.tuning.hit_duration_ticks {
            log::debug!("hit state cleared after {} ticks", self.hit_count);
            self.hit = false;
            self.hit_count = 0;
        }

        self.fall_count = self.fall_count.saturating_add(1);
        self.update_sprite();
    }

    /// Animation state implied by the current physical state
    pub fn derive_state(&self) -> AnimState {
        let vel = self.body.vel;
        if self.hit {
            AnimState::Hit
        } else if vel.y < 0.0 && self.jump_count == 1 {
            AnimState::Jump
        } else if vel.y < 0.0 && self.jump_count >= 2 {
            AnimState::DoubleJump
        } else if vel.y > self.tuning.fall_speed {
            AnimState::Fall
        } else if vel.x != 0.0 {
            AnimState::Run
        } else {
            AnimState::Idle
        }
    }

    fn update_sprite(&mut self) {
        let state = self.derive_state();
        if state != self.state {
            log::debug!("player {} -> {}", self.state.as_str(), state.as_str());
            self.state = state;
        }

        let len = self.sheets.len(self.sheet());
        self.frame_index = (self.animation_count / self.tuning.animation_delay) as usize % len;
        self.animation_count = self.animation_count.wrapping_add(1);

        let size = self.frame().size();
        self.body.resize(size);
    }
}

impl Collidable for Player {
    fn rect(&self) -> Rect {
        self.body.rect
    }

    fn mask(&self) -> &Mask {
        self.frame().mask()
    }
}
