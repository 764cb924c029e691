//! Fire trap: a static hazard with an on/off animation

use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Collidable, KinematicBody, Rect};
use super::mask::Mask;
use super::sprite::{Frame, SheetKey, SpriteSheets};

/// Whether the fire is burning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireState {
    Off,
    On,
}

impl SheetKey for FireState {
    const ALL: &'static [Self] = &[FireState::Off, FireState::On];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> String {
        match self {
            FireState::Off => "off".into(),
            FireState::On => "on".into(),
        }
    }
}

/// A fire hazard placed in the world
#[derive(Debug, Clone)]
pub struct Fire {
    body: KinematicBody,
    state: FireState,
    animation_count: u32,
    animation_delay: u32,
    frame_index: usize,
    sheets: Arc<SpriteSheets<FireState>>,
}

impl Fire {
    /// Place an unlit fire showing its first `off` frame
    pub fn new(pos: IVec2, sheets: Arc<SpriteSheets<FireState>>, animation_delay: u32) -> Self {
        let size = sheets.frame(FireState::Off, 0).size();
        Self {
            body: KinematicBody::new(pos, size),
            state: FireState::Off,
            animation_count: 0,
            animation_delay: animation_delay.max(1),
            frame_index: 0,
            sheets,
        }
    }

    pub fn set_on(&mut self) {
        self.state = FireState::On;
    }

    pub fn set_off(&mut self) {
        self.state = FireState::Off;
    }

    pub fn state(&self) -> FireState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == FireState::On
    }

    pub fn animation_count(&self) -> u32 {
        self.animation_count
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame(&self) -> &Frame {
        self.sheets.frame(self.state, self.frame_index)
    }

    /// Advance the animation one tick. The counter wraps back to zero once
    /// it has run past the sequence so it never grows without bound.
    pub fn tick(&mut self) {
        let len = self.sheets.len(self.state);
        self.frame_index = (self.animation_count / self.animation_delay) as usize % len;
        self.animation_count += 1;

        let size = self.frame().size();
        self.body.resize(size);

        if (self.animation_count / self.animation_delay) as usize > len {
            self.animation_count = 0;
        }
    }
}

impl Collidable for Fire {
    fn rect(&self) -> Rect {
        self.body.rect
    }

    fn mask(&self) -> &Mask {
        self.frame().mask()
    }
}
