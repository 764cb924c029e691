//! Static world objects: terrain blocks and hazards

use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Collidable, KinematicBody, Rect};
use super::hazard::Fire;
use super::mask::Mask;
use super::sprite::Frame;

/// What touching an object does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Plain solid ground
    Terrain,
    /// Solid, and puts the player into the hit state
    Hazard,
}

/// A solid terrain tile
#[derive(Debug, Clone)]
pub struct Block {
    body: KinematicBody,
    frame: Arc<Frame>,
}

impl Block {
    pub fn new(pos: IVec2, frame: Arc<Frame>) -> Self {
        Self {
            body: KinematicBody::new(pos, frame.size()),
            frame,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

impl Collidable for Block {
    fn rect(&self) -> Rect {
        self.body.rect
    }

    fn mask(&self) -> &Mask {
        self.frame.mask()
    }
}

/// Anything placed in the level besides the player
#[derive(Debug, Clone)]
pub enum WorldObject {
    Block(Block),
    Fire(Fire),
}

impl WorldObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            WorldObject::Block(_) => ObjectKind::Terrain,
            WorldObject::Fire(_) => ObjectKind::Hazard,
        }
    }

    #[inline]
    pub fn is_hazard(&self) -> bool {
        self.kind() == ObjectKind::Hazard
    }

    /// Semantic label, if the object has one
    pub fn name(&self) -> Option<&'static str> {
        match self {
            WorldObject::Block(_) => None,
            WorldObject::Fire(_) => Some("fire"),
        }
    }

    /// Frame to draw (and collide with)
    pub fn frame(&self) -> &Frame {
        match self {
            WorldObject::Block(b) => b.frame(),
            WorldObject::Fire(f) => f.frame(),
        }
    }

    /// Per-tick animation; terrain is inert
    pub fn tick(&mut self) {
        if let WorldObject::Fire(fire) = self {
            fire.tick();
        }
    }

    pub fn as_fire(&self) -> Option<&Fire> {
        match self {
            WorldObject::Fire(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_fire_mut(&mut self) -> Option<&mut Fire> {
        match self {
            WorldObject::Fire(f) => Some(f),
            _ => None,
        }
    }
}

impl Collidable for WorldObject {
    fn rect(&self) -> Rect {
        match self {
            WorldObject::Block(b) => b.rect(),
            WorldObject::Fire(f) => f.rect(),
        }
    }

    fn mask(&self) -> &Mask {
        match self {
            WorldObject::Block(b) => b.mask(),
            WorldObject::Fire(f) => f.mask(),
        }
    }
}

impl From<Block> for WorldObject {
    fn from(block: Block) -> Self {
        WorldObject::Block(block)
    }
}

impl From<Fire> for WorldObject {
    fn from(fire: Fire) -> Self {
        WorldObject::Fire(fire)
    }
}
