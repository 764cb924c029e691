//! Level state and construction
//!
//! A [`Level`] owns everything one session mutates: the player, the
//! ordered world objects and the camera. It is threaded through
//! [`tick`](super::tick::tick) by `&mut`, so each tick has a single writer.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::Collidable;
use super::camera::Camera;
use super::collision::Contacts;
use super::hazard::{Fire, FireState};
use super::object::{Block, WorldObject};
use super::player::{AnimState, Player, PlayerSheet, PlayerTuning};
use super::sprite::{Bitmap, Frame, SpriteSheets};
use crate::error::Result;
use crate::settings::Settings;

/// One entry in a level layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectSpec {
    Block { x: i32, y: i32 },
    Fire { x: i32, y: i32, on: bool },
}

/// Player spawn plus the ordered object list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub spawn: IVec2,
    pub objects: Vec<ObjectSpec>,
}

impl LevelLayout {
    /// The stock course: a long floor, a staircase of single raised
    /// blocks, and a lit fire near the spawn
    pub fn stock_course(settings: &Settings) -> Self {
        let bs = settings.block_size;
        let w = settings.viewport_width;
        let h = settings.viewport_height;

        // Floor division so the floor reaches a full screen left of the origin
        let mut objects: Vec<ObjectSpec> = ((-w).div_euclid(bs)..(w * 2).div_euclid(bs))
            .map(|i| ObjectSpec::Block { x: i * bs, y: h - bs })
            .collect();
        objects.extend([
            ObjectSpec::Block { x: 0, y: h - bs * 2 },
            ObjectSpec::Block { x: bs * 3, y: h - bs * 4 },
            ObjectSpec::Block { x: bs * 6, y: h - bs * 3 },
            ObjectSpec::Block { x: bs * 9, y: h - bs * 5 },
            ObjectSpec::Block { x: bs * 12, y: h - bs * 6 },
            ObjectSpec::Fire { x: 100, y: h - bs - 64, on: true },
        ]);

        Self {
            spawn: IVec2::new(100, 100),
            objects,
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Sprite tables and tiles shared by every entity of a kind
#[derive(Debug, Clone)]
pub struct Assets {
    pub player: Arc<SpriteSheets<PlayerSheet>>,
    pub fire: Arc<SpriteSheets<FireState>>,
    pub block: Arc<Frame>,
}

impl Assets {
    /// Flat stand-in artwork with the stock sprite sizes and frame
    /// counts, for headless runs and tests.
    ///
    /// The player is a 64×64 solid square. The unlit fire is a low 32×16
    /// ember at the bottom of a 32×64 frame, the lit fire fills the frame.
    pub fn placeholder(block_size: i32) -> Result<Self> {
        let player = SpriteSheets::from_fn(|key: PlayerSheet| {
            let frames = match key.state {
                AnimState::Idle => 11,
                AnimState::Run => 12,
                AnimState::Jump => 1,
                AnimState::DoubleJump => 6,
                AnimState::Fall => 1,
                AnimState::Hit => 7,
            };
            Some(vec![Frame::solid(64, 64); frames])
        })?;

        let fire = SpriteSheets::from_fn(|state| match state {
            FireState::Off => {
                let mut alpha = vec![0u8; 32 * 64];
                alpha[32 * 48..].fill(u8::MAX);
                Some(vec![Frame::from_bitmap(Bitmap::new(32, 64, alpha))])
            }
            FireState::On => Some(vec![Frame::solid(32, 64); 3]),
        })?;

        let bs = block_size.max(1) as u32;
        Ok(Self {
            player: Arc::new(player),
            fire: Arc::new(fire),
            block: Arc::new(Frame::solid(bs, bs)),
        })
    }
}

/// What a draw item depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Terrain,
    Hazard,
    Player,
}

/// One sprite for the render layer, already in screen space
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub kind: DrawKind,
    pub frame: &'a Frame,
    pub screen_pos: IVec2,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Level {
    pub settings: Settings,
    pub player: Player,
    /// Obstacles in insertion order; resolution order follows it
    pub objects: Vec<WorldObject>,
    pub camera: Camera,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Contacts resolved on the most recent tick
    pub last_contacts: Contacts,
}

impl Level {
    /// Build a level from a layout. Settings are validated here so a bad
    /// configuration fails before the first tick.
    pub fn new(settings: Settings, layout: &LevelLayout, assets: &Assets) -> Result<Self> {
        settings.validate()?;

        let objects: Vec<WorldObject> = layout
            .objects
            .iter()
            .map(|spec| match *spec {
                ObjectSpec::Block { x, y } => {
                    Block::new(IVec2::new(x, y), Arc::clone(&assets.block)).into()
                }
                ObjectSpec::Fire { x, y, on } => {
                    let mut fire = Fire::new(
                        IVec2::new(x, y),
                        Arc::clone(&assets.fire),
                        settings.animation_delay,
                    );
                    if on {
                        fire.set_on();
                    }
                    fire.into()
                }
            })
            .collect();

        let player = Player::new(
            layout.spawn,
            Arc::clone(&assets.player),
            PlayerTuning::from(&settings),
        );

        log::info!(
            "Level built: {} objects ({} hazards), spawn at ({}, {})",
            objects.len(),
            objects.iter().filter(|o| o.is_hazard()).count(),
            layout.spawn.x,
            layout.spawn.y
        );

        Ok(Self {
            camera: Camera::from_settings(&settings),
            settings,
            player,
            objects,
            time_ticks: 0,
            last_contacts: Contacts::default(),
        })
    }

    /// The stock course with the given settings and assets
    pub fn stock(settings: Settings, assets: &Assets) -> Result<Self> {
        let layout = LevelLayout::stock_course(&settings);
        Self::new(settings, &layout, assets)
    }

    pub fn hazards(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter().filter(|o| o.is_hazard())
    }

    /// Everything to draw this frame, back to front: objects, then player
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        let mut items: Vec<DrawItem<'_>> = self
            .objects
            .iter()
            .map(|obj| DrawItem {
                kind: if obj.is_hazard() {
                    DrawKind::Hazard
                } else {
                    DrawKind::Terrain
                },
                frame: obj.frame(),
                screen_pos: self.camera.to_screen(obj.rect().pos()),
            })
            .collect();
        items.push(DrawItem {
            kind: DrawKind::Player,
            frame: self.player.frame(),
            screen_pos: self.camera.to_screen(self.player.rect().pos()),
        });
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformerError;

    #[test]
    fn test_stock_course_layout() {
        let settings = Settings::default();
        let layout = LevelLayout::stock_course(&settings);
        // Floor tiles for i in -11..20 with the default sizes
        let floor = layout
            .objects
            .iter()
            .filter(|o| matches!(o, ObjectSpec::Block { y: 704, .. }))
            .count();
        assert_eq!(floor, 31);
        assert_eq!(layout.objects.len(), 37);
        assert_eq!(
            layout.objects.last(),
            Some(&ObjectSpec::Fire { x: 100, y: 640, on: true })
        );
        assert_eq!(layout.spawn, IVec2::new(100, 100));
    }

    #[test]
    fn test_layout_json_format() {
        let layout = LevelLayout {
            spawn: IVec2::new(1, 2),
            objects: vec![
                ObjectSpec::Block { x: 0, y: 10 },
                ObjectSpec::Fire { x: 5, y: 6, on: false },
            ],
        };
        let json = serde_json::to_string(&layout).unwrap();
        assert!(json.contains(r#""type":"block""#));
        assert!(json.contains(r#""type":"fire""#));
        let back: LevelLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn test_level_builds_stock_course() {
        let settings = Settings::default();
        let assets = Assets::placeholder(settings.block_size).unwrap();
        let level = Level::stock(settings, &assets).unwrap();
        assert_eq!(level.objects.len(), 37);
        assert_eq!(level.hazards().count(), 1);
        let fire = level.hazards().next().and_then(|o| o.as_fire()).unwrap();
        assert!(fire.is_on());
        assert_eq!(level.camera.offset_x, 0);
    }

    #[test]
    fn test_invalid_settings_fail_construction() {
        let settings = Settings {
            animation_delay: 0,
            ..Default::default()
        };
        let assets = Assets::placeholder(96).unwrap();
        assert!(Level::stock(settings, &assets).is_err());
    }

    #[test]
    fn test_overflowing_hit_duration_fails_construction() {
        let settings: Settings =
            serde_json::from_str(r#"{ "fps": 100000, "hit_duration_secs": 100000 }"#).unwrap();
        let assets = Assets::placeholder(settings.block_size).unwrap();
        let layout = LevelLayout::stock_course(&settings);
        let err = Level::new(settings, &layout, &assets).unwrap_err();
        assert!(matches!(err, PlatformerError::InvalidSettings(_)));
    }

    #[test]
    fn test_layout_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "pixel_platformer_layout_{}.json",
            std::process::id()
        ));
        let layout = LevelLayout::stock_course(&Settings::default());
        layout.save_to(&path).unwrap();
        let loaded = LevelLayout::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, layout);
    }

    #[test]
    fn test_draw_list_applies_camera() {
        let settings = Settings::default();
        let assets = Assets::placeholder(settings.block_size).unwrap();
        let mut level = Level::stock(settings, &assets).unwrap();
        level.camera.offset_x = 40;
        let items = level.draw_list();
        assert_eq!(items.len(), 38);
        let player = items.last().unwrap();
        assert_eq!(player.kind, DrawKind::Player);
        assert_eq!(player.screen_pos, IVec2::new(60, 100));
        assert_eq!(items[0].screen_pos, IVec2::new(-1056 - 40, 704));
    }
}
