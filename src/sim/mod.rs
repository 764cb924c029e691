//! Deterministic simulation module
//!
//! All motion, collision and animation logic lives here. This module must
//! be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (object insertion order)
//! - No rendering or platform dependencies

pub mod body;
pub mod camera;
pub mod collision;
pub mod hazard;
pub mod mask;
pub mod object;
pub mod player;
pub mod sprite;
pub mod state;
pub mod tick;

pub use body::{Collidable, KinematicBody, Rect, overlaps, overlaps_at};
pub use camera::{Camera, scroll_step};
pub use collision::{Contacts, handle_move, probe_horizontal, resolve_vertical};
pub use hazard::{Fire, FireState};
pub use mask::Mask;
pub use object::{Block, ObjectKind, WorldObject};
pub use player::{AnimState, Facing, Player, PlayerSheet, PlayerTuning};
pub use sprite::{Bitmap, Frame, SheetKey, SpriteSheets};
pub use state::{Assets, DrawItem, DrawKind, Level, LevelLayout, ObjectSpec};
pub use tick::{TickInput, tick};
