//! Axis-separated collision resolution against static obstacles
//!
//! Horizontal movement is gated by probing: before the player's run
//! velocity is set, the world is checked twice the run speed to the left
//! and to the right. Vertical movement is resolved after the fact by
//! snapping out of whatever the player has sunk into. Horizontal always
//! resolves before vertical.

use glam::IVec2;

use super::body::{Collidable, overlaps, overlaps_at};
use super::object::WorldObject;
use super::player::Player;
use super::tick::TickInput;

/// Obstacles touched during one tick, as indices into the object list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contacts {
    /// First obstacle found by the left probe
    pub left: Option<usize>,
    /// First obstacle found by the right probe
    pub right: Option<usize>,
    /// Every obstacle resolved on the vertical axis, in object order
    pub vertical: Vec<usize>,
    /// A hazard was among the contacts and the player was hit
    pub hazard_hit: bool,
}

impl Contacts {
    /// All contacted indices: left, right, then vertical
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.left
            .into_iter()
            .chain(self.right)
            .chain(self.vertical.iter().copied())
    }
}

/// Index of the first obstacle `body` would overlap if moved by `dx`.
///
/// The body itself is not moved.
pub fn probe_horizontal<B>(body: &B, obstacles: &[WorldObject], dx: i32) -> Option<usize>
where
    B: Collidable + ?Sized,
{
    let displacement = IVec2::new(dx, 0);
    obstacles
        .iter()
        .position(|obj| overlaps_at(body, displacement, obj))
}

/// Push the player out of every obstacle it overlaps after moving `dy`.
///
/// Falling onto an obstacle lands on its top; rising into one bumps the
/// head on its bottom. Each obstacle is checked against the position left
/// by the previous snap.
pub fn resolve_vertical(player: &mut Player, obstacles: &[WorldObject], dy: f32) -> Vec<usize> {
    let mut contacted = Vec::new();
    for (idx, obj) in obstacles.iter().enumerate() {
        if !overlaps(player, obj) {
            continue;
        }
        if dy > 0.0 {
            player.snap_bottom(obj.rect().top());
            player.land();
        } else if dy < 0.0 {
            player.snap_top(obj.rect().bottom());
            player.hit_head();
        }
        contacted.push(idx);
    }
    contacted
}

/// Apply input against the world and resolve this tick's contacts.
///
/// Both probes run every tick regardless of input so the blocked flags
/// are always known. A hazard anywhere in the contact set hits the player
/// once.
pub fn handle_move(
    player: &mut Player,
    obstacles: &[WorldObject],
    input: &TickInput,
    speed: i32,
    probe_distance: i32,
) -> Contacts {
    player.stop_horizontal();

    let left = probe_horizontal(player, obstacles, -probe_distance);
    let right = probe_horizontal(player, obstacles, probe_distance);

    if input.move_left && left.is_none() {
        player.move_left(speed);
    }
    if input.move_right && right.is_none() {
        player.move_right(speed);
    }

    let vertical = resolve_vertical(player, obstacles, player.vel().y);

    let mut contacts = Contacts {
        left,
        right,
        vertical,
        hazard_hit: false,
    };
    if contacts.iter().any(|idx| obstacles[idx].is_hazard()) {
        player.make_hit();
        contacts.hazard_hit = true;
    }
    contacts
}
