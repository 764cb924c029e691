//! Kinematic bodies and the two-stage overlap test
//!
//! Positions are whole pixels. Velocities are floats (the gravity ramp is
//! fractional); a move adds the velocity to the position and truncates the
//! sum toward zero.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::mask::Mask;

/// Integer axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Move so the bottom edge sits at `bottom`
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Move so the top edge sits at `top`
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn translated(&self, d: IVec2) -> Self {
        Self::new(self.x + d.x, self.y + d.y, self.w, self.h)
    }

    /// Strict intersection; rectangles sharing only an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Position, size and velocity shared by the player and world objects
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicBody {
    pub rect: Rect,
    pub vel: Vec2,
}

impl KinematicBody {
    pub fn new(pos: IVec2, size: IVec2) -> Self {
        Self {
            rect: Rect::from_pos_size(pos, size),
            vel: Vec2::ZERO,
        }
    }

    /// Move by exactly (dx, dy); no clamping, callers check legality
    #[inline]
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.rect.x += dx;
        self.rect.y += dy;
    }

    /// Apply one tick of velocity. The sum is truncated, not the velocity,
    /// so at positive coordinates a rise of 7.98 moves a full 8 pixels.
    #[inline]
    pub fn advance(&mut self) {
        self.rect.x = (self.rect.x as f32 + self.vel.x) as i32;
        self.rect.y = (self.rect.y as f32 + self.vel.y) as i32;
    }

    /// Keep the position, adopt a new size (frames may differ in size)
    pub fn resize(&mut self, size: IVec2) {
        self.rect.w = size.x;
        self.rect.h = size.y;
    }
}

/// Anything positioned with a pixel mask
pub trait Collidable {
    fn rect(&self) -> Rect;
    fn mask(&self) -> &Mask;
}

/// Overlap test between two collidables at their current positions
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    overlaps_at(a, IVec2::ZERO, b)
}

/// Overlap test with `a` displaced by `displacement`, leaving both untouched.
///
/// Bounding boxes reject first; the mask AND decides.
pub fn overlaps_at<A, B>(a: &A, displacement: IVec2, b: &B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let ra = a.rect().translated(displacement);
    let rb = b.rect();
    if !ra.intersects(&rb) {
        return false;
    }
    a.mask().overlaps(b.mask(), rb.pos() - ra.pos())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Solid {
        rect: Rect,
        mask: Mask,
    }

    impl Solid {
        fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
            Self {
                rect: Rect::new(x, y, w as i32, h as i32),
                mask: Mask::filled(w, h),
            }
        }
    }

    impl Collidable for Solid {
        fn rect(&self) -> Rect {
            self.rect
        }
        fn mask(&self) -> &Mask {
            &self.mask
        }
    }

    #[test]
    fn test_translate_is_exact() {
        let mut body = KinematicBody::new(IVec2::new(10, 20), IVec2::new(4, 4));
        body.translate(-15, 7);
        assert_eq!(body.rect.pos(), IVec2::new(-5, 27));
        assert_eq!(body.rect.size(), IVec2::new(4, 4));
    }

    #[test]
    fn test_advance_truncates_the_sum() {
        let mut body = KinematicBody::new(IVec2::new(10, 20), IVec2::new(4, 4));
        body.vel = Vec2::new(-2.7, 0.99);
        body.advance();
        // 7.3 -> 7 and 20.99 -> 20
        assert_eq!(body.rect.pos(), IVec2::new(7, 20));

        body.vel = Vec2::new(0.0, -7.98);
        body.advance();
        assert_eq!(body.rect.y, 12);
    }

    #[test]
    fn test_advance_below_origin_truncates_toward_zero() {
        let mut body = KinematicBody::new(IVec2::new(-10, -10), IVec2::new(4, 4));
        body.vel = Vec2::new(0.5, -0.5);
        body.advance();
        // -9.5 -> -9 and -10.5 -> -10
        assert_eq!(body.rect.pos(), IVec2::new(-9, -10));
    }

    #[test]
    fn test_edges_and_snaps() {
        let mut r = Rect::new(10, 10, 20, 30);
        assert_eq!((r.left(), r.right(), r.top(), r.bottom()), (10, 30, 10, 40));
        r.set_bottom(100);
        assert_eq!(r.y, 70);
        r.set_top(5);
        assert_eq!(r.bottom(), 35);
    }

    #[test]
    fn test_touching_rects_are_not_collided() {
        let a = Solid::new(0, 0, 10, 10);
        let b = Solid::new(10, 0, 10, 10);
        assert!(!overlaps(&a, &b));
        assert!(overlaps_at(&a, IVec2::new(1, 0), &b));
        // Probe leaves a untouched
        assert_eq!(a.rect.x, 0);
    }

    #[test]
    fn test_mask_decides_inside_bounding_box() {
        let a = Solid::new(0, 0, 10, 10);
        let mut b = Solid::new(5, 5, 10, 10);
        assert!(overlaps(&a, &b));
        // Hollow out the part of b that sits inside a
        b.mask = Mask::empty(10, 10);
        b.mask.set(9, 9, true);
        assert!(!overlaps(&a, &b));
    }
}
