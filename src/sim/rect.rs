//! Axis-aligned rectangle game objects
//!
//! Ball, bat and bricks are all the same shape: a rectangle with a top-left
//! position, a fixed size, a colour tag, a visibility flag and a pair of
//! direction signs used to reflect movement on contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Colour / identity tag of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Colour {
    /// The ball
    Red,
    /// The bat
    Gray,
    /// One-hit brick
    Blue,
    /// Reinforcement brick (second layer)
    DarkGray,
}

/// A rectangle in the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObj {
    /// Top-left corner
    pub pos: Vec2,
    size: Vec2,
    pub colour: Colour,
    pub visible: bool,
    /// Direction signs (each ±1)
    pub dir: Vec2,
}

impl GameObj {
    /// Create a visible object moving towards +x, +y
    pub fn new(x: f32, y: f32, width: f32, height: f32, colour: Colour) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            colour,
            visible: true,
            dir: Vec2::ONE,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Standard AABB test. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &GameObj) -> bool {
        !(self.pos.x >= other.right()
            || self.right() <= other.pos.x
            || self.pos.y >= other.bottom()
            || self.bottom() <= other.pos.y)
    }

    pub fn invert_x(&mut self) {
        self.dir.x = -self.dir.x;
    }

    pub fn invert_y(&mut self) {
        self.dir.y = -self.dir.y;
    }

    /// Move without bounds checks
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.pos += Vec2::new(dx, dy);
    }

    /// Move `speed` units along each axis in the current direction
    pub fn advance(&mut self, speed: f32) {
        self.pos += self.dir * speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> GameObj {
        GameObj::new(x, y, w, h, Colour::Blue)
    }

    #[test]
    fn test_overlap_basic() {
        let a = rect(100.0, 100.0, 50.0, 30.0);
        let b = rect(120.0, 110.0, 30.0, 30.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(-10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        // Same x span, far apart on y
        assert!(!a.overlaps(&rect(0.0, 50.0, 10.0, 10.0)));
    }

    #[test]
    fn test_invert_and_advance() {
        let mut ball = GameObj::new(10.0, 10.0, 30.0, 30.0, Colour::Red);
        ball.advance(3.0);
        assert_eq!(ball.pos, Vec2::new(13.0, 13.0));

        ball.invert_x();
        ball.advance(3.0);
        assert_eq!(ball.pos, Vec2::new(10.0, 16.0));

        ball.invert_y();
        ball.invert_y();
        assert_eq!(ball.dir, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_translate_is_unclamped() {
        let mut obj = rect(0.0, 0.0, 5.0, 5.0);
        obj.translate(-100.0, 2500.0);
        assert_eq!(obj.pos, Vec2::new(-100.0, 2500.0));
        assert_eq!(obj.size(), Vec2::new(5.0, 5.0));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_object_overlaps_itself(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let a = rect(x, y, w, h);
            prop_assert!(a.overlaps(&a.clone()));
        }

        #[test]
        fn prop_double_inversion_is_identity(sx in prop::bool::ANY, sy in prop::bool::ANY) {
            let mut obj = rect(0.0, 0.0, 1.0, 1.0);
            obj.dir = Vec2::new(if sx { 1.0 } else { -1.0 }, if sy { 1.0 } else { -1.0 });
            let before = obj.dir;
            obj.invert_x();
            obj.invert_x();
            obj.invert_y();
            obj.invert_y();
            prop_assert_eq!(obj.dir, before);
        }
    }
}
