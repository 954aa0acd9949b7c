//! Axis-Aligned Rectangles
//!
//! Collision predicate shared by obstacle blocking and item interaction.

use serde::{Serialize, Deserialize};

use super::vec2::Vec2;

/// Axis-aligned rectangle: top-left position plus size.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub position: Vec2,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its corner and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            width,
            height,
        }
    }

    /// Create a rectangle at a position.
    #[inline]
    pub const fn at(position: Vec2, width: f32, height: f32) -> Self {
        Self { position, width, height }
    }

    /// Same size, moved by `delta`.
    #[inline]
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            position: self.position + delta,
            ..self
        }
    }

    /// Centre point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Check whether two rectangles overlap.
    ///
    /// Inclusive on every edge: rectangles that share an edge with zero gap
    /// count as colliding.
    #[inline]
    pub fn collides(&self, other: &Rect) -> bool {
        self.position.x + self.width >= other.position.x
            && self.position.x <= other.position.x + other.width
            && self.position.y + self.height >= other.position.y
            && self.position.y <= other.position.y + other.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects_collide() {
        let a = Rect::new(0.0, 0.0, 64.0, 64.0);
        let b = Rect::new(32.0, 32.0, 64.0, 64.0);
        assert!(a.collides(&b));
    }

    #[test]
    fn test_shared_edge_collides() {
        let a = Rect::new(0.0, 0.0, 64.0, 64.0);
        let right = Rect::new(64.0, 0.0, 64.0, 64.0);
        let below = Rect::new(0.0, 64.0, 64.0, 64.0);
        let corner = Rect::new(64.0, 64.0, 64.0, 64.0);
        assert!(a.collides(&right));
        assert!(a.collides(&below));
        assert!(a.collides(&corner));
    }

    #[test]
    fn test_gap_does_not_collide() {
        let a = Rect::new(0.0, 0.0, 64.0, 64.0);
        let b = Rect::new(65.0, 0.0, 64.0, 64.0);
        let c = Rect::new(0.0, 64.5, 64.0, 64.0);
        assert!(!a.collides(&b));
        assert!(!a.collides(&c));
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        let a = Rect::new(0.0, 0.0, 64.0, 64.0);
        let b = Rect::new(10.0, 200.0, 64.0, 64.0);
        assert!(!a.collides(&b));
    }

    #[test]
    fn test_translated_and_center() {
        let r = Rect::new(100.0, 100.0, 64.0, 64.0);
        let moved = r.translated(Vec2::new(0.0, 3.0));
        assert_eq!(moved, Rect::new(100.0, 103.0, 64.0, 64.0));
        assert_eq!(r.center(), Vec2::new(132.0, 132.0));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500i32..500, -500i32..500, 1i32..200, 1i32..200)
            .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(a.collides(&b), b.collides(&a));
        }

        #[test]
        fn prop_rect_collides_with_itself(a in rect_strategy()) {
            prop_assert!(a.collides(&a));
        }

        #[test]
        fn prop_touching_neighbours_collide(a in rect_strategy(), w in 1i32..200, h in 1i32..200) {
            let right = Rect::new(a.position.x + a.width, a.position.y, w as f32, h as f32);
            let below = Rect::new(a.position.x, a.position.y + a.height, w as f32, h as f32);
            prop_assert!(a.collides(&right));
            prop_assert!(a.collides(&below));
        }
    }
}
