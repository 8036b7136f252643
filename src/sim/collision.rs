//! Collision detection
//!
//! Everything in the game is an axis-aligned box, so the only test needed is
//! AABB overlap. Bounds are open: boxes that merely touch do not collide.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `y` growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if the interiors of the two rectangles intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Strict AABB overlap test on both axes
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_corner() {
        let a = Rect::new(0.0, 0.0, 40.0, 60.0);
        let b = Rect::new(39.0, 59.0, 40.0, 60.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 40.0, 60.0);
        let b = Rect::new(40.0, 60.0, 40.0, 60.0);
        assert!(!overlaps(&a, &b));

        // Sharing only a vertical edge
        let c = Rect::new(40.0, 0.0, 40.0, 60.0);
        assert!(!a.overlaps(&c));

        // Sharing only a horizontal edge
        let d = Rect::new(0.0, 60.0, 40.0, 60.0);
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 40.0, 60.0);
        // Same column, far below
        assert!(!a.overlaps(&Rect::new(0.0, 200.0, 40.0, 60.0)));
        // Same row, far right
        assert!(!a.overlaps(&Rect::new(200.0, 0.0, 40.0, 60.0)));
    }

    #[test]
    fn test_containment() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
