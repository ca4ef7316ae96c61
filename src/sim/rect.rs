//! Axis-aligned rectangle geometry
//!
//! Screen-space convention: origin at the top-left of the canvas, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center point (used by the autopilot)
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Check overlap with another rectangle
    pub fn overlaps(&self, other: &Rect) -> bool {
        collide(self, other)
    }
}

/// Returns true iff the two rectangles overlap.
///
/// Rectangles are separated when one lies entirely to one side of the other.
/// Separation uses `<=`, so rectangles that only share an edge do not collide.
pub fn collide(a: &Rect, b: &Rect) -> bool {
    let separated_x = a.right() <= b.left() || b.right() <= a.left();
    let separated_y = a.bottom() <= b.top() || b.bottom() <= a.top();
    !(separated_x || separated_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collide_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(collide(&a, &b));
        assert!(collide(&b, &a));
    }

    #[test]
    fn test_collide_separated() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!collide(&a, &b));

        // Same column, different rows
        let c = Rect::new(0.0, 30.0, 10.0, 10.0);
        assert!(!collide(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares a vertical edge
        assert!(!collide(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        // Shares a horizontal edge
        assert!(!collide(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Shares only a corner
        assert!(!collide(&a, &Rect::new(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_containment_collides() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(collide(&outer, &inner));
        assert!(collide(&inner, &outer));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..200.0, 0.5f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_collide_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(collide(&a, &b), collide(&b, &a));
        }

        #[test]
        fn prop_edge_neighbours_never_collide(a in rect_strategy(), w in 0.5f32..200.0, h in 0.5f32..200.0) {
            let right = Rect::new(a.right(), a.top(), w, h);
            let below = Rect::new(a.left(), a.bottom(), w, h);
            prop_assert!(!collide(&a, &right));
            prop_assert!(!collide(&a, &below));
        }
    }
}
