//! Axis-aligned rectangle geometry
//!
//! Vectors are `glam::Vec2`; this module only adds the box type the
//! collision checks are written against.
//!
//! Boundary convention:
//! - `within` is closed: a rectangle touching the outer edge is still inside
//! - `overlaps` is strict: rectangles that only share an edge do not overlap

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box defined by its top-left origin and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` whose centre is `center`
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// True iff every corner of `self` lies inside `outer` (closed bounds)
    pub fn within(&self, outer: &Rect) -> bool {
        let (min, max) = (self.min(), self.max());
        let (outer_min, outer_max) = (outer.min(), outer.max());

        min.x >= outer_min.x && min.y >= outer_min.y && max.x <= outer_max.x && max.y <= outer_max.y
    }

    /// True iff the intersection has positive length on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (min, max) = (self.min(), self.max());
        let (other_min, other_max) = (other.min(), other.max());

        min.x < other_max.x && other_min.x < max.x && min.y < other_max.y && other_min.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..300.0, 0.5f32..300.0)
            .prop_map(|(x, y, w, h)| Rect::new(Vec2::new(x, y), Vec2::new(w, h)))
    }

    #[test]
    fn test_centered_origin() {
        let rect = Rect::centered(Vec2::new(10.0, 20.0), Vec2::new(8.0, 4.0));
        assert_eq!(rect.origin, Vec2::new(6.0, 18.0));
        assert_eq!(rect.center(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_within_touching_edge_is_inside() {
        let outer = Rect::new(Vec2::ZERO, Vec2::new(240.0, 240.0));
        let inner = Rect::new(Vec2::new(232.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(inner.within(&outer));

        let poking_out = Rect::new(Vec2::new(233.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(!poking_out.within(&outer));

        let above = Rect::centered(Vec2::new(120.0, 3.0), Vec2::new(8.0, 8.0));
        assert!(!above.within(&outer));
    }

    #[test]
    fn test_overlaps_touching_edge_is_not_overlap() {
        let a = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));

        let c = Rect::new(Vec2::new(9.5, 9.5), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_overlaps_contained() {
        let outer = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let inner = Rect::centered(Vec2::new(50.0, 50.0), Vec2::new(4.0, 4.0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    proptest! {
        #[test]
        fn prop_overlaps_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_within_is_reflexive(a in rect_strategy()) {
            prop_assert!(a.within(&a));
        }

        #[test]
        fn prop_within_implies_overlap(a in rect_strategy(), b in rect_strategy()) {
            if a.within(&b) {
                prop_assert!(a.overlaps(&b));
            }
        }
    }
}
