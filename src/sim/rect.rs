//! Axis-aligned rectangle geometry for bounds, viewports and culling
//!
//! A rectangle is defined by:
//! - origin: top-left corner in world units
//! - size: extent along each axis (non-negative)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(width, height))
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

    /// Grow the rectangle by `margin` on every side
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.origin - Vec2::splat(margin),
            self.size + Vec2::splat(margin * 2.0),
        )
    }

    /// Check whether two rectangles overlap.
    ///
    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Per-axis penetration depth between two rectangles.
    ///
    /// Positive components mean the rectangles overlap on that axis.
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        let delta = self.center() - other.center();
        (self.size + other.size) / 2.0 - delta.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects_overlapping() {
        let a = Rect::from_xywh(0.0, 0.0, 20.0, 20.0);
        let b = Rect::from_xywh(10.0, 10.0, 20.0, 20.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = Rect::from_xywh(0.0, 0.0, 20.0, 20.0);
        let right = Rect::from_xywh(20.0, 0.0, 20.0, 20.0);
        let below = Rect::from_xywh(0.0, 20.0, 20.0, 20.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_rect_contained_intersects() {
        let outer = Rect::from_xywh(-100.0, -100.0, 200.0, 200.0);
        let inner = Rect::from_xywh(-1.0, -1.0, 2.0, 2.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_rect_expand() {
        let r = Rect::from_xywh(10.0, 20.0, 30.0, 40.0).expand(5.0);
        assert_eq!(r.origin, Vec2::new(5.0, 15.0));
        assert_eq!(r.size, Vec2::new(40.0, 50.0));
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::from_xywh(0.0, 0.0, 20.0, 20.0);
        let b = Rect::from_xywh(15.0, 5.0, 20.0, 20.0);
        let overlap = a.overlap(&b);
        assert!((overlap.x - 5.0).abs() < 0.001);
        assert!((overlap.y - 15.0).abs() < 0.001);
    }
}
