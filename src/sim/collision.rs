//! Collision response for axis-aligned boxes
//!
//! Overlapping boxes are separated along the axis with the smaller
//! penetration, and only that axis's velocity is reflected.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::SEPARATION_GAP;

/// Axis along which a collision is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Result of separating a moving box from an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    /// Axis the mover was pushed along
    pub axis: Axis,
    /// Mover's new top-left (unchanged on the other axis)
    pub position: Vec2,
}

/// Push `mover` just outside `obstacle` along the axis of least overlap.
///
/// The mover ends up `SEPARATION_GAP` units past the obstacle's edge, on the
/// side its center is on. When both overlaps are equal the horizontal axis
/// is used. Returns `None` when the boxes do not intersect.
pub fn separate(mover: &Rect, obstacle: &Rect) -> Option<Separation> {
    if !mover.intersects(obstacle) {
        return None;
    }

    let delta = mover.center() - obstacle.center();
    let overlap = mover.overlap(obstacle);
    let mut position = mover.origin;

    let axis = if overlap.y < overlap.x {
        position.y = if delta.y > 0.0 {
            // Mover is below, push down
            obstacle.max().y + SEPARATION_GAP
        } else {
            obstacle.min().y - mover.size.y - SEPARATION_GAP
        };
        Axis::Vertical
    } else {
        position.x = if delta.x > 0.0 {
            // Mover is to the right, push right
            obstacle.max().x + SEPARATION_GAP
        } else {
            obstacle.min().x - mover.size.x - SEPARATION_GAP
        };
        Axis::Horizontal
    };

    Some(Separation { axis, position })
}

/// Reflect one velocity component, scaled by `bounce`
#[inline]
pub fn reflect_axis(velocity: Vec2, axis: Axis, bounce: f32) -> Vec2 {
    match axis {
        Axis::Horizontal => Vec2::new(velocity.x * -bounce, velocity.y),
        Axis::Vertical => Vec2::new(velocity.x, velocity.y * -bounce),
    }
}

/// Keep a box inside `[0, extent - size]` on one axis.
///
/// Returns the clamped coordinate and whether the box touched or crossed a
/// boundary (which should reflect the velocity on that axis).
pub fn clamp_to_extent(position: f32, size: f32, extent: f32) -> (f32, bool) {
    let limit = extent - size;
    let hit = position <= 0.0 || position >= limit;
    (position.min(limit).max(0.0), hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separate_miss() {
        let ball = Rect::from_xywh(0.0, 0.0, 20.0, 20.0);
        let wall = Rect::from_xywh(100.0, 0.0, 20.0, 20.0);
        assert!(separate(&ball, &wall).is_none());
    }

    #[test]
    fn test_separate_horizontal_from_left() {
        // Shallow horizontal overlap (4), deep vertical overlap (20)
        let ball = Rect::from_xywh(84.0, 10.0, 20.0, 20.0);
        let wall = Rect::from_xywh(100.0, 0.0, 40.0, 40.0);
        let sep = separate(&ball, &wall).unwrap();
        assert_eq!(sep.axis, Axis::Horizontal);
        assert_eq!(sep.position, Vec2::new(100.0 - 20.0 - SEPARATION_GAP, 10.0));
    }

    #[test]
    fn test_separate_horizontal_from_right() {
        let ball = Rect::from_xywh(136.0, 10.0, 20.0, 20.0);
        let wall = Rect::from_xywh(100.0, 0.0, 40.0, 40.0);
        let sep = separate(&ball, &wall).unwrap();
        assert_eq!(sep.axis, Axis::Horizontal);
        assert_eq!(sep.position, Vec2::new(140.0 + SEPARATION_GAP, 10.0));
    }

    #[test]
    fn test_separate_vertical_landing_on_top() {
        let ball = Rect::from_xywh(110.0, -15.0, 20.0, 20.0);
        let floor = Rect::from_xywh(0.0, 0.0, 400.0, 40.0);
        let sep = separate(&ball, &floor).unwrap();
        assert_eq!(sep.axis, Axis::Vertical);
        assert_eq!(sep.position, Vec2::new(110.0, -20.0 - SEPARATION_GAP));
    }

    #[test]
    fn test_separate_vertical_from_below() {
        let ball = Rect::from_xywh(110.0, 35.0, 20.0, 20.0);
        let ceiling = Rect::from_xywh(0.0, 0.0, 400.0, 40.0);
        let sep = separate(&ball, &ceiling).unwrap();
        assert_eq!(sep.axis, Axis::Vertical);
        assert_eq!(sep.position, Vec2::new(110.0, 40.0 + SEPARATION_GAP));
    }

    #[test]
    fn test_equal_overlap_resolves_horizontally() {
        // Corner overlap of 5 on both axes
        let ball = Rect::from_xywh(15.0, 15.0, 20.0, 20.0);
        let other = Rect::from_xywh(0.0, 0.0, 20.0, 20.0);
        let sep = separate(&ball, &other).unwrap();
        assert_eq!(sep.axis, Axis::Horizontal);
        assert_eq!(sep.position, Vec2::new(20.0 + SEPARATION_GAP, 15.0));
    }

    #[test]
    fn test_reflect_axis() {
        let v = Vec2::new(100.0, -50.0);
        assert_eq!(reflect_axis(v, Axis::Horizontal, 0.8), Vec2::new(-80.0, -50.0));
        assert_eq!(reflect_axis(v, Axis::Vertical, 0.5), Vec2::new(100.0, 25.0));
    }

    #[test]
    fn test_clamp_to_extent() {
        assert_eq!(clamp_to_extent(50.0, 20.0, 200.0), (50.0, false));
        assert_eq!(clamp_to_extent(190.0, 20.0, 200.0), (180.0, true));
        assert_eq!(clamp_to_extent(-3.0, 20.0, 200.0), (0.0, true));
        assert_eq!(clamp_to_extent(0.0, 20.0, 200.0), (0.0, true));
    }
}
