//! Renderer boundary
//!
//! The simulation never paints pixels. Once per frame the scene hands the
//! external renderer a [`Frame`]: a camera-derived transform and a
//! layer-sorted list of draw descriptions.

pub mod color;
pub mod shapes;

pub use color::{Color, colors, random_color};
pub use shapes::{DrawCommand, Shape};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Affine world-to-screen transform: translate by `translation`, then scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Translation applied first (the negated camera position)
    pub translation: Vec2,
    /// Uniform scale applied after translation (camera zoom)
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    /// Map a world-space point into screen space
    #[inline]
    pub fn apply(&self, world: Vec2) -> Vec2 {
        (world + self.translation) * self.scale
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    pub transform: ViewTransform,
    /// Draw descriptions, ascending by layer
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
