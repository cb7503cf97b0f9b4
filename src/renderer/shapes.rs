//! Draw descriptions for 2D primitives

use serde::{Deserialize, Serialize};

use super::Color;
use crate::sim::Rect;

/// What to paint inside a draw command's bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled rectangle covering the bounds
    Rect { color: Color },
    /// Filled ellipse inscribed in the bounds
    Ellipse { color: Color },
    /// Text anchored at the bounds origin
    Text {
        text: String,
        color: Color,
        font_size: f32,
    },
}

/// A single drawable, in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub layer: i32,
    pub bounds: Rect,
    pub shape: Shape,
}

impl DrawCommand {
    pub fn new(layer: i32, bounds: Rect, shape: Shape) -> Self {
        Self {
            layer,
            bounds,
            shape,
        }
    }
}
