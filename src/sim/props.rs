//! Static scene props: blocks and text labels

use std::any::Any;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::object::{Behavior, Body, GameObject};
use crate::consts::{BLOCK_SIZE, DEFAULT_FONT_SIZE, LABEL_SIZE};
use crate::renderer::{Color, Shape, colors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockConfig {
    pub size: Vec2,
    pub color: Color,
    /// Solid blocks carry a (zero) velocity so balls collide with them
    pub solid: bool,
    pub layer: i32,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            size: BLOCK_SIZE,
            color: colors::GRAY,
            solid: false,
            layer: 0,
        }
    }
}

/// A filled rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub color: Color,
}

impl Block {
    pub fn spawn(position: Vec2, config: BlockConfig) -> GameObject {
        let mut body = if config.solid {
            Body::physics(position, config.size, Vec2::ZERO)
        } else {
            Body::new(position, config.size)
        };
        body.layer = config.layer;
        GameObject::with_behavior(body, Block { color: config.color })
    }
}

impl Behavior for Block {
    fn draw(&self, _body: &Body) -> Shape {
        Shape::Rect { color: self.color }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    pub color: Color,
    pub font_size: f32,
    pub layer: i32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            color: colors::WHITE,
            font_size: DEFAULT_FONT_SIZE,
            layer: 0,
        }
    }
}

/// A line of text anchored at the body's top-left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub color: Color,
    pub font_size: f32,
}

impl Label {
    pub fn spawn(text: impl Into<String>, position: Vec2, config: LabelConfig) -> GameObject {
        let mut body = Body::new(position, LABEL_SIZE);
        body.layer = config.layer;
        GameObject::with_behavior(
            body,
            Label {
                text: text.into(),
                color: config.color,
                font_size: config.font_size,
            },
        )
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Behavior for Label {
    fn draw(&self, _body: &Body) -> Shape {
        Shape::Text {
            text: self.text.clone(),
            color: self.color,
            font_size: self.font_size,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
