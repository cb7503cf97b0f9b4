//! Scene objects: shared body state plus a pluggable behavior
//!
//! Every object has a [`Body`] (position, size, activity, layer and an
//! optional velocity) and a boxed [`Behavior`] that decides how it moves and
//! how it is drawn. An object with a velocity is a physics object: it takes
//! part in proximity queries and collision response.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::scene::SceneContext;
use crate::consts::DEFAULT_OBJECT_SIZE;
use crate::renderer::{DrawCommand, Shape, colors};

slotmap::new_key_type! {
    /// Stable handle to an object owned by a scene
    pub struct ObjectId;
}

/// Non-owning handle to a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(u32);

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

impl SceneId {
    /// Allocate a process-unique scene id
    pub(crate) fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// State shared by every object kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner (world units)
    pub position: Vec2,
    /// Extent (world units, non-negative)
    pub size: Vec2,
    /// Set to false to remove the object at the end of the current update
    pub active: bool,
    /// Draw order (higher = in front)
    pub layer: i32,
    /// Units per second. `Some` marks a physics object.
    pub velocity: Option<Vec2>,
    /// Scene that adopted this object
    #[serde(skip)]
    scene: Option<SceneId>,
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Vec2::ZERO, DEFAULT_OBJECT_SIZE)
    }
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size: size.max(Vec2::ZERO),
            active: true,
            layer: 0,
            velocity: None,
            scene: None,
        }
    }

    /// A body that carries a velocity
    pub fn physics(position: Vec2, size: Vec2, velocity: Vec2) -> Self {
        Self {
            velocity: Some(velocity),
            ..Self::new(position, size)
        }
    }

    /// Axis-aligned bounds, derived on every call
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    #[inline]
    pub fn is_physics(&self) -> bool {
        self.velocity.is_some()
    }

    /// Bounding-box overlap test (shared edges do not count)
    pub fn intersects(&self, other: &Body) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// Scene that currently (or most recently) owned this body
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub(crate) fn adopt(&mut self, scene: SceneId) {
        self.scene = Some(scene);
    }
}

/// Per-kind logic for an object.
///
/// `update` may mutate only the object's own body and the scene's queues
/// (through the context). `draw` must not change simulation state.
pub trait Behavior: Any + fmt::Debug {
    fn update(&mut self, _body: &mut Body, _dt: f32, _ctx: &mut SceneContext<'_>) {}

    fn draw(&self, _body: &Body) -> Shape {
        Shape::Rect {
            color: colors::BLUE,
        }
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Behavior of an object with no logic of its own: drawn as a blue rectangle
#[derive(Debug, Clone, Copy, Default)]
pub struct Inert;

impl Behavior for Inert {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An object owned by a scene
#[derive(Debug)]
pub struct GameObject {
    pub body: Body,
    behavior: Box<dyn Behavior>,
}

impl Default for GameObject {
    /// An inactive inert object; never picked up by updates or queries
    fn default() -> Self {
        Self {
            body: Body {
                active: false,
                ..Body::default()
            },
            behavior: Box::new(Inert),
        }
    }
}

impl GameObject {
    /// Plain object with no behavior
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self::with_behavior(Body::new(position, size), Inert)
    }

    pub fn with_behavior(body: Body, behavior: impl Behavior) -> Self {
        Self {
            body,
            behavior: Box::new(behavior),
        }
    }

    pub fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) {
        self.behavior.update(&mut self.body, dt, ctx);
    }

    /// Describe how to draw the object's current state
    pub fn draw(&self) -> DrawCommand {
        DrawCommand::new(
            self.body.layer,
            self.body.bounds(),
            self.behavior.draw(&self.body),
        )
    }

    pub fn is<T: Behavior>(&self) -> bool {
        self.behavior.as_any().is::<T>()
    }

    pub fn behavior<T: Behavior>(&self) -> Option<&T> {
        self.behavior.as_any().downcast_ref::<T>()
    }

    pub fn behavior_mut<T: Behavior>(&mut self) -> Option<&mut T> {
        self.behavior.as_any_mut().downcast_mut::<T>()
    }
}
