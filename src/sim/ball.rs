//! Bouncing ball: gravity, screen-edge bounce and box collisions
//!
//! Each tick the ball:
//! 1. Accelerates downward when gravity is positive
//! 2. Integrates its position
//! 3. Separates itself from every overlapping physics object nearby
//! 4. Bounces off the screen edges, if a screen size is configured

use std::any::Any;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Axis, clamp_to_extent, reflect_axis, separate};
use super::object::{Behavior, Body, GameObject};
use super::rect::Rect;
use super::scene::SceneContext;
use crate::consts::{BALL_SIZE, DEFAULT_BOUNCE, NEARBY_RADIUS_FACTOR};
use crate::renderer::{Color, Shape, colors};

/// Construction parameters for a ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallConfig {
    pub size: Vec2,
    pub color: Color,
    /// Velocity kept on each rebound (0-1)
    pub bounce: f32,
    /// Downward acceleration (units/s²); zero or less disables gravity
    pub gravity: f32,
    pub velocity: Vec2,
    /// Screen extent to bounce inside. Both axes must be positive for edge
    /// bouncing; otherwise it is disabled.
    pub screen_size: Vec2,
    pub layer: i32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            size: BALL_SIZE,
            color: colors::BLUE,
            bounce: DEFAULT_BOUNCE,
            gravity: 0.0,
            velocity: Vec2::ZERO,
            screen_size: Vec2::ZERO,
            layer: 0,
        }
    }
}

/// Ball behavior. Velocity lives on the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub color: Color,
    pub bounce: f32,
    pub gravity: f32,
    pub screen_size: Vec2,
}

impl Ball {
    /// Build a ball object at `position`
    pub fn spawn(position: Vec2, config: BallConfig) -> GameObject {
        let mut body = Body::physics(position, config.size, config.velocity);
        body.layer = config.layer;
        GameObject::with_behavior(
            body,
            Ball {
                color: config.color,
                bounce: config.bounce,
                gravity: config.gravity,
                screen_size: config.screen_size,
            },
        )
    }

    /// Set the screen extent used for edge bouncing
    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
    }

    /// Whether edge bouncing is enabled
    #[inline]
    pub fn has_screen(&self) -> bool {
        self.screen_size.x > 0.0 && self.screen_size.y > 0.0
    }

    /// Radius used to look for collision candidates
    #[inline]
    pub fn search_radius(body: &Body) -> f32 {
        body.size.max_element() * NEARBY_RADIUS_FACTOR
    }

    /// Gravity and position integration
    pub fn integrate(&self, body: &mut Body, dt: f32) {
        let mut velocity = body.velocity.unwrap_or(Vec2::ZERO);
        if self.gravity > 0.0 {
            velocity.y += self.gravity * dt;
        }
        body.position += velocity * dt;
        body.velocity = Some(velocity);
    }

    /// Push out of `obstacle` along the shallower axis and reflect that axis.
    ///
    /// Returns the axis resolved, or `None` if the ball did not overlap.
    pub fn resolve_collision(&self, body: &mut Body, obstacle: &Rect) -> Option<Axis> {
        let separation = separate(&body.bounds(), obstacle)?;
        body.position = separation.position;
        let velocity = body.velocity.unwrap_or(Vec2::ZERO);
        body.velocity = Some(reflect_axis(velocity, separation.axis, self.bounce));
        Some(separation.axis)
    }

    /// Rebound off the screen edges (no-op without a screen size)
    pub fn bounce_off_screen(&self, body: &mut Body) {
        if !self.has_screen() {
            return;
        }
        let mut velocity = body.velocity.unwrap_or(Vec2::ZERO);

        let (x, hit_x) = clamp_to_extent(body.position.x, body.size.x, self.screen_size.x);
        if hit_x {
            velocity = reflect_axis(velocity, Axis::Horizontal, self.bounce);
            body.position.x = x;
        }

        let (y, hit_y) = clamp_to_extent(body.position.y, body.size.y, self.screen_size.y);
        if hit_y {
            velocity = reflect_axis(velocity, Axis::Vertical, self.bounce);
            body.position.y = y;
        }

        body.velocity = Some(velocity);
    }

    /// One full tick against a fixed set of obstacle bounds
    pub fn step(&self, body: &mut Body, dt: f32, obstacles: &[Rect]) {
        self.integrate(body, dt);
        for obstacle in obstacles {
            self.resolve_collision(body, obstacle);
        }
        self.bounce_off_screen(body);
    }
}

impl Behavior for Ball {
    fn update(&mut self, body: &mut Body, dt: f32, ctx: &mut SceneContext<'_>) {
        self.integrate(body, dt);

        // Collision response needs an owning scene to query
        if body.scene().is_some() {
            let obstacles: Vec<Rect> = ctx
                .find_nearby(body, Self::search_radius(body))
                .into_iter()
                .map(|(_, other)| other.body.bounds())
                .collect();
            for obstacle in &obstacles {
                if self.resolve_collision(body, obstacle).is_some() {
                    log::trace!("Ball {:?} bounced off {:?}", ctx.id(), obstacle);
                }
            }
        }

        self.bounce_off_screen(body);
    }

    fn draw(&self, _body: &Body) -> Shape {
        Shape::Ellipse { color: self.color }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
