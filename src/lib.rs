//! Scene Core - a frame-driven 2D scene simulation
//!
//! Core modules:
//! - `sim`: Objects, scene lifecycle, collisions and camera
//! - `engine`: Host-clock driven loop around one active scene
//! - `renderer`: Draw descriptions handed to an external renderer
//! - `settings`: Data-driven engine configuration

pub mod engine;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::{Engine, InputEvent, Key};
pub use renderer::{DrawCommand, Frame, Shape, ViewTransform};
pub use settings::Settings;
pub use sim::{
    Ball, BallConfig, Block, BlockConfig, Camera, GameObject, Label, LabelConfig, Rect, Scene, SceneHooks,
};

/// Engine configuration constants
pub mod consts {
    use glam::Vec2;

    /// Camera zoom bounds
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 10.0;
    /// Extra world units around the viewport kept visible at zoom 1 (avoids pop-in)
    pub const CULL_MARGIN: f32 = 50.0;

    /// Default size of a plain object
    pub const DEFAULT_OBJECT_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    pub const BALL_SIZE: Vec2 = Vec2::new(20.0, 20.0);
    pub const BLOCK_SIZE: Vec2 = Vec2::new(40.0, 40.0);
    pub const LABEL_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const DEFAULT_FONT_SIZE: f32 = 16.0;

    /// Velocity retained on each rebound
    pub const DEFAULT_BOUNCE: f32 = 0.8;
    /// Collision candidates are searched within this many times the larger extent
    pub const NEARBY_RADIUS_FACTOR: f32 = 3.0;
    /// Gap left between separated boxes
    pub const SEPARATION_GAP: f32 = 1.0;

    /// Default camera follow smoothing
    pub const FOLLOW_SMOOTHING: f32 = 0.1;
    /// Nominal host frame interval (60 Hz)
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;
}
