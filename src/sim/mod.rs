//! Simulation module
//!
//! Everything that advances or queries the scene lives here:
//! - Objects and their behaviors
//! - Scene lifecycle with deferred add/remove
//! - Camera projection, follow and shake
//! - Axis-aligned collision response
//!
//! No rendering or platform dependencies.

pub mod ball;
pub mod camera;
pub mod collision;
pub mod object;
pub mod props;
pub mod rect;
pub mod scene;

pub use ball::{Ball, BallConfig};
pub use camera::Camera;
pub use collision::{Axis, Separation, clamp_to_extent, reflect_axis, separate};
pub use object::{Behavior, Body, GameObject, Inert, ObjectId, SceneId};
pub use props::{Block, BlockConfig, Label, LabelConfig};
pub use rect::Rect;
pub use scene::{Scene, SceneContext, SceneHooks};
