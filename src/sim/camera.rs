//! 2D camera: world/screen projection, follow, bounds and shake
//!
//! `position` is the world-space top-left of the viewport. The viewport's
//! world extent is `screen_size / zoom`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::{CULL_MARGIN, MAX_ZOOM, MIN_ZOOM};
use crate::renderer::ViewTransform;

/// Transient shake state. Active while `timer < duration`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Shake {
    intensity: f32,
    duration: f32,
    timer: f32,
}

impl Shake {
    #[inline]
    fn is_active(&self) -> bool {
        self.timer < self.duration
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space top-left of the visible viewport
    pub position: Vec2,
    zoom: f32,
    /// Screen extent in pixels, refreshed by the render path every frame
    pub screen_size: Vec2,
    /// Culling margin at zoom 1 (world units)
    pub cull_margin: f32,
    /// When false, `shake` requests are ignored
    pub shake_enabled: bool,
    shake: Shake,
    rng: Pcg32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera whose shake offsets come from a seeded RNG
    pub fn with_seed(seed: u64) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            screen_size: Vec2::ZERO,
            cull_margin: CULL_MARGIN,
            shake_enabled: true,
            shake: Shake::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Restart the shake RNG from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set zoom, clamped to [`MIN_ZOOM`, `MAX_ZOOM`]. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Visible world extent
    #[inline]
    pub fn viewport_size(&self) -> Vec2 {
        self.screen_size / self.zoom
    }

    /// Visible world rectangle
    pub fn viewport(&self) -> Rect {
        Rect::new(self.position, self.viewport_size())
    }

    /// Transform handed to the renderer: translate by -position, scale by zoom
    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform {
            translation: -self.position,
            scale: self.zoom,
        }
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.position) * self.zoom
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom + self.position
    }

    /// Viewport top-left that puts `target` at the center of the screen
    fn top_left_centering(&self, target: Vec2) -> Vec2 {
        target - self.viewport_size() / 2.0
    }

    /// Ease toward centering `target`. `smoothing` of 1.0 snaps.
    ///
    /// Out-of-range smoothing is used as given.
    pub fn follow(&mut self, target: Vec2, smoothing: f32) {
        let goal = self.top_left_centering(target);
        // position + (goal - position) * s, arranged so s == 1 lands exactly on goal
        self.position = self.position * (1.0 - smoothing) + goal * smoothing;
    }

    /// Center `target` immediately
    pub fn snap_to(&mut self, target: Vec2) {
        self.position = self.top_left_centering(target);
    }

    /// Keep the viewport inside `bounds`.
    ///
    /// On an axis where the viewport is larger than `bounds`, the position is
    /// pinned to the minimum edge.
    pub fn constrain_to(&mut self, bounds: Rect) {
        let view = self.viewport_size();
        let (min, max) = (bounds.min(), bounds.max());
        self.position.x = self.position.x.min(max.x - view.x).max(min.x);
        self.position.y = self.position.y.min(max.y - view.y).max(min.y);
    }

    /// Culling test against the viewport grown by `cull_margin / zoom`
    pub fn is_visible(&self, bounds: &Rect) -> bool {
        let margin = self.cull_margin / self.zoom;
        self.viewport().expand(margin).intersects(bounds)
    }

    /// Start a shake, restarting any shake in progress.
    ///
    /// Intensity is clamped to `[0, f32::MAX]`; NaN counts as zero.
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        if !self.shake_enabled {
            log::trace!("Camera shake suppressed");
            return;
        }
        self.shake = Shake {
            intensity: intensity.max(0.0).min(f32::MAX),
            duration: duration.max(0.0),
            timer: 0.0,
        };
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_active()
    }

    /// Advance the shake timer and jitter the position.
    ///
    /// The offset is not undone when the shake ends; the camera keeps
    /// whatever drift the shake produced.
    pub fn update_shake(&mut self, dt: f32) {
        if !self.shake.is_active() {
            return;
        }
        self.shake.timer += dt;

        let progress = self.shake.timer / self.shake.duration;
        let current = self.shake.intensity * (1.0 - progress);

        // Unit offsets scaled afterwards: a range of +-current overflows for huge intensities
        if current > 0.0 && current.is_finite() {
            let offset = Vec2::new(
                self.rng.random_range(-1.0..=1.0),
                self.rng.random_range(-1.0..=1.0),
            );
            self.position += offset * current;
        }
    }
}
