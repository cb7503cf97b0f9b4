//! Engine settings and preferences
//!
//! Stored as JSON. Missing or unreadable files fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{CULL_MARGIN, FOLLOW_SMOOTHING};
use crate::sim::Camera;

/// Engine settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Camera ===
    /// Camera shake on impacts
    pub screen_shake: bool,
    /// Smoothing used by `Engine::follow` (0-1, 1 = snap)
    pub follow_smoothing: f32,
    /// Culling margin around the viewport at zoom 1 (world units)
    pub cull_margin: f32,
    /// Seed for shake offsets
    pub shake_seed: u64,

    // === Clock ===
    /// Delta reported for the first tick after start (seconds)
    pub first_tick_delta: f32,
    /// Upper bound on a single tick's delta (seconds); `None` = unbounded
    pub max_frame_delta: Option<f32>,

    // === Accessibility ===
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            follow_smoothing: FOLLOW_SMOOTHING,
            cull_margin: CULL_MARGIN,
            shake_seed: 0,

            first_tick_delta: 0.0,
            max_frame_delta: None,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Apply camera-related settings
    pub fn apply_to_camera(&self, camera: &mut Camera) {
        camera.shake_enabled = self.effective_screen_shake();
        camera.cull_margin = self.cull_margin;
        camera.reseed(self.shake_seed);
    }

    /// Clamp a raw host delta to the configured bounds
    pub fn clamp_delta(&self, delta: f32) -> f32 {
        let delta = delta.max(0.0);
        match self.max_frame_delta {
            Some(max) => delta.min(max.max(0.0)),
            None => delta,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());

        let mut camera = Camera::new();
        settings.apply_to_camera(&mut camera);
        camera.shake(10.0, 1.0);
        assert!(!camera.is_shaking());
    }

    #[test]
    fn test_apply_cull_margin() {
        let settings = Settings {
            cull_margin: 0.0,
            ..Default::default()
        };
        let mut camera = Camera::new();
        settings.apply_to_camera(&mut camera);
        assert_eq!(camera.cull_margin, 0.0);
    }

    #[test]
    fn test_clamp_delta() {
        let mut settings = Settings::default();
        assert_eq!(settings.clamp_delta(0.5), 0.5);
        assert_eq!(settings.clamp_delta(-0.1), 0.0);

        settings.max_frame_delta = Some(0.1);
        assert_eq!(settings.clamp_delta(0.5), 0.1);
        assert_eq!(settings.clamp_delta(0.05), 0.05);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "screen_shake": false }"#).unwrap();
        assert!(!settings.screen_shake);
        assert_eq!(settings.cull_margin, CULL_MARGIN);
        assert_eq!(settings.max_frame_delta, None);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("scene_core_settings_{}.json", std::process::id()));
        let settings = Settings {
            shake_seed: 77,
            max_frame_delta: Some(0.25),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("scene_core_settings_does_not_exist.json");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
