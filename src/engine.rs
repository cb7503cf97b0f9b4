//! Engine loop
//!
//! Holds one active scene, turns host timestamps into frame deltas and
//! forwards update, render and input calls. Everything is dropped silently
//! while the engine is stopped or has no scene.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::Frame;
use crate::settings::Settings;
use crate::sim::{ObjectId, Scene};

/// Opaque key symbol from the host input layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key(pub String);

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key(name.to_owned())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer or drag location in screen space
    Pointer(Vec2),
    KeyDown(Key),
    KeyUp(Key),
}

#[derive(Debug, Default)]
pub struct Engine {
    scene: Option<Scene>,
    running: bool,
    /// Host timestamp (seconds) of the previous tick
    last_timestamp: Option<f64>,
    settings: Settings,
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Start the loop. Runs the scene's setup; no-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_timestamp = None;
        log::info!("Engine started");

        if let Some(scene) = self.scene.as_mut() {
            scene.setup();
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("Engine stopped");
        }
        self.running = false;
    }

    /// Install a scene, returning the previous one.
    ///
    /// The scene's setup runs immediately if the engine is running.
    pub fn set_scene(&mut self, mut scene: Scene) -> Option<Scene> {
        self.settings.apply_to_camera(&mut scene.camera);
        log::info!("Scene {:?} installed", scene.id());

        let previous = self.scene.replace(scene);
        if self.running {
            if let Some(scene) = self.scene.as_mut() {
                scene.setup();
            }
        }
        previous
    }

    /// Seconds since the previous tick, bounded by settings
    fn frame_delta(&mut self, timestamp: f64) -> f32 {
        let raw = match self.last_timestamp {
            Some(previous) => (timestamp - previous) as f32,
            None => self.settings.first_tick_delta,
        };
        self.last_timestamp = Some(timestamp);
        self.settings.clamp_delta(raw)
    }

    /// Advance the active scene to host time `timestamp` (seconds)
    pub fn update(&mut self, timestamp: f64) {
        if !self.running || self.scene.is_none() {
            return;
        }
        let dt = self.frame_delta(timestamp);
        log::trace!("Tick at {:.4}s (dt {:.4})", timestamp, dt);

        if let Some(scene) = self.scene.as_mut() {
            scene.update(dt);
        }
    }

    /// Describe the current frame, or `None` when nothing should be drawn
    pub fn render(&mut self, screen_size: Vec2) -> Option<Frame> {
        if !self.running {
            return None;
        }
        self.scene.as_mut().map(|scene| scene.render(screen_size))
    }

    /// Dispatch host input to the active scene
    pub fn handle_input(&mut self, event: &InputEvent) {
        if !self.running {
            return;
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        match event {
            InputEvent::Pointer(location) => {
                let world = scene.camera.screen_to_world(*location);
                scene.handle_input(world);
            }
            InputEvent::KeyDown(key) => scene.key_down(key),
            InputEvent::KeyUp(key) => scene.key_up(key),
        }
    }

    /// Ease the camera toward an object using the configured smoothing
    pub fn follow(&mut self, id: ObjectId) {
        if !self.running {
            return;
        }
        let smoothing = self.settings.follow_smoothing;
        if let Some(scene) = self.scene.as_mut() {
            scene.follow(id, smoothing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameObject, SceneHooks};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl Log {
        fn push(&self, entry: String) {
            self.0.borrow_mut().push(entry);
        }

        fn entries(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    struct Journal(Log);

    impl SceneHooks for Journal {
        fn setup(&mut self, scene: &mut Scene) {
            self.0.push("setup".into());
            scene.add_object(GameObject::new(Vec2::ZERO, Vec2::splat(10.0)));
        }

        fn handle_input(&mut self, _scene: &mut Scene, location: Vec2) {
            self.0.push(format!("input {} {}", location.x, location.y));
        }

        fn key_down(&mut self, _scene: &mut Scene, key: &Key) {
            self.0.push(format!("down {}", key));
        }

        fn key_up(&mut self, _scene: &mut Scene, key: &Key) {
            self.0.push(format!("up {}", key));
        }
    }

    fn engine_with_journal() -> (Engine, Log) {
        let log = Log::default();
        let mut engine = Engine::new(Settings::default());
        engine.set_scene(Scene::with_hooks(Journal(log.clone())));
        (engine, log)
    }

    #[test]
    fn test_start_runs_setup_once() {
        let (mut engine, log) = engine_with_journal();
        assert!(log.entries().is_empty());

        engine.start();
        engine.start();
        assert_eq!(log.entries(), vec!["setup"]);
    }

    #[test]
    fn test_set_scene_while_running_runs_setup() {
        let mut engine = Engine::new(Settings::default());
        engine.start();
        let log = Log::default();
        engine.set_scene(Scene::with_hooks(Journal(log.clone())));
        assert_eq!(log.entries(), vec!["setup"]);
    }

    #[test]
    fn test_stopped_engine_drops_everything() {
        let log = Log::default();
        let mut engine = Engine::new(Settings {
            follow_smoothing: 1.0,
            ..Default::default()
        });
        let mut scene = Scene::with_hooks(Journal(log.clone()));
        scene.camera.screen_size = Vec2::new(100.0, 100.0);
        let target = scene.add_object(GameObject::new(Vec2::new(500.0, 500.0), Vec2::ONE));
        engine.set_scene(scene);

        engine.update(1.0);
        engine.handle_input(&InputEvent::Pointer(Vec2::ONE));
        engine.handle_input(&InputEvent::KeyDown(Key::from("space")));
        engine.handle_input(&InputEvent::KeyUp(Key::from("space")));
        engine.follow(target);
        assert!(engine.render(Vec2::new(800.0, 600.0)).is_none());

        assert!(log.entries().is_empty());
        let scene = engine.scene().unwrap();
        assert!(scene.is_empty());
        assert_eq!(scene.camera.position, Vec2::ZERO);
    }

    #[test]
    fn test_stop_drops_follow_after_running() {
        let mut engine = Engine::new(Settings {
            follow_smoothing: 1.0,
            ..Default::default()
        });
        let mut scene = Scene::new();
        scene.camera.screen_size = Vec2::new(100.0, 100.0);
        let id = scene.add_object(GameObject::new(Vec2::new(500.0, 500.0), Vec2::ONE));
        engine.set_scene(scene);
        engine.start();
        engine.update(0.0);
        engine.stop();

        engine.follow(id);
        assert_eq!(engine.scene().unwrap().camera.position, Vec2::ZERO);
    }

    #[test]
    fn test_no_scene_is_harmless() {
        let mut engine = Engine::new(Settings::default());
        engine.start();
        engine.update(0.5);
        engine.handle_input(&InputEvent::KeyDown(Key::from("a")));
        assert!(engine.render(Vec2::ONE).is_none());
    }

    #[test]
    fn test_delta_from_timestamps() {
        let mut engine = Engine::new(Settings {
            first_tick_delta: 0.0,
            ..Default::default()
        });
        engine.set_scene(Scene::new());
        engine.start();

        assert_eq!(engine.frame_delta(10.0), 0.0);
        assert!((engine.frame_delta(10.25) - 0.25).abs() < 1e-6);
        assert!((engine.frame_delta(10.5) - 0.25).abs() < 1e-6);
        // A clock that runs backwards yields no time
        assert_eq!(engine.frame_delta(10.0), 0.0);
    }

    #[test]
    fn test_delta_clamped_by_settings() {
        let mut engine = Engine::new(Settings {
            max_frame_delta: Some(0.1),
            ..Default::default()
        });
        engine.frame_delta(0.0);
        assert!((engine.frame_delta(5.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_restart_resets_clock() {
        let mut engine = Engine::new(Settings {
            first_tick_delta: 1.0 / 60.0,
            ..Default::default()
        });
        engine.set_scene(Scene::new());
        engine.start();
        engine.update(100.0);
        engine.stop();
        engine.start();
        assert!((engine.frame_delta(500.0) - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_update_adopts_setup_objects() {
        let (mut engine, _log) = engine_with_journal();
        engine.start();
        engine.update(0.0);
        assert_eq!(engine.scene().unwrap().len(), 1);

        let frame = engine.render(Vec2::new(800.0, 600.0)).unwrap();
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn test_pointer_converted_to_world() {
        let (mut engine, log) = engine_with_journal();
        engine.start();
        {
            let scene = engine.scene_mut().unwrap();
            scene.camera.position = Vec2::new(100.0, 200.0);
            scene.camera.set_zoom(2.0);
        }
        engine.handle_input(&InputEvent::Pointer(Vec2::new(50.0, 60.0)));
        engine.handle_input(&InputEvent::KeyDown(Key::from("space")));
        engine.handle_input(&InputEvent::KeyUp(Key::from("space")));

        assert_eq!(
            log.entries(),
            vec!["setup", "input 125 230", "down space", "up space"]
        );
    }

    #[test]
    fn test_settings_applied_to_scene_camera() {
        let mut engine = Engine::new(Settings {
            screen_shake: false,
            ..Default::default()
        });
        engine.set_scene(Scene::new());
        let camera = &mut engine.scene_mut().unwrap().camera;
        camera.shake(5.0, 1.0);
        assert!(!camera.is_shaking());
    }

    #[test]
    fn test_follow_uses_configured_smoothing() {
        let mut engine = Engine::new(Settings {
            follow_smoothing: 1.0,
            ..Default::default()
        });
        let mut scene = Scene::new();
        scene.camera.screen_size = Vec2::new(100.0, 100.0);
        let id = scene.add_object(GameObject::new(Vec2::new(500.0, 500.0), Vec2::ONE));
        engine.set_scene(scene);
        engine.start();
        engine.update(0.0);

        engine.follow(id);
        assert_eq!(engine.scene().unwrap().camera.position, Vec2::new(450.0, 450.0));
    }
}
