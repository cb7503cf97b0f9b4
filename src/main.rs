//! Scene Core headless demo
//!
//! Drives a bouncing-ball scene with a synthetic 60 Hz clock and logs what
//! the renderer would receive. Pass a settings JSON path as the first
//! argument to override defaults.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use scene_core::consts::NOMINAL_FRAME_DT;
    use scene_core::renderer::random_color;
    use scene_core::sim::ObjectId;
    use scene_core::{
        Ball, BallConfig, Block, BlockConfig, Engine, InputEvent, Key, Label, LabelConfig, Scene,
        SceneHooks, Settings,
    };

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);
    const GRAVITY: f32 = 400.0;
    const FRAMES: u32 = 600;

    /// Balls dropping onto a floor. Pointer input spawns another ball,
    /// the "s" key shakes the camera.
    struct BouncingBalls {
        rng: Pcg32,
    }

    impl BouncingBalls {
        fn spawn_ball(&mut self, scene: &mut Scene, position: Vec2) -> ObjectId {
            let velocity = Vec2::new(self.rng.random_range(-150.0..150.0), 0.0);
            scene.add_object(Ball::spawn(
                position,
                BallConfig {
                    color: random_color(&mut self.rng),
                    gravity: GRAVITY,
                    velocity,
                    screen_size: SCREEN,
                    layer: 1,
                    ..Default::default()
                },
            ))
        }
    }

    impl SceneHooks for BouncingBalls {
        fn setup(&mut self, scene: &mut Scene) {
            for i in 0..5 {
                let x = 100.0 + i as f32 * 120.0;
                self.spawn_ball(scene, Vec2::new(x, 50.0));
            }
            for i in 0..4 {
                scene.add_object(Block::spawn(
                    Vec2::new(120.0 + i as f32 * 160.0, 420.0),
                    BlockConfig {
                        solid: true,
                        ..Default::default()
                    },
                ));
            }
            scene.add_object(Label::spawn(
                "Bouncing balls",
                Vec2::new(10.0, 10.0),
                LabelConfig {
                    layer: 10,
                    ..Default::default()
                },
            ));
        }

        fn handle_input(&mut self, scene: &mut Scene, location: Vec2) {
            let id = self.spawn_ball(scene, location);
            log::info!("Spawned ball {:?} at ({:.0}, {:.0})", id, location.x, location.y);
        }

        fn key_down(&mut self, scene: &mut Scene, key: &Key) {
            if key.0 == "s" {
                scene.camera.shake(8.0, 0.5);
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Scene Core (native) starting...");

        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load_from(std::path::Path::new(&path)),
            None => Settings::default(),
        };
        let seed = settings.shake_seed;

        let mut engine = Engine::new(settings);
        engine.set_scene(Scene::with_hooks(BouncingBalls {
            rng: Pcg32::seed_from_u64(seed),
        }));
        engine.start();

        let mut draws = 0usize;
        for frame in 0..FRAMES {
            let timestamp = f64::from(frame) * f64::from(NOMINAL_FRAME_DT);
            match frame {
                120 => engine.handle_input(&InputEvent::Pointer(SCREEN / 2.0)),
                240 => engine.handle_input(&InputEvent::KeyDown(Key::from("s"))),
                241 => engine.handle_input(&InputEvent::KeyUp(Key::from("s"))),
                _ => {}
            }

            engine.update(timestamp);

            let first_ball = engine
                .scene()
                .and_then(|scene| scene.find_objects::<Ball>().first().copied());
            if let Some(id) = first_ball {
                engine.follow(id);
            }

            if let Some(frame_desc) = engine.render(SCREEN) {
                draws += frame_desc.len();
                if frame % 60 == 0 {
                    log::info!(
                        "Frame {}: {} draw commands, camera at {:?}",
                        frame,
                        frame_desc.len(),
                        frame_desc.transform.translation
                    );
                }
            }
        }
        engine.stop();

        if let Some(scene) = engine.scene() {
            println!(
                "Ran {} frames: {} objects live, {} balls, {} draw commands total",
                FRAMES,
                scene.len(),
                scene.find_objects::<Ball>().len(),
                draws
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm; nothing to run here
}
