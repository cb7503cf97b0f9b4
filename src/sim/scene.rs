//! Scene: object lifecycle, per-frame update and draw order
//!
//! Objects live in a slot arena keyed by [`ObjectId`]. The live collection
//! is an ordered list of ids. Additions and removals are queued and applied
//! at a single flush point at the start of each update, so object logic can
//! request them freely while the scene is iterating.
//!
//! Update order per tick:
//! 1. Advance camera shake
//! 2. Flush queued additions, then queued removals
//! 3. Update every active object in collection order
//! 4. Drop objects that became inactive

use glam::Vec2;
use slotmap::SlotMap;

use super::camera::Camera;
use super::object::{Behavior, Body, GameObject, ObjectId, SceneId};
use crate::engine::Key;
use crate::renderer::Frame;

/// Scene-specific game logic. All hooks default to no-ops.
pub trait SceneHooks {
    /// Called when the engine starts with this scene, or when the scene is
    /// installed on a running engine
    fn setup(&mut self, _scene: &mut Scene) {}

    /// Pointer input, already converted to world space
    fn handle_input(&mut self, _scene: &mut Scene, _location: Vec2) {}

    fn key_down(&mut self, _scene: &mut Scene, _key: &Key) {}

    fn key_up(&mut self, _scene: &mut Scene, _key: &Key) {}
}

/// Pending lifecycle changes, applied at the next flush
#[derive(Debug, Default)]
struct PendingChanges {
    add: Vec<ObjectId>,
    remove: Vec<ObjectId>,
}

/// Active physics objects in `live` whose centers lie within `radius` of
/// `center`, skipping `exclude`. Brute-force scan.
fn nearby<'a>(
    objects: &'a SlotMap<ObjectId, GameObject>,
    live: &'a [ObjectId],
    exclude: ObjectId,
    center: Vec2,
    radius: f32,
) -> impl Iterator<Item = (ObjectId, &'a GameObject)> + 'a {
    let radius_sq = radius * radius;
    live.iter().filter_map(move |&id| {
        if id == exclude {
            return None;
        }
        let other = objects.get(id)?;
        let body = &other.body;
        let close = body.center().distance_squared(center) <= radius_sq;
        (body.active && body.is_physics() && close).then_some((id, other))
    })
}

/// View of the scene handed to an object while it updates.
///
/// The updating object itself is checked out of the scene for the duration
/// of its update and is not visible through the context.
pub struct SceneContext<'a> {
    id: ObjectId,
    objects: &'a mut SlotMap<ObjectId, GameObject>,
    live: &'a [ObjectId],
    pending: &'a mut PendingChanges,
}

impl SceneContext<'_> {
    /// Id of the object being updated
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Active physics objects within `radius` of `body`'s center
    pub fn find_nearby(&self, body: &Body, radius: f32) -> Vec<(ObjectId, &GameObject)> {
        nearby(&*self.objects, self.live, self.id, body.center(), radius).collect()
    }

    /// Queue an object; it joins the scene at the next flush
    pub fn add_object(&mut self, object: GameObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.pending.add.push(id);
        id
    }

    /// Queue removal of an object (possibly the one being updated)
    pub fn remove_object(&mut self, id: ObjectId) {
        self.pending.remove.push(id);
    }
}

pub struct Scene {
    id: SceneId,
    objects: SlotMap<ObjectId, GameObject>,
    /// Live collection in insertion order
    live: Vec<ObjectId>,
    pending: PendingChanges,
    pub camera: Camera,
    /// Last screen size seen by `render`
    screen_size: Vec2,
    hooks: Option<Box<dyn SceneHooks>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("live", &self.live.len())
            .field("pending_add", &self.pending.add.len())
            .field("pending_remove", &self.pending.remove.len())
            .field("camera", &self.camera)
            .finish()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            id: SceneId::next(),
            objects: SlotMap::with_key(),
            live: Vec::new(),
            pending: PendingChanges::default(),
            camera: Camera::new(),
            screen_size: Vec2::ZERO,
            hooks: None,
        }
    }

    /// Scene driven by custom game logic
    pub fn with_hooks(hooks: impl SceneHooks + 'static) -> Self {
        Self {
            hooks: Some(Box::new(hooks)),
            ..Self::new()
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Number of objects in the live collection
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether `id` is in the live collection
    pub fn contains(&self, id: ObjectId) -> bool {
        self.live.contains(&id)
    }

    /// Look up an object, live or still pending
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// Live objects in collection order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &GameObject)> + '_ {
        self.live
            .iter()
            .filter_map(|&id| self.objects.get(id).map(|object| (id, object)))
    }

    /// Ids of live objects whose behavior is a `T`
    pub fn find_objects<T: Behavior>(&self) -> Vec<ObjectId> {
        self.iter()
            .filter(|(_, object)| object.is::<T>())
            .map(|(id, _)| id)
            .collect()
    }

    /// Queue an object for adoption at the next update
    pub fn add_object(&mut self, object: GameObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.pending.add.push(id);
        id
    }

    /// Queue removal by identity. Unknown ids are ignored at flush time.
    pub fn remove_object(&mut self, id: ObjectId) {
        self.pending.remove.push(id);
    }

    /// Active physics objects (other than `id`) whose centers are within
    /// `radius` of `id`'s center. O(n) per call.
    pub fn find_nearby(&self, id: ObjectId, radius: f32) -> Vec<ObjectId> {
        let Some(object) = self.objects.get(id) else {
            return Vec::new();
        };
        nearby(&self.objects, &self.live, id, object.body.center(), radius)
            .map(|(other, _)| other)
            .collect()
    }

    /// Advance the scene by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.camera.update_shake(dt);
        self.flush_pending();

        for index in 0..self.live.len() {
            let id = self.live[index];
            let Some(slot) = self.objects.get_mut(id) else {
                continue;
            };
            if !slot.body.active {
                continue;
            }

            // Check the object out so it can read its neighbours while mutating itself
            let mut object = std::mem::take(slot);
            let mut ctx = SceneContext {
                id,
                objects: &mut self.objects,
                live: &self.live,
                pending: &mut self.pending,
            };
            object.update(dt, &mut ctx);

            if let Some(slot) = self.objects.get_mut(id) {
                *slot = object;
            }
        }

        self.remove_inactive();
    }

    /// Describe the current frame for the renderer.
    ///
    /// Records `screen_size` on the scene and camera, then returns every
    /// active, camera-visible object ordered by layer (ties keep insertion
    /// order).
    pub fn render(&mut self, screen_size: Vec2) -> Frame {
        self.screen_size = screen_size;
        self.camera.screen_size = screen_size;

        let mut visible: Vec<&GameObject> = self
            .iter()
            .map(|(_, object)| object)
            .filter(|object| object.body.active && self.camera.is_visible(&object.body.bounds()))
            .collect();
        visible.sort_by_key(|object| object.body.layer);

        Frame {
            transform: self.camera.view_transform(),
            commands: visible.into_iter().map(GameObject::draw).collect(),
        }
    }

    /// Ease the camera toward an object's position
    pub fn follow(&mut self, id: ObjectId, smoothing: f32) {
        if let Some(object) = self.objects.get(id) {
            self.camera.follow(object.body.position, smoothing);
        }
    }

    /// Center the camera on an object's position immediately
    pub fn snap_to(&mut self, id: ObjectId) {
        if let Some(object) = self.objects.get(id) {
            self.camera.snap_to(object.body.position);
        }
    }

    pub fn setup(&mut self) {
        self.with_hooks_taken(|hooks, scene| hooks.setup(scene));
    }

    /// Pointer input in world coordinates
    pub fn handle_input(&mut self, location: Vec2) {
        self.with_hooks_taken(|hooks, scene| hooks.handle_input(scene, location));
    }

    pub fn key_down(&mut self, key: &Key) {
        self.with_hooks_taken(|hooks, scene| hooks.key_down(scene, key));
    }

    pub fn key_up(&mut self, key: &Key) {
        self.with_hooks_taken(|hooks, scene| hooks.key_up(scene, key));
    }

    fn with_hooks_taken(&mut self, f: impl FnOnce(&mut dyn SceneHooks, &mut Scene)) {
        if let Some(mut hooks) = self.hooks.take() {
            f(hooks.as_mut(), self);
            self.hooks = Some(hooks);
        }
    }

    fn flush_pending(&mut self) {
        let added = self.pending.add.len();
        let removed = self.pending.remove.len();

        for id in self.pending.add.drain(..) {
            if let Some(object) = self.objects.get_mut(id) {
                object.body.adopt(self.id);
                self.live.push(id);
            }
        }

        for id in self.pending.remove.drain(..) {
            self.live.retain(|&live| live != id);
            self.objects.remove(id);
        }

        if added > 0 || removed > 0 {
            log::debug!(
                "Scene {:?} flushed {} additions, {} removals ({} live)",
                self.id,
                added,
                removed,
                self.live.len()
            );
        }
    }

    fn remove_inactive(&mut self) {
        let objects = &mut self.objects;
        let before = self.live.len();
        self.live.retain(|&id| {
            let keep = objects.get(id).is_some_and(|object| object.body.active);
            if !keep {
                objects.remove(id);
            }
            keep
        });

        let dropped = before - self.live.len();
        if dropped > 0 {
            log::trace!("Scene {:?} dropped {} inactive objects", self.id, dropped);
        }
    }
}
