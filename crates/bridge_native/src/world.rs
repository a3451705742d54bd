//! The native world: the single source of truth for entities, components,
//! and assets.
//!
//! Each thread owns its own world. The scripting thread reaches it through
//! [`with_world`]; the `extern "C"` operations in [`crate::calls`] do the
//! same, so the managed side never holds a borrow across a call.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use bridge_core::{AssetHandle, EntityHandle, TypeTag};
use bridge_math::Vec2;
use tracing::{debug, trace};

use crate::alloc::GuidAllocator;
use crate::assets::{AssetKind, NativeAsset, PrefabTemplate};
use crate::components::{ComponentKind, ComponentState};
use crate::error::NativeError;

thread_local! {
    static WORLD: RefCell<NativeWorld> = RefCell::new(NativeWorld::new());
}

/// Run `f` against this thread's world.
///
/// # Panics
///
/// Panics if called re-entrantly from inside `f`.
pub fn with_world<R>(f: impl FnOnce(&mut NativeWorld) -> R) -> R {
    WORLD.with_borrow_mut(f)
}

/// Replace this thread's world with an empty one.
pub fn reset() {
    with_world(|world| *world = NativeWorld::new());
}

/// A native entity record.
#[derive(Debug, Clone, Default)]
pub struct NativeEntity {
    pub name: String,
    pub components: BTreeMap<TypeTag, ComponentState>,
}

/// Per-frame input state as the host's input system would report it.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held_keys: HashSet<u32>,
    pressed_keys: HashSet<u32>,
    released_keys: HashSet<u32>,
    held_buttons: HashSet<u32>,
    mouse_delta: Vec2,
    mouse_position: Vec2,
}

impl InputState {
    /// A key went down this frame.
    pub fn press_key(&mut self, key: u32) {
        if self.held_keys.insert(key) {
            self.pressed_keys.insert(key);
        }
    }

    /// A key went up this frame.
    pub fn release_key(&mut self, key: u32) {
        if self.held_keys.remove(&key) {
            self.released_keys.insert(key);
        }
    }

    pub fn set_mouse_button(&mut self, button: u32, down: bool) {
        if down {
            self.held_buttons.insert(button);
        } else {
            self.held_buttons.remove(&button);
        }
    }

    /// Move the cursor; the axes report the delta until the next frame.
    pub fn move_mouse(&mut self, position: Vec2) {
        self.mouse_delta += position - self.mouse_position;
        self.mouse_position = position;
    }

    #[must_use]
    pub fn key_pressed(&self, key: u32) -> bool {
        self.pressed_keys.contains(&key)
    }

    #[must_use]
    pub fn key_down(&self, key: u32) -> bool {
        self.held_keys.contains(&key)
    }

    #[must_use]
    pub fn key_released(&self, key: u32) -> bool {
        self.released_keys.contains(&key)
    }

    #[must_use]
    pub fn mouse_button_down(&self, button: u32) -> bool {
        self.held_buttons.contains(&button)
    }

    #[must_use]
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Clear edge-triggered state at a frame boundary.
    fn end_frame(&mut self) {
        self.pressed_keys.clear();
        self.released_keys.clear();
        self.mouse_delta = Vec2::ZERO;
    }
}

/// Entity storage, asset registry, input, and the frame clock.
#[derive(Debug, Default)]
pub struct NativeWorld {
    ids: GuidAllocator,
    entities: HashMap<EntityHandle, NativeEntity>,
    assets: HashMap<AssetHandle, NativeAsset>,
    input: InputState,
    delta_time: f32,
}

impl NativeWorld {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Entity lifecycle --

    /// Allocate a new, empty entity.
    pub fn create_entity(&mut self) -> EntityHandle {
        self.create_named_entity("Entity")
    }

    pub fn create_named_entity(&mut self, name: impl Into<String>) -> EntityHandle {
        let handle = EntityHandle::from_raw(self.ids.allocate());
        let name = name.into();
        debug!(entity = %handle, name = %name, "entity created");
        self.entities.insert(
            handle,
            NativeEntity {
                name,
                components: BTreeMap::new(),
            },
        );
        handle
    }

    /// Destroy an entity and all of its components.
    pub fn destroy_entity(&mut self, entity: EntityHandle) -> bool {
        let removed = self.entities.remove(&entity).is_some();
        debug!(entity = %entity, removed, "entity destroyed");
        removed
    }

    #[must_use]
    pub fn contains_entity(&self, entity: EntityHandle) -> bool {
        self.entities.contains_key(&entity)
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn entity_name(&self, entity: EntityHandle) -> Option<&str> {
        self.entities.get(&entity).map(|e| e.name.as_str())
    }

    pub fn set_entity_name(&mut self, entity: EntityHandle, name: String) -> bool {
        match self.entities.get_mut(&entity) {
            Some(record) => {
                record.name = name;
                true
            }
            None => false,
        }
    }

    // -- Component operations --

    /// Add a component by tag. Returns `true` only if one was created.
    ///
    /// Unknown tags and missing entities are ignored. Adding a kind the
    /// entity already has leaves the existing state untouched.
    pub fn add_component(&mut self, entity: EntityHandle, tag: TypeTag) -> bool {
        let Some(kind) = ComponentKind::from_tag(tag) else {
            debug!(entity = %entity, tag = %tag, "ignoring unregistered component type");
            return false;
        };
        let Some(record) = self.entities.get_mut(&entity) else {
            return false;
        };
        if record.components.contains_key(&tag) {
            return false;
        }
        record.components.insert(tag, kind.default_state());
        trace!(entity = %entity, component = kind.name(), "component added");
        true
    }

    #[must_use]
    pub fn has_component(&self, entity: EntityHandle, tag: TypeTag) -> bool {
        self.entities
            .get(&entity)
            .is_some_and(|e| e.components.contains_key(&tag))
    }

    /// Remove a component by tag. Returns `true` if one was removed.
    pub fn remove_component(&mut self, entity: EntityHandle, tag: TypeTag) -> bool {
        let removed = self
            .entities
            .get_mut(&entity)
            .is_some_and(|e| e.components.remove(&tag).is_some());
        trace!(entity = %entity, tag = %tag, removed, "component removed");
        removed
    }

    #[must_use]
    pub fn component(&self, entity: EntityHandle, kind: ComponentKind) -> Option<&ComponentState> {
        self.entities.get(&entity)?.components.get(&kind.tag())
    }

    pub fn component_mut(
        &mut self,
        entity: EntityHandle,
        kind: ComponentKind,
    ) -> Option<&mut ComponentState> {
        self.entities.get_mut(&entity)?.components.get_mut(&kind.tag())
    }

    /// Number of components on an entity (0 if it does not exist).
    #[must_use]
    pub fn component_count(&self, entity: EntityHandle) -> usize {
        self.entities.get(&entity).map_or(0, |e| e.components.len())
    }

    // -- Assets --

    fn register_asset(&mut self, name: String, kind: AssetKind) -> AssetHandle {
        let handle = AssetHandle::from_raw(self.ids.allocate());
        debug!(asset = %handle, kind = kind.label(), name = %name, "asset registered");
        self.assets.insert(handle, NativeAsset { name, kind });
        handle
    }

    pub fn create_mesh(
        &mut self,
        name: impl Into<String>,
        vertex_count: u32,
        index_count: u32,
    ) -> AssetHandle {
        self.register_asset(
            name.into(),
            AssetKind::Mesh {
                vertex_count,
                index_count,
            },
        )
    }

    pub fn create_texture(
        &mut self,
        name: impl Into<String>,
        width: u32,
        height: u32,
        mip_maps: bool,
    ) -> AssetHandle {
        self.register_asset(
            name.into(),
            AssetKind::Texture2D {
                width,
                height,
                mip_maps,
            },
        )
    }

    /// Register a prefab from a template.
    ///
    /// # Errors
    ///
    /// Returns [`NativeError::Encode`] if the template cannot be stored.
    pub fn create_prefab(
        &mut self,
        name: impl Into<String>,
        template: &PrefabTemplate,
    ) -> Result<AssetHandle, NativeError> {
        let template = template.encode()?;
        Ok(self.register_asset(name.into(), AssetKind::Prefab { template }))
    }

    /// Snapshot a live entity into a new prefab.
    ///
    /// # Errors
    ///
    /// Returns [`NativeError::UnknownEntity`] if the entity does not exist,
    /// or [`NativeError::Encode`] if the snapshot cannot be stored.
    pub fn create_prefab_from_entity(
        &mut self,
        entity: EntityHandle,
        name: impl Into<String>,
    ) -> Result<AssetHandle, NativeError> {
        let record = self
            .entities
            .get(&entity)
            .ok_or(NativeError::UnknownEntity(entity))?;
        let template = PrefabTemplate {
            name: record.name.clone(),
            components: record.components.values().cloned().collect(),
        };
        self.create_prefab(name, &template)
    }

    /// Spawn a fresh entity from a prefab's template.
    ///
    /// # Errors
    ///
    /// Returns [`NativeError::UnknownAsset`] or [`NativeError::NotAPrefab`]
    /// for a bad handle, or [`NativeError::Decode`] for a corrupt template.
    pub fn instantiate_prefab(&mut self, prefab: AssetHandle) -> Result<EntityHandle, NativeError> {
        let asset = self
            .assets
            .get(&prefab)
            .ok_or(NativeError::UnknownAsset(prefab))?;
        let AssetKind::Prefab { template } = &asset.kind else {
            return Err(NativeError::NotAPrefab(prefab));
        };
        let template = PrefabTemplate::decode(template)?;

        let handle = self.create_named_entity(template.name);
        if let Some(record) = self.entities.get_mut(&handle) {
            for state in template.components {
                record.components.insert(state.kind().tag(), state);
            }
        }
        debug!(prefab = %prefab, entity = %handle, "prefab instantiated");
        Ok(handle)
    }

    #[must_use]
    pub fn asset(&self, handle: AssetHandle) -> Option<&NativeAsset> {
        self.assets.get(&handle)
    }

    pub fn asset_mut(&mut self, handle: AssetHandle) -> Option<&mut NativeAsset> {
        self.assets.get_mut(&handle)
    }

    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    // -- Frame --

    /// Close the previous frame and open one lasting `delta_time` seconds.
    pub fn begin_frame(&mut self, delta_time: f32) {
        self.input.end_frame();
        self.delta_time = delta_time;
    }

    #[must_use]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }
}

#[cfg(test)]
mod tests {
    use bridge_math::Vec3;

    use super::*;

    fn transform_tag() -> TypeTag {
        ComponentKind::Transform.tag()
    }

    #[test]
    fn test_create_and_destroy_entity() {
        let mut world = NativeWorld::new();
        let e = world.create_entity();
        assert!(e.is_valid());
        assert!(world.contains_entity(e));
        assert_eq!(world.entity_name(e), Some("Entity"));
        assert!(world.destroy_entity(e));
        assert!(!world.destroy_entity(e));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_add_component_is_idempotent() {
        let mut world = NativeWorld::new();
        let e = world.create_entity();
        assert!(world.add_component(e, transform_tag()));
        assert!(!world.add_component(e, transform_tag()));
        assert_eq!(world.component_count(e), 1);
        assert!(world.has_component(e, transform_tag()));
    }

    #[test]
    fn test_unknown_tag_and_missing_entity_are_ignored() {
        let mut world = NativeWorld::new();
        let e = world.create_entity();
        assert!(!world.add_component(e, TypeTag::from_name("Light")));
        assert!(!world.add_component(EntityHandle::from_raw(1), transform_tag()));
        assert_eq!(world.component_count(e), 0);
    }

    #[test]
    fn test_remove_component() {
        let mut world = NativeWorld::new();
        let e = world.create_entity();
        world.add_component(e, transform_tag());
        assert!(world.remove_component(e, transform_tag()));
        assert!(!world.remove_component(e, transform_tag()));
        assert!(!world.has_component(e, transform_tag()));
    }

    #[test]
    fn test_prefab_instances_are_fresh_entities() {
        let mut world = NativeWorld::new();
        let source = world.create_named_entity("Barrel");
        world.add_component(source, transform_tag());
        if let Some(ComponentState::Transform(t)) =
            world.component_mut(source, ComponentKind::Transform)
        {
            t.position = Vec3::new(1.0, 2.0, 3.0);
        }
        let prefab = world.create_prefab_from_entity(source, "BarrelPrefab").unwrap();

        let a = world.instantiate_prefab(prefab).unwrap();
        let b = world.instantiate_prefab(prefab).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, source);
        assert_eq!(world.entity_name(a), Some("Barrel"));
        match world.component(b, ComponentKind::Transform) {
            Some(ComponentState::Transform(t)) => assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0)),
            other => panic!("unexpected component: {other:?}"),
        }
    }

    #[test]
    fn test_instantiating_a_mesh_fails() {
        let mut world = NativeWorld::new();
        let mesh = world.create_mesh("Cube", 24, 36);
        assert!(matches!(
            world.instantiate_prefab(mesh),
            Err(NativeError::NotAPrefab(h)) if h == mesh
        ));
        assert!(matches!(
            world.instantiate_prefab(AssetHandle::INVALID),
            Err(NativeError::UnknownAsset(_))
        ));
    }

    #[test]
    fn test_key_edges_clear_at_frame_boundary() {
        let mut world = NativeWorld::new();
        world.input_mut().press_key(87);
        assert!(world.input().key_pressed(87));
        assert!(world.input().key_down(87));

        world.begin_frame(0.016);
        assert!(!world.input().key_pressed(87));
        assert!(world.input().key_down(87));

        world.input_mut().release_key(87);
        assert!(world.input().key_released(87));
        assert!(!world.input().key_down(87));
        assert_eq!(world.delta_time(), 0.016);
    }

    #[test]
    fn test_mouse_axes_report_frame_delta() {
        let mut input = InputState::default();
        input.move_mouse(Vec2::new(10.0, 5.0));
        input.move_mouse(Vec2::new(12.0, 4.0));
        assert_eq!(input.mouse_delta(), Vec2::new(12.0, 4.0));
        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Vec2::new(12.0, 4.0));
    }

    #[test]
    fn test_thread_local_world_resets() {
        with_world(|world| {
            world.create_entity();
        });
        reset();
        assert_eq!(with_world(|world| world.entity_count()), 0);
    }
}
