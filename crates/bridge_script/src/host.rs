//! Live script instances and hook dispatch.

use std::rc::Rc;

use bridge_calls::Bridge;
use bridge_core::{EntityHandle, TypeTag};
use bridge_math::Vec3;
use tracing::{debug, info, trace};

use crate::entity::Entity;
use crate::error::ScriptError;
use crate::registry::ScriptRegistry;
use crate::script::Script;

struct ScriptInstance {
    tag: TypeTag,
    entity: Entity,
    script: Box<dyn Script>,
}

/// Owns every attached script and drives its hooks.
///
/// Instances are keyed by (entity, script type); each is bound to its own
/// [`Entity`] wrapper, and hooks run in attach order.
pub struct ScriptHost {
    bridge: Rc<Bridge>,
    registry: ScriptRegistry,
    instances: Vec<ScriptInstance>,
}

impl ScriptHost {
    #[must_use]
    pub fn new(bridge: &Rc<Bridge>, registry: ScriptRegistry) -> Self {
        Self {
            bridge: Rc::clone(bridge),
            registry,
            instances: Vec::new(),
        }
    }

    #[must_use]
    pub fn bridge(&self) -> &Rc<Bridge> {
        &self.bridge
    }

    #[must_use]
    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    /// Instantiate the named script on `entity` and run its `awake` hook.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::UnknownScript`] if the name is not registered,
    /// or [`ScriptError::AlreadyAttached`] if the entity already runs it.
    pub fn attach(&mut self, entity: EntityHandle, script: &str) -> Result<(), ScriptError> {
        if self.is_attached(entity, script) {
            return Err(ScriptError::AlreadyAttached {
                entity,
                script: script.to_string(),
            });
        }
        let (tag, instance) = self.registry.instantiate_by_name(script)?;
        let mut instance = ScriptInstance {
            tag,
            entity: Entity::from_handle(&self.bridge, entity),
            script: instance,
        };
        instance.script.awake(&instance.entity);
        debug!(entity = %entity, script, "script attached");
        self.instances.push(instance);
        Ok(())
    }

    #[must_use]
    pub fn is_attached(&self, entity: EntityHandle, script: &str) -> bool {
        let tag = TypeTag::from_name(script);
        self.instances
            .iter()
            .any(|i| i.tag == tag && i.entity.handle() == entity)
    }

    /// Run every `update` hook.
    pub fn update_all(&mut self, delta_time: f32) {
        trace!(instances = self.instances.len(), delta_time, "updating scripts");
        for instance in &mut self.instances {
            instance.script.update(&instance.entity, delta_time);
        }
    }

    pub fn collision_enter(&mut self, entity: EntityHandle, other: EntityHandle, normal: Vec3) {
        let other = Entity::from_handle(&self.bridge, other);
        for instance in self.on_entity(entity) {
            instance
                .script
                .on_collision_enter(&instance.entity, &other, normal);
        }
    }

    pub fn collision_stay(&mut self, entity: EntityHandle, other: EntityHandle, normal: Vec3) {
        let other = Entity::from_handle(&self.bridge, other);
        for instance in self.on_entity(entity) {
            instance
                .script
                .on_collision_stay(&instance.entity, &other, normal);
        }
    }

    pub fn collision_exit(&mut self, entity: EntityHandle, other: EntityHandle) {
        let other = Entity::from_handle(&self.bridge, other);
        for instance in self.on_entity(entity) {
            instance.script.on_collision_exit(&instance.entity, &other);
        }
    }

    /// Run `on_destroy` and drop the named script from `entity`.
    ///
    /// Returns `false` if it was not attached.
    pub fn detach(&mut self, entity: EntityHandle, script: &str) -> bool {
        let tag = TypeTag::from_name(script);
        let Some(index) = self
            .instances
            .iter()
            .position(|i| i.tag == tag && i.entity.handle() == entity)
        else {
            return false;
        };
        let mut instance = self.instances.remove(index);
        instance.script.on_destroy(&instance.entity);
        debug!(entity = %entity, script, "script detached");
        true
    }

    /// Detach every script on `entity`. Returns how many were detached.
    pub fn detach_entity(&mut self, entity: EntityHandle) -> usize {
        let (detached, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.instances)
            .into_iter()
            .partition(|i| i.entity.handle() == entity);
        self.instances = kept;
        let count = detached.len();
        for mut instance in detached {
            instance.script.on_destroy(&instance.entity);
        }
        debug!(entity = %entity, scripts = count, "entity scripts detached");
        count
    }

    /// Run every `on_destroy` hook and drop all instances.
    pub fn shutdown(&mut self) {
        let count = self.instances.len();
        for mut instance in self.instances.drain(..) {
            instance.script.on_destroy(&instance.entity);
        }
        info!(scripts = count, "script host shut down");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    fn on_entity(&mut self, entity: EntityHandle) -> impl Iterator<Item = &mut ScriptInstance> {
        self.instances
            .iter_mut()
            .filter(move |i| i.entity.handle() == entity)
    }
}

impl std::fmt::Debug for ScriptHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptHost")
            .field("registry", &self.registry)
            .field("instances", &self.instances.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use bridge_calls::BridgeConfig;

    use super::*;
    use crate::components::Transform;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        log: Log,
    }

    impl Recorder {
        fn push(&self, event: String) {
            self.log.borrow_mut().push(format!("{}:{event}", self.label));
        }
    }

    impl Script for Recorder {
        fn awake(&mut self, _entity: &Entity) {
            self.push("awake".into());
        }

        fn update(&mut self, _entity: &Entity, delta_time: f32) {
            self.push(format!("update {delta_time}"));
        }

        fn on_destroy(&mut self, _entity: &Entity) {
            self.push("destroy".into());
        }

        fn on_collision_enter(&mut self, _entity: &Entity, other: &Entity, _normal: Vec3) {
            self.push(format!("enter {}", other.name()));
        }

        fn on_collision_exit(&mut self, _entity: &Entity, other: &Entity) {
            self.push(format!("exit {}", other.name()));
        }
    }

    /// Moves its entity along +X at one unit per second.
    #[derive(Default)]
    struct Mover;

    impl Script for Mover {
        fn awake(&mut self, entity: &Entity) {
            entity.add_component::<Transform>();
        }

        fn update(&mut self, entity: &Entity, delta_time: f32) {
            if let Some(t) = entity.get_component::<Transform>() {
                t.translate(Vec3::X * delta_time);
            }
        }
    }

    fn host(log: &Log) -> ScriptHost {
        bridge_native::reset();
        let bridge = bridge_native::attach(BridgeConfig::new()).unwrap();
        let mut registry = ScriptRegistry::new();
        for label in ["A", "B"] {
            let log = Rc::clone(log);
            registry
                .register(label, move || {
                    Box::new(Recorder {
                        label,
                        log: Rc::clone(&log),
                    })
                })
                .unwrap();
        }
        registry.register_default::<Mover>("Mover").unwrap();
        ScriptHost::new(&bridge, registry)
    }

    #[test]
    fn test_hooks_run_in_order() {
        let log = Log::default();
        let mut host = host(&log);
        let e = Entity::create(&host.bridge);

        host.attach(e.handle(), "A").unwrap();
        host.attach(e.handle(), "B").unwrap();
        host.update_all(0.5);
        host.shutdown();

        assert_eq!(
            *log.borrow(),
            ["A:awake", "B:awake", "A:update 0.5", "B:update 0.5", "A:destroy", "B:destroy"]
        );
        assert!(host.is_empty());
    }

    #[test]
    fn test_attach_errors() {
        let log = Log::default();
        let mut host = host(&log);
        let e = Entity::create(&host.bridge).handle();

        assert_eq!(
            host.attach(e, "Ghost"),
            Err(ScriptError::UnknownScript("Ghost".into()))
        );
        host.attach(e, "A").unwrap();
        assert_eq!(
            host.attach(e, "A"),
            Err(ScriptError::AlreadyAttached {
                entity: e,
                script: "A".into()
            })
        );
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn test_collisions_reach_only_the_target_entity() {
        let log = Log::default();
        let mut host = host(&log);
        let player = Entity::create(&host.bridge);
        let wall = Entity::create(&host.bridge);
        wall.set_name("Wall");

        host.attach(player.handle(), "A").unwrap();
        host.attach(wall.handle(), "B").unwrap();
        log.borrow_mut().clear();

        host.collision_enter(player.handle(), wall.handle(), Vec3::Y);
        host.collision_stay(player.handle(), wall.handle(), Vec3::Y);
        host.collision_exit(player.handle(), wall.handle());

        assert_eq!(*log.borrow(), ["A:enter Wall", "A:exit Wall"]);
    }

    #[test]
    fn test_detach() {
        let log = Log::default();
        let mut host = host(&log);
        let e = Entity::create(&host.bridge).handle();
        host.attach(e, "A").unwrap();
        host.attach(e, "B").unwrap();

        assert!(host.detach(e, "A"));
        assert!(!host.detach(e, "A"));
        assert!(!host.is_attached(e, "A"));
        assert_eq!(host.detach_entity(e), 1);
        assert!(host.is_empty());
        assert_eq!(
            *log.borrow(),
            ["A:awake", "B:awake", "A:destroy", "B:destroy"]
        );
    }

    #[test]
    fn test_scripts_drive_components() {
        let log = Log::default();
        let mut host = host(&log);
        let e = Entity::create(&host.bridge);
        host.attach(e.handle(), "Mover").unwrap();
        host.update_all(0.5);
        host.update_all(0.25);

        let t = e.get_component::<Transform>().unwrap();
        assert!(t.position().abs_diff_eq(Vec3::new(0.75, 0.0, 0.0), 1e-6));
    }
}
