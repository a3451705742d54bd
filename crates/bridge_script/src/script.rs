//! The script lifecycle hook surface.

use bridge_math::Vec3;

use crate::entity::Entity;

/// User-authored behaviour attached to an entity.
///
/// Every hook is a no-op by default, so a script only overrides what it
/// needs. Hooks receive the entity the script is attached to; a script that
/// wants input or the frame clock builds [`Input`](crate::Input) or
/// [`Time`](crate::Time) from [`Entity::bridge`].
pub trait Script {
    /// Runs once, right after the script is attached.
    fn awake(&mut self, _entity: &Entity) {}

    /// Runs once per frame with the frame's delta time in seconds.
    fn update(&mut self, _entity: &Entity, _delta_time: f32) {}

    /// Runs once, right before the script is detached.
    fn on_destroy(&mut self, _entity: &Entity) {}

    /// Another entity started touching this one.
    fn on_collision_enter(&mut self, _entity: &Entity, _other: &Entity, _normal: Vec3) {}

    /// Another entity is still touching this one.
    fn on_collision_stay(&mut self, _entity: &Entity, _other: &Entity, _normal: Vec3) {}

    /// Another entity stopped touching this one.
    fn on_collision_exit(&mut self, _entity: &Entity, _other: &Entity) {}
}
