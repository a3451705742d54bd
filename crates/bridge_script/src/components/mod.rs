//! Component wrappers for every native component kind.

mod animator;
mod character_controller;
mod mesh_renderer;
mod particle_emitter;
mod rigid_body;
mod sprite_renderer;
mod transform;

pub use animator::Animator;
pub use character_controller::CharacterController;
pub use mesh_renderer::MeshRenderer;
pub use particle_emitter::ParticleEmitter;
pub use rigid_body::RigidBody;
pub use sprite_renderer::SpriteRenderer;
pub use transform::Transform;

#[cfg(test)]
pub(crate) mod test_support {
    use std::rc::Rc;

    use bridge_calls::{Bridge, BridgeConfig};

    use crate::Entity;

    /// A fresh native world, a bridge attached to it, and one entity.
    pub(crate) fn entity() -> (Rc<Bridge>, Entity) {
        bridge_native::reset();
        let bridge = bridge_native::attach(BridgeConfig::new().with_strict(true))
            .expect("reference host binds every operation");
        let entity = Entity::create(&bridge);
        (bridge, entity)
    }
}
