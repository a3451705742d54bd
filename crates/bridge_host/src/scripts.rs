//! Demo scripts shipped with the host.

use bridge_calls::KeyCode;
use bridge_math::Vec3;
use bridge_script::components::{CharacterController, MeshRenderer, Transform};
use bridge_script::{Asset, Entity, Input, Script, ScriptError, ScriptRegistry};
use tracing::{debug, info};

/// Register every demo script.
///
/// # Errors
///
/// Returns [`ScriptError::DuplicateScript`] if called twice on one registry.
pub fn register(registry: &mut ScriptRegistry) -> Result<(), ScriptError> {
    registry.register_default::<Spinner>("Spinner")?;
    registry.register_default::<PlayerController>("PlayerController")?;
    Ok(())
}

/// Spins its entity about Y.
#[derive(Debug)]
pub struct Spinner {
    degrees_per_second: f32,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            degrees_per_second: 90.0,
        }
    }
}

impl Script for Spinner {
    fn awake(&mut self, entity: &Entity) {
        let mesh = entity
            .get_component::<MeshRenderer>()
            .and_then(|r| r.mesh())
            .map(|m| m.name());
        debug!(entity = %entity.name(), mesh = ?mesh, "spinner awake");
    }

    fn update(&mut self, entity: &Entity, delta_time: f32) {
        let Some(transform) = entity.get_component::<Transform>() else {
            return;
        };
        let mut angles = transform.euler_angles();
        angles.y = (angles.y + self.degrees_per_second * delta_time).rem_euclid(360.0);
        transform.set_euler_angles(angles);
    }
}

/// WASD movement through a character controller.
#[derive(Debug)]
pub struct PlayerController {
    speed: f32,
    input: Option<Input>,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            speed: 4.0,
            input: None,
        }
    }
}

impl PlayerController {
    fn wish_direction(input: &Input, transform: &Transform) -> Vec3 {
        let axis = |positive: KeyCode, negative: KeyCode| {
            f32::from(u8::from(input.key_down(positive))) - f32::from(u8::from(input.key_down(negative)))
        };
        let direction = transform.forward() * axis(KeyCode::W, KeyCode::S)
            + transform.right() * axis(KeyCode::D, KeyCode::A);
        direction.normalize_or_zero()
    }
}

impl Script for PlayerController {
    fn awake(&mut self, entity: &Entity) {
        entity.add_component::<CharacterController>();
        self.input = Some(Input::new(entity.bridge()));
    }

    fn update(&mut self, entity: &Entity, delta_time: f32) {
        let (Some(input), Some(transform), Some(controller)) = (
            self.input.as_ref(),
            entity.get_component::<Transform>(),
            entity.get_component::<CharacterController>(),
        ) else {
            return;
        };
        if !controller.is_enabled() {
            return;
        }

        let velocity = Self::wish_direction(input, &transform) * self.speed;
        controller.set_linear_velocity(velocity);
        // No physics step in this host, so integrate directly.
        transform.translate(velocity * delta_time);

        if input.key_pressed(KeyCode::Space) {
            info!(entity = %entity.name(), position = ?transform.position(), "jump");
        }
    }

    fn on_collision_enter(&mut self, entity: &Entity, other: &Entity, normal: Vec3) {
        info!(entity = %entity.name(), other = %other.name(), ?normal, "player hit something");
    }

    fn on_destroy(&mut self, entity: &Entity) {
        if let Some(controller) = entity.get_component::<CharacterController>() {
            controller.set_linear_velocity(Vec3::ZERO);
        }
    }
}
