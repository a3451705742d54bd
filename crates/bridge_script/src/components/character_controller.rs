use bridge_math::Vec3;

use crate::component::component_wrapper;

component_wrapper!(
    /// A kinematic capsule driven by script-set velocity.
    CharacterController,
    "CharacterController"
);

impl CharacterController {
    #[must_use]
    pub fn linear_velocity(&self) -> Vec3 {
        self.owner
            .read(self.owner.calls().character_controller_get_linear_velocity())
    }

    pub fn set_linear_velocity(&self, velocity: Vec3) {
        self.owner.write(
            self.owner.calls().character_controller_set_linear_velocity(),
            velocity,
        );
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        let op = self.owner.calls().character_controller_is_enabled();
        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { op(self.owner.entity()) }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.owner
            .write(self.owner.calls().character_controller_set_enabled(), enabled);
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.owner
            .read(self.owner.calls().character_controller_get_radius())
    }

    pub fn set_radius(&self, radius: f32) {
        self.owner
            .write(self.owner.calls().character_controller_set_radius(), radius);
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.owner
            .read(self.owner.calls().character_controller_get_height())
    }

    pub fn set_height(&self, height: f32) {
        self.owner
            .write(self.owner.calls().character_controller_set_height(), height);
    }
}
