use bridge_math::Vec3;

use crate::component::component_wrapper;

component_wrapper!(
    /// A simulated physical body.
    RigidBody,
    "RigidBody"
);

impl RigidBody {
    #[must_use]
    pub fn linear_velocity(&self) -> Vec3 {
        self.owner
            .read(self.owner.calls().rigid_body_get_linear_velocity())
    }

    pub fn set_linear_velocity(&self, velocity: Vec3) {
        self.owner
            .write(self.owner.calls().rigid_body_set_linear_velocity(), velocity);
    }

    /// Add to the current velocity. Native clamps the result to
    /// [`max_linear_velocity`](Self::max_linear_velocity).
    pub fn add_linear_velocity(&self, delta: Vec3) {
        self.owner
            .write(self.owner.calls().rigid_body_add_linear_velocity(), delta);
    }

    #[must_use]
    pub fn friction(&self) -> f32 {
        self.owner.read(self.owner.calls().rigid_body_get_friction())
    }

    pub fn set_friction(&self, friction: f32) {
        self.owner
            .write(self.owner.calls().rigid_body_set_friction(), friction);
    }

    #[must_use]
    pub fn max_linear_velocity(&self) -> f32 {
        self.owner
            .read(self.owner.calls().rigid_body_get_max_linear_velocity())
    }

    pub fn set_max_linear_velocity(&self, max: f32) {
        self.owner
            .write(self.owner.calls().rigid_body_set_max_linear_velocity(), max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support;

    #[test]
    fn test_velocity_and_friction_round_trip() {
        let (_bridge, e) = test_support::entity();
        let body = e.add_component::<RigidBody>();
        body.set_linear_velocity(Vec3::new(0.0, 5.0, 0.0));
        body.set_friction(0.9);
        assert_eq!(body.linear_velocity(), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(body.friction(), 0.9);
    }

    #[test]
    fn test_added_velocity_respects_maximum() {
        let (_bridge, e) = test_support::entity();
        let body = e.add_component::<RigidBody>();
        body.set_max_linear_velocity(3.0);
        body.add_linear_velocity(Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(body.max_linear_velocity(), 3.0);
        assert!(body.linear_velocity().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
    }
}
