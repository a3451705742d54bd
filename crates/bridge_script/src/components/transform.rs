use bridge_math::Vec3;

use crate::component::component_wrapper;

component_wrapper!(
    /// Position, rotation, and scale of an entity.
    ///
    /// Rotation is exposed as Euler angles in degrees.
    Transform,
    "Transform"
);

impl Transform {
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.owner.read(self.owner.calls().transform_get_position())
    }

    pub fn set_position(&self, position: Vec3) {
        self.owner
            .write(self.owner.calls().transform_set_position(), position);
    }

    /// Move by `offset` in world space.
    pub fn translate(&self, offset: Vec3) {
        self.set_position(self.position() + offset);
    }

    #[must_use]
    pub fn euler_angles(&self) -> Vec3 {
        self.owner.read(self.owner.calls().transform_get_euler_angles())
    }

    pub fn set_euler_angles(&self, degrees: Vec3) {
        self.owner
            .write(self.owner.calls().transform_set_euler_angles(), degrees);
    }

    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.owner.read(self.owner.calls().transform_get_scale())
    }

    pub fn set_scale(&self, scale: Vec3) {
        self.owner.write(self.owner.calls().transform_set_scale(), scale);
    }

    /// World-space forward axis (local +Z).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.owner.read(self.owner.calls().transform_get_forward())
    }

    /// World-space right axis (local +X).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.owner.read(self.owner.calls().transform_get_right())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support;

    #[test]
    fn test_fresh_transform_is_identity() {
        let (_bridge, e) = test_support::entity();
        let t = e.add_component::<Transform>();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.forward(), Vec3::Z);
    }

    #[test]
    fn test_properties_round_trip() {
        let (_bridge, e) = test_support::entity();
        let t = e.add_component::<Transform>();
        t.set_position(Vec3::new(1.0, 2.0, 3.0));
        t.set_scale(Vec3::splat(2.0));
        t.set_euler_angles(Vec3::new(0.0, 90.0, 0.0));
        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale(), Vec3::splat(2.0));
        assert_eq!(t.euler_angles(), Vec3::new(0.0, 90.0, 0.0));
        assert!(t.forward().abs_diff_eq(Vec3::X, 1e-5));
        assert!(t.right().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_translate() {
        let (_bridge, e) = test_support::entity();
        let t = e.add_component::<Transform>();
        t.translate(Vec3::X);
        t.translate(Vec3::X);
        assert_eq!(t.position(), Vec3::new(2.0, 0.0, 0.0));
    }
}
