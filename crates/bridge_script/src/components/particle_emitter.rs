use bridge_calls::{EmitterShape, unknown_discriminant};
use bridge_math::{Color, Vec2};

use crate::component::component_wrapper;

component_wrapper!(
    /// Spawns particles from a shaped volume.
    ///
    /// The `Vec2` ranges (lifetime, size, speed) are `(min, max)` pairs
    /// sampled per particle.
    ParticleEmitter,
    "ParticleEmitter"
);

impl ParticleEmitter {
    #[must_use]
    pub fn looping(&self) -> bool {
        self.owner
            .read(self.owner.calls().particle_emitter_get_looping())
    }

    pub fn set_looping(&self, looping: bool) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_looping(), looping);
    }

    /// Particles spawned per second.
    #[must_use]
    pub fn emission_rate(&self) -> u32 {
        self.owner
            .read(self.owner.calls().particle_emitter_get_emission_rate())
    }

    pub fn set_emission_rate(&self, rate: u32) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_emission_rate(), rate);
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.owner.read(self.owner.calls().particle_emitter_get_radius())
    }

    pub fn set_radius(&self, radius: f32) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_radius(), radius);
    }

    /// Cone half-angle in degrees.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.owner.read(self.owner.calls().particle_emitter_get_angle())
    }

    pub fn set_angle(&self, angle: f32) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_angle(), angle);
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.owner
            .read(self.owner.calls().particle_emitter_get_duration())
    }

    pub fn set_duration(&self, seconds: f32) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_duration(), seconds);
    }

    #[must_use]
    pub fn lifetime(&self) -> Vec2 {
        self.owner
            .read(self.owner.calls().particle_emitter_get_lifetime())
    }

    pub fn set_lifetime(&self, range: Vec2) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_lifetime(), range);
    }

    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.owner.read(self.owner.calls().particle_emitter_get_size())
    }

    pub fn set_size(&self, range: Vec2) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_size(), range);
    }

    #[must_use]
    pub fn speed(&self) -> Vec2 {
        self.owner.read(self.owner.calls().particle_emitter_get_speed())
    }

    pub fn set_speed(&self, range: Vec2) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_speed(), range);
    }

    #[must_use]
    pub fn start_color(&self) -> Color {
        self.owner
            .read(self.owner.calls().particle_emitter_get_start_color())
    }

    pub fn set_start_color(&self, color: Color) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_start_color(), color);
    }

    #[must_use]
    pub fn end_color(&self) -> Color {
        self.owner
            .read(self.owner.calls().particle_emitter_get_end_color())
    }

    pub fn set_end_color(&self, color: Color) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_end_color(), color);
    }

    /// # Panics
    ///
    /// Panics if native reports a shape this side does not know.
    #[must_use]
    pub fn shape(&self) -> EmitterShape {
        let raw: u32 = self
            .owner
            .read(self.owner.calls().particle_emitter_get_shape());
        EmitterShape::from_raw(raw)
            .unwrap_or_else(|| unknown_discriminant("ParticleEmitter_GetShape", raw))
    }

    pub fn set_shape(&self, shape: EmitterShape) {
        self.owner
            .write(self.owner.calls().particle_emitter_set_shape(), shape.to_raw());
    }
}

#[cfg(test)]
mod tests {
    use bridge_native::components::ComponentState;
    use bridge_native::{ComponentKind, with_world};

    use super::*;
    use crate::components::test_support;

    #[test]
    fn test_settings_round_trip() {
        let (_bridge, e) = test_support::entity();
        let emitter = e.add_component::<ParticleEmitter>();
        emitter.set_looping(false);
        emitter.set_emission_rate(120);
        emitter.set_radius(0.25);
        emitter.set_angle(15.0);
        emitter.set_duration(2.0);
        emitter.set_lifetime(Vec2::new(0.5, 1.0));
        emitter.set_size(Vec2::new(0.05, 0.1));
        emitter.set_speed(Vec2::new(3.0, 6.0));
        emitter.set_start_color(Color::RED);
        emitter.set_end_color(Color::BLACK);
        emitter.set_shape(EmitterShape::Sphere);

        assert!(!emitter.looping());
        assert_eq!(emitter.emission_rate(), 120);
        assert_eq!(emitter.radius(), 0.25);
        assert_eq!(emitter.angle(), 15.0);
        assert_eq!(emitter.duration(), 2.0);
        assert_eq!(emitter.lifetime(), Vec2::new(0.5, 1.0));
        assert_eq!(emitter.size(), Vec2::new(0.05, 0.1));
        assert_eq!(emitter.speed(), Vec2::new(3.0, 6.0));
        assert_eq!(emitter.start_color(), Color::RED);
        assert_eq!(emitter.end_color(), Color::BLACK);
        assert_eq!(emitter.shape(), EmitterShape::Sphere);
    }

    #[test]
    fn test_default_shape_is_cone() {
        let (_bridge, e) = test_support::entity();
        let emitter = e.add_component::<ParticleEmitter>();
        assert_eq!(emitter.shape(), EmitterShape::Cone);
    }

    #[test]
    #[should_panic(expected = "returned unknown discriminant 42")]
    fn test_unknown_shape_is_an_integration_failure() {
        let (_bridge, e) = test_support::entity();
        let emitter = e.add_component::<ParticleEmitter>();
        with_world(|world| {
            if let Some(ComponentState::ParticleEmitter(state)) =
                world.component_mut(e.handle(), ComponentKind::ParticleEmitter)
            {
                state.shape = 42;
            }
        });
        let _ = emitter.shape();
    }
}
