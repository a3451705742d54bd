//! Native component kinds and their state.
//!
//! The host recognises a fixed set of component kinds. Each kind has a
//! stable name whose FNV-1a [`TypeTag`] is what the managed side passes to
//! `Entity_AddComponent` and friends. A tag the host does not recognise is
//! ignored, exactly like a component type that was never registered.

use bridge_calls::EmitterShape;
use bridge_core::{AssetHandle, TypeTag};
use bridge_math::{Color, EulerRot, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// The component kinds the host knows how to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    RigidBody,
    CharacterController,
    Animator,
    MeshRenderer,
    SpriteRenderer,
    ParticleEmitter,
}

impl ComponentKind {
    /// Every kind, in registration order.
    pub const ALL: [Self; 7] = [
        Self::Transform,
        Self::RigidBody,
        Self::CharacterController,
        Self::Animator,
        Self::MeshRenderer,
        Self::SpriteRenderer,
        Self::ParticleEmitter,
    ];

    /// The stable name shared with the managed side.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transform => "Transform",
            Self::RigidBody => "RigidBody",
            Self::CharacterController => "CharacterController",
            Self::Animator => "Animator",
            Self::MeshRenderer => "MeshRenderer",
            Self::SpriteRenderer => "SpriteRenderer",
            Self::ParticleEmitter => "ParticleEmitter",
        }
    }

    /// The tag derived from [`ComponentKind::name`].
    #[must_use]
    pub const fn tag(self) -> TypeTag {
        TypeTag::from_name(self.name())
    }

    /// Resolve a tag to a registered kind.
    #[must_use]
    pub fn from_tag(tag: TypeTag) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Fresh state for a newly added component of this kind.
    #[must_use]
    pub fn default_state(self) -> ComponentState {
        match self {
            Self::Transform => ComponentState::Transform(TransformState::default()),
            Self::RigidBody => ComponentState::RigidBody(RigidBodyState::default()),
            Self::CharacterController => {
                ComponentState::CharacterController(CharacterControllerState::default())
            }
            Self::Animator => ComponentState::Animator(AnimatorState::default()),
            Self::MeshRenderer => ComponentState::MeshRenderer(MeshRendererState::default()),
            Self::SpriteRenderer => ComponentState::SpriteRenderer(SpriteRendererState::default()),
            Self::ParticleEmitter => {
                ComponentState::ParticleEmitter(ParticleEmitterState::default())
            }
        }
    }
}

/// The stored state of one native component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentState {
    Transform(TransformState),
    RigidBody(RigidBodyState),
    CharacterController(CharacterControllerState),
    Animator(AnimatorState),
    MeshRenderer(MeshRendererState),
    SpriteRenderer(SpriteRendererState),
    ParticleEmitter(ParticleEmitterState),
}

impl ComponentState {
    /// The kind this state belongs to.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Transform(_) => ComponentKind::Transform,
            Self::RigidBody(_) => ComponentKind::RigidBody,
            Self::CharacterController(_) => ComponentKind::CharacterController,
            Self::Animator(_) => ComponentKind::Animator,
            Self::MeshRenderer(_) => ComponentKind::MeshRenderer,
            Self::SpriteRenderer(_) => ComponentKind::SpriteRenderer,
            Self::ParticleEmitter(_) => ComponentKind::ParticleEmitter,
        }
    }
}

/// Position, rotation (Euler angles in degrees), and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub position: Vec3,
    pub euler_angles: Vec3,
    pub scale: Vec3,
}

impl TransformState {
    /// Rotation built from the Euler angles (yaw about Y, then pitch about X,
    /// then roll about Z).
    #[must_use]
    pub fn rotation(&self) -> Quat {
        let radians = Vec3::new(
            self.euler_angles.x.to_radians(),
            self.euler_angles.y.to_radians(),
            self.euler_angles.z.to_radians(),
        );
        Quat::from_euler(EulerRot::YXZ, radians.y, radians.x, radians.z)
    }

    /// Local +Z rotated into world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Local +X rotated into world space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            euler_angles: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyState {
    pub linear_velocity: Vec3,
    pub friction: f32,
    pub max_linear_velocity: f32,
}

impl RigidBodyState {
    /// Add to the velocity, clamped to `max_linear_velocity`.
    pub fn add_linear_velocity(&mut self, delta: Vec3) {
        self.linear_velocity = (self.linear_velocity + delta).clamp_length_max(self.max_linear_velocity);
    }
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self {
            linear_velocity: Vec3::ZERO,
            friction: 0.5,
            max_linear_velocity: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterControllerState {
    pub linear_velocity: Vec3,
    pub enabled: bool,
    pub radius: f32,
    pub height: f32,
}

impl Default for CharacterControllerState {
    fn default() -> Self {
        Self {
            linear_velocity: Vec3::ZERO,
            enabled: true,
            radius: 1.0,
            height: 2.0,
        }
    }
}

/// A value written into an animator's parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnimatorParameter {
    Float(f32),
    Bool(bool),
    Int(i32),
    Trigger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorState {
    pub enabled: bool,
    pub parameters: Vec<(String, AnimatorParameter)>,
}

impl AnimatorState {
    /// Insert or overwrite a named parameter.
    pub fn set(&mut self, name: String, value: AnimatorParameter) {
        match self.parameters.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.parameters.push((name, value)),
        }
    }

    /// Look up a named parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<AnimatorParameter> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }
}

impl Default for AnimatorState {
    fn default() -> Self {
        Self {
            enabled: true,
            parameters: Vec::new(),
        }
    }
}

/// A value written into a mesh renderer's material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaterialValue {
    Float(f32),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperty {
    pub submesh: i32,
    pub name: String,
    pub value: MaterialValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshRendererState {
    pub mesh: AssetHandle,
    pub properties: Vec<MaterialProperty>,
}

impl MeshRendererState {
    /// Insert or overwrite a material property on one submesh.
    pub fn set_property(&mut self, submesh: i32, name: String, value: MaterialValue) {
        match self
            .properties
            .iter_mut()
            .find(|p| p.submesh == submesh && p.name == name)
        {
            Some(property) => property.value = value,
            None => self.properties.push(MaterialProperty {
                submesh,
                name,
                value,
            }),
        }
    }

    /// Look up a material property on one submesh.
    #[must_use]
    pub fn property(&self, submesh: i32, name: &str) -> Option<MaterialValue> {
        self.properties
            .iter()
            .find(|p| p.submesh == submesh && p.name == name)
            .map(|p| p.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteRendererState {
    pub fill: Vec2,
    pub base_color: Color,
    pub sprite: AssetHandle,
}

impl Default for SpriteRendererState {
    fn default() -> Self {
        Self {
            fill: Vec2::ONE,
            base_color: Color::WHITE,
            sprite: AssetHandle::INVALID,
        }
    }
}

/// Emitter settings. `shape` is kept as its wire value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleEmitterState {
    pub looping: bool,
    pub emission_rate: u32,
    pub radius: f32,
    pub angle: f32,
    pub duration: f32,
    pub lifetime: Vec2,
    pub size: Vec2,
    pub speed: Vec2,
    pub start_color: Color,
    pub end_color: Color,
    pub shape: u32,
}

impl Default for ParticleEmitterState {
    fn default() -> Self {
        Self {
            looping: true,
            emission_rate: 10,
            radius: 1.0,
            angle: 30.0,
            duration: 5.0,
            lifetime: Vec2::new(1.0, 2.0),
            size: Vec2::new(0.1, 0.2),
            speed: Vec2::new(1.0, 2.0),
            start_color: Color::WHITE,
            end_color: Color::new(1.0, 1.0, 1.0, 0.0),
            shape: EmitterShape::default().to_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_tag(kind.tag()), Some(kind));
            assert_eq!(kind.default_state().kind(), kind);
        }
        assert_eq!(ComponentKind::from_tag(TypeTag::from_name("Light")), None);
    }

    #[test]
    fn test_identity_transform_axes() {
        let t = TransformState::default();
        assert_eq!(t.forward(), Vec3::Z);
        assert_eq!(t.right(), Vec3::X);
    }

    #[test]
    fn test_yaw_turns_forward_towards_x() {
        let t = TransformState {
            euler_angles: Vec3::new(0.0, 90.0, 0.0),
            ..TransformState::default()
        };
        assert!(t.forward().abs_diff_eq(Vec3::X, 1e-5));
        assert!(t.right().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_add_linear_velocity_is_clamped() {
        let mut body = RigidBodyState {
            max_linear_velocity: 2.0,
            ..RigidBodyState::default()
        };
        body.add_linear_velocity(Vec3::new(10.0, 0.0, 0.0));
        assert!(body.linear_velocity.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_animator_parameters_overwrite() {
        let mut animator = AnimatorState::default();
        animator.set("speed".into(), AnimatorParameter::Float(1.0));
        animator.set("speed".into(), AnimatorParameter::Float(2.0));
        assert_eq!(animator.parameters.len(), 1);
        assert_eq!(animator.get("speed"), Some(AnimatorParameter::Float(2.0)));
    }

    #[test]
    fn test_material_properties_are_per_submesh() {
        let mut renderer = MeshRendererState::default();
        renderer.set_property(0, "roughness".into(), MaterialValue::Float(0.2));
        renderer.set_property(1, "roughness".into(), MaterialValue::Float(0.8));
        assert_eq!(renderer.property(0, "roughness"), Some(MaterialValue::Float(0.2)));
        assert_eq!(renderer.property(1, "roughness"), Some(MaterialValue::Float(0.8)));
        assert_eq!(renderer.property(2, "roughness"), None);
    }
}
