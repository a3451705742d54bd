//! `extern "C"` implementations of every call-table operation.
//!
//! Each operation resolves its target in this thread's [`NativeWorld`] and
//! quietly does nothing when the target is missing: getters leave the output
//! untouched and predicates report `false`. Deciding whether a handle is
//! still alive is the caller's job.

use std::ffi::c_void;

use bridge_calls::NativeBinding;
use bridge_core::{AssetHandle, EntityHandle, NativeStr, TypeTag};
use bridge_math::{Color, Float4, Vec2, Vec3, Vec4};
use tracing::warn;

use crate::assets::AssetKind;
use crate::components::{
    AnimatorParameter, AnimatorState, CharacterControllerState, ComponentKind, ComponentState,
    MaterialValue, MeshRendererState, ParticleEmitterState, RigidBodyState, SpriteRendererState,
    TransformState,
};
use crate::world::{NativeWorld, with_world};

/// Write through an output pointer, ignoring null.
unsafe fn write_out<T>(out: *mut T, value: T) {
    if !out.is_null() {
        // SAFETY: the caller passes a valid, writable pointer.
        unsafe { out.write(value) };
    }
}

/// Copy a borrowed view into an owned string.
unsafe fn read_text(text: NativeStr) -> String {
    // SAFETY: the managed side keeps the view alive for the call.
    unsafe { text.to_string_lossy() }
}

macro_rules! state_accessor {
    ($name:ident, $variant:ident, $state:ty) => {
        fn $name<R>(entity: EntityHandle, f: impl FnOnce(&mut $state) -> R) -> Option<R> {
            with_world(|world| match world.component_mut(entity, ComponentKind::$variant)? {
                ComponentState::$variant(state) => Some(f(state)),
                _ => None,
            })
        }
    };
}

state_accessor!(with_transform, Transform, TransformState);
state_accessor!(with_rigid_body, RigidBody, RigidBodyState);
state_accessor!(with_character_controller, CharacterController, CharacterControllerState);
state_accessor!(with_animator, Animator, AnimatorState);
state_accessor!(with_mesh_renderer, MeshRenderer, MeshRendererState);
state_accessor!(with_sprite_renderer, SpriteRenderer, SpriteRendererState);
state_accessor!(with_particle_emitter, ParticleEmitter, ParticleEmitterState);

macro_rules! property {
    ($get:ident, $set:ident, $with:ident, $field:ident: $ty:ty) => {
        unsafe extern "C" fn $get(entity: EntityHandle, out: *mut $ty) {
            if let Some(value) = $with(entity, |state| state.$field) {
                // SAFETY: `out` comes straight from the managed caller.
                unsafe { write_out(out, value) };
            }
        }

        unsafe extern "C" fn $set(entity: EntityHandle, value: $ty) {
            $with(entity, |state| state.$field = value);
        }
    };
}

// -- Entity --

unsafe extern "C" fn entity_create() -> EntityHandle {
    with_world(NativeWorld::create_entity)
}

unsafe extern "C" fn entity_destroy(entity: EntityHandle) {
    with_world(|world| world.destroy_entity(entity));
}

unsafe extern "C" fn entity_get_name(entity: EntityHandle, out: *mut NativeStr) {
    let view = with_world(|world| world.entity_name(entity).map_or(NativeStr::EMPTY, NativeStr::new));
    // SAFETY: `out` comes straight from the managed caller.
    unsafe { write_out(out, view) };
}

unsafe extern "C" fn entity_set_name(entity: EntityHandle, name: NativeStr) {
    // SAFETY: the view is valid for this call.
    let name = unsafe { read_text(name) };
    with_world(|world| world.set_entity_name(entity, name));
}

unsafe extern "C" fn entity_add_component(entity: EntityHandle, tag: TypeTag) {
    with_world(|world| world.add_component(entity, tag));
}

unsafe extern "C" fn entity_has_component(entity: EntityHandle, tag: TypeTag) -> bool {
    with_world(|world| world.has_component(entity, tag))
}

unsafe extern "C" fn entity_remove_component(entity: EntityHandle, tag: TypeTag) -> bool {
    with_world(|world| world.remove_component(entity, tag))
}

// -- Transform --

property!(transform_get_position, transform_set_position, with_transform, position: Vec3);
property!(transform_get_euler_angles, transform_set_euler_angles, with_transform, euler_angles: Vec3);
property!(transform_get_scale, transform_set_scale, with_transform, scale: Vec3);

unsafe extern "C" fn transform_get_forward(entity: EntityHandle, out: *mut Vec3) {
    if let Some(forward) = with_transform(entity, |t| t.forward()) {
        // SAFETY: `out` comes straight from the managed caller.
        unsafe { write_out(out, forward) };
    }
}

unsafe extern "C" fn transform_get_right(entity: EntityHandle, out: *mut Vec3) {
    if let Some(right) = with_transform(entity, |t| t.right()) {
        // SAFETY: `out` comes straight from the managed caller.
        unsafe { write_out(out, right) };
    }
}

// -- RigidBody --

property!(rigid_body_get_linear_velocity, rigid_body_set_linear_velocity, with_rigid_body, linear_velocity: Vec3);
property!(rigid_body_get_friction, rigid_body_set_friction, with_rigid_body, friction: f32);
property!(rigid_body_get_max_linear_velocity, rigid_body_set_max_linear_velocity, with_rigid_body, max_linear_velocity: f32);

unsafe extern "C" fn rigid_body_add_linear_velocity(entity: EntityHandle, delta: Vec3) {
    with_rigid_body(entity, |body| body.add_linear_velocity(delta));
}

// -- CharacterController --

property!(character_controller_get_linear_velocity, character_controller_set_linear_velocity, with_character_controller, linear_velocity: Vec3);
property!(character_controller_get_radius, character_controller_set_radius, with_character_controller, radius: f32);
property!(character_controller_get_height, character_controller_set_height, with_character_controller, height: f32);

unsafe extern "C" fn character_controller_is_enabled(entity: EntityHandle) -> bool {
    with_character_controller(entity, |cc| cc.enabled).unwrap_or(false)
}

unsafe extern "C" fn character_controller_set_enabled(entity: EntityHandle, enabled: bool) {
    with_character_controller(entity, |cc| cc.enabled = enabled);
}

// -- Animator --

unsafe extern "C" fn animator_is_enabled(entity: EntityHandle) -> bool {
    with_animator(entity, |a| a.enabled).unwrap_or(false)
}

unsafe fn set_animator_parameter(entity: EntityHandle, name: NativeStr, value: AnimatorParameter) {
    // SAFETY: the view is valid for this call.
    let name = unsafe { read_text(name) };
    with_animator(entity, |a| a.set(name, value));
}

unsafe extern "C" fn animator_set_float(entity: EntityHandle, name: NativeStr, value: f32) {
    // SAFETY: forwarded from the managed caller.
    unsafe { set_animator_parameter(entity, name, AnimatorParameter::Float(value)) };
}

unsafe extern "C" fn animator_set_bool(entity: EntityHandle, name: NativeStr, value: bool) {
    // SAFETY: forwarded from the managed caller.
    unsafe { set_animator_parameter(entity, name, AnimatorParameter::Bool(value)) };
}

unsafe extern "C" fn animator_set_int(entity: EntityHandle, name: NativeStr, value: i32) {
    // SAFETY: forwarded from the managed caller.
    unsafe { set_animator_parameter(entity, name, AnimatorParameter::Int(value)) };
}

unsafe extern "C" fn animator_set_trigger(entity: EntityHandle, name: NativeStr) {
    // SAFETY: forwarded from the managed caller.
    unsafe { set_animator_parameter(entity, name, AnimatorParameter::Trigger) };
}

// -- MeshRenderer --

unsafe extern "C" fn mesh_renderer_get_mesh(entity: EntityHandle) -> AssetHandle {
    with_mesh_renderer(entity, |r| r.mesh).unwrap_or(AssetHandle::INVALID)
}

unsafe extern "C" fn mesh_renderer_set_mesh(entity: EntityHandle, mesh: AssetHandle) {
    with_mesh_renderer(entity, |r| r.mesh = mesh);
}

unsafe fn set_material(entity: EntityHandle, name: NativeStr, value: MaterialValue, submesh: i32) {
    // SAFETY: the view is valid for this call.
    let name = unsafe { read_text(name) };
    with_mesh_renderer(entity, |r| r.set_property(submesh, name, value));
}

unsafe extern "C" fn mesh_renderer_set_float(entity: EntityHandle, name: NativeStr, value: f32, submesh: i32) {
    // SAFETY: forwarded from the managed caller.
    unsafe { set_material(entity, name, MaterialValue::Float(value), submesh) };
}

unsafe extern "C" fn mesh_renderer_set_float2(entity: EntityHandle, name: NativeStr, value: Vec2, submesh: i32) {
    // SAFETY: forwarded from the managed caller.
    unsafe { set_material(entity, name, MaterialValue::Float2(value), submesh) };
}

unsafe extern "C" fn mesh_renderer_set_float3(entity: EntityHandle, name: NativeStr, value: Vec3, submesh: i32) {
    // SAFETY: forwarded from the managed caller.
    unsafe { set_material(entity, name, MaterialValue::Float3(value), submesh) };
}

unsafe extern "C" fn mesh_renderer_set_float4(entity: EntityHandle, name: NativeStr, value: Float4, submesh: i32) {
    // SAFETY: forwarded from the managed caller.
    unsafe { set_material(entity, name, MaterialValue::Float4(Vec4::from(value)), submesh) };
}

unsafe extern "C" fn mesh_renderer_set_bool(entity: EntityHandle, name: NativeStr, value: bool, submesh: i32) {
    // SAFETY: forwarded from the managed caller.
    unsafe { set_material(entity, name, MaterialValue::Bool(value), submesh) };
}

// -- SpriteRenderer --

property!(sprite_renderer_get_fill, sprite_renderer_set_fill, with_sprite_renderer, fill: Vec2);
property!(sprite_renderer_get_base_color, sprite_renderer_set_base_color, with_sprite_renderer, base_color: Color);
property!(sprite_renderer_get_sprite, sprite_renderer_set_sprite, with_sprite_renderer, sprite: AssetHandle);

// -- ParticleEmitter --

property!(particle_emitter_get_looping, particle_emitter_set_looping, with_particle_emitter, looping: bool);
property!(particle_emitter_get_emission_rate, particle_emitter_set_emission_rate, with_particle_emitter, emission_rate: u32);
property!(particle_emitter_get_radius, particle_emitter_set_radius, with_particle_emitter, radius: f32);
property!(particle_emitter_get_angle, particle_emitter_set_angle, with_particle_emitter, angle: f32);
property!(particle_emitter_get_duration, particle_emitter_set_duration, with_particle_emitter, duration: f32);
property!(particle_emitter_get_lifetime, particle_emitter_set_lifetime, with_particle_emitter, lifetime: Vec2);
property!(particle_emitter_get_size, particle_emitter_set_size, with_particle_emitter, size: Vec2);
property!(particle_emitter_get_speed, particle_emitter_set_speed, with_particle_emitter, speed: Vec2);
property!(particle_emitter_get_start_color, particle_emitter_set_start_color, with_particle_emitter, start_color: Color);
property!(particle_emitter_get_end_color, particle_emitter_set_end_color, with_particle_emitter, end_color: Color);
property!(particle_emitter_get_shape, particle_emitter_set_shape, with_particle_emitter, shape: u32);

// -- Assets --

unsafe extern "C" fn asset_get_name(asset: AssetHandle, out: *mut NativeStr) {
    let view = with_world(|world| {
        world
            .asset(asset)
            .map_or(NativeStr::EMPTY, |a| NativeStr::new(&a.name))
    });
    // SAFETY: `out` comes straight from the managed caller.
    unsafe { write_out(out, view) };
}

unsafe extern "C" fn asset_set_name(asset: AssetHandle, name: NativeStr) {
    // SAFETY: the view is valid for this call.
    let name = unsafe { read_text(name) };
    with_world(|world| {
        if let Some(record) = world.asset_mut(asset) {
            record.name = name;
        }
    });
}

fn with_asset_kind<R>(asset: AssetHandle, f: impl FnOnce(&AssetKind) -> Option<R>) -> Option<R> {
    with_world(|world| world.asset(asset).and_then(|a| f(&a.kind)))
}

unsafe extern "C" fn mesh_get_vertex_count(asset: AssetHandle) -> u32 {
    with_asset_kind(asset, |kind| match kind {
        AssetKind::Mesh { vertex_count, .. } => Some(*vertex_count),
        _ => None,
    })
    .unwrap_or(0)
}

unsafe extern "C" fn mesh_get_index_count(asset: AssetHandle) -> u32 {
    with_asset_kind(asset, |kind| match kind {
        AssetKind::Mesh { index_count, .. } => Some(*index_count),
        _ => None,
    })
    .unwrap_or(0)
}

unsafe extern "C" fn texture2d_get_width(asset: AssetHandle, out: *mut u32) {
    if let Some(width) = with_asset_kind(asset, |kind| match kind {
        AssetKind::Texture2D { width, .. } => Some(*width),
        _ => None,
    }) {
        // SAFETY: `out` comes straight from the managed caller.
        unsafe { write_out(out, width) };
    }
}

unsafe extern "C" fn texture2d_get_height(asset: AssetHandle, out: *mut u32) {
    if let Some(height) = with_asset_kind(asset, |kind| match kind {
        AssetKind::Texture2D { height, .. } => Some(*height),
        _ => None,
    }) {
        // SAFETY: `out` comes straight from the managed caller.
        unsafe { write_out(out, height) };
    }
}

unsafe extern "C" fn texture2d_get_mip_maps_enabled(asset: AssetHandle, out: *mut bool) {
    if let Some(mip_maps) = with_asset_kind(asset, |kind| match kind {
        AssetKind::Texture2D { mip_maps, .. } => Some(*mip_maps),
        _ => None,
    }) {
        // SAFETY: `out` comes straight from the managed caller.
        unsafe { write_out(out, mip_maps) };
    }
}

unsafe extern "C" fn prefab_load_instance(prefab: AssetHandle, out: *mut EntityHandle) {
    let entity = with_world(|world| world.instantiate_prefab(prefab)).unwrap_or_else(|err| {
        warn!(prefab = %prefab, error = %err, "prefab instantiation failed");
        EntityHandle::INVALID
    });
    // SAFETY: `out` comes straight from the managed caller.
    unsafe { write_out(out, entity) };
}

// -- Input --

unsafe extern "C" fn input_get_key_press(key: u32) -> bool {
    with_world(|world| world.input().key_pressed(key))
}

unsafe extern "C" fn input_get_key_down(key: u32) -> bool {
    with_world(|world| world.input().key_down(key))
}

unsafe extern "C" fn input_get_key_up(key: u32) -> bool {
    with_world(|world| world.input().key_released(key))
}

unsafe extern "C" fn input_get_mouse_button_down(button: u32) -> bool {
    with_world(|world| world.input().mouse_button_down(button))
}

unsafe extern "C" fn input_get_mouse_axis_horizontal() -> f32 {
    with_world(|world| world.input().mouse_delta().x)
}

unsafe extern "C" fn input_get_mouse_axis_vertical() -> f32 {
    with_world(|world| world.input().mouse_delta().y)
}

unsafe extern "C" fn input_get_mouse_position() -> Vec2 {
    with_world(|world| world.input().mouse_position())
}

// -- Time --

unsafe extern "C" fn time_get_delta_time() -> f32 {
    with_world(|world| world.delta_time())
}

macro_rules! bindings {
    ($($name:literal => $function:ident,)*) => {
        vec![$(NativeBinding::new($name, $function as *const c_void),)*]
    };
}

/// The full startup hand-off: every operation, by its stable name.
#[must_use]
pub fn bindings() -> Vec<NativeBinding> {
    bindings![
        "Entity_Create" => entity_create,
        "Entity_Destroy" => entity_destroy,
        "Entity_GetName" => entity_get_name,
        "Entity_SetName" => entity_set_name,
        "Entity_AddComponent" => entity_add_component,
        "Entity_HasComponent" => entity_has_component,
        "Entity_RemoveComponent" => entity_remove_component,

        "Transform_GetPosition" => transform_get_position,
        "Transform_SetPosition" => transform_set_position,
        "Transform_GetEulerAngles" => transform_get_euler_angles,
        "Transform_SetEulerAngles" => transform_set_euler_angles,
        "Transform_GetScale" => transform_get_scale,
        "Transform_SetScale" => transform_set_scale,
        "Transform_GetForward" => transform_get_forward,
        "Transform_GetRight" => transform_get_right,

        "RigidBody_GetLinearVelocity" => rigid_body_get_linear_velocity,
        "RigidBody_SetLinearVelocity" => rigid_body_set_linear_velocity,
        "RigidBody_AddLinearVelocity" => rigid_body_add_linear_velocity,
        "RigidBody_GetFriction" => rigid_body_get_friction,
        "RigidBody_SetFriction" => rigid_body_set_friction,
        "RigidBody_GetMaxLinearVelocity" => rigid_body_get_max_linear_velocity,
        "RigidBody_SetMaxLinearVelocity" => rigid_body_set_max_linear_velocity,

        "CharacterController_GetLinearVelocity" => character_controller_get_linear_velocity,
        "CharacterController_SetLinearVelocity" => character_controller_set_linear_velocity,
        "CharacterController_IsEnabled" => character_controller_is_enabled,
        "CharacterController_SetEnabled" => character_controller_set_enabled,
        "CharacterController_GetRadius" => character_controller_get_radius,
        "CharacterController_SetRadius" => character_controller_set_radius,
        "CharacterController_GetHeight" => character_controller_get_height,
        "CharacterController_SetHeight" => character_controller_set_height,

        "Animator_IsEnabled" => animator_is_enabled,
        "Animator_SetFloat" => animator_set_float,
        "Animator_SetBool" => animator_set_bool,
        "Animator_SetInt" => animator_set_int,
        "Animator_SetTrigger" => animator_set_trigger,

        "MeshRenderer_GetMesh" => mesh_renderer_get_mesh,
        "MeshRenderer_SetMesh" => mesh_renderer_set_mesh,
        "MeshRenderer_SetFloat" => mesh_renderer_set_float,
        "MeshRenderer_SetFloat2" => mesh_renderer_set_float2,
        "MeshRenderer_SetFloat3" => mesh_renderer_set_float3,
        "MeshRenderer_SetFloat4" => mesh_renderer_set_float4,
        "MeshRenderer_SetBool" => mesh_renderer_set_bool,

        "SpriteRenderer_GetFill" => sprite_renderer_get_fill,
        "SpriteRenderer_SetFill" => sprite_renderer_set_fill,
        "SpriteRenderer_GetBaseColor" => sprite_renderer_get_base_color,
        "SpriteRenderer_SetBaseColor" => sprite_renderer_set_base_color,
        "SpriteRenderer_GetSprite" => sprite_renderer_get_sprite,
        "SpriteRenderer_SetSprite" => sprite_renderer_set_sprite,

        "ParticleEmitter_GetLooping" => particle_emitter_get_looping,
        "ParticleEmitter_SetLooping" => particle_emitter_set_looping,
        "ParticleEmitter_GetEmissionRate" => particle_emitter_get_emission_rate,
        "ParticleEmitter_SetEmissionRate" => particle_emitter_set_emission_rate,
        "ParticleEmitter_GetRadius" => particle_emitter_get_radius,
        "ParticleEmitter_SetRadius" => particle_emitter_set_radius,
        "ParticleEmitter_GetAngle" => particle_emitter_get_angle,
        "ParticleEmitter_SetAngle" => particle_emitter_set_angle,
        "ParticleEmitter_GetDuration" => particle_emitter_get_duration,
        "ParticleEmitter_SetDuration" => particle_emitter_set_duration,
        "ParticleEmitter_GetLifetime" => particle_emitter_get_lifetime,
        "ParticleEmitter_SetLifetime" => particle_emitter_set_lifetime,
        "ParticleEmitter_GetSize" => particle_emitter_get_size,
        "ParticleEmitter_SetSize" => particle_emitter_set_size,
        "ParticleEmitter_GetSpeed" => particle_emitter_get_speed,
        "ParticleEmitter_SetSpeed" => particle_emitter_set_speed,
        "ParticleEmitter_GetStartColor" => particle_emitter_get_start_color,
        "ParticleEmitter_SetStartColor" => particle_emitter_set_start_color,
        "ParticleEmitter_GetEndColor" => particle_emitter_get_end_color,
        "ParticleEmitter_SetEndColor" => particle_emitter_set_end_color,
        "ParticleEmitter_GetShape" => particle_emitter_get_shape,
        "ParticleEmitter_SetShape" => particle_emitter_set_shape,

        "Asset_GetName" => asset_get_name,
        "Asset_SetName" => asset_set_name,
        "Mesh_GetVertexCount" => mesh_get_vertex_count,
        "Mesh_GetIndexCount" => mesh_get_index_count,
        "Texture2D_GetWidth" => texture2d_get_width,
        "Texture2D_GetHeight" => texture2d_get_height,
        "Texture2D_GetMipMapsEnabled" => texture2d_get_mip_maps_enabled,
        "Prefab_LoadInstance" => prefab_load_instance,

        "Input_GetKeyPress" => input_get_key_press,
        "Input_GetKeyDown" => input_get_key_down,
        "Input_GetKeyUp" => input_get_key_up,
        "Input_GetMouseButtonDown" => input_get_mouse_button_down,
        "Input_GetMouseAxisHorizontal" => input_get_mouse_axis_horizontal,
        "Input_GetMouseAxisVertical" => input_get_mouse_axis_vertical,
        "Input_GetMousePosition" => input_get_mouse_position,

        "Time_GetDeltaTime" => time_get_delta_time,
    ]
}

#[cfg(test)]
mod tests {
    use bridge_calls::{Bridge, BridgeConfig, CallTable};

    use super::*;
    use crate::world::reset;

    fn strict_bridge() -> std::rc::Rc<Bridge> {
        reset();
        let bindings = bindings();
        unsafe { Bridge::attach_bindings(&bindings, BridgeConfig::new().with_strict(true)) }.unwrap()
    }

    #[test]
    fn test_every_operation_is_bound() {
        assert_eq!(bindings().len(), CallTable::OPERATIONS.len());
        let bridge = strict_bridge();
        assert!(bridge.calls().missing().is_empty());
    }

    #[test]
    fn test_name_round_trip_through_views() {
        let bridge = strict_bridge();
        let calls = bridge.calls();
        let e = unsafe { calls.entity_create()() };
        let name = String::from("Player");
        unsafe { calls.entity_set_name()(e, NativeStr::new(&name)) };

        let mut view = NativeStr::EMPTY;
        unsafe { calls.entity_get_name()(e, &mut view) };
        assert_eq!(unsafe { view.to_string_lossy() }, "Player");
    }

    #[test]
    fn test_getters_leave_output_untouched_for_missing_component() {
        let bridge = strict_bridge();
        let calls = bridge.calls();
        let e = unsafe { calls.entity_create()() };
        let mut out = Vec3::splat(9.0);
        unsafe { calls.transform_get_position()(e, &mut out) };
        assert_eq!(out, Vec3::splat(9.0));
        assert!(!unsafe { calls.character_controller_is_enabled()(e) });
    }

    #[test]
    fn test_material_float4_is_stored() {
        let bridge = strict_bridge();
        let calls = bridge.calls();
        let e = unsafe { calls.entity_create()() };
        unsafe { calls.entity_add_component()(e, ComponentKind::MeshRenderer.tag()) };
        let name = "tint";
        unsafe {
            calls.mesh_renderer_set_float4()(e, NativeStr::new(name), Float4::from(Vec4::ONE), 2)
        };
        let stored = with_mesh_renderer(e, |r| r.property(2, "tint")).flatten();
        assert_eq!(stored, Some(MaterialValue::Float4(Vec4::ONE)));
    }

    #[test]
    fn test_failed_prefab_load_writes_invalid() {
        let bridge = strict_bridge();
        let mesh = with_world(|world| world.create_mesh("Cube", 8, 36));
        let mut out = EntityHandle::from_raw(5);
        unsafe { bridge.calls().prefab_load_instance()(mesh, &mut out) };
        assert_eq!(out, EntityHandle::INVALID);
    }

    #[test]
    fn test_texture_queries() {
        let bridge = strict_bridge();
        let calls = bridge.calls();
        let tex = with_world(|world| world.create_texture("Grass", 512, 256, true));
        let (mut w, mut h, mut mips) = (0, 0, false);
        unsafe {
            calls.texture2d_get_width()(tex, &mut w);
            calls.texture2d_get_height()(tex, &mut h);
            calls.texture2d_get_mip_maps_enabled()(tex, &mut mips);
        }
        assert_eq!((w, h, mips), (512, 256, true));
        assert_eq!(unsafe { calls.mesh_get_vertex_count()(tex) }, 0);
    }
}
