//! The native call table.
//!
//! Each entry is a stable operation name bound to a native address with a
//! fixed signature: handles and fixed-layout values by value, composite
//! results through an output pointer, text as a [`NativeStr`] view.
//!
//! The host populates the table exactly once, before any scripting logic
//! runs, either field by field or through [`CallTable::from_bindings`].
//! After that the table is plain read-only data.
//!
//! Every operation has a same-named accessor that returns the bound
//! function pointer. Calling the accessor for an unpopulated operation is an
//! [`integration_failure`].

use std::ffi::c_void;

use bridge_core::{AssetHandle, EntityHandle, NativeStr, TypeTag};
use bridge_math::{Color, Float4, Vec2, Vec3};
use tracing::error;

use crate::error::BridgeError;

/// Abort the current operation because the native side never populated
/// `operation`.
///
/// This indicates a native/managed version or attach-order mismatch. It is
/// logged and then panics; it must not be caught and retried.
#[cold]
#[inline(never)]
#[track_caller]
pub fn integration_failure(operation: &'static str) -> ! {
    error!(operation, "native operation invoked but never populated");
    panic!("integration failure: native operation `{operation}` was never populated");
}

/// Abort because native returned an enumeration value the managed side does
/// not know.
#[cold]
#[inline(never)]
#[track_caller]
pub fn unknown_discriminant(operation: &'static str, raw: u32) -> ! {
    error!(operation, raw, "native returned an unknown enum discriminant");
    panic!("integration failure: native operation `{operation}` returned unknown discriminant {raw}");
}

/// One (name, address) pair of the startup hand-off, in C layout so a
/// native host can build the array itself.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct NativeBinding {
    pub name: NativeStr,
    pub address: *const c_void,
}

impl NativeBinding {
    /// Build a binding from a static operation name.
    #[must_use]
    pub const fn new(name: &'static str, address: *const c_void) -> Self {
        Self {
            name: NativeStr::new(name),
            address,
        }
    }
}

macro_rules! call_table {
    ($(
        $(#[$doc:meta])*
        $field:ident => $name:literal : $ty:ty;
    )*) => {
        /// Every native operation the bridge can invoke.
        ///
        /// Fields are `None` until the host binds them.
        #[derive(Clone, Copy, Default)]
        pub struct CallTable {
            $(
                $(#[$doc])*
                pub $field: Option<$ty>,
            )*
        }

        impl CallTable {
            /// Stable names of every operation, in declaration order.
            pub const OPERATIONS: &'static [&'static str] = &[$($name),*];

            /// Bind one operation by its stable name.
            ///
            /// # Errors
            ///
            /// Returns [`BridgeError::NullAddress`] for a null address,
            /// [`BridgeError::DuplicateBinding`] if `name` is already bound,
            /// and [`BridgeError::UnknownOperation`] for names the table does
            /// not define.
            ///
            /// # Safety
            ///
            /// `address` must point to a function with exactly the signature
            /// of the named operation, and must stay callable for the rest of
            /// the process.
            pub unsafe fn bind(&mut self, name: &str, address: *const c_void) -> Result<(), BridgeError> {
                if address.is_null() {
                    return Err(BridgeError::NullAddress(name.to_string()));
                }
                match name {
                    $(
                        $name => {
                            if self.$field.is_some() {
                                return Err(BridgeError::DuplicateBinding(name.to_string()));
                            }
                            // SAFETY: non-null, and the caller guarantees the signature.
                            self.$field = Some(unsafe { std::mem::transmute::<*const c_void, $ty>(address) });
                            Ok(())
                        }
                    )*
                    _ => Err(BridgeError::UnknownOperation(name.to_string())),
                }
            }

            /// Names of the operations that are still unpopulated.
            #[must_use]
            pub fn missing(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $(
                    if self.$field.is_none() {
                        missing.push($name);
                    }
                )*
                missing
            }

            $(
                #[doc = concat!("Returns the address bound to `", $name, "`.")]
                #[doc = ""]
                #[doc = "Fails with an integration failure if it was never populated."]
                #[inline]
                #[track_caller]
                pub fn $field(&self) -> $ty {
                    match self.$field {
                        Some(op) => op,
                        None => integration_failure($name),
                    }
                }
            )*
        }
    };
}

call_table! {
    // Entity
    entity_create => "Entity_Create": unsafe extern "C" fn() -> EntityHandle;
    entity_destroy => "Entity_Destroy": unsafe extern "C" fn(EntityHandle);
    entity_get_name => "Entity_GetName": unsafe extern "C" fn(EntityHandle, *mut NativeStr);
    entity_set_name => "Entity_SetName": unsafe extern "C" fn(EntityHandle, NativeStr);
    /// Adds a component of the tagged type. A no-op if one is already present.
    entity_add_component => "Entity_AddComponent": unsafe extern "C" fn(EntityHandle, TypeTag);
    entity_has_component => "Entity_HasComponent": unsafe extern "C" fn(EntityHandle, TypeTag) -> bool;
    entity_remove_component => "Entity_RemoveComponent": unsafe extern "C" fn(EntityHandle, TypeTag) -> bool;

    // Transform
    transform_get_position => "Transform_GetPosition": unsafe extern "C" fn(EntityHandle, *mut Vec3);
    transform_set_position => "Transform_SetPosition": unsafe extern "C" fn(EntityHandle, Vec3);
    transform_get_euler_angles => "Transform_GetEulerAngles": unsafe extern "C" fn(EntityHandle, *mut Vec3);
    transform_set_euler_angles => "Transform_SetEulerAngles": unsafe extern "C" fn(EntityHandle, Vec3);
    transform_get_scale => "Transform_GetScale": unsafe extern "C" fn(EntityHandle, *mut Vec3);
    transform_set_scale => "Transform_SetScale": unsafe extern "C" fn(EntityHandle, Vec3);
    transform_get_forward => "Transform_GetForward": unsafe extern "C" fn(EntityHandle, *mut Vec3);
    transform_get_right => "Transform_GetRight": unsafe extern "C" fn(EntityHandle, *mut Vec3);

    // RigidBody
    rigid_body_get_linear_velocity => "RigidBody_GetLinearVelocity": unsafe extern "C" fn(EntityHandle, *mut Vec3);
    rigid_body_set_linear_velocity => "RigidBody_SetLinearVelocity": unsafe extern "C" fn(EntityHandle, Vec3);
    rigid_body_add_linear_velocity => "RigidBody_AddLinearVelocity": unsafe extern "C" fn(EntityHandle, Vec3);
    rigid_body_get_friction => "RigidBody_GetFriction": unsafe extern "C" fn(EntityHandle, *mut f32);
    rigid_body_set_friction => "RigidBody_SetFriction": unsafe extern "C" fn(EntityHandle, f32);
    rigid_body_get_max_linear_velocity => "RigidBody_GetMaxLinearVelocity": unsafe extern "C" fn(EntityHandle, *mut f32);
    rigid_body_set_max_linear_velocity => "RigidBody_SetMaxLinearVelocity": unsafe extern "C" fn(EntityHandle, f32);

    // CharacterController
    character_controller_get_linear_velocity => "CharacterController_GetLinearVelocity": unsafe extern "C" fn(EntityHandle, *mut Vec3);
    character_controller_set_linear_velocity => "CharacterController_SetLinearVelocity": unsafe extern "C" fn(EntityHandle, Vec3);
    character_controller_is_enabled => "CharacterController_IsEnabled": unsafe extern "C" fn(EntityHandle) -> bool;
    character_controller_set_enabled => "CharacterController_SetEnabled": unsafe extern "C" fn(EntityHandle, bool);
    character_controller_get_radius => "CharacterController_GetRadius": unsafe extern "C" fn(EntityHandle, *mut f32);
    character_controller_set_radius => "CharacterController_SetRadius": unsafe extern "C" fn(EntityHandle, f32);
    character_controller_get_height => "CharacterController_GetHeight": unsafe extern "C" fn(EntityHandle, *mut f32);
    character_controller_set_height => "CharacterController_SetHeight": unsafe extern "C" fn(EntityHandle, f32);

    // Animator
    animator_is_enabled => "Animator_IsEnabled": unsafe extern "C" fn(EntityHandle) -> bool;
    animator_set_float => "Animator_SetFloat": unsafe extern "C" fn(EntityHandle, NativeStr, f32);
    animator_set_bool => "Animator_SetBool": unsafe extern "C" fn(EntityHandle, NativeStr, bool);
    animator_set_int => "Animator_SetInt": unsafe extern "C" fn(EntityHandle, NativeStr, i32);
    animator_set_trigger => "Animator_SetTrigger": unsafe extern "C" fn(EntityHandle, NativeStr);

    // MeshRenderer (the trailing `i32` is the submesh index)
    mesh_renderer_get_mesh => "MeshRenderer_GetMesh": unsafe extern "C" fn(EntityHandle) -> AssetHandle;
    mesh_renderer_set_mesh => "MeshRenderer_SetMesh": unsafe extern "C" fn(EntityHandle, AssetHandle);
    mesh_renderer_set_float => "MeshRenderer_SetFloat": unsafe extern "C" fn(EntityHandle, NativeStr, f32, i32);
    mesh_renderer_set_float2 => "MeshRenderer_SetFloat2": unsafe extern "C" fn(EntityHandle, NativeStr, Vec2, i32);
    mesh_renderer_set_float3 => "MeshRenderer_SetFloat3": unsafe extern "C" fn(EntityHandle, NativeStr, Vec3, i32);
    mesh_renderer_set_float4 => "MeshRenderer_SetFloat4": unsafe extern "C" fn(EntityHandle, NativeStr, Float4, i32);
    mesh_renderer_set_bool => "MeshRenderer_SetBool": unsafe extern "C" fn(EntityHandle, NativeStr, bool, i32);

    // SpriteRenderer
    sprite_renderer_get_fill => "SpriteRenderer_GetFill": unsafe extern "C" fn(EntityHandle, *mut Vec2);
    sprite_renderer_set_fill => "SpriteRenderer_SetFill": unsafe extern "C" fn(EntityHandle, Vec2);
    sprite_renderer_get_base_color => "SpriteRenderer_GetBaseColor": unsafe extern "C" fn(EntityHandle, *mut Color);
    sprite_renderer_set_base_color => "SpriteRenderer_SetBaseColor": unsafe extern "C" fn(EntityHandle, Color);
    sprite_renderer_get_sprite => "SpriteRenderer_GetSprite": unsafe extern "C" fn(EntityHandle, *mut AssetHandle);
    sprite_renderer_set_sprite => "SpriteRenderer_SetSprite": unsafe extern "C" fn(EntityHandle, AssetHandle);

    // ParticleEmitter
    particle_emitter_get_looping => "ParticleEmitter_GetLooping": unsafe extern "C" fn(EntityHandle, *mut bool);
    particle_emitter_set_looping => "ParticleEmitter_SetLooping": unsafe extern "C" fn(EntityHandle, bool);
    particle_emitter_get_emission_rate => "ParticleEmitter_GetEmissionRate": unsafe extern "C" fn(EntityHandle, *mut u32);
    particle_emitter_set_emission_rate => "ParticleEmitter_SetEmissionRate": unsafe extern "C" fn(EntityHandle, u32);
    particle_emitter_get_radius => "ParticleEmitter_GetRadius": unsafe extern "C" fn(EntityHandle, *mut f32);
    particle_emitter_set_radius => "ParticleEmitter_SetRadius": unsafe extern "C" fn(EntityHandle, f32);
    particle_emitter_get_angle => "ParticleEmitter_GetAngle": unsafe extern "C" fn(EntityHandle, *mut f32);
    particle_emitter_set_angle => "ParticleEmitter_SetAngle": unsafe extern "C" fn(EntityHandle, f32);
    particle_emitter_get_duration => "ParticleEmitter_GetDuration": unsafe extern "C" fn(EntityHandle, *mut f32);
    particle_emitter_set_duration => "ParticleEmitter_SetDuration": unsafe extern "C" fn(EntityHandle, f32);
    particle_emitter_get_lifetime => "ParticleEmitter_GetLifetime": unsafe extern "C" fn(EntityHandle, *mut Vec2);
    particle_emitter_set_lifetime => "ParticleEmitter_SetLifetime": unsafe extern "C" fn(EntityHandle, Vec2);
    particle_emitter_get_size => "ParticleEmitter_GetSize": unsafe extern "C" fn(EntityHandle, *mut Vec2);
    particle_emitter_set_size => "ParticleEmitter_SetSize": unsafe extern "C" fn(EntityHandle, Vec2);
    particle_emitter_get_speed => "ParticleEmitter_GetSpeed": unsafe extern "C" fn(EntityHandle, *mut Vec2);
    particle_emitter_set_speed => "ParticleEmitter_SetSpeed": unsafe extern "C" fn(EntityHandle, Vec2);
    particle_emitter_get_start_color => "ParticleEmitter_GetStartColor": unsafe extern "C" fn(EntityHandle, *mut Color);
    particle_emitter_set_start_color => "ParticleEmitter_SetStartColor": unsafe extern "C" fn(EntityHandle, Color);
    particle_emitter_get_end_color => "ParticleEmitter_GetEndColor": unsafe extern "C" fn(EntityHandle, *mut Color);
    particle_emitter_set_end_color => "ParticleEmitter_SetEndColor": unsafe extern "C" fn(EntityHandle, Color);
    /// Writes an [`EmitterShape`](crate::EmitterShape) wire value.
    particle_emitter_get_shape => "ParticleEmitter_GetShape": unsafe extern "C" fn(EntityHandle, *mut u32);
    particle_emitter_set_shape => "ParticleEmitter_SetShape": unsafe extern "C" fn(EntityHandle, u32);

    // Asset
    asset_get_name => "Asset_GetName": unsafe extern "C" fn(AssetHandle, *mut NativeStr);
    asset_set_name => "Asset_SetName": unsafe extern "C" fn(AssetHandle, NativeStr);

    // Mesh
    mesh_get_vertex_count => "Mesh_GetVertexCount": unsafe extern "C" fn(AssetHandle) -> u32;
    mesh_get_index_count => "Mesh_GetIndexCount": unsafe extern "C" fn(AssetHandle) -> u32;

    // Texture2D
    texture2d_get_width => "Texture2D_GetWidth": unsafe extern "C" fn(AssetHandle, *mut u32);
    texture2d_get_height => "Texture2D_GetHeight": unsafe extern "C" fn(AssetHandle, *mut u32);
    texture2d_get_mip_maps_enabled => "Texture2D_GetMipMapsEnabled": unsafe extern "C" fn(AssetHandle, *mut bool);

    // Prefab
    /// Instantiates the prefab into the active scene and writes the new entity.
    prefab_load_instance => "Prefab_LoadInstance": unsafe extern "C" fn(AssetHandle, *mut EntityHandle);

    // Input (keys and buttons travel as their `u32` wire values)
    input_get_key_press => "Input_GetKeyPress": unsafe extern "C" fn(u32) -> bool;
    input_get_key_down => "Input_GetKeyDown": unsafe extern "C" fn(u32) -> bool;
    input_get_key_up => "Input_GetKeyUp": unsafe extern "C" fn(u32) -> bool;
    input_get_mouse_button_down => "Input_GetMouseButtonDown": unsafe extern "C" fn(u32) -> bool;
    input_get_mouse_axis_horizontal => "Input_GetMouseAxisHorizontal": unsafe extern "C" fn() -> f32;
    input_get_mouse_axis_vertical => "Input_GetMouseAxisVertical": unsafe extern "C" fn() -> f32;
    input_get_mouse_position => "Input_GetMousePosition": unsafe extern "C" fn() -> Vec2;

    // Time
    time_get_delta_time => "Time_GetDeltaTime": unsafe extern "C" fn() -> f32;
}

impl CallTable {
    /// Build a table from the host's binding array in one step.
    ///
    /// The hand-off is all-or-nothing: the first bad binding rejects it.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidName`] for non-UTF-8 names and any error
    /// from [`CallTable::bind`].
    ///
    /// # Safety
    ///
    /// Every binding's name view must be readable for the duration of the
    /// call, and every address must satisfy the contract of
    /// [`CallTable::bind`].
    pub unsafe fn from_bindings(bindings: &[NativeBinding]) -> Result<Self, BridgeError> {
        let mut table = Self::default();
        for binding in bindings {
            // SAFETY: the caller keeps the name readable for this call.
            let name = unsafe { binding.name.to_str() }.map_err(|_| BridgeError::InvalidName)?;
            // SAFETY: forwarded to the caller.
            unsafe { table.bind(name, binding.address)? };
        }
        Ok(table)
    }

    /// Number of populated operations.
    #[must_use]
    pub fn populated(&self) -> usize {
        Self::OPERATIONS.len() - self.missing().len()
    }
}

impl std::fmt::Debug for CallTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallTable")
            .field("populated", &self.populated())
            .field("total", &Self::OPERATIONS.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn fake_create() -> EntityHandle {
        EntityHandle::from_raw(7)
    }

    unsafe extern "C" fn fake_delta_time() -> f32 {
        0.25
    }

    fn addr_of_create() -> *const c_void {
        fake_create as *const c_void
    }

    #[test]
    fn test_operation_names_are_unique() {
        let mut names = CallTable::OPERATIONS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CallTable::OPERATIONS.len());
    }

    #[test]
    fn test_default_table_is_empty() {
        let table = CallTable::default();
        assert_eq!(table.populated(), 0);
        assert_eq!(table.missing().len(), CallTable::OPERATIONS.len());
    }

    #[test]
    fn test_bind_by_name_and_invoke() {
        let mut table = CallTable::default();
        unsafe { table.bind("Entity_Create", addr_of_create()) }.unwrap();
        let handle = unsafe { table.entity_create()() };
        assert_eq!(handle, EntityHandle::from_raw(7));
        assert!(!table.missing().contains(&"Entity_Create"));
    }

    #[test]
    fn test_bind_rejects_unknown_name() {
        let mut table = CallTable::default();
        let err = unsafe { table.bind("Entity_Teleport", addr_of_create()) }.unwrap_err();
        assert_eq!(err, BridgeError::UnknownOperation("Entity_Teleport".into()));
    }

    #[test]
    fn test_bind_rejects_null() {
        let mut table = CallTable::default();
        let err = unsafe { table.bind("Entity_Create", std::ptr::null()) }.unwrap_err();
        assert_eq!(err, BridgeError::NullAddress("Entity_Create".into()));
    }

    #[test]
    fn test_bind_rejects_duplicates() {
        let mut table = CallTable::default();
        unsafe { table.bind("Entity_Create", addr_of_create()) }.unwrap();
        let err = unsafe { table.bind("Entity_Create", addr_of_create()) }.unwrap_err();
        assert_eq!(err, BridgeError::DuplicateBinding("Entity_Create".into()));
    }

    #[test]
    fn test_from_bindings() {
        let bindings = [
            NativeBinding::new("Entity_Create", addr_of_create()),
            NativeBinding::new("Time_GetDeltaTime", fake_delta_time as *const c_void),
        ];
        let table = unsafe { CallTable::from_bindings(&bindings) }.unwrap();
        assert_eq!(table.populated(), 2);
        assert_eq!(unsafe { table.time_get_delta_time()() }, 0.25);
    }

    #[test]
    fn test_from_bindings_is_all_or_nothing() {
        let bindings = [
            NativeBinding::new("Entity_Create", addr_of_create()),
            NativeBinding::new("Nope", addr_of_create()),
        ];
        let result = unsafe { CallTable::from_bindings(&bindings) };
        assert_eq!(result.unwrap_err(), BridgeError::UnknownOperation("Nope".into()));
    }

    #[test]
    #[should_panic(expected = "native operation `Transform_GetPosition` was never populated")]
    fn test_unpopulated_operation_is_fatal() {
        let table = CallTable::default();
        let _ = table.transform_get_position();
    }
}
