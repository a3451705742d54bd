//! # bridge_math
//!
//! Math values that cross the native call table. Re-exports [`glam`] for the
//! vector types, whose `#[repr(C)]` float fields match the native engine's
//! `float2`/`float3` layout, and defines [`Color`] and [`Float4`].

pub mod color;
pub mod float4;

// Re-export glam types for convenience.
pub use glam::{EulerRot, Quat, Vec2, Vec3, Vec4};

pub use color::Color;
pub use float4::Float4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_layouts_are_packed_floats() {
        assert_eq!(std::mem::size_of::<Vec2>(), 8);
        assert_eq!(std::mem::size_of::<Vec3>(), 12);
        assert_eq!(std::mem::align_of::<Vec3>(), 4);
    }
}
