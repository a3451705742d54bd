//! Four packed floats for the boundary.
//!
//! `glam::Vec4` is SIMD-aligned on most targets, which does not match a
//! native `float4` passed by value. [`Float4`] carries the same data with
//! plain C layout.

use glam::Vec4;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Float4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<Vec4> for Float4 {
    fn from(v: Vec4) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: v.w,
        }
    }
}

impl From<Float4> for Vec4 {
    fn from(f: Float4) -> Self {
        Vec4::new(f.x, f.y, f.z, f.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_keeps_component_order() {
        let packed = Float4::from(Vec4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!((packed.x, packed.w), (1.0, 4.0));
        assert_eq!(Vec4::from(packed), Vec4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(std::mem::align_of::<Float4>(), 4);
    }
}
