//! Native asset registry entries.

use serde::{Deserialize, Serialize};

use crate::components::ComponentState;
use crate::error::NativeError;

/// One entry in the asset registry.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeAsset {
    pub name: String,
    pub kind: AssetKind,
}

/// What an asset actually holds.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetKind {
    Mesh {
        vertex_count: u32,
        index_count: u32,
    },
    Texture2D {
        width: u32,
        height: u32,
        mip_maps: bool,
    },
    /// MessagePack-encoded [`PrefabTemplate`].
    Prefab { template: Vec<u8> },
}

impl AssetKind {
    /// Short kind label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mesh { .. } => "mesh",
            Self::Texture2D { .. } => "texture2d",
            Self::Prefab { .. } => "prefab",
        }
    }
}

/// The entity blueprint a prefab instantiates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefabTemplate {
    pub name: String,
    pub components: Vec<ComponentState>,
}

impl PrefabTemplate {
    /// Encode to the stored MessagePack form.
    ///
    /// # Errors
    ///
    /// Returns [`NativeError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, NativeError> {
        Ok(rmp_serde::to_vec(self)?)
    }

    /// Decode from the stored MessagePack form.
    ///
    /// # Errors
    ///
    /// Returns [`NativeError::Decode`] if the bytes are not a template.
    pub fn decode(bytes: &[u8]) -> Result<Self, NativeError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use bridge_math::Vec3;

    use super::*;
    use crate::components::{ComponentKind, TransformState};

    #[test]
    fn test_template_survives_storage() {
        let template = PrefabTemplate {
            name: "Crate".into(),
            components: vec![
                ComponentState::Transform(TransformState {
                    position: Vec3::new(0.0, 4.0, 0.0),
                    ..TransformState::default()
                }),
                ComponentKind::RigidBody.default_state(),
            ],
        };
        let bytes = template.encode().unwrap();
        assert_eq!(PrefabTemplate::decode(&bytes).unwrap(), template);
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = PrefabTemplate::decode(&[0xc1]).unwrap_err();
        assert!(matches!(err, NativeError::Decode(_)));
    }
}
