//! Native-host error types.

use bridge_core::{AssetHandle, EntityHandle};

/// Errors raised by host-side world operations (never across the call
/// table).
#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    /// Failed to encode a prefab template to MessagePack.
    #[error("failed to encode prefab template: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode a prefab template from MessagePack.
    #[error("failed to decode prefab template: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// The entity does not exist in the world.
    #[error("no such entity: {0}")]
    UnknownEntity(EntityHandle),

    /// The asset does not exist in the registry.
    #[error("no such asset: {0}")]
    UnknownAsset(AssetHandle),

    /// The asset exists but is not a prefab.
    #[error("asset {0} is not a prefab")]
    NotAPrefab(AssetHandle),
}
