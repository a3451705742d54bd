use std::rc::Rc;

use bridge_calls::Bridge;
use bridge_core::AssetHandle;

use super::{Asset, AssetOwner};

/// A 2D texture in the asset registry.
#[derive(Debug, Clone)]
pub struct Texture2D {
    owner: AssetOwner,
}

impl Texture2D {
    /// Wrap a texture handle supplied by native.
    #[must_use]
    pub fn from_handle(bridge: &Rc<Bridge>, handle: AssetHandle) -> Self {
        Self {
            owner: AssetOwner::new(bridge, handle),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.owner
            .read(self.owner.bridge().calls().texture2d_get_width())
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.owner
            .read(self.owner.bridge().calls().texture2d_get_height())
    }

    #[must_use]
    pub fn mip_maps_enabled(&self) -> bool {
        self.owner
            .read(self.owner.bridge().calls().texture2d_get_mip_maps_enabled())
    }
}

impl Asset for Texture2D {
    fn handle(&self) -> AssetHandle {
        self.owner.handle()
    }

    fn bridge(&self) -> &Rc<Bridge> {
        self.owner.bridge()
    }
}
