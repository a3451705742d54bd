use std::rc::Rc;

use bridge_calls::Bridge;
use bridge_core::{AssetHandle, EntityHandle};
use tracing::{debug, warn};

use super::{Asset, AssetOwner};
use crate::entity::Entity;

/// An entity blueprint in the asset registry.
#[derive(Debug, Clone)]
pub struct Prefab {
    owner: AssetOwner,
}

impl Prefab {
    /// Wrap a prefab handle supplied by native.
    #[must_use]
    pub fn from_handle(bridge: &Rc<Bridge>, handle: AssetHandle) -> Self {
        Self {
            owner: AssetOwner::new(bridge, handle),
        }
    }

    /// Spawn a new entity from this prefab.
    ///
    /// Returns `None` if native could not instantiate it.
    #[must_use]
    pub fn instantiate(&self) -> Option<Entity> {
        let mut entity = EntityHandle::INVALID;
        let op = self.owner.bridge().calls().prefab_load_instance();
        // SAFETY: signature matches; `entity` is a live local.
        unsafe { op(self.owner.handle(), &mut entity) };
        if !entity.is_valid() {
            warn!(prefab = %self.owner.handle(), "native returned no instance");
            return None;
        }
        debug!(prefab = %self.owner.handle(), entity = %entity, "prefab instantiated");
        Some(Entity::from_handle(self.owner.bridge(), entity))
    }
}

impl Asset for Prefab {
    fn handle(&self) -> AssetHandle {
        self.owner.handle()
    }

    fn bridge(&self) -> &Rc<Bridge> {
        self.owner.bridge()
    }
}
