use std::rc::Rc;

use bridge_calls::Bridge;
use bridge_core::AssetHandle;

use super::{Asset, AssetOwner};

/// Geometry in the asset registry.
#[derive(Debug, Clone)]
pub struct Mesh {
    owner: AssetOwner,
}

impl Mesh {
    /// Wrap a mesh handle supplied by native.
    #[must_use]
    pub fn from_handle(bridge: &Rc<Bridge>, handle: AssetHandle) -> Self {
        Self {
            owner: AssetOwner::new(bridge, handle),
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        let op = self.owner.bridge().calls().mesh_get_vertex_count();
        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { op(self.owner.handle()) }
    }

    #[must_use]
    pub fn index_count(&self) -> u32 {
        let op = self.owner.bridge().calls().mesh_get_index_count();
        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { op(self.owner.handle()) }
    }
}

impl Asset for Mesh {
    fn handle(&self) -> AssetHandle {
        self.owner.handle()
    }

    fn bridge(&self) -> &Rc<Bridge> {
        self.owner.bridge()
    }
}

#[cfg(test)]
mod tests {
    use bridge_native::with_world;

    use super::*;
    use crate::assets::test_support;

    #[test]
    fn test_counts_and_name() {
        let bridge = test_support::bridge();
        let handle = with_world(|world| world.create_mesh("Cube", 24, 36));
        let mesh = Mesh::from_handle(&bridge, handle);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.name(), "Cube");
    }

    #[test]
    fn test_reads_are_never_cached() {
        let bridge = test_support::bridge();
        let handle = with_world(|world| world.create_mesh("Cube", 24, 36));
        let mesh = Mesh::from_handle(&bridge, handle);
        let other = Mesh::from_handle(&bridge, handle);

        other.set_name("Box");
        assert_eq!(mesh.name(), "Box");
        assert_eq!(mesh.handle(), other.handle());
    }
}
