//! Asset wrappers.
//!
//! An asset wrapper is a thin proxy over a native registry entry. It caches
//! nothing: every property read goes back to native. Two wrappers over the
//! same entry are different objects, so compare [`Asset::handle`] values to
//! ask whether they name the same asset.

mod mesh;
mod prefab;
mod texture;

use std::rc::Rc;

use bridge_calls::Bridge;
use bridge_core::{AssetHandle, NativeStr};

pub use mesh::Mesh;
pub use prefab::Prefab;
pub use texture::Texture2D;

/// Behaviour shared by every asset wrapper.
pub trait Asset {
    /// Identity in the asset registry.
    fn handle(&self) -> AssetHandle;

    fn bridge(&self) -> &Rc<Bridge>;

    /// The asset's name, copied out of native storage.
    fn name(&self) -> String {
        let mut view = NativeStr::EMPTY;
        // SAFETY: signature matches; `view` is a live local.
        unsafe { self.bridge().calls().asset_get_name()(self.handle(), &mut view) };
        // SAFETY: valid until the next native call, and copied right away.
        unsafe { view.to_string_lossy() }
    }

    fn set_name(&self, name: &str) {
        // SAFETY: `name` outlives the call.
        unsafe { self.bridge().calls().asset_set_name()(self.handle(), NativeStr::new(name)) };
    }
}

/// Handle plus bridge, shared by the concrete wrappers.
#[derive(Debug, Clone)]
pub(crate) struct AssetOwner {
    handle: AssetHandle,
    bridge: Rc<Bridge>,
}

impl AssetOwner {
    pub(crate) fn new(bridge: &Rc<Bridge>, handle: AssetHandle) -> Self {
        Self {
            handle,
            bridge: Rc::clone(bridge),
        }
    }

    pub(crate) fn handle(&self) -> AssetHandle {
        self.handle
    }

    pub(crate) fn bridge(&self) -> &Rc<Bridge> {
        &self.bridge
    }

    /// Run a getter that reports through an output parameter.
    pub(crate) fn read<T: Default>(&self, op: unsafe extern "C" fn(AssetHandle, *mut T)) -> T {
        let mut out = T::default();
        // SAFETY: signature matches; `out` is a live local.
        unsafe { op(self.handle, &mut out) };
        out
    }
}
