//! # bridge_native
//!
//! A reference native host that keeps entities, components, and assets in
//! memory and exposes them through the call table.
//!
//! The world lives in a thread local, so every scripting thread (and every
//! test) gets its own. Hosts seed it with [`with_world`] and hand the
//! operations to the bridge with [`bindings`] or [`attach`].
//!
//! ```rust,no_run
//! use bridge_calls::BridgeConfig;
//!
//! let bridge = bridge_native::attach(BridgeConfig::new().with_strict(true))?;
//! let mesh = bridge_native::with_world(|world| world.create_mesh("Cube", 24, 36));
//! # let _ = (bridge, mesh);
//! # Ok::<(), bridge_calls::BridgeError>(())
//! ```

pub mod alloc;
pub mod assets;
pub mod calls;
pub mod components;
pub mod error;
pub mod world;

use std::rc::Rc;

use bridge_calls::{Bridge, BridgeConfig, BridgeError};

pub use assets::{AssetKind, NativeAsset, PrefabTemplate};
pub use calls::bindings;
pub use components::{ComponentKind, ComponentState};
pub use error::NativeError;
pub use world::{InputState, NativeWorld, reset, with_world};

/// Attach a bridge to this host's operations.
///
/// # Errors
///
/// Returns any [`BridgeError`] from [`Bridge::attach_bindings`].
pub fn attach(config: BridgeConfig) -> Result<Rc<Bridge>, BridgeError> {
    let bindings = bindings();
    // SAFETY: every binding pairs a stable name with the function of exactly
    // that operation's signature, and the names are 'static.
    unsafe { Bridge::attach_bindings(&bindings, config) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_is_complete() {
        let bridge = attach(BridgeConfig::new().with_strict(true)).unwrap();
        assert!(bridge.calls().missing().is_empty());
    }
}
