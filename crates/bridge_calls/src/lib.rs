//! # bridge_calls
//!
//! The wire boundary between the managed scripting layer and the native
//! engine.
//!
//! This crate provides:
//!
//! - [`table`]: the fixed set of named native operations ([`CallTable`])
//!   and the by-name startup hand-off ([`NativeBinding`]).
//! - [`bridge`]: the [`Bridge`] object every wrapper routes through, built
//!   by a single explicit attach step.
//! - [`abi`]: enumerations passed across the boundary as `u32`.
//! - [`config`]: attach and cache policy knobs.
//! - [`error`]: attach-time error types.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bridge_calls::{Bridge, BridgeConfig, NativeBinding};
//!
//! fn attach(bindings: &[NativeBinding]) -> Result<(), bridge_calls::BridgeError> {
//!     // SAFETY: the host guarantees every address matches its operation's signature.
//!     let bridge = unsafe { Bridge::attach_bindings(bindings, BridgeConfig::new().with_strict(true))? };
//!     assert!(bridge.calls().missing().is_empty());
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod bridge;
pub mod config;
pub mod error;
pub mod table;

pub use abi::{EmitterShape, KeyCode, MouseButton};
pub use bridge::Bridge;
pub use config::{BridgeConfig, CacheEviction};
pub use error::BridgeError;
pub use table::{CallTable, NativeBinding, integration_failure, unknown_discriminant};
