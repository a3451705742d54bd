//! # bridge_core
//!
//! The identity vocabulary of the scripting bridge. Everything in here is a
//! plain value that crosses the native call table unchanged.
//!
//! This crate provides:
//!
//! - [`EntityHandle`] / [`AssetHandle`]: opaque 64-bit identities in two
//!   disjoint spaces.
//! - [`TypeTag`]: language-neutral component/script type identity.
//! - [`NativeStr`]: a borrowed UTF-8 view passed across the boundary.

pub mod handle;
pub mod text;
pub mod type_tag;

pub use handle::{AssetHandle, EntityHandle};
pub use text::NativeStr;
pub use type_tag::TypeTag;
