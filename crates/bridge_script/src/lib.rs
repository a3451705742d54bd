//! # bridge_script
//!
//! The managed side of the bridge. Everything here is a proxy for state the
//! native engine owns.
//!
//! This crate provides:
//!
//! - [`Entity`]: a handle plus a per-entity component cache that keeps
//!   wrapper identity stable while native truth decides existence.
//! - [`Component`] and the wrappers in [`components`]: typed accessors that
//!   marshal values through the call table.
//! - [`Asset`] and the wrappers in [`assets`]: uncached registry proxies.
//! - [`Input`] and [`Time`]: read-only host state.
//! - [`Script`], [`ScriptRegistry`], and [`ScriptHost`]: lifecycle hooks, an
//!   explicit name-to-factory registry, and hook dispatch.
//!
//! Every wrapper holds an `Rc<Bridge>`, so none of them can leave the
//! scripting thread.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::rc::Rc;
//!
//! use bridge_calls::Bridge;
//! use bridge_math::Vec3;
//! use bridge_script::{Entity, components::Transform};
//!
//! fn spawn(bridge: &Rc<Bridge>) -> Entity {
//!     let entity = Entity::create(bridge);
//!     entity.set_name("Player");
//!     entity.add_component::<Transform>().set_position(Vec3::new(1.0, 2.0, 3.0));
//!     entity
//! }
//! ```

pub mod assets;
pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod host;
pub mod input;
pub mod registry;
pub mod script;
pub mod time;

pub use assets::{Asset, Mesh, Prefab, Texture2D};
pub use component::{Component, ComponentOwner};
pub use entity::Entity;
pub use error::ScriptError;
pub use host::ScriptHost;
pub use input::Input;
pub use registry::ScriptRegistry;
pub use script::Script;
pub use time::Time;
