//! The [`Entity`] wrapper and its component cache.
//!
//! Native truth decides whether a component exists. The cache only keeps
//! wrapper identity stable: while native reports a component present,
//! every lookup returns the same `Rc`. Whenever a lookup sees native report
//! a cached component absent, the entry is evicted.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bridge_calls::{Bridge, CacheEviction};
use bridge_core::{EntityHandle, NativeStr, TypeTag};
use tracing::{debug, trace, warn};

use crate::component::{Component, ComponentOwner};

/// A managed proxy for one native entity.
///
/// Cloning is deliberately not offered: the cache is per wrapper.
pub struct Entity {
    handle: EntityHandle,
    bridge: Rc<Bridge>,
    cache: RefCell<HashMap<TypeTag, Rc<dyn Any>>>,
}

impl Entity {
    /// Ask native for a fresh entity.
    #[must_use]
    pub fn create(bridge: &Rc<Bridge>) -> Self {
        // SAFETY: the bridge only holds addresses bound with this signature.
        let handle = unsafe { bridge.calls().entity_create()() };
        debug!(entity = %handle, "entity created");
        Self::from_handle(bridge, handle)
    }

    /// Wrap a handle native handed out. Liveness is not checked.
    #[must_use]
    pub fn from_handle(bridge: &Rc<Bridge>, handle: EntityHandle) -> Self {
        Self {
            handle,
            bridge: Rc::clone(bridge),
            cache: RefCell::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    #[must_use]
    pub fn bridge(&self) -> &Rc<Bridge> {
        &self.bridge
    }

    /// Ask native to destroy the entity. The wrapper is consumed.
    pub fn destroy(self) {
        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { self.bridge.calls().entity_destroy()(self.handle) };
        debug!(entity = %self.handle, cached = self.cached_count(), "entity destroyed");
    }

    /// The entity's name, copied out of native storage.
    #[must_use]
    pub fn name(&self) -> String {
        let mut view = NativeStr::EMPTY;
        // SAFETY: signature matches; `view` is a live local.
        unsafe { self.bridge.calls().entity_get_name()(self.handle, &mut view) };
        // SAFETY: native keeps the view valid until the next call into
        // native, and it is copied before any other call is made.
        unsafe { view.to_string_lossy() }
    }

    pub fn set_name(&self, name: &str) {
        // SAFETY: `name` outlives the call.
        unsafe { self.bridge.calls().entity_set_name()(self.handle, NativeStr::new(name)) };
    }

    /// Add a component of type `T`, or return the one native already has.
    ///
    /// Never creates a second native component of the same type.
    pub fn add_component<T: Component>(&self) -> Rc<T> {
        let tag = T::type_tag();
        if self.native_has(tag) {
            trace!(entity = %self.handle, component = T::type_name(), "add found existing component");
            return self.cached_or_bind::<T>(tag);
        }

        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { self.bridge.calls().entity_add_component()(self.handle, tag) };
        debug!(entity = %self.handle, component = T::type_name(), "component added");

        let wrapper = self.bind::<T>();
        self.cache
            .borrow_mut()
            .insert(tag, Rc::clone(&wrapper) as Rc<dyn Any>);
        wrapper
    }

    /// Pure native query. Never touches the cache.
    #[must_use]
    pub fn has_component<T: Component>(&self) -> bool {
        self.native_has(T::type_tag())
    }

    /// Look up a component of type `T`, asking native first.
    ///
    /// Returns the cached wrapper while native reports the component
    /// present, and evicts it once native reports it gone.
    #[must_use]
    pub fn get_component<T: Component>(&self) -> Option<Rc<T>> {
        let tag = T::type_tag();
        if !self.native_has(tag) {
            if self.evict(tag) {
                debug!(
                    entity = %self.handle,
                    component = T::type_name(),
                    "evicted stale cache entry"
                );
            }
            return None;
        }
        Some(self.cached_or_bind::<T>(tag))
    }

    /// Ask native to remove the component of type `T`.
    ///
    /// Returns whether native removed one. Under
    /// [`CacheEviction::OnRemove`] the cache entry is dropped right away;
    /// under [`CacheEviction::OnNextQuery`] it stays until the next
    /// [`get_component`](Self::get_component).
    pub fn remove_component<T: Component>(&self) -> bool {
        let tag = T::type_tag();
        // SAFETY: the bridge only holds addresses bound with this signature.
        let removed = unsafe { self.bridge.calls().entity_remove_component()(self.handle, tag) };
        let evicted = match self.bridge.config().cache_eviction {
            CacheEviction::OnRemove => self.evict(tag),
            CacheEviction::OnNextQuery => false,
        };
        debug!(
            entity = %self.handle,
            component = T::type_name(),
            removed,
            evicted,
            "component removed"
        );
        removed
    }

    /// Whether a wrapper for `T` is currently held in the cache.
    #[must_use]
    pub fn is_cached<T: Component>(&self) -> bool {
        self.cache.borrow().contains_key(&T::type_tag())
    }

    /// Number of cached component wrappers.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }

    fn native_has(&self, tag: TypeTag) -> bool {
        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { self.bridge.calls().entity_has_component()(self.handle, tag) }
    }

    fn bind<T: Component>(&self) -> Rc<T> {
        Rc::new(T::bind(ComponentOwner::new(
            self.handle,
            Rc::clone(&self.bridge),
        )))
    }

    fn cached_or_bind<T: Component>(&self, tag: TypeTag) -> Rc<T> {
        let cached = self.cache.borrow().get(&tag).cloned();
        if let Some(entry) = cached {
            match entry.downcast::<T>() {
                Ok(wrapper) => {
                    trace!(entity = %self.handle, component = T::type_name(), "cache hit");
                    return wrapper;
                }
                Err(_) => warn!(
                    entity = %self.handle,
                    component = T::type_name(),
                    tag = %tag,
                    "cached wrapper has a different type under the same tag; replacing"
                ),
            }
        }

        trace!(entity = %self.handle, component = T::type_name(), "cache miss");
        let wrapper = self.bind::<T>();
        self.cache
            .borrow_mut()
            .insert(tag, Rc::clone(&wrapper) as Rc<dyn Any>);
        wrapper
    }

    fn evict(&self, tag: TypeTag) -> bool {
        self.cache.borrow_mut().remove(&tag).is_some()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Entity {}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("handle", &self.handle)
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}
