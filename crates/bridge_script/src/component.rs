//! The [`Component`] trait and the binding every wrapper carries.
//!
//! A component wrapper is a proxy for one (entity, component type) pair. It
//! holds the owning entity's handle as a lookup key and nothing else from
//! the entity, and is only ever built by [`Entity`](crate::Entity) through
//! its add and get paths.

use std::any::Any;
use std::rc::Rc;

use bridge_calls::{Bridge, CallTable};
use bridge_core::{EntityHandle, NativeStr, TypeTag};

/// A typed proxy over one native component.
///
/// The stable [`type_name`](Component::type_name) is hashed into the
/// [`TypeTag`] native uses to identify the component type, so it must match
/// the name the host registers.
pub trait Component: Any {
    /// Stable, language-neutral name of the component type.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Tag derived from [`Component::type_name`].
    fn type_tag() -> TypeTag
    where
        Self: Sized,
    {
        TypeTag::from_name(Self::type_name())
    }

    /// Build the wrapper. Only callable with an owner handed out by the
    /// entity cache.
    fn bind(owner: ComponentOwner) -> Self
    where
        Self: Sized;

    /// Handle of the owning entity.
    fn entity(&self) -> EntityHandle;
}

/// The owning entity's handle plus the bridge to reach native through.
///
/// Cannot be constructed outside this crate.
#[derive(Debug, Clone)]
pub struct ComponentOwner {
    entity: EntityHandle,
    bridge: Rc<Bridge>,
}

impl ComponentOwner {
    pub(crate) fn new(entity: EntityHandle, bridge: Rc<Bridge>) -> Self {
        Self { entity, bridge }
    }

    #[must_use]
    pub fn entity(&self) -> EntityHandle {
        self.entity
    }

    #[must_use]
    pub fn bridge(&self) -> &Rc<Bridge> {
        &self.bridge
    }

    pub(crate) fn calls(&self) -> &CallTable {
        self.bridge.calls()
    }

    /// Run a getter that reports through an output parameter.
    pub(crate) fn read<T: Default>(&self, op: unsafe extern "C" fn(EntityHandle, *mut T)) -> T {
        let mut out = T::default();
        // SAFETY: the bridge only holds addresses bound with this exact
        // signature, and `out` is a live local.
        unsafe { op(self.entity, &mut out) };
        out
    }

    /// Run a setter that takes its value by value.
    pub(crate) fn write<T>(&self, op: unsafe extern "C" fn(EntityHandle, T), value: T) {
        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { op(self.entity, value) };
    }

    /// Run a setter keyed by a borrowed name.
    pub(crate) fn write_named<T>(
        &self,
        op: unsafe extern "C" fn(EntityHandle, NativeStr, T),
        name: &str,
        value: T,
    ) {
        // SAFETY: `name` outlives the call, and the signature matches.
        unsafe { op(self.entity, NativeStr::new(name), value) };
    }
}

macro_rules! component_wrapper {
    ($(#[$meta:meta])* $name:ident, $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            owner: $crate::component::ComponentOwner,
        }

        impl $crate::component::Component for $name {
            fn type_name() -> &'static str {
                $type_name
            }

            fn bind(owner: $crate::component::ComponentOwner) -> Self {
                Self { owner }
            }

            fn entity(&self) -> bridge_core::EntityHandle {
                self.owner.entity()
            }
        }
    };
}

pub(crate) use component_wrapper;
