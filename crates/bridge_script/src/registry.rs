//! Script registry: stable type names to factories.
//!
//! Script types are registered once at startup. The name is hashed into a
//! [`TypeTag`] the same way component names are, so native code can refer to
//! a script type without knowing anything about Rust types.

use std::collections::HashMap;

use bridge_core::TypeTag;
use tracing::debug;

use crate::error::ScriptError;
use crate::script::Script;

type ScriptFactory = Box<dyn Fn() -> Box<dyn Script>>;

struct Registration {
    name: String,
    factory: ScriptFactory,
}

/// Registry of every script type the host can instantiate.
#[derive(Default)]
pub struct ScriptRegistry {
    scripts: HashMap<TypeTag, Registration>,
}

impl ScriptRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a stable name.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::DuplicateScript`] if the name (or another name
    /// hashing to the same tag) is already registered.
    pub fn register(
        &mut self,
        name: &str,
        factory: impl Fn() -> Box<dyn Script> + 'static,
    ) -> Result<TypeTag, ScriptError> {
        let tag = TypeTag::from_name(name);
        if self.scripts.contains_key(&tag) {
            return Err(ScriptError::DuplicateScript(name.to_string()));
        }
        self.scripts.insert(
            tag,
            Registration {
                name: name.to_string(),
                factory: Box::new(factory),
            },
        );
        debug!(script = name, tag = %tag, "script type registered");
        Ok(tag)
    }

    /// Register a script type built with `Default::default`.
    ///
    /// # Errors
    ///
    /// Same as [`ScriptRegistry::register`].
    pub fn register_default<S: Script + Default + 'static>(
        &mut self,
        name: &str,
    ) -> Result<TypeTag, ScriptError> {
        self.register(name, || Box::new(S::default()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.scripts.contains_key(&TypeTag::from_name(name))
    }

    /// The registered name behind a tag.
    #[must_use]
    pub fn name_of(&self, tag: TypeTag) -> Option<&str> {
        self.scripts.get(&tag).map(|r| r.name.as_str())
    }

    /// Build a fresh instance of the tagged script type.
    #[must_use]
    pub fn instantiate(&self, tag: TypeTag) -> Option<Box<dyn Script>> {
        self.scripts.get(&tag).map(|r| (r.factory)())
    }

    /// Build a fresh instance by name.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::UnknownScript`] if nothing is registered under
    /// `name`.
    pub fn instantiate_by_name(&self, name: &str) -> Result<(TypeTag, Box<dyn Script>), ScriptError> {
        let tag = TypeTag::from_name(name);
        self.instantiate(tag)
            .map(|script| (tag, script))
            .ok_or_else(|| ScriptError::UnknownScript(name.to_string()))
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scripts.values().map(|r| r.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

impl std::fmt::Debug for ScriptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
