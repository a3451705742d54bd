//! The bridge object.
//!
//! A [`Bridge`] owns the populated [`CallTable`] and the [`BridgeConfig`] it
//! was attached with. It is built exactly once during startup by
//! [`Bridge::attach`] and then shared by `Rc` with every wrapper on the
//! scripting thread. Wrappers can only be built from an attached bridge, so
//! none can exist before the table is populated.

use std::rc::Rc;

use tracing::{info, warn};

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::table::{CallTable, NativeBinding};

/// The attached call table plus its configuration.
#[derive(Debug)]
pub struct Bridge {
    calls: CallTable,
    config: BridgeConfig,
}

impl Bridge {
    /// Attach a populated call table.
    ///
    /// With [`BridgeConfig::strict`] set, any unpopulated operation rejects
    /// the attach. Otherwise the missing names are logged and invoking one
    /// of them later is an integration failure.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MissingOperations`] in strict mode when the
    /// table is incomplete.
    pub fn attach(calls: CallTable, config: BridgeConfig) -> Result<Rc<Self>, BridgeError> {
        let missing = calls.missing();
        if !missing.is_empty() {
            if config.strict {
                return Err(BridgeError::MissingOperations(missing));
            }
            warn!(
                missing = missing.len(),
                operations = ?missing,
                "attaching bridge with unpopulated native operations"
            );
        }

        info!(
            populated = calls.populated(),
            total = CallTable::OPERATIONS.len(),
            strict = config.strict,
            cache_eviction = %config.cache_eviction,
            "bridge attached"
        );

        Ok(Rc::new(Self { calls, config }))
    }

    /// Build the table from the host's binding array and attach it.
    ///
    /// # Errors
    ///
    /// Returns any error from [`CallTable::from_bindings`] or
    /// [`Bridge::attach`].
    ///
    /// # Safety
    ///
    /// Same contract as [`CallTable::from_bindings`].
    pub unsafe fn attach_bindings(
        bindings: &[NativeBinding],
        config: BridgeConfig,
    ) -> Result<Rc<Self>, BridgeError> {
        // SAFETY: forwarded to the caller.
        let calls = unsafe { CallTable::from_bindings(bindings)? };
        Self::attach(calls, config)
    }

    /// Returns the call table.
    #[must_use]
    pub fn calls(&self) -> &CallTable {
        &self.calls
    }

    /// Returns the configuration the bridge was attached with.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}
