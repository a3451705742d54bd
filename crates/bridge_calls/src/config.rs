//! Bridge configuration.

use serde::{Deserialize, Serialize};

/// What happens to a cached component wrapper when the managed side removes
/// its component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheEviction {
    /// Evict as soon as native confirms the removal.
    #[default]
    OnRemove,
    /// Keep the entry until the next lookup observes the absence.
    OnNextQuery,
}

impl std::str::FromStr for CacheEviction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-remove" => Ok(Self::OnRemove),
            "on-next-query" => Ok(Self::OnNextQuery),
            other => Err(format!(
                "unknown cache eviction policy `{other}` (expected `on-remove` or `on-next-query`)"
            )),
        }
    }
}

impl std::fmt::Display for CacheEviction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::OnRemove => "on-remove",
            Self::OnNextQuery => "on-next-query",
        })
    }
}

/// Configuration applied when the bridge is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Reject a call table with unpopulated operations instead of warning.
    pub strict: bool,
    /// Cache policy for `remove_component`.
    pub cache_eviction: CacheEviction,
}

impl BridgeConfig {
    /// Create the default configuration: lenient attach, evict on remove.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require every operation to be populated at attach time.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Override the removal cache policy.
    #[must_use]
    pub fn with_cache_eviction(mut self, policy: CacheEviction) -> Self {
        self.cache_eviction = policy;
        self
    }
}
