//! Host configuration from the command line and environment.

use std::path::PathBuf;

use bridge_calls::{BridgeConfig, CacheEviction};
use clap::Parser;

/// Every flag can also be set through its `BRIDGE_*` environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "bridge_host", about = "Drive scripts against an in-memory native world")]
pub struct HostConfig {
    /// Number of frames to run
    #[arg(long, env = "BRIDGE_FRAMES", default_value_t = 120)]
    pub frames: u32,

    /// Fixed frame delta in seconds
    #[arg(long, env = "BRIDGE_DELTA", default_value_t = 1.0 / 60.0)]
    pub delta: f32,

    /// Refuse to start if any native operation is unbound
    #[arg(long, env = "BRIDGE_STRICT")]
    pub strict: bool,

    /// Component cache policy on removal (`on-remove` or `on-next-query`)
    #[arg(long, env = "BRIDGE_EVICTION", default_value = "on-remove")]
    pub eviction: CacheEviction,

    /// JSON scene description; a built-in scene is used when omitted
    #[arg(long, env = "BRIDGE_SCENE")]
    pub scene: Option<PathBuf>,
}

impl HostConfig {
    /// The bridge configuration these flags describe.
    #[must_use]
    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig::new()
            .with_strict(self.strict)
            .with_cache_eviction(self.eviction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::try_parse_from(["bridge_host"]).unwrap();
        assert_eq!(config.frames, 120);
        assert!(!config.strict);
        assert_eq!(config.eviction, CacheEviction::OnRemove);
        assert!(config.scene.is_none());
    }

    #[test]
    fn test_flags() {
        let config = HostConfig::try_parse_from([
            "bridge_host",
            "--frames",
            "3",
            "--delta",
            "0.5",
            "--strict",
            "--eviction",
            "on-next-query",
            "--scene",
            "level.json",
        ])
        .unwrap();
        assert_eq!(config.frames, 3);
        assert_eq!(config.delta, 0.5);
        assert_eq!(
            config.bridge_config(),
            BridgeConfig::new()
                .with_strict(true)
                .with_cache_eviction(CacheEviction::OnNextQuery)
        );
        assert_eq!(config.scene, Some(PathBuf::from("level.json")));
    }

    #[test]
    fn test_unknown_eviction_is_rejected() {
        assert!(HostConfig::try_parse_from(["bridge_host", "--eviction", "never"]).is_err());
    }
}
