//! # Clip Dependencies / 依赖分组
//!
//! Parameter grouping for [`ClipWorkflow`](crate::ClipWorkflow) construction.
//! Not a builder: every port is required and there are no hidden defaults.
//! 仅用于参数打包。

use std::sync::Arc;

use ic_core::clip::{CODE_LENGTH, MAX_CODE_LENGTH};
use ic_core::config::{AppConfig, DEFAULT_CONFIRMATIONS};
use ic_core::ports::*;

/// External collaborators of the clip workflow.
pub struct ClipDeps {
    // Storage / 存储
    pub blob_store: Arc<dyn BlobStorePort>,
    pub registry: Arc<dyn RegistryPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
    pub wallet: Arc<dyn WalletPort>,
}

/// Tunables read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSettings {
    /// Published code length; must match what the registry contract accepts.
    pub code_length: usize,
    /// Block depth awaited before a created clip is reported.
    pub confirmations: u64,
}

impl ClipSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            code_length: config.clip.code_length.clamp(1, MAX_CODE_LENGTH),
            confirmations: config.registry.confirmations.max(1),
        }
    }
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            confirmations: DEFAULT_CONFIRMATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_from_config_clamps_out_of_range_values() {
        let mut config = AppConfig::with_defaults();
        config.clip.code_length = 0;
        config.registry.confirmations = 0;

        let settings = ClipSettings::from_config(&config);

        assert_eq!(settings.code_length, 1);
        assert_eq!(settings.confirmations, 1);
    }

    #[test]
    fn default_settings_use_published_code_length() {
        assert_eq!(ClipSettings::default().code_length, 5);
    }
}
