pub mod storage_config;
pub mod sync_config;

use serde::{Deserialize, Serialize};

pub use storage_config::StorageConfig;
pub use sync_config::{ExclusionScope, SyncConfig, SyncPolicy};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TermsConfig {
    pub sync: SyncConfig,
    pub storage: StorageConfig,
}

impl TermsConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
