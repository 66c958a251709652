//! Synchronisation engine configuration.

use serde::{Deserialize, Serialize};

/// When a group registration queues a backfill pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncPolicy {
    /// Queue only when the canonical defaults differ from the persisted snapshot.
    #[default]
    SyncOnDrift,
    /// Queue on every registration that carries defaults, drifted or not.
    ForceSyncEveryRegistration,
}

/// Which entities a backfill pass leaves alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionScope {
    /// An entity holding any relation in the group is never touched.
    #[default]
    AnyGroupRelation,
    /// An entity is skipped only for the default relations it already holds.
    PerDefaultRelation,
}

/// Configuration for the registration and backfill flows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    pub policy: SyncPolicy,
    pub exclusion: ExclusionScope,
    /// Page size for entity scans. Default: 500.
    pub batch_size: usize,
    /// Key of the persisted defaults record.
    pub snapshot_key: String,
}

pub const DEFAULT_BATCH_SIZE: usize = 500;
pub const DEFAULT_SNAPSHOT_KEY: &str = "default_terms";

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            policy: SyncPolicy::default(),
            exclusion: ExclusionScope::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }
}

impl SyncConfig {
    /// Returns the effective page size; zero falls back to 500.
    pub fn effective_batch_size(&self) -> usize {
        if self.batch_size == 0 {
            DEFAULT_BATCH_SIZE
        } else {
            self.batch_size
        }
    }
}
