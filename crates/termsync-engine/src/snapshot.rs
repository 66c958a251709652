//! Snapshot Store Adapter: the last-persisted canonical defaults per group,
//! stored as one record under a single key.

use std::sync::Arc;

use termsync_core::errors::StorageError;
use termsync_core::traits::storage::{ICategoryRegistry, ISnapshotStore};
use termsync_core::types::defaults::{DefaultsMap, DefaultsSnapshot};
use tracing::debug;

pub struct SnapshotAdapter {
    store: Arc<dyn ISnapshotStore>,
    registry: Arc<dyn ICategoryRegistry>,
    key: String,
}

impl SnapshotAdapter {
    pub fn new(store: Arc<dyn ISnapshotStore>, registry: Arc<dyn ICategoryRegistry>, key: impl Into<String>) -> Self {
        Self {
            store,
            registry,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The full record. When nothing has been persisted yet, an empty entry
    /// per known group (not persisted).
    pub fn read_all(&self) -> Result<DefaultsSnapshot, StorageError> {
        match self.store.load_snapshot(&self.key)? {
            Some(snapshot) => Ok(snapshot),
            None => Ok(self
                .registry
                .group_names()?
                .into_iter()
                .map(|name| (name, DefaultsMap::new()))
                .collect()),
        }
    }

    /// One group's entry, empty if it was never persisted.
    pub fn read(&self, group: &str) -> Result<DefaultsMap, StorageError> {
        Ok(self
            .store
            .load_snapshot(&self.key)?
            .and_then(|mut snapshot| snapshot.remove(group))
            .unwrap_or_default())
    }

    /// Overwrite one group's entry and persist the whole record.
    /// Returns the record as written.
    pub fn write(&self, group: &str, mapping: DefaultsMap) -> Result<DefaultsSnapshot, StorageError> {
        let mut snapshot = self.store.load_snapshot(&self.key)?.unwrap_or_default();
        snapshot.insert(group.to_string(), mapping);
        let version = self.store.save_snapshot(&self.key, &snapshot)?;
        debug!(group, version, "Committed defaults snapshot");
        Ok(snapshot)
    }
}
