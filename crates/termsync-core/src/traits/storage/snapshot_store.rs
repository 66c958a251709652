//! `ISnapshotStore` trait — the persisted defaults record.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::defaults::DefaultsSnapshot;

/// Key/value persistence for the single defaults record.
///
/// Writes are last-writer-wins; there is no optimistic-concurrency check.
pub trait ISnapshotStore: Send + Sync {
    /// Load the record stored under `key`, if any.
    fn load_snapshot(&self, key: &str) -> Result<Option<DefaultsSnapshot>, StorageError>;

    /// Replace the record stored under `key`. Returns the new record version.
    fn save_snapshot(&self, key: &str, snapshot: &DefaultsSnapshot) -> Result<u64, StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: ISnapshotStore + ?Sized> ISnapshotStore for Arc<T> {
    fn load_snapshot(&self, key: &str) -> Result<Option<DefaultsSnapshot>, StorageError> {
        (**self).load_snapshot(key)
    }
    fn save_snapshot(&self, key: &str, snapshot: &DefaultsSnapshot) -> Result<u64, StorageError> {
        (**self).save_snapshot(key, snapshot)
    }
}
