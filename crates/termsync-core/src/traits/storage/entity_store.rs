//! `IEntityStore` trait — paginated scans over top-level entities.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::catalog::EntityQuery;
use crate::types::identifiers::EntityId;

pub trait IEntityStore: Send + Sync {
    /// Number of top-level entities matching the query.
    fn count_entities(&self, query: &EntityQuery) -> Result<u64, StorageError>;

    /// One page of matching top-level entity ids, ordered by id.
    fn find_entities(&self, query: &EntityQuery, offset: u64, limit: usize) -> Result<Vec<EntityId>, StorageError>;

    /// Total number of relation rows recorded under a group.
    fn count_relations(&self, group: &str) -> Result<u64, StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IEntityStore + ?Sized> IEntityStore for Arc<T> {
    fn count_entities(&self, query: &EntityQuery) -> Result<u64, StorageError> {
        (**self).count_entities(query)
    }
    fn find_entities(&self, query: &EntityQuery, offset: u64, limit: usize) -> Result<Vec<EntityId>, StorageError> {
        (**self).find_entities(query, offset, limit)
    }
    fn count_relations(&self, group: &str) -> Result<u64, StorageError> {
        (**self).count_relations(group)
    }
}
