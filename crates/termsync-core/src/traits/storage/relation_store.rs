//! `IRelationStore` trait — entity↔category relation writes.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::catalog::RelationRow;
use crate::types::identifiers::{EntityId, RelationId};

pub trait IRelationStore: Send + Sync {
    /// Insert all rows atomically: either every row lands or none do.
    ///
    /// With `unique_checks == false`, duplicate-relation enforcement is
    /// suspended for the duration of this call only and restored before
    /// returning, whether or not the insert succeeded.
    fn insert_relations(&self, rows: &[RelationRow], unique_checks: bool) -> Result<usize, StorageError>;

    /// Attach relations to one entity, skipping any it already holds.
    /// Returns the number of rows actually added.
    fn append_entity_relations(&self, entity_id: EntityId, relation_ids: &[RelationId]) -> Result<usize, StorageError>;

    /// Recompute and persist usage counts for the given relations.
    fn recompute_usage_counts(&self, relation_ids: &[RelationId], group: &str) -> Result<(), StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IRelationStore + ?Sized> IRelationStore for Arc<T> {
    fn insert_relations(&self, rows: &[RelationRow], unique_checks: bool) -> Result<usize, StorageError> {
        (**self).insert_relations(rows, unique_checks)
    }
    fn append_entity_relations(&self, entity_id: EntityId, relation_ids: &[RelationId]) -> Result<usize, StorageError> {
        (**self).append_entity_relations(entity_id, relation_ids)
    }
    fn recompute_usage_counts(&self, relation_ids: &[RelationId], group: &str) -> Result<(), StorageError> {
        (**self).recompute_usage_counts(relation_ids, group)
    }
}
