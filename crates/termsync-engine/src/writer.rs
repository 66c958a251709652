//! Bulk Relation Writer: one batched, uniqueness-relaxed insert of the
//! full `entities × relations` cross product, followed by a synchronous
//! usage-count recompute.

use std::sync::Arc;

use termsync_core::errors::StorageError;
use termsync_core::traits::storage::IRelationStore;
use termsync_core::types::catalog::RelationRow;
use termsync_core::types::identifiers::{EntityId, RelationId};
use tracing::debug;

pub struct BulkRelationWriter {
    relations: Arc<dyn IRelationStore>,
}

impl BulkRelationWriter {
    pub fn new(relations: Arc<dyn IRelationStore>) -> Self {
        Self { relations }
    }

    /// Give every entity every relation. Returns `false` without touching
    /// storage when either side is empty.
    ///
    /// Callers must already have excluded entities holding these relations:
    /// uniqueness is not enforced during the insert. Counts are recomputed
    /// only after the insert commits.
    pub fn assign(&self, entity_ids: &[EntityId], relation_ids: &[RelationId], group: &str) -> Result<bool, StorageError> {
        if entity_ids.is_empty() || relation_ids.is_empty() {
            return Ok(false);
        }
        let rows: Vec<RelationRow> = relation_ids
            .iter()
            .flat_map(|relation_id| {
                entity_ids.iter().map(move |entity_id| RelationRow {
                    entity_id: *entity_id,
                    relation_id: *relation_id,
                })
            })
            .collect();

        let inserted = self.relations.insert_relations(&rows, false)?;
        self.relations.recompute_usage_counts(relation_ids, group)?;
        debug!(group, rows = inserted, "Bulk-assigned relations");
        Ok(true)
    }

    /// Append relations to one entity, skipping any it already holds.
    pub fn attach(&self, entity_id: EntityId, relation_ids: &[RelationId], group: &str) -> Result<usize, StorageError> {
        if relation_ids.is_empty() {
            return Ok(0);
        }
        let added = self.relations.append_entity_relations(entity_id, relation_ids)?;
        self.relations.recompute_usage_counts(relation_ids, group)?;
        Ok(added)
    }
}
