//! Backfill: retroactively give default categories to entities that have
//! no assignment yet, then commit the group's snapshot.
//!
//! Per group:
//! 1. make sure every default value exists as a category (creating it if
//!    needed; creation failures are skipped, not fatal),
//! 2. check whether the group has any relations at all,
//! 3. per applicable entity type with defaults, page through top-level
//!    entities lacking an assignment and bulk-assign the defaults,
//! 4. overwrite the group's snapshot entry.
//!
//! Bulk write failures abort the group before step 4.

use serde::Serialize;
use termsync_core::config::{ExclusionScope, SyncConfig};
use termsync_core::errors::StorageError;
use termsync_core::traits::storage::{ICategoryRegistry, IEntityStore};
use termsync_core::types::catalog::{EntityQuery, Exclusion};
use termsync_core::types::identifiers::{EntityId, RelationId};
use tracing::{debug, info, warn};

use crate::defaults::GroupDefaults;
use crate::errors::{SyncError, SyncResult};
use crate::snapshot::SnapshotAdapter;
use crate::writer::BulkRelationWriter;

/// Counters from one upgrade run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeReport {
    pub groups_processed: usize,
    pub categories_created: usize,
    pub category_failures: usize,
    pub entities_assigned: usize,
    pub relation_rows_written: usize,
    pub snapshots_committed: usize,
}

impl UpgradeReport {
    /// True when the run changed nothing in storage.
    pub fn is_noop(&self) -> bool {
        self.categories_created == 0 && self.relation_rows_written == 0 && self.snapshots_committed == 0
    }
}

/// Borrowed view of the collaborators a backfill pass needs.
pub struct Backfill<'a> {
    pub registry: &'a dyn ICategoryRegistry,
    pub entities: &'a dyn IEntityStore,
    pub writer: &'a BulkRelationWriter,
    pub snapshots: &'a SnapshotAdapter,
    pub config: &'a SyncConfig,
}

impl Backfill<'_> {
    /// Run the full backfill for one group.
    pub fn run_group(&self, defaults: &GroupDefaults, report: &mut UpgradeReport) -> SyncResult<()> {
        let group = defaults.group();

        self.ensure_categories(defaults, report)?;

        let has_relations = self.entities.count_relations(group)? > 0;
        if !has_relations {
            debug!(group, "No existing relations; scanning without exclusion");
        }

        for entity_type in defaults.entity_types() {
            let values = match defaults.get(entity_type) {
                Some(values) if !values.is_empty() => values,
                _ => continue,
            };
            let relation_ids = self.resolve_relation_ids(group, values)?;
            if relation_ids.is_empty() {
                continue;
            }

            match self.config.exclusion {
                ExclusionScope::AnyGroupRelation => {
                    let exclusion = if has_relations {
                        Exclusion::Group(group.to_string())
                    } else {
                        Exclusion::None
                    };
                    let entity_ids = self.collect_entities(&EntityQuery::new(entity_type.clone(), exclusion))?;
                    self.assign(group, &entity_ids, &relation_ids, report)?;
                    info!(group, entity_type = %entity_type, entities = entity_ids.len(), "Backfilled defaults");
                }
                ExclusionScope::PerDefaultRelation => {
                    for relation_id in &relation_ids {
                        let exclusion = if has_relations {
                            Exclusion::Relation(*relation_id)
                        } else {
                            Exclusion::None
                        };
                        let entity_ids =
                            self.collect_entities(&EntityQuery::new(entity_type.clone(), exclusion))?;
                        self.assign(group, &entity_ids, &[*relation_id], report)?;
                        info!(
                            group,
                            entity_type = %entity_type,
                            relation_id = %relation_id,
                            entities = entity_ids.len(),
                            "Backfilled default"
                        );
                    }
                }
            }
        }

        self.snapshots.write(group, defaults.all().clone())?;
        report.snapshots_committed += 1;
        Ok(())
    }

    /// Look up each default by name and create the missing ones, in sorted
    /// order per entity type.
    fn ensure_categories(&self, defaults: &GroupDefaults, report: &mut UpgradeReport) -> Result<(), StorageError> {
        let group = defaults.group();
        for name in defaults.all().values().flatten() {
            if self.registry.find_category_by_name(group, name)?.is_some() {
                continue;
            }
            match self.registry.create_category(group, name) {
                Ok(value) => {
                    report.categories_created += 1;
                    debug!(group, name = %name, id = %value.id, "Created default category");
                }
                Err(e) => {
                    report.category_failures += 1;
                    warn!(group, name = %name, error = %e, "Could not create default category; skipping");
                }
            }
        }
        Ok(())
    }

    fn resolve_relation_ids(&self, group: &str, values: &[String]) -> Result<Vec<RelationId>, StorageError> {
        let mut relation_ids = Vec::with_capacity(values.len());
        for name in values {
            match self.registry.find_category_by_name(group, name)? {
                Some(value) => relation_ids.push(value.relation_id),
                None => debug!(group, name = %name, "Default category unresolved; not assigned"),
            }
        }
        Ok(relation_ids)
    }

    /// Page through matching top-level entities. The total is taken once,
    /// up front; the page walk does not re-count.
    fn collect_entities(&self, query: &EntityQuery) -> Result<Vec<EntityId>, StorageError> {
        let batch_size = self.config.effective_batch_size();
        let total = self.entities.count_entities(query)?;
        let mut entity_ids = Vec::with_capacity(total as usize);
        for offset in (0..total).step_by(batch_size) {
            let page = self.entities.find_entities(query, offset, batch_size)?;
            if page.is_empty() {
                break;
            }
            entity_ids.extend(page);
        }
        Ok(entity_ids)
    }

    fn assign(
        &self,
        group: &str,
        entity_ids: &[EntityId],
        relation_ids: &[RelationId],
        report: &mut UpgradeReport,
    ) -> SyncResult<()> {
        let written = self
            .writer
            .assign(entity_ids, relation_ids, group)
            .map_err(|source| SyncError::BulkWrite {
                group: group.to_string(),
                source,
            })?;
        if written {
            report.entities_assigned += entity_ids.len();
            report.relation_rows_written += entity_ids.len() * relation_ids.len();
        }
        Ok(())
    }
}
