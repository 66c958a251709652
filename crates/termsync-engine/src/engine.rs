//! `DefaultTermsEngine` — owns the defaults side table and the pending
//! queue, and drives the registration, entity-creation, and upgrade flows
//! against injected collaborators.

use std::sync::Arc;

use termsync_core::config::SyncConfig;
use termsync_core::traits::storage::{ICategoryRegistry, IEntityStore, IRelationStore, ISnapshotStore};
use termsync_core::types::defaults::{DefaultsMap, RawDefaults};
use termsync_core::types::identifiers::{EntityId, RelationId};
use tracing::{debug, info, warn};

use crate::defaults::{DefaultsTable, GroupDefaults};
use crate::errors::{SyncError, SyncResult};
use crate::handler::DefaultTermsHandler;
use crate::snapshot::SnapshotAdapter;
use crate::sync::{has_drifted, should_queue, Backfill, PendingQueue, RegistrationOutcome, UpgradeReport};
use crate::writer::BulkRelationWriter;

/// The collaborators the engine is constructed with.
#[derive(Clone)]
pub struct Collaborators {
    pub registry: Arc<dyn ICategoryRegistry>,
    pub entities: Arc<dyn IEntityStore>,
    pub relations: Arc<dyn IRelationStore>,
    pub snapshots: Arc<dyn ISnapshotStore>,
}

impl Collaborators {
    /// All four roles served by one backend.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: ICategoryRegistry + IEntityStore + IRelationStore + ISnapshotStore + 'static,
    {
        Self {
            registry: backend.clone(),
            entities: backend.clone(),
            relations: backend.clone(),
            snapshots: backend,
        }
    }
}

pub struct DefaultTermsEngine {
    registry: Arc<dyn ICategoryRegistry>,
    entities: Arc<dyn IEntityStore>,
    writer: BulkRelationWriter,
    snapshots: SnapshotAdapter,
    defaults: DefaultsTable,
    pending: PendingQueue,
    config: SyncConfig,
    last_report: Option<UpgradeReport>,
}

impl DefaultTermsEngine {
    pub fn new(collaborators: Collaborators, config: SyncConfig) -> SyncResult<Self> {
        if config.snapshot_key.trim().is_empty() {
            return Err(SyncError::Config("snapshot_key must not be empty".to_string()));
        }
        let Collaborators {
            registry,
            entities,
            relations,
            snapshots,
        } = collaborators;
        Ok(Self {
            snapshots: SnapshotAdapter::new(snapshots, registry.clone(), config.snapshot_key.clone()),
            writer: BulkRelationWriter::new(relations),
            registry,
            entities,
            defaults: DefaultsTable::new(),
            pending: PendingQueue::new(),
            config,
            last_report: None,
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn snapshots(&self) -> &SnapshotAdapter {
        &self.snapshots
    }

    /// Attach a declaration to a group, replacing its canonical defaults.
    /// Returns `false` for an empty declaration, which changes nothing.
    ///
    /// Takes effect for new entities immediately; existing entities are
    /// backfilled after the next registration queues the group.
    pub fn set_defaults(&mut self, group: &str, raw: &RawDefaults) -> SyncResult<bool> {
        let category_group = self
            .registry
            .group(group)?
            .ok_or_else(|| SyncError::UnknownGroup(group.to_string()))?;
        let changed = self.defaults.ensure(&category_group).set(raw);
        if changed {
            debug!(group, "Defaults replaced");
        }
        Ok(changed)
    }

    /// Canonical defaults for one entity type of a group.
    pub fn get_defaults(&self, group: &str, entity_type: &str) -> Option<&[String]> {
        self.defaults.get(group)?.get(entity_type)
    }

    /// The whole canonical mapping of a group.
    pub fn all_defaults(&self, group: &str) -> Option<&DefaultsMap> {
        self.defaults.get(group).map(GroupDefaults::all)
    }

    pub fn group_defaults(&self, group: &str) -> Option<&GroupDefaults> {
        self.defaults.get(group)
    }

    /// Counters of the most recent upgrade run. After a failed run this
    /// holds what the groups processed before the failure committed.
    pub fn last_upgrade_report(&self) -> Option<&UpgradeReport> {
        self.last_report.as_ref()
    }

    pub fn is_pending(&self, group: &str) -> bool {
        self.pending.contains(group)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Pending group names in processing order.
    pub fn pending_groups(&self) -> Vec<String> {
        self.pending.names().map(str::to_string).collect()
    }

    /// Resolve names to relation ids, creating missing categories.
    /// Blank names and failed creations are skipped.
    fn resolve_or_create(&self, group: &str, names: &[String]) -> SyncResult<Vec<RelationId>> {
        let mut relation_ids = Vec::with_capacity(names.len());
        for name in names.iter().filter(|name| !name.trim().is_empty()) {
            if let Some(value) = self.registry.find_category_by_name(group, name)? {
                relation_ids.push(value.relation_id);
                continue;
            }
            match self.registry.create_category(group, name) {
                Ok(value) => relation_ids.push(value.relation_id),
                Err(e) => warn!(group, name = %name, error = %e, "Could not create default category; skipping"),
            }
        }
        Ok(relation_ids)
    }
}

impl DefaultTermsHandler for DefaultTermsEngine {
    fn on_group_registered(&mut self, group: &str) -> SyncResult<RegistrationOutcome> {
        let category_group = self
            .registry
            .group(group)?
            .ok_or_else(|| SyncError::UnknownGroup(group.to_string()))?;
        let persisted = self.snapshots.read(group)?;

        let declared = category_group.declared_defaults.as_ref().filter(|raw| !raw.is_empty());
        if !self.defaults.contains(group) && declared.is_none() {
            self.defaults.ensure(&category_group);
            debug!(group, "No declared defaults; attached empty wrapper");
            return Ok(RegistrationOutcome::Initialized);
        }

        let defaults = self.defaults.ensure(&category_group);
        if let Some(raw) = declared {
            defaults.set(raw);
        }

        let drifted = has_drifted(defaults.all(), &persisted);
        if !should_queue(self.config.policy, drifted) {
            debug!(group, "Defaults match snapshot");
            return Ok(RegistrationOutcome::InSync);
        }
        if self.pending.enqueue(group) {
            info!(group, drifted, "Queued group for backfill");
        }
        Ok(RegistrationOutcome::Queued { drifted })
    }

    fn on_entity_created(&mut self, entity_id: EntityId, entity_type: &str, is_new: bool) -> SyncResult<usize> {
        if !is_new {
            return Ok(0);
        }
        let mut added = 0;
        for category_group in self.registry.groups_for_entity_type(entity_type)? {
            let group = category_group.name.as_str();
            let names = match self.defaults.get(group).and_then(|d| d.get(entity_type)) {
                Some(names) if !names.is_empty() => names.to_vec(),
                _ => continue,
            };
            let relation_ids = self.resolve_or_create(group, &names)?;
            let count = self.writer.attach(entity_id, &relation_ids, group)?;
            debug!(group, entity_id = %entity_id, added = count, "Applied defaults to new entity");
            added += count;
        }
        Ok(added)
    }

    fn on_upgrade_run(&mut self) -> SyncResult<UpgradeReport> {
        let mut report = UpgradeReport::default();
        while let Some(group) = self.pending.dequeue() {
            let Some(defaults) = self.defaults.get(&group) else {
                warn!(group = %group, "Pending group has no defaults wrapper; skipping");
                continue;
            };
            let backfill = Backfill {
                registry: self.registry.as_ref(),
                entities: self.entities.as_ref(),
                writer: &self.writer,
                snapshots: &self.snapshots,
                config: &self.config,
            };
            if let Err(e) = backfill.run_group(defaults, &mut report) {
                warn!(
                    group = %group,
                    remaining = self.pending.len(),
                    committed_groups = report.groups_processed,
                    committed_rows = report.relation_rows_written,
                    error = %e,
                    "Backfill failed; group is not re-queued"
                );
                self.last_report = Some(report);
                return Err(e);
            }
            report.groups_processed += 1;
        }
        info!(
            groups = report.groups_processed,
            created = report.categories_created,
            failed = report.category_failures,
            entities = report.entities_assigned,
            rows = report.relation_rows_written,
            "Upgrade run complete"
        );
        self.last_report = Some(report.clone());
        Ok(report)
    }
}
