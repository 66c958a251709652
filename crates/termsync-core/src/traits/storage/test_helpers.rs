//! `InMemoryCatalog` — in-memory test double for every collaborator trait.
//!
//! Used by engine tests to avoid creating real SQLite databases. Relation
//! ids are offset from category ids so code that confuses the two fails.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::errors::StorageError;
use crate::types::catalog::{CategoryGroup, CategoryValue, EntityQuery, Exclusion, RelationRow};
use crate::types::collections::FxHashSet;
use crate::types::defaults::DefaultsSnapshot;
use crate::types::identifiers::{CategoryId, EntityId, RelationId};

use super::category_registry::ICategoryRegistry;
use super::entity_store::IEntityStore;
use super::relation_store::IRelationStore;
use super::snapshot_store::ISnapshotStore;

const RELATION_ID_OFFSET: i64 = 1000;

#[derive(Debug, Clone)]
struct EntityRecord {
    entity_type: String,
    parent: Option<EntityId>,
}

#[derive(Default)]
struct CatalogState {
    groups: Vec<CategoryGroup>,
    categories: Vec<CategoryValue>,
    entities: BTreeMap<EntityId, EntityRecord>,
    relations: Vec<RelationRow>,
    snapshots: BTreeMap<String, (DefaultsSnapshot, u64)>,
    next_category_id: i64,
    next_entity_id: i64,
    failing_names: FxHashSet<String>,
    fail_inserts: bool,
    insert_calls: usize,
    snapshot_writes: usize,
}

/// In-memory implementation of all four collaborator traits.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a category group.
    pub fn register_group(&self, group: CategoryGroup) {
        let mut state = self.state.lock().unwrap();
        match state.groups.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => *existing = group,
            None => state.groups.push(group),
        }
    }

    /// Insert an entity and return its id.
    pub fn insert_entity(&self, entity_type: &str, parent: Option<EntityId>) -> EntityId {
        let mut state = self.state.lock().unwrap();
        state.next_entity_id += 1;
        let id = EntityId(state.next_entity_id);
        state.entities.insert(
            id,
            EntityRecord {
                entity_type: entity_type.to_string(),
                parent,
            },
        );
        id
    }

    /// Tag an entity with a named category, creating the category if needed.
    pub fn relate(&self, entity_id: EntityId, group: &str, name: &str) -> Result<(), StorageError> {
        let value = match self.find_category_by_name(group, name)? {
            Some(value) => value,
            None => self.create_category(group, name)?,
        };
        self.append_entity_relations(entity_id, &[value.relation_id])?;
        self.recompute_usage_counts(&[value.relation_id], group)
    }

    /// Sorted names of the categories an entity holds in a group.
    pub fn entity_category_names(&self, entity_id: EntityId, group: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut names: Vec<String> = state
            .relations
            .iter()
            .filter(|r| r.entity_id == entity_id)
            .filter_map(|r| {
                state
                    .categories
                    .iter()
                    .find(|c| c.relation_id == r.relation_id && c.group == group)
                    .map(|c| c.name.clone())
            })
            .collect();
        names.sort();
        names
    }

    /// Make `create_category` fail for this exact name.
    pub fn fail_category_creation(&self, name: &str) {
        self.state.lock().unwrap().failing_names.insert(name.to_string());
    }

    /// Make every `insert_relations` call fail.
    pub fn fail_relation_inserts(&self, fail: bool) {
        self.state.lock().unwrap().fail_inserts = fail;
    }

    pub fn relation_row_count(&self) -> usize {
        self.state.lock().unwrap().relations.len()
    }

    pub fn insert_calls(&self) -> usize {
        self.state.lock().unwrap().insert_calls
    }

    pub fn snapshot_writes(&self) -> usize {
        self.state.lock().unwrap().snapshot_writes
    }

    pub fn category_count(&self, group: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.categories.iter().filter(|c| c.group == group).count()
    }

    fn matches(state: &CatalogState, id: EntityId, record: &EntityRecord, query: &EntityQuery) -> bool {
        if record.parent.is_some() || record.entity_type != query.entity_type {
            return false;
        }
        match &query.exclusion {
            Exclusion::None => true,
            Exclusion::Group(group) => !state.relations.iter().any(|r| {
                r.entity_id == id
                    && state
                        .categories
                        .iter()
                        .any(|c| c.relation_id == r.relation_id && &c.group == group)
            }),
            Exclusion::Relation(relation_id) => !state
                .relations
                .iter()
                .any(|r| r.entity_id == id && r.relation_id == *relation_id),
        }
    }
}

impl ICategoryRegistry for InMemoryCatalog {
    fn group(&self, name: &str) -> Result<Option<CategoryGroup>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state.groups.iter().find(|g| g.name == name).cloned())
    }

    fn group_names(&self) -> Result<Vec<String>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state.groups.iter().map(|g| g.name.clone()).collect())
    }

    fn groups_for_entity_type(&self, entity_type: &str) -> Result<Vec<CategoryGroup>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .groups
            .iter()
            .filter(|g| g.applies_to(entity_type))
            .cloned()
            .collect())
    }

    fn find_category_by_name(&self, group: &str, name: &str) -> Result<Option<CategoryValue>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .categories
            .iter()
            .find(|c| c.group == group && c.name == name)
            .cloned())
    }

    fn create_category(&self, group: &str, name: &str) -> Result<CategoryValue, StorageError> {
        let mut state = self.state.lock().unwrap();
        if name.trim().is_empty() || state.failing_names.contains(name) {
            return Err(StorageError::InvalidCategoryName {
                group: group.to_string(),
                name: name.to_string(),
            });
        }
        if !state.groups.iter().any(|g| g.name == group) {
            return Err(StorageError::GroupNotFound(group.to_string()));
        }
        if state.categories.iter().any(|c| c.group == group && c.name == name) {
            return Err(StorageError::DuplicateCategory {
                group: group.to_string(),
                name: name.to_string(),
            });
        }
        state.next_category_id += 1;
        let id = state.next_category_id;
        let value = CategoryValue {
            id: CategoryId(id),
            relation_id: RelationId(id + RELATION_ID_OFFSET),
            group: group.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            usage_count: 0,
        };
        state.categories.push(value.clone());
        Ok(value)
    }

    fn category_exists(&self, name: &str, group: &str) -> Result<Option<CategoryId>, StorageError> {
        Ok(self.find_category_by_name(group, name)?.map(|c| c.id))
    }
}

impl IEntityStore for InMemoryCatalog {
    fn count_entities(&self, query: &EntityQuery) -> Result<u64, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .entities
            .iter()
            .filter(|(id, record)| Self::matches(&state, **id, record, query))
            .count() as u64)
    }

    fn find_entities(&self, query: &EntityQuery, offset: u64, limit: usize) -> Result<Vec<EntityId>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .entities
            .iter()
            .filter(|(id, record)| Self::matches(&state, **id, record, query))
            .map(|(id, _)| *id)
            .skip(offset as usize)
            .take(limit)
            .collect())
    }

    fn count_relations(&self, group: &str) -> Result<u64, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .relations
            .iter()
            .filter(|r| {
                state
                    .categories
                    .iter()
                    .any(|c| c.relation_id == r.relation_id && c.group == group)
            })
            .count() as u64)
    }
}

impl IRelationStore for InMemoryCatalog {
    fn insert_relations(&self, rows: &[RelationRow], unique_checks: bool) -> Result<usize, StorageError> {
        let mut state = self.state.lock().unwrap();
        state.insert_calls += 1;
        if state.fail_inserts {
            return Err(StorageError::sqlite("injected insert failure"));
        }
        if unique_checks {
            let mut seen: FxHashSet<RelationRow> = state.relations.iter().copied().collect();
            for row in rows {
                if !seen.insert(*row) {
                    return Err(StorageError::DuplicateRelation {
                        entity_id: row.entity_id.get(),
                        relation_id: row.relation_id.get(),
                    });
                }
            }
        }
        state.relations.extend_from_slice(rows);
        Ok(rows.len())
    }

    fn append_entity_relations(&self, entity_id: EntityId, relation_ids: &[RelationId]) -> Result<usize, StorageError> {
        let mut state = self.state.lock().unwrap();
        let mut added = 0;
        for relation_id in relation_ids {
            let row = RelationRow {
                entity_id,
                relation_id: *relation_id,
            };
            if !state.relations.contains(&row) {
                state.relations.push(row);
                added += 1;
            }
        }
        Ok(added)
    }

    fn recompute_usage_counts(&self, relation_ids: &[RelationId], group: &str) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        for relation_id in relation_ids {
            let count = state
                .relations
                .iter()
                .filter(|r| r.relation_id == *relation_id)
                .count() as u64;
            if let Some(value) = state
                .categories
                .iter_mut()
                .find(|c| c.relation_id == *relation_id && c.group == group)
            {
                value.usage_count = count;
            }
        }
        Ok(())
    }
}

impl ISnapshotStore for InMemoryCatalog {
    fn load_snapshot(&self, key: &str) -> Result<Option<DefaultsSnapshot>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state.snapshots.get(key).map(|(snapshot, _)| snapshot.clone()))
    }

    fn save_snapshot(&self, key: &str, snapshot: &DefaultsSnapshot) -> Result<u64, StorageError> {
        let mut state = self.state.lock().unwrap();
        state.snapshot_writes += 1;
        let version = state.snapshots.get(key).map(|(_, v)| v + 1).unwrap_or(1);
        state
            .snapshots
            .insert(key.to_string(), (snapshot.clone(), version));
        Ok(version)
    }
}
