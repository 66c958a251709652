//! `TermsStorageEngine` — SQLite implementation of all four collaborator traits.
//!
//! Wraps `DatabaseManager`. All reads go through `with_reader()`, all writes
//! through `with_writer()`; multi-statement writes run in one transaction.

use std::path::Path;

use termsync_core::config::StorageConfig;
use termsync_core::errors::StorageError;
use termsync_core::traits::storage::{ICategoryRegistry, IEntityStore, IRelationStore, ISnapshotStore};
use termsync_core::types::catalog::{CategoryGroup, CategoryValue, EntityQuery, RelationRow};
use termsync_core::types::defaults::DefaultsSnapshot;
use termsync_core::types::identifiers::{CategoryId, EntityId, RelationId};
use tracing::debug;

use crate::connection::DatabaseManager;
use crate::queries::{self, sqlite_err};

pub struct TermsStorageEngine {
    db: DatabaseManager,
    config: StorageConfig,
}

impl TermsStorageEngine {
    /// Open a file-backed storage engine at the given path.
    /// Runs migrations and applies pragmas.
    pub fn open(path: &Path, config: StorageConfig) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path, &config)?;
        Ok(Self { db, config })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let config = StorageConfig::default();
        let db = DatabaseManager::open_in_memory(&config)?;
        Ok(Self { db, config })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// Register or replace a category group.
    pub fn register_group(&self, group: &CategoryGroup) -> Result<(), StorageError> {
        self.db.with_writer(|conn| queries::groups::upsert_group(conn, group))
    }

    pub fn insert_entity(&self, entity_type: &str, parent: Option<EntityId>) -> Result<EntityId, StorageError> {
        self.db
            .with_writer(|conn| queries::entities::insert_entity(conn, entity_type, parent))
    }

    /// Sorted category names an entity holds in a group.
    pub fn entity_category_names(&self, entity_id: EntityId, group: &str) -> Result<Vec<String>, StorageError> {
        self.db
            .with_reader(|conn| queries::relations::entity_category_names(conn, entity_id, group))
    }

    pub fn relation_row_count(&self) -> Result<u64, StorageError> {
        self.db.with_reader(queries::relations::count_rows)
    }

    pub fn unique_checks_enabled(&self) -> Result<bool, StorageError> {
        self.db.with_reader(queries::relations::unique_checks_enabled)
    }

    pub fn snapshot_version(&self, key: &str) -> Result<Option<u64>, StorageError> {
        self.db
            .with_reader(|conn| queries::options::option_version(conn, key))
    }

    /// Raw read access — for operations not covered by a trait method.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access — for operations not covered by a trait method.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }
}

impl ICategoryRegistry for TermsStorageEngine {
    fn group(&self, name: &str) -> Result<Option<CategoryGroup>, StorageError> {
        self.db.with_reader(|conn| queries::groups::get_group(conn, name))
    }

    fn group_names(&self) -> Result<Vec<String>, StorageError> {
        let groups = self.db.with_reader(queries::groups::list_groups)?;
        Ok(groups.into_iter().map(|g| g.name).collect())
    }

    fn groups_for_entity_type(&self, entity_type: &str) -> Result<Vec<CategoryGroup>, StorageError> {
        let groups = self.db.with_reader(queries::groups::list_groups)?;
        Ok(groups
            .into_iter()
            .filter(|g| g.applies_to(entity_type))
            .collect())
    }

    fn find_category_by_name(&self, group: &str, name: &str) -> Result<Option<CategoryValue>, StorageError> {
        self.db
            .with_reader(|conn| queries::categories::find_by_name(conn, group, name))
    }

    fn create_category(&self, group: &str, name: &str) -> Result<CategoryValue, StorageError> {
        if name.trim().is_empty() {
            return Err(StorageError::InvalidCategoryName {
                group: group.to_string(),
                name: name.to_string(),
            });
        }
        self.db.with_writer(|conn| {
            if queries::groups::get_group(conn, group)?.is_none() {
                return Err(StorageError::GroupNotFound(group.to_string()));
            }
            if queries::categories::find_by_name(conn, group, name)?.is_some() {
                return Err(StorageError::DuplicateCategory {
                    group: group.to_string(),
                    name: name.to_string(),
                });
            }
            let tx = conn.unchecked_transaction().map_err(sqlite_err)?;
            let value = queries::categories::insert_category(&tx, group, name)?;
            tx.commit().map_err(sqlite_err)?;
            debug!(group, name, relation_id = %value.relation_id, "Created category");
            Ok(value)
        })
    }

    fn category_exists(&self, name: &str, group: &str) -> Result<Option<CategoryId>, StorageError> {
        Ok(self.find_category_by_name(group, name)?.map(|value| value.id))
    }
}

impl IEntityStore for TermsStorageEngine {
    fn count_entities(&self, query: &EntityQuery) -> Result<u64, StorageError> {
        self.db
            .with_reader(|conn| queries::entities::count_entities(conn, query))
    }

    fn find_entities(&self, query: &EntityQuery, offset: u64, limit: usize) -> Result<Vec<EntityId>, StorageError> {
        self.db
            .with_reader(|conn| queries::entities::find_entities(conn, query, offset, limit))
    }

    fn count_relations(&self, group: &str) -> Result<u64, StorageError> {
        self.db
            .with_reader(|conn| queries::relations::count_group_relations(conn, group))
    }
}

impl IRelationStore for TermsStorageEngine {
    fn insert_relations(&self, rows: &[RelationRow], unique_checks: bool) -> Result<usize, StorageError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let chunk_rows = self.config.effective_insert_chunk_rows();
        self.db.with_writer(|conn| {
            // The flag lives inside the transaction, so a rollback restores it too.
            let tx = conn.unchecked_transaction().map_err(sqlite_err)?;
            if !unique_checks {
                queries::relations::set_unique_checks(&tx, false)?;
            }
            let inserted = queries::relations::insert_rows(&tx, rows, chunk_rows)?;
            if !unique_checks {
                queries::relations::set_unique_checks(&tx, true)?;
            }
            tx.commit().map_err(sqlite_err)?;
            Ok(inserted)
        })
    }

    fn append_entity_relations(&self, entity_id: EntityId, relation_ids: &[RelationId]) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            let tx = conn.unchecked_transaction().map_err(sqlite_err)?;
            let mut added = 0;
            for relation_id in relation_ids {
                added += queries::relations::insert_if_absent(&tx, entity_id, *relation_id)?;
            }
            tx.commit().map_err(sqlite_err)?;
            Ok(added)
        })
    }

    fn recompute_usage_counts(&self, relation_ids: &[RelationId], group: &str) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            let tx = conn.unchecked_transaction().map_err(sqlite_err)?;
            for relation_id in relation_ids {
                queries::relations::update_usage_count(&tx, *relation_id, group)?;
            }
            tx.commit().map_err(sqlite_err)
        })
    }
}

impl ISnapshotStore for TermsStorageEngine {
    fn load_snapshot(&self, key: &str) -> Result<Option<DefaultsSnapshot>, StorageError> {
        let raw = self.db.with_reader(|conn| queries::options::get_option(conn, key))?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_snapshot(&self, key: &str, snapshot: &DefaultsSnapshot) -> Result<u64, StorageError> {
        let json = serde_json::to_string(snapshot)?;
        self.db
            .with_writer(|conn| queries::options::put_option(conn, key, &json))
    }
}
