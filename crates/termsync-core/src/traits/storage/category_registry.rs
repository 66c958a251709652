//! `ICategoryRegistry` trait — category groups and name-keyed category values.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::catalog::{CategoryGroup, CategoryValue};
use crate::types::identifiers::CategoryId;

/// Owner of category groups and their values.
///
/// Names are unique within a group; the same name in two groups yields two
/// distinct values.
pub trait ICategoryRegistry: Send + Sync {
    /// Look up a registered group by name.
    fn group(&self, name: &str) -> Result<Option<CategoryGroup>, StorageError>;

    /// Names of every registered group, in registration order.
    fn group_names(&self) -> Result<Vec<String>, StorageError>;

    /// Groups that declare `entity_type` as applicable.
    fn groups_for_entity_type(&self, entity_type: &str) -> Result<Vec<CategoryGroup>, StorageError>;

    /// Exact-name lookup within a group.
    fn find_category_by_name(&self, group: &str, name: &str) -> Result<Option<CategoryValue>, StorageError>;

    /// Create a category value. Fails on blank names and on name conflicts.
    fn create_category(&self, group: &str, name: &str) -> Result<CategoryValue, StorageError>;

    /// Identifier of the named category if it exists in the group.
    fn category_exists(&self, name: &str, group: &str) -> Result<Option<CategoryId>, StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: ICategoryRegistry + ?Sized> ICategoryRegistry for Arc<T> {
    fn group(&self, name: &str) -> Result<Option<CategoryGroup>, StorageError> {
        (**self).group(name)
    }
    fn group_names(&self) -> Result<Vec<String>, StorageError> {
        (**self).group_names()
    }
    fn groups_for_entity_type(&self, entity_type: &str) -> Result<Vec<CategoryGroup>, StorageError> {
        (**self).groups_for_entity_type(entity_type)
    }
    fn find_category_by_name(&self, group: &str, name: &str) -> Result<Option<CategoryValue>, StorageError> {
        (**self).find_category_by_name(group, name)
    }
    fn create_category(&self, group: &str, name: &str) -> Result<CategoryValue, StorageError> {
        (**self).create_category(group, name)
    }
    fn category_exists(&self, name: &str, group: &str) -> Result<Option<CategoryId>, StorageError> {
        (**self).category_exists(name, group)
    }
}
