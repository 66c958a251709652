//! Engine-owned side table: group name → canonical defaults.
//!
//! Groups themselves belong to the category registry and are never
//! mutated; the engine keeps its own wrapper per group here.

use termsync_core::types::catalog::CategoryGroup;
use termsync_core::types::collections::FxHashMap;

use super::normalizer::GroupDefaults;

#[derive(Debug, Default)]
pub struct DefaultsTable {
    groups: FxHashMap<String, GroupDefaults>,
}

impl DefaultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: &str) -> Option<&GroupDefaults> {
        self.groups.get(group)
    }

    pub fn get_mut(&mut self, group: &str) -> Option<&mut GroupDefaults> {
        self.groups.get_mut(group)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// The wrapper for `group`, created empty on first sight. An existing
    /// wrapper keeps its mapping but picks up the registry's entity types.
    pub fn ensure(&mut self, group: &CategoryGroup) -> &mut GroupDefaults {
        let entry = self
            .groups
            .entry(group.name.clone())
            .or_insert_with(|| GroupDefaults::new(group));
        entry.refresh_entity_types(group);
        entry
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
