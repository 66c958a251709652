//! Catalog rows exchanged with the collaborator traits.

use serde::{Deserialize, Serialize};

use super::defaults::RawDefaults;
use super::identifiers::{CategoryId, EntityId, RelationId};

/// A named classification axis, as owned by the category registry.
///
/// `declared_defaults` is the raw declaration the host attached at
/// registration time, if any. The engine never writes back to this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub entity_types: Vec<String>,
    #[serde(default)]
    pub declared_defaults: Option<RawDefaults>,
}

impl CategoryGroup {
    pub fn new<I, S>(name: impl Into<String>, entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            entity_types: entity_types.into_iter().map(Into::into).collect(),
            declared_defaults: None,
        }
    }

    pub fn with_defaults(mut self, defaults: RawDefaults) -> Self {
        self.declared_defaults = Some(defaults);
        self
    }

    pub fn applies_to(&self, entity_type: &str) -> bool {
        self.entity_types.iter().any(|t| t == entity_type)
    }
}

/// A category value within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub id: CategoryId,
    pub relation_id: RelationId,
    pub group: String,
    pub name: String,
    pub slug: String,
    pub usage_count: u64,
}

/// One entity↔category relation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationRow {
    pub entity_id: EntityId,
    pub relation_id: RelationId,
}

/// Which entities a backfill scan must skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// Every entity matching the type filter qualifies.
    None,
    /// Skip entities holding any relation in this group.
    Group(String),
    /// Skip entities already holding this specific relation.
    Relation(RelationId),
}

/// Filter for paginated entity scans. Only top-level entities (no parent)
/// are ever scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityQuery {
    pub entity_type: String,
    pub exclusion: Exclusion,
}

impl EntityQuery {
    pub fn new(entity_type: impl Into<String>, exclusion: Exclusion) -> Self {
        Self {
            entity_type: entity_type.into(),
            exclusion,
        }
    }
}
