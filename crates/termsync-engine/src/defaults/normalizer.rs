//! Canonical form of a group's default declaration.
//!
//! Canonical means: one entry per entity type, entity-type keys in
//! lexicographic order, each value list sorted with duplicates removed.
//! Two declarations that are permutations of each other normalise to the
//! same mapping, so structural equality against the persisted snapshot is
//! meaningful.

use termsync_core::types::catalog::CategoryGroup;
use termsync_core::types::defaults::{DefaultsMap, RawDefaults};

/// Normalise a raw declaration for a group applicable to `entity_types`.
///
/// A flat list is broadcast identically to every applicable entity type.
/// A per-type mapping keeps its own keys, including types the group does
/// not list; those entries are carried but never scanned.
pub fn normalize(raw: &RawDefaults, entity_types: &[String]) -> DefaultsMap {
    match raw {
        RawDefaults::Flat(values) => {
            let values = sorted_set(values.iter().cloned());
            let mut types = entity_types.to_vec();
            types.sort();
            types
                .into_iter()
                .map(|entity_type| (entity_type, values.clone()))
                .collect()
        }
        RawDefaults::PerType(map) => map
            .iter()
            .map(|(entity_type, values)| (entity_type.clone(), sorted_set(values.iter().cloned())))
            .collect(),
    }
}

fn sorted_set(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut values: Vec<String> = values.collect();
    values.sort();
    values.dedup();
    values
}

/// The canonical defaults attached to one category group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDefaults {
    group: String,
    entity_types: Vec<String>,
    canonical: DefaultsMap,
}

impl GroupDefaults {
    /// An empty wrapper, ready to receive a declaration later.
    pub fn new(group: &CategoryGroup) -> Self {
        let mut entity_types = group.entity_types.clone();
        entity_types.sort();
        entity_types.dedup();
        Self {
            group: group.name.clone(),
            entity_types,
            canonical: DefaultsMap::new(),
        }
    }

    /// A wrapper initialised from a declaration.
    pub fn with_declaration(group: &CategoryGroup, raw: &RawDefaults) -> Self {
        let mut defaults = Self::new(group);
        defaults.set(raw);
        defaults
    }

    /// Replace the canonical mapping with the normalised declaration.
    ///
    /// An empty declaration is a no-op and returns `false`; whatever was
    /// attached before stays in place.
    pub fn set(&mut self, raw: &RawDefaults) -> bool {
        if raw.is_empty() {
            return false;
        }
        self.canonical = normalize(raw, &self.entity_types);
        true
    }

    /// Values for one entity type, or `None` if the type has no entry.
    pub fn get(&self, entity_type: &str) -> Option<&[String]> {
        self.canonical.get(entity_type).map(Vec::as_slice)
    }

    /// The whole canonical mapping.
    pub fn all(&self) -> &DefaultsMap {
        &self.canonical
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Applicable entity types, sorted.
    pub fn entity_types(&self) -> &[String] {
        &self.entity_types
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Pick up a changed applicable-type list from the registry.
    pub(crate) fn refresh_entity_types(&mut self, group: &CategoryGroup) {
        let mut entity_types = group.entity_types.clone();
        entity_types.sort();
        entity_types.dedup();
        self.entity_types = entity_types;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> CategoryGroup {
        CategoryGroup::new("tags", ["post", "page"])
    }

    #[test]
    fn flat_list_broadcasts_to_sorted_entity_types() {
        let canonical = normalize(&RawDefaults::flat(["water", "air"]), &tags().entity_types);
        let keys: Vec<&str> = canonical.keys().map(String::as_str).collect();
        assert_eq!(keys, ["page", "post"]);
        assert_eq!(canonical["page"], ["air", "water"]);
        assert_eq!(canonical["post"], ["air", "water"]);
    }

    #[test]
    fn per_type_sorts_keys_and_values() {
        let canonical = normalize(
            &RawDefaults::per_type([("post", vec!["b", "a"]), ("attachment", vec!["z", "y"])]),
            &tags().entity_types,
        );
        let keys: Vec<&str> = canonical.keys().map(String::as_str).collect();
        assert_eq!(keys, ["attachment", "post"]);
        assert_eq!(canonical["post"], ["a", "b"]);
        assert_eq!(canonical["attachment"], ["y", "z"]);
    }

    #[test]
    fn duplicate_values_collapse() {
        let canonical = normalize(&RawDefaults::flat(["a", "b", "a"]), &["post".to_string()]);
        assert_eq!(canonical["post"], ["a", "b"]);
    }

    #[test]
    fn empty_declaration_keeps_previous_mapping() {
        let mut defaults = GroupDefaults::with_declaration(&tags(), &RawDefaults::flat(["water"]));
        assert!(!defaults.set(&RawDefaults::Flat(vec![])));
        assert_eq!(defaults.get("post"), Some(&["water".to_string()][..]));
    }

    #[test]
    fn set_replaces_rather_than_merges() {
        let mut defaults = GroupDefaults::with_declaration(&tags(), &RawDefaults::flat(["water"]));
        defaults.set(&RawDefaults::per_type([("post", ["juice"])]));
        assert_eq!(defaults.get("post"), Some(&["juice".to_string()][..]));
        assert_eq!(defaults.get("page"), None);
    }

    #[test]
    fn get_unknown_type_is_none() {
        let defaults = GroupDefaults::new(&tags());
        assert!(defaults.is_empty());
        assert_eq!(defaults.get("post"), None);
        assert!(defaults.all().is_empty());
    }

    #[test]
    fn renormalising_canonical_form_is_stable() {
        let once = normalize(&RawDefaults::flat(["b", "a"]), &tags().entity_types);
        let twice = normalize(&RawDefaults::from(once.clone()), &tags().entity_types);
        assert_eq!(once, twice);
    }
}
