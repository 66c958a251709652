//! Default declarations and their canonical, persisted forms.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Canonical defaults for one group: `entity_type -> sorted value names`.
///
/// `BTreeMap` keeps the entity-type keys in lexicographic order; the
/// normalizer keeps every value list sorted and free of duplicates.
pub type DefaultsMap = BTreeMap<String, Vec<String>>;

/// The persisted record: one canonical entry per category group.
pub type DefaultsSnapshot = BTreeMap<String, DefaultsMap>;

/// A default declaration as supplied by the host, before normalisation.
///
/// Either a flat list broadcast to every applicable entity type, or a
/// mapping keyed by entity type. Deserialises from either JSON/TOML shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDefaults {
    Flat(Vec<String>),
    PerType(HashMap<String, Vec<String>>),
}

impl RawDefaults {
    /// Build a flat declaration from anything string-like.
    pub fn flat<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Flat(values.into_iter().map(Into::into).collect())
    }

    /// Build a per-entity-type declaration.
    pub fn per_type<I, K, V, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::PerType(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// An empty declaration leaves any existing canonical mapping untouched.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(values) => values.is_empty(),
            Self::PerType(map) => map.is_empty(),
        }
    }
}

impl From<DefaultsMap> for RawDefaults {
    fn from(map: DefaultsMap) -> Self {
        Self::PerType(map.into_iter().collect())
    }
}

impl From<Vec<String>> for RawDefaults {
    fn from(values: Vec<String>) -> Self {
        Self::Flat(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_deserialises_both_shapes() {
        let flat: RawDefaults = serde_json::from_str(r#"["water", "air"]"#).unwrap();
        assert_eq!(flat, RawDefaults::flat(["water", "air"]));

        let nested: RawDefaults = serde_json::from_str(r#"{"post": ["water"]}"#).unwrap();
        assert_eq!(nested, RawDefaults::per_type([("post", ["water"])]));
    }

    #[test]
    fn empty_detection() {
        assert!(RawDefaults::Flat(vec![]).is_empty());
        assert!(RawDefaults::PerType(HashMap::new()).is_empty());
        assert!(!RawDefaults::flat(["x"]).is_empty());
    }
}
