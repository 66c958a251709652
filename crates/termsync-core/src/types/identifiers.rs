//! Typed identifiers for catalog rows.
//!
//! Category identifiers and relation identifiers are deliberately distinct
//! types: resolving a name yields a `CategoryId`, but entity relations
//! always reference a `RelationId`.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(
    /// Identifier of an entity in the content catalog.
    EntityId
);
id_newtype!(
    /// Identifier of a category value (name-level row).
    CategoryId
);
id_newtype!(
    /// Identifier used by entity relations to point at a category value within a group.
    RelationId
);
