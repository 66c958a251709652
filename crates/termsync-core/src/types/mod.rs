//! Shared data structures.

pub mod catalog;
pub mod collections;
pub mod defaults;
pub mod identifiers;

pub use catalog::{CategoryGroup, CategoryValue, EntityQuery, Exclusion, RelationRow};
