//! Collaborator traits consumed by the synchronisation engine.

pub mod storage;

pub use storage::{ICategoryRegistry, IEntityStore, IRelationStore, ISnapshotStore};
