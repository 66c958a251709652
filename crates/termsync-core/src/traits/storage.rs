//! Storage trait module — re-exports all collaborator traits.
//!
//! These traits define the contract between the synchronisation engine and
//! whatever owns categories, entities, relations, and persisted settings.
//! The SQLite implementation lives in `termsync-storage`; `test_helpers`
//! holds an in-memory implementation. All traits are object-safe,
//! `Send + Sync`, and have blanket `Arc<T>` impls.

pub mod category_registry;
pub mod entity_store;
pub mod relation_store;
pub mod snapshot_store;
pub mod test_helpers;

pub use category_registry::ICategoryRegistry;
pub use entity_store::IEntityStore;
pub use relation_store::IRelationStore;
pub use snapshot_store::ISnapshotStore;
