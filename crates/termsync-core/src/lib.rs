//! # termsync-core
//!
//! Foundation crate for default-term synchronisation.
//! Defines the catalog types, collaborator traits, errors, config, and tracing.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{ExclusionScope, StorageConfig, SyncConfig, SyncPolicy, TermsConfig};
pub use errors::error_code::TermsErrorCode;
pub use errors::StorageError;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::defaults::{DefaultsMap, DefaultsSnapshot, RawDefaults};
pub use types::identifiers::{CategoryId, EntityId, RelationId};
