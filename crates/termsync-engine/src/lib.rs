//! # termsync-engine
//!
//! Keeps entities in a content catalog aligned with the default categories
//! each group declares.
//!
//! ## Modules
//! - `defaults` — normalisation of default declarations, per-group side table
//! - `snapshot` — read/write of the persisted defaults record
//! - `writer` — batched relation inserts with usage-count recompute
//! - `sync` — pending queue, drift detection, backfill
//! - `handler` — the three-signal dispatcher contract
//! - `engine` — `DefaultTermsEngine`, wiring it all to injected collaborators

pub mod defaults;
pub mod engine;
pub mod errors;
pub mod handler;
pub mod snapshot;
pub mod sync;
pub mod writer;

pub use defaults::{normalize, DefaultsTable, GroupDefaults};
pub use engine::{Collaborators, DefaultTermsEngine};
pub use errors::{SyncError, SyncResult};
pub use handler::DefaultTermsHandler;
pub use snapshot::SnapshotAdapter;
pub use sync::{RegistrationOutcome, UpgradeReport};
pub use writer::BulkRelationWriter;
