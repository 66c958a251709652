//! The dispatcher contract: the three signals the host delivers.
//!
//! The host calls these directly; nothing in the engine knows how the
//! signals are produced.

use termsync_core::types::identifiers::EntityId;

use crate::errors::SyncResult;
use crate::sync::{RegistrationOutcome, UpgradeReport};

pub trait DefaultTermsHandler {
    /// A category group became known. Attaches canonical defaults and
    /// queues the group for backfill when required.
    fn on_group_registered(&mut self, group: &str) -> SyncResult<RegistrationOutcome>;

    /// An entity was saved. Brand-new entities receive the defaults of
    /// every applicable group; returns the number of relations added.
    fn on_entity_created(&mut self, entity_id: EntityId, entity_type: &str, is_new: bool) -> SyncResult<usize>;

    /// Drain the pending queue, backfilling each group in turn.
    fn on_upgrade_run(&mut self) -> SyncResult<UpgradeReport>;
}
