//! Registration-time drift detection and upgrade-time backfill.

mod backfill;
mod pending;
mod registration;

pub use backfill::{Backfill, UpgradeReport};
pub use pending::PendingQueue;
pub use registration::{has_drifted, should_queue, RegistrationOutcome};
