//! Drift detection for the group-registration flow.

use serde::Serialize;
use termsync_core::config::SyncPolicy;
use termsync_core::types::defaults::DefaultsMap;

/// What a group registration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// No declaration and no prior wrapper: an empty wrapper was created.
    Initialized,
    /// Canonical defaults match the snapshot; nothing queued.
    InSync,
    /// The group was queued for backfill. `drifted` is false when only the
    /// force-sync policy queued it.
    Queued { drifted: bool },
}

/// Deep comparison of canonical defaults against the persisted entry.
pub fn has_drifted(current: &DefaultsMap, persisted: &DefaultsMap) -> bool {
    current != persisted
}

pub fn should_queue(policy: SyncPolicy, drifted: bool) -> bool {
    match policy {
        SyncPolicy::SyncOnDrift => drifted,
        SyncPolicy::ForceSyncEveryRegistration => true,
    }
}
