//! Engine error types.

use termsync_core::errors::error_code::{self, TermsErrorCode};
use termsync_core::errors::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Unknown category group: {0}")]
    UnknownGroup(String),

    #[error("Bulk relation write failed for group {group}: {source}")]
    BulkWrite {
        group: String,
        #[source]
        source: StorageError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TermsErrorCode for SyncError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::UnknownGroup(_) => error_code::UNKNOWN_GROUP,
            Self::BulkWrite { .. } => error_code::BULK_WRITE_FAILED,
            Self::Config(_) => error_code::CONFIG_ERROR,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
