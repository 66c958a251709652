//! Per-table query functions. Each takes a `&Connection` so callers decide
//! the transaction boundary.

pub mod categories;
pub mod entities;
pub mod groups;
pub mod options;
pub mod relations;

use rusqlite::ErrorCode;
use termsync_core::errors::StorageError;

/// Map a rusqlite error onto the storage taxonomy.
pub fn sqlite_err(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => StorageError::DbBusy,
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}
