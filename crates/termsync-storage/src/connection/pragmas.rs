//! Connection pragmas applied on open.

use rusqlite::Connection;
use termsync_core::config::StorageConfig;
use termsync_core::errors::StorageError;

use crate::queries::sqlite_err;

pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(sqlite_err)?;
    conn.busy_timeout(std::time::Duration::from_millis(u64::from(config.busy_timeout_ms)))
        .map_err(sqlite_err)?;
    Ok(())
}
