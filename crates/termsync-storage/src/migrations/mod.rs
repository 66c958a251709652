//! Schema migrations tracked with `PRAGMA user_version`.

mod v001_initial;

use rusqlite::Connection;
use termsync_core::errors::StorageError;
use tracing::info;

const MIGRATIONS: &[(u32, &str)] = &[(1, v001_initial::MIGRATION_SQL)];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 1;

pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: format!("read user_version: {e}"),
        })
}

/// Apply every migration newer than the stored version, one transaction each.
pub fn run_migrations(conn: &Connection) -> Result<u32, StorageError> {
    let start = current_version(conn)?;
    let mut version = start;
    for (target, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > start) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| migration_failed(*target, e))?;
        tx.execute_batch(sql).map_err(|e| migration_failed(*target, e))?;
        tx.pragma_update(None, "user_version", *target)
            .map_err(|e| migration_failed(*target, e))?;
        tx.commit().map_err(|e| migration_failed(*target, e))?;
        info!(from = version, to = target, "Applied schema migration");
        version = *target;
    }
    Ok(version)
}

fn migration_failed(version: u32, e: rusqlite::Error) -> StorageError {
    StorageError::MigrationFailed {
        version,
        message: e.to_string(),
    }
}
