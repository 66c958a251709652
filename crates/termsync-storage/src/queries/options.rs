//! site_options table queries (versioned JSON records).

use rusqlite::{params, Connection, OptionalExtension};
use termsync_core::errors::StorageError;

use super::sqlite_err;

pub fn get_option(conn: &Connection, name: &str) -> Result<Option<String>, StorageError> {
    conn.query_row(
        "SELECT value FROM site_options WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )
    .optional()
    .map_err(sqlite_err)
}

/// Upsert a record, bumping its version. Returns the new version.
pub fn put_option(conn: &Connection, name: &str, value: &str) -> Result<u64, StorageError> {
    let version: i64 = conn
        .query_row(
            "INSERT INTO site_options (name, value, version) VALUES (?1, ?2, 1)
             ON CONFLICT(name) DO UPDATE SET
                 value = excluded.value,
                 version = site_options.version + 1,
                 updated_at = datetime('now')
             RETURNING version",
            params![name, value],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(version as u64)
}

pub fn option_version(conn: &Connection, name: &str) -> Result<Option<u64>, StorageError> {
    conn.query_row(
        "SELECT version FROM site_options WHERE name = ?1",
        params![name],
        |row| row.get::<_, i64>(0),
    )
    .optional()
    .map(|v| v.map(|v| v as u64))
    .map_err(sqlite_err)
}
