//! Schema migration tests.

use rusqlite::Connection;
use tempfile::TempDir;
use termsync_core::config::StorageConfig;
use termsync_storage::migrations::{current_version, run_migrations, LATEST_VERSION};
use termsync_storage::DatabaseManager;

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn fresh_database_reaches_latest_version() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(current_version(&conn).unwrap(), 0);
    assert_eq!(run_migrations(&conn).unwrap(), LATEST_VERSION);
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);

    assert_eq!(
        table_names(&conn),
        [
            "categories",
            "category_groups",
            "category_relations",
            "entities",
            "entity_relations",
            "relation_settings",
            "site_options",
        ]
    );
}

#[test]
fn rerunning_migrations_is_a_no_op() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn.execute("UPDATE relation_settings SET value = 0 WHERE key = 'unique_checks'", [])
        .unwrap();

    assert_eq!(run_migrations(&conn).unwrap(), LATEST_VERSION);
    let value: i64 = conn
        .query_row("SELECT value FROM relation_settings WHERE key = 'unique_checks'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(value, 0, "seed row must not be re-applied");
}

#[test]
fn unique_trigger_is_installed() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'trigger' AND name = 'trg_entity_relations_unique'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn reopening_file_keeps_version_and_pragmas() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("terms.db");
    drop(DatabaseManager::open(&path, &StorageConfig::default()).unwrap());

    let db = DatabaseManager::open(&path, &StorageConfig::default()).unwrap();
    db.with_reader(|conn| {
        assert_eq!(current_version(conn)?, LATEST_VERSION);
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .map_err(|e| termsync_core::errors::StorageError::sqlite(e.to_string()))?;
        assert_eq!(mode, "wal");
        Ok(())
    })
    .unwrap();
}
