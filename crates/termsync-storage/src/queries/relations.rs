//! entity_relations queries: bulk insert, append, usage counts.

use rusqlite::{params, params_from_iter, Connection};
use termsync_core::errors::StorageError;
use termsync_core::types::catalog::RelationRow;
use termsync_core::types::identifiers::{EntityId, RelationId};

use super::sqlite_err;

pub fn set_unique_checks(conn: &Connection, enabled: bool) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE relation_settings SET value = ?1 WHERE key = 'unique_checks'",
        params![i64::from(enabled)],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn unique_checks_enabled(conn: &Connection) -> Result<bool, StorageError> {
    let value: i64 = conn
        .query_row(
            "SELECT value FROM relation_settings WHERE key = 'unique_checks'",
            [],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(value == 1)
}

/// Multi-row INSERT, `chunk_rows` rows per statement.
pub fn insert_rows(conn: &Connection, rows: &[RelationRow], chunk_rows: usize) -> Result<usize, StorageError> {
    let mut inserted = 0;
    for chunk in rows.chunks(chunk_rows.max(1)) {
        let placeholders = vec!["(?, ?)"; chunk.len()].join(", ");
        let sql = format!("INSERT INTO entity_relations (entity_id, relation_id) VALUES {placeholders}");
        let values = chunk
            .iter()
            .flat_map(|r| [r.entity_id.get(), r.relation_id.get()]);
        inserted += conn.execute(&sql, params_from_iter(values)).map_err(sqlite_err)?;
    }
    Ok(inserted)
}

/// Insert one relation unless the entity already holds it.
pub fn insert_if_absent(conn: &Connection, entity_id: EntityId, relation_id: RelationId) -> Result<usize, StorageError> {
    conn.execute(
        "INSERT INTO entity_relations (entity_id, relation_id)
         SELECT ?1, ?2
         WHERE NOT EXISTS (
             SELECT 1 FROM entity_relations WHERE entity_id = ?1 AND relation_id = ?2)",
        params![entity_id.get(), relation_id.get()],
    )
    .map_err(sqlite_err)
}

pub fn update_usage_count(conn: &Connection, relation_id: RelationId, group: &str) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE category_relations
         SET usage_count = (SELECT COUNT(*) FROM entity_relations WHERE relation_id = ?1)
         WHERE relation_id = ?1 AND grp = ?2",
        params![relation_id.get(), group],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn count_group_relations(conn: &Connection, group: &str) -> Result<u64, StorageError> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM entity_relations er
             JOIN category_relations cr ON cr.relation_id = er.relation_id
             WHERE cr.grp = ?1",
            params![group],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(count as u64)
}

/// Sorted category names an entity holds in a group.
pub fn entity_category_names(conn: &Connection, entity_id: EntityId, group: &str) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT c.name FROM entity_relations er
             JOIN category_relations cr ON cr.relation_id = er.relation_id
             JOIN categories c ON c.id = cr.category_id
             WHERE er.entity_id = ?1 AND cr.grp = ?2
             ORDER BY c.name",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![entity_id.get(), group], |row| row.get::<_, String>(0))
        .map_err(sqlite_err)?;

    let mut names = Vec::new();
    for row in rows {
        names.push(row.map_err(sqlite_err)?);
    }
    Ok(names)
}

pub fn count_rows(conn: &Connection) -> Result<u64, StorageError> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entity_relations", [], |row| row.get(0))
        .map_err(sqlite_err)?;
    Ok(count as u64)
}
