//! category_groups table queries.

use rusqlite::{params, Connection, OptionalExtension, Row};
use termsync_core::errors::StorageError;
use termsync_core::types::catalog::CategoryGroup;
use termsync_core::types::defaults::RawDefaults;

use super::sqlite_err;

/// Insert or replace a group, keeping its original registration position.
pub fn upsert_group(conn: &Connection, group: &CategoryGroup) -> Result<(), StorageError> {
    let entity_types = serde_json::to_string(&group.entity_types)?;
    let declared = group
        .declared_defaults
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    conn.execute(
        "INSERT INTO category_groups (name, position, entity_types, declared_defaults)
         VALUES (?1, (SELECT COALESCE(MAX(position), 0) + 1 FROM category_groups), ?2, ?3)
         ON CONFLICT(name) DO UPDATE SET
             entity_types = excluded.entity_types,
             declared_defaults = excluded.declared_defaults",
        params![group.name, entity_types, declared],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn get_group(conn: &Connection, name: &str) -> Result<Option<CategoryGroup>, StorageError> {
    let raw = conn
        .query_row(
            "SELECT name, entity_types, declared_defaults FROM category_groups WHERE name = ?1",
            params![name],
            raw_group,
        )
        .optional()
        .map_err(sqlite_err)?;
    raw.map(decode_group).transpose()
}

/// All groups in registration order.
pub fn list_groups(conn: &Connection) -> Result<Vec<CategoryGroup>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT name, entity_types, declared_defaults FROM category_groups ORDER BY position",
        )
        .map_err(sqlite_err)?;
    let rows = stmt.query_map([], raw_group).map_err(sqlite_err)?;

    let mut groups = Vec::new();
    for row in rows {
        groups.push(decode_group(row.map_err(sqlite_err)?)?);
    }
    Ok(groups)
}

type RawGroup = (String, String, Option<String>);

fn raw_group(row: &Row<'_>) -> rusqlite::Result<RawGroup> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn decode_group((name, entity_types, declared): RawGroup) -> Result<CategoryGroup, StorageError> {
    let declared_defaults = declared
        .map(|json| serde_json::from_str::<RawDefaults>(&json))
        .transpose()?;
    Ok(CategoryGroup {
        name,
        entity_types: serde_json::from_str(&entity_types)?,
        declared_defaults,
    })
}
