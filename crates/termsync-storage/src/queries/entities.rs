//! entities table queries, including the paginated backfill scan.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use termsync_core::errors::StorageError;
use termsync_core::types::catalog::{EntityQuery, Exclusion};
use termsync_core::types::identifiers::EntityId;

use super::sqlite_err;

pub fn insert_entity(conn: &Connection, entity_type: &str, parent: Option<EntityId>) -> Result<EntityId, StorageError> {
    conn.execute(
        "INSERT INTO entities (entity_type, parent_id) VALUES (?1, ?2)",
        params![entity_type, parent.map(EntityId::get)],
    )
    .map_err(sqlite_err)?;
    Ok(EntityId(conn.last_insert_rowid()))
}

/// WHERE clause and bound values for a top-level entity query.
fn filter(query: &EntityQuery) -> (String, Vec<Value>) {
    let mut sql = String::from("e.entity_type = ?1 AND e.parent_id IS NULL");
    let mut values = vec![Value::Text(query.entity_type.clone())];
    match &query.exclusion {
        Exclusion::None => {}
        Exclusion::Group(group) => {
            sql.push_str(
                " AND NOT EXISTS (
                    SELECT 1 FROM entity_relations er
                    JOIN category_relations cr ON cr.relation_id = er.relation_id
                    WHERE er.entity_id = e.id AND cr.grp = ?2)",
            );
            values.push(Value::Text(group.clone()));
        }
        Exclusion::Relation(relation_id) => {
            sql.push_str(
                " AND NOT EXISTS (
                    SELECT 1 FROM entity_relations er
                    WHERE er.entity_id = e.id AND er.relation_id = ?2)",
            );
            values.push(Value::Integer(relation_id.get()));
        }
    }
    (sql, values)
}

pub fn count_entities(conn: &Connection, query: &EntityQuery) -> Result<u64, StorageError> {
    let (clause, values) = filter(query);
    let count: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM entities e WHERE {clause}"),
            params_from_iter(values),
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(count as u64)
}

/// One page of matching ids, ordered by id.
pub fn find_entities(
    conn: &Connection,
    query: &EntityQuery,
    offset: u64,
    limit: usize,
) -> Result<Vec<EntityId>, StorageError> {
    let (clause, mut values) = filter(query);
    let next = values.len() + 1;
    values.push(Value::Integer(limit as i64));
    values.push(Value::Integer(offset as i64));
    let sql = format!(
        "SELECT e.id FROM entities e WHERE {clause} ORDER BY e.id LIMIT ?{next} OFFSET ?{}",
        next + 1
    );

    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params_from_iter(values), |row| row.get::<_, i64>(0))
        .map_err(sqlite_err)?;

    let mut ids = Vec::new();
    for row in rows {
        ids.push(EntityId(row.map_err(sqlite_err)?));
    }
    Ok(ids)
}
