//! categories / category_relations table queries.

use rusqlite::{params, Connection, OptionalExtension};
use termsync_core::errors::StorageError;
use termsync_core::types::catalog::CategoryValue;
use termsync_core::types::identifiers::{CategoryId, RelationId};

use super::sqlite_err;

const SELECT_VALUE: &str = "SELECT c.id, r.relation_id, r.grp, c.name, c.slug, r.usage_count
     FROM categories c
     JOIN category_relations r ON r.category_id = c.id";

pub fn find_by_name(conn: &Connection, group: &str, name: &str) -> Result<Option<CategoryValue>, StorageError> {
    conn.query_row(
        &format!("{SELECT_VALUE} WHERE r.grp = ?1 AND c.name = ?2"),
        params![group, name],
        |row| {
            Ok(CategoryValue {
                id: CategoryId(row.get(0)?),
                relation_id: RelationId(row.get(1)?),
                group: row.get(2)?,
                name: row.get(3)?,
                slug: row.get(4)?,
                usage_count: row.get::<_, i64>(5)? as u64,
            })
        },
    )
    .optional()
    .map_err(sqlite_err)
}

/// Insert a category and its group row. The caller owns the transaction.
pub fn insert_category(conn: &Connection, group: &str, name: &str) -> Result<CategoryValue, StorageError> {
    let slug = slugify(name);
    conn.execute(
        "INSERT INTO categories (name, slug) VALUES (?1, ?2)",
        params![name, slug],
    )
    .map_err(sqlite_err)?;
    let id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO category_relations (category_id, grp) VALUES (?1, ?2)",
        params![id, group],
    )
    .map_err(sqlite_err)?;
    let relation_id = conn.last_insert_rowid();

    Ok(CategoryValue {
        id: CategoryId(id),
        relation_id: RelationId(relation_id),
        group: group.to_string(),
        name: name.to_string(),
        slug,
        usage_count: 0,
    })
}

/// Lowercase, non-alphanumerics collapsed to single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Not a Cool Cat"), "not-a-cool-cat");
        assert_eq!(slugify("I am a quot: \""), "i-am-a-quot");
        assert_eq!(slugify("  --water--  "), "water");
    }
}
