//! v001: groups, categories, entities, relations, and site options.

pub const MIGRATION_SQL: &str = r#"
-- Registered category groups. entity_types is a JSON array;
-- declared_defaults is the raw JSON declaration, if any.
CREATE TABLE IF NOT EXISTS category_groups (
    name TEXT PRIMARY KEY,
    position INTEGER NOT NULL,
    entity_types TEXT NOT NULL,
    declared_defaults TEXT
) STRICT;

-- Name-level category rows.
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    slug TEXT NOT NULL
) STRICT;

-- A category within a group. Entity relations point here.
CREATE TABLE IF NOT EXISTS category_relations (
    relation_id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    grp TEXT NOT NULL,
    usage_count INTEGER NOT NULL DEFAULT 0
) STRICT;

CREATE UNIQUE INDEX IF NOT EXISTS idx_category_relations_category
    ON category_relations(category_id, grp);
CREATE INDEX IF NOT EXISTS idx_category_relations_grp ON category_relations(grp);

CREATE TABLE IF NOT EXISTS entities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    entity_type TEXT NOT NULL,
    parent_id INTEGER REFERENCES entities(id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_entities_type_parent ON entities(entity_type, parent_id);

-- No UNIQUE constraint: uniqueness is enforced by the trigger below so
-- bulk writers can suspend it for one transaction.
CREATE TABLE IF NOT EXISTS entity_relations (
    entity_id INTEGER NOT NULL,
    relation_id INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_entity_relations_pair ON entity_relations(entity_id, relation_id);
CREATE INDEX IF NOT EXISTS idx_entity_relations_relation ON entity_relations(relation_id);

CREATE TABLE IF NOT EXISTS relation_settings (
    key TEXT PRIMARY KEY,
    value INTEGER NOT NULL
) STRICT;

INSERT OR IGNORE INTO relation_settings (key, value) VALUES ('unique_checks', 1);

CREATE TRIGGER IF NOT EXISTS trg_entity_relations_unique
BEFORE INSERT ON entity_relations
WHEN (SELECT value FROM relation_settings WHERE key = 'unique_checks') = 1
 AND EXISTS (
    SELECT 1 FROM entity_relations
    WHERE entity_id = NEW.entity_id AND relation_id = NEW.relation_id
 )
BEGIN
    SELECT RAISE(ABORT, 'duplicate entity relation');
END;

-- Versioned JSON settings records.
CREATE TABLE IF NOT EXISTS site_options (
    name TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
) STRICT;
"#;
