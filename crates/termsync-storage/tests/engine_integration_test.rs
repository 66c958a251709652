//! `TermsStorageEngine` integration tests against file-backed databases.
//!
//! Covers every collaborator trait plus the relation uniqueness trigger
//! and its suspension inside a bulk insert transaction.

use tempfile::TempDir;
use termsync_core::config::StorageConfig;
use termsync_core::errors::StorageError;
use termsync_core::traits::storage::{ICategoryRegistry, IEntityStore, IRelationStore, ISnapshotStore};
use termsync_core::types::catalog::{CategoryGroup, EntityQuery, Exclusion, RelationRow};
use termsync_core::types::defaults::{DefaultsMap, DefaultsSnapshot, RawDefaults};
use termsync_core::types::identifiers::EntityId;
use termsync_core::TermsErrorCode;
use termsync_storage::TermsStorageEngine;

fn temp_engine() -> (TempDir, TermsStorageEngine) {
    temp_engine_with(StorageConfig::default())
}

fn temp_engine_with(config: StorageConfig) -> (TempDir, TermsStorageEngine) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("terms.db");
    let engine = TermsStorageEngine::open(&db_path, config).unwrap();
    (dir, engine)
}

fn rows(entities: &[EntityId], relation_id: termsync_core::RelationId) -> Vec<RelationRow> {
    entities
        .iter()
        .map(|&entity_id| RelationRow { entity_id, relation_id })
        .collect()
}

#[test]
fn groups_round_trip_with_declared_defaults() {
    let (_dir, engine) = temp_engine();
    let tags = CategoryGroup::new("tags", ["post", "page"]).with_defaults(RawDefaults::flat(["water"]));
    let category = CategoryGroup::new("category", ["post"])
        .with_defaults(RawDefaults::per_type([("post", ["Uncategorized"])]));
    engine.register_group(&tags).unwrap();
    engine.register_group(&category).unwrap();

    assert_eq!(engine.group("tags").unwrap(), Some(tags.clone()));
    assert_eq!(engine.group("category").unwrap(), Some(category));
    assert_eq!(engine.group("missing").unwrap(), None);
    assert_eq!(engine.group_names().unwrap(), ["tags", "category"]);

    // Re-registering keeps the original position.
    engine.register_group(&CategoryGroup::new("tags", ["post"])).unwrap();
    assert_eq!(engine.group_names().unwrap(), ["tags", "category"]);
    assert_eq!(engine.group("tags").unwrap().unwrap().declared_defaults, None);

    let for_post: Vec<String> = engine
        .groups_for_entity_type("post")
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(for_post, ["tags", "category"]);
    assert!(engine.groups_for_entity_type("page").unwrap().is_empty());
}

#[test]
fn category_creation_rules() {
    let (_dir, engine) = temp_engine();
    engine.register_group(&CategoryGroup::new("tags", ["post"])).unwrap();
    engine.register_group(&CategoryGroup::new("category", ["post"])).unwrap();

    let value = engine.create_category("tags", "Not A Cool Cat").unwrap();
    assert_eq!(value.slug, "not-a-cool-cat");
    assert_eq!(value.usage_count, 0);
    assert_eq!(engine.category_exists("Not A Cool Cat", "tags").unwrap(), Some(value.id));
    assert_eq!(engine.find_category_by_name("tags", "Not A Cool Cat").unwrap(), Some(value.clone()));

    // Same name in another group is a separate relation.
    let other = engine.create_category("category", "Not A Cool Cat").unwrap();
    assert_ne!(other.relation_id, value.relation_id);
    assert!(engine.category_exists("Not A Cool Cat", "missing").unwrap().is_none());

    let err = engine.create_category("tags", "Not A Cool Cat").unwrap_err();
    assert_eq!(err.error_code(), "DUPLICATE_CATEGORY");
    let err = engine.create_category("tags", "   ").unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CATEGORY_NAME");
    let err = engine.create_category("missing", "water").unwrap_err();
    assert!(matches!(err, StorageError::GroupNotFound(ref g) if g == "missing"));
}

#[test]
fn entity_scan_respects_parent_and_exclusion() {
    let (_dir, engine) = temp_engine();
    engine.register_group(&CategoryGroup::new("tags", ["post"])).unwrap();
    let water = engine.create_category("tags", "water").unwrap();
    let juice = engine.create_category("tags", "juice").unwrap();

    let posts: Vec<EntityId> = (0..7).map(|_| engine.insert_entity("post", None).unwrap()).collect();
    engine.insert_entity("post", Some(posts[0])).unwrap();
    engine.insert_entity("page", None).unwrap();
    engine.append_entity_relations(posts[1], &[juice.relation_id]).unwrap();
    engine.append_entity_relations(posts[2], &[water.relation_id]).unwrap();

    let all = EntityQuery::new("post", Exclusion::None);
    assert_eq!(engine.count_entities(&all).unwrap(), 7);

    let by_group = EntityQuery::new("post", Exclusion::Group("tags".into()));
    assert_eq!(engine.count_entities(&by_group).unwrap(), 5);

    let by_relation = EntityQuery::new("post", Exclusion::Relation(water.relation_id));
    assert_eq!(engine.count_entities(&by_relation).unwrap(), 6);

    let first = engine.find_entities(&by_group, 0, 3).unwrap();
    let second = engine.find_entities(&by_group, 3, 3).unwrap();
    assert_eq!(first, [posts[0], posts[3], posts[4]]);
    assert_eq!(second, [posts[5], posts[6]]);
    assert!(engine.find_entities(&by_group, 6, 3).unwrap().is_empty());

    assert_eq!(engine.count_relations("tags").unwrap(), 2);
    assert_eq!(engine.count_relations("category").unwrap(), 0);
}

#[test]
fn unique_trigger_rejects_duplicates_when_enabled() {
    let (_dir, engine) = temp_engine();
    engine.register_group(&CategoryGroup::new("tags", ["post"])).unwrap();
    let water = engine.create_category("tags", "water").unwrap();
    let post = engine.insert_entity("post", None).unwrap();

    engine.insert_relations(&rows(&[post], water.relation_id), true).unwrap();
    let err = engine
        .insert_relations(&rows(&[post], water.relation_id), true)
        .unwrap_err();
    assert!(err.to_string().contains("duplicate entity relation"), "got: {err}");
    assert_eq!(engine.relation_row_count().unwrap(), 1);
    assert!(engine.unique_checks_enabled().unwrap());
}

#[test]
fn relaxed_insert_restores_checks_after_commit() {
    let (_dir, engine) = temp_engine_with(StorageConfig {
        insert_chunk_rows: 2,
        ..StorageConfig::default()
    });
    engine.register_group(&CategoryGroup::new("tags", ["post"])).unwrap();
    let water = engine.create_category("tags", "water").unwrap();
    let posts: Vec<EntityId> = (0..5).map(|_| engine.insert_entity("post", None).unwrap()).collect();

    let inserted = engine.insert_relations(&rows(&posts, water.relation_id), false).unwrap();
    assert_eq!(inserted, 5);
    assert!(engine.unique_checks_enabled().unwrap());

    engine.recompute_usage_counts(&[water.relation_id], "tags").unwrap();
    let water = engine.find_category_by_name("tags", "water").unwrap().unwrap();
    assert_eq!(water.usage_count, 5);
}

#[test]
fn failed_bulk_insert_rolls_back_everything() {
    let (_dir, engine) = temp_engine_with(StorageConfig {
        insert_chunk_rows: 1,
        ..StorageConfig::default()
    });
    engine.register_group(&CategoryGroup::new("tags", ["post"])).unwrap();
    let water = engine.create_category("tags", "water").unwrap();
    let post = engine.insert_entity("post", None).unwrap();
    engine.insert_relations(&rows(&[post], water.relation_id), true).unwrap();

    let bad = vec![
        RelationRow {
            entity_id: post,
            relation_id: water.relation_id,
        };
        2
    ];
    // Abort the second single-row chunk of the next bulk insert.
    engine
        .with_writer(|conn| {
            conn.execute_batch(
                "CREATE TRIGGER fail_second BEFORE INSERT ON entity_relations
                 WHEN (SELECT COUNT(*) FROM entity_relations) >= 2
                 BEGIN SELECT RAISE(ABORT, 'injected'); END;",
            )
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })
        })
        .unwrap();

    assert!(engine.insert_relations(&bad, false).is_err());
    assert_eq!(engine.relation_row_count().unwrap(), 1);
    assert!(engine.unique_checks_enabled().unwrap());
}

#[test]
fn append_skips_held_relations() {
    let (_dir, engine) = temp_engine();
    engine.register_group(&CategoryGroup::new("tags", ["post"])).unwrap();
    let water = engine.create_category("tags", "water").unwrap();
    let air = engine.create_category("tags", "air").unwrap();
    let post = engine.insert_entity("post", None).unwrap();

    assert_eq!(engine.append_entity_relations(post, &[water.relation_id]).unwrap(), 1);
    assert_eq!(
        engine
            .append_entity_relations(post, &[water.relation_id, air.relation_id])
            .unwrap(),
        1
    );
    assert_eq!(engine.entity_category_names(post, "tags").unwrap(), ["air", "water"]);
}

#[test]
fn snapshot_versions_increase_per_write() {
    let (_dir, engine) = temp_engine();
    assert_eq!(engine.load_snapshot("default_terms").unwrap(), None);
    assert_eq!(engine.snapshot_version("default_terms").unwrap(), None);

    let mut snapshot = DefaultsSnapshot::new();
    snapshot.insert(
        "tags".to_string(),
        DefaultsMap::from([("post".to_string(), vec!["chair".to_string()])]),
    );
    assert_eq!(engine.save_snapshot("default_terms", &snapshot).unwrap(), 1);
    snapshot.insert("category".to_string(), DefaultsMap::new());
    assert_eq!(engine.save_snapshot("default_terms", &snapshot).unwrap(), 2);

    assert_eq!(engine.load_snapshot("default_terms").unwrap(), Some(snapshot));
    assert_eq!(engine.snapshot_version("default_terms").unwrap(), Some(2));
}

#[test]
fn data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("terms.db");
    {
        let engine = TermsStorageEngine::open(&db_path, StorageConfig::default()).unwrap();
        engine.register_group(&CategoryGroup::new("tags", ["post"])).unwrap();
        engine.create_category("tags", "water").unwrap();
    }
    let engine = TermsStorageEngine::open(&db_path, StorageConfig::default()).unwrap();
    assert_eq!(engine.path(), Some(db_path.as_path()));
    assert!(engine.category_exists("water", "tags").unwrap().is_some());
}
