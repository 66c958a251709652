//! Property-based tests for normalisation and backfill.

use std::collections::HashMap;
use std::sync::Arc;

use proptest::prelude::*;

use termsync_core::traits::storage::test_helpers::InMemoryCatalog;
use termsync_core::types::catalog::CategoryGroup;
use termsync_core::types::defaults::RawDefaults;
use termsync_core::SyncConfig;
use termsync_engine::{normalize, Collaborators, DefaultTermsEngine, DefaultTermsHandler, RegistrationOutcome};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_value() -> impl Strategy<Value = String> {
    "[a-z]{1,6}( [a-z]{1,4})?"
}

fn arb_entity_types() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{3,8}", 1..5)
}

fn arb_raw() -> impl Strategy<Value = RawDefaults> {
    prop_oneof![
        prop::collection::vec(arb_value(), 0..8).prop_map(RawDefaults::Flat),
        prop::collection::hash_map("[a-z]{3,8}", prop::collection::vec(arb_value(), 0..6), 0..4)
            .prop_map(RawDefaults::PerType),
    ]
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(raw in arb_raw(), types in arb_entity_types()) {
        let once = normalize(&raw, &types);
        let twice = normalize(&RawDefaults::from(once.clone()), &types);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_flat_broadcasts_identically(values in prop::collection::vec(arb_value(), 0..8), types in arb_entity_types()) {
        let canonical = normalize(&RawDefaults::Flat(values.clone()), &types);

        let mut expected_types = types.clone();
        expected_types.sort();
        expected_types.dedup();
        let keys: Vec<String> = canonical.keys().cloned().collect();
        prop_assert_eq!(keys, expected_types);

        let mut expected_values = values;
        expected_values.sort();
        expected_values.dedup();
        for list in canonical.values() {
            prop_assert_eq!(list, &expected_values);
        }
    }

    #[test]
    fn prop_permutations_normalize_equal(
        entries in prop::collection::hash_map("[a-z]{3,8}", prop::collection::vec(arb_value(), 0..6), 0..4),
        types in arb_entity_types(),
    ) {
        let reversed: HashMap<String, Vec<String>> = entries
            .iter()
            .map(|(k, v)| (k.clone(), v.iter().rev().cloned().collect()))
            .collect();
        prop_assert_eq!(
            normalize(&RawDefaults::PerType(entries), &types),
            normalize(&RawDefaults::PerType(reversed), &types)
        );
    }

    #[test]
    fn prop_canonical_lists_are_sorted_and_unique(raw in arb_raw(), types in arb_entity_types()) {
        for list in normalize(&raw, &types).values() {
            prop_assert!(list.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

// ---------------------------------------------------------------------------
// Backfill
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_backfill_touches_only_unassigned_and_converges(
        defaults in prop::collection::vec("[a-z]{1,6}", 1..4),
        tagged in prop::collection::vec(any::<bool>(), 0..20),
        batch_size in 1usize..8,
    ) {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.register_group(
            CategoryGroup::new("tags", ["post"]).with_defaults(RawDefaults::flat(defaults.iter().cloned())),
        );
        let entities: Vec<_> = tagged
            .iter()
            .map(|&explicit| {
                let id = catalog.insert_entity("post", None);
                if explicit {
                    catalog.relate(id, "tags", "EXPLICIT").unwrap();
                }
                (id, explicit)
            })
            .collect();

        let config = SyncConfig { batch_size, ..SyncConfig::default() };
        let mut engine = DefaultTermsEngine::new(Collaborators::from_backend(catalog.clone()), config).unwrap();
        engine.on_group_registered("tags").unwrap();
        let report = engine.on_upgrade_run().unwrap();

        let mut expected_defaults = defaults.clone();
        expected_defaults.sort();
        expected_defaults.dedup();
        let bare = entities.iter().filter(|(_, explicit)| !explicit).count();
        prop_assert_eq!(report.entities_assigned, if expected_defaults.is_empty() { 0 } else { bare });

        for (id, explicit) in &entities {
            let names = catalog.entity_category_names(*id, "tags");
            if *explicit {
                prop_assert_eq!(names, vec!["EXPLICIT".to_string()]);
            } else {
                prop_assert_eq!(names, expected_defaults.clone());
            }
        }

        let rows = catalog.relation_row_count();
        let writes = catalog.snapshot_writes();
        prop_assert_eq!(engine.on_group_registered("tags").unwrap(), RegistrationOutcome::InSync);
        let second = engine.on_upgrade_run().unwrap();
        prop_assert!(second.is_noop());
        prop_assert_eq!(catalog.relation_row_count(), rows);
        prop_assert_eq!(catalog.snapshot_writes(), writes);
    }
}
