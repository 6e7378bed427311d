use std::collections::{BTreeMap, HashMap};

use btree_index::map::OrderedTreeMap;
use proptest::prelude::*;

/// The number of operations to run in each test case.
const TEST_SIZE: usize = 2_000;

// ─── Strategies ──────────────────────────────────────────────────────────────

fn key_strategy() -> impl Strategy<Value = i64> {
    // Deliberately small key space so that inserts collide and nodes split.
    -500i64..500i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Get(i64),
    Contains(i64),
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Get),
        2 => key_strategy().prop_map(MapOp::Contains),
    ]
}

// ─── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Runs a random mix of operations against [OrderedTreeMap] and
    /// [BTreeMap] and checks that every observable result matches.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut map = OrderedTreeMap::<i64, i64, 3>::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v), "insert({}, {})", k, v);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(map.get(&k), model.get(&k), "get({})", k);
                }
                MapOp::Contains(k) => {
                    prop_assert_eq!(map.contains_key(&k), model.contains_key(&k), "contains_key({})", k);
                }
            }
            prop_assert_eq!(map.len(), model.len());
            prop_assert_eq!(map.is_empty(), model.is_empty());
        }

        prop_assert_eq!(map.first_key_value(), model.first_key_value());
        prop_assert_eq!(map.last_key_value(), model.last_key_value());
        prop_assert!(map.iter().eq(model.iter()));
    }

    /// Iteration must visit every live entry exactly once, in ascending key
    /// order, with the last written value per key.
    #[test]
    fn iteration_is_sorted_and_complete(pairs in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let mut map = OrderedTreeMap::<i64, i64, 2>::new();
        for &(k, v) in &pairs {
            map.insert(k, v);
        }

        let mut last_write = HashMap::new();
        for &(k, v) in &pairs {
            last_write.insert(k, v);
        }
        let mut expected: Vec<(i64, i64)> = last_write.into_iter().collect();
        expected.sort_unstable_by_key(|e| e.0);

        let collected: Vec<(i64, i64)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(collected, expected);
        prop_assert_eq!(map.len(), map.iter().count());
    }

    /// A map ordered by a reversed comparison function is the mirror image
    /// of the naturally ordered map over the same entries.
    #[test]
    fn descending_comparator_mirrors_ascending(pairs in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let mut map = OrderedTreeMap::<i64, i64, 4, _>::with_comparator(|a: &i64, b: &i64| b.cmp(a));
        let mut model = BTreeMap::new();
        for &(k, v) in &pairs {
            prop_assert_eq!(map.insert(k, v), model.insert(k, v));
        }

        let descending: Vec<(i64, i64)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let ascending_rev: Vec<(i64, i64)> = model.iter().rev().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(descending, ascending_rev);
        prop_assert_eq!(map.first_key_value(), model.last_key_value());
        prop_assert_eq!(map.last_key_value(), model.first_key_value());
    }

    /// A full cursor walk yields the same sequence as the borrowing
    /// iterator, and a later insert of a fresh key makes the cursor stale.
    #[test]
    fn cursor_walk_matches_iter(pairs in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE), extra in key_strategy()) {
        let mut map = OrderedTreeMap::<i64, i64, 2>::new();
        for &(k, v) in &pairs {
            map.insert(k, v);
        }

        let mut cursor = map.cursor();
        let mut walked = Vec::new();
        while let Some((k, v)) = cursor.next(&map).unwrap() {
            walked.push((*k, *v));
        }
        let direct: Vec<(i64, i64)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(walked, direct);

        let is_new = !map.contains_key(&extra);
        map.insert(extra, 0);
        if is_new {
            prop_assert!(cursor.next(&map).is_err());
        }
    }
}
