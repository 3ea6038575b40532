//! Property tests for the ordered containers
//!
//! These check the ordering and uniqueness guarantees against a plain `Vec`
//! model of the same operations.

use std::sync::Arc;

use ordkit::{OrderedMap, Record, UniqueCollection, Value};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum MapOp {
    Set(u8, i32),
    Delete(u8),
    Clear,
}

fn map_op() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (0u8..16, any::<i32>()).prop_map(|(k, v)| MapOp::Set(k, v)),
        3 => (0u8..16).prop_map(MapOp::Delete),
        1 => Just(MapOp::Clear),
    ]
}

/// Order-tracking reference: first-insertion order, in-place updates.
fn model_apply(model: &mut Vec<(u8, i32)>, op: &MapOp) {
    match *op {
        MapOp::Set(k, v) => match model.iter_mut().find(|(mk, _)| *mk == k) {
            Some(entry) => entry.1 = v,
            None => model.push((k, v)),
        },
        MapOp::Delete(k) => model.retain(|(mk, _)| *mk != k),
        MapOp::Clear => model.clear(),
    }
}

fn first_occurrences(items: &[u8]) -> Vec<u8> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(item) {
            seen.push(*item);
        }
    }
    seen
}

// ============================================================
// OrderedMap
// ============================================================

proptest! {
    #[test]
    fn map_size_counts_distinct_keys(pairs in prop::collection::vec((0u8..32, any::<i32>()), 0..64)) {
        let mut map = OrderedMap::new();
        for (k, v) in &pairs {
            map.set(*k, *v);
        }

        let distinct = first_occurrences(&pairs.iter().map(|(k, _)| *k).collect::<Vec<_>>());
        prop_assert_eq!(map.size(), distinct.len());
        prop_assert_eq!(map.keys().copied().collect::<Vec<_>>(), distinct);
    }

    #[test]
    fn map_matches_model(ops in prop::collection::vec(map_op(), 0..100)) {
        let mut map: OrderedMap<u8, i32> = OrderedMap::new();
        let mut model: Vec<(u8, i32)> = Vec::new();

        for op in &ops {
            match *op {
                MapOp::Set(k, v) => map.set(k, v),
                MapOp::Delete(k) => {
                    let existed = model.iter().any(|(mk, _)| *mk == k);
                    let before = map.size();
                    prop_assert_eq!(map.delete(&k), existed);
                    prop_assert!(!map.has(&k));
                    prop_assert_eq!(map.size(), if existed { before - 1 } else { before });
                }
                MapOp::Clear => map.clear(),
            }
            model_apply(&mut model, op);

            let entries: Vec<_> = map.entries().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(&entries, &model);
            for (k, v) in &model {
                prop_assert_eq!(map.get(k), Some(v));
            }
        }
    }

    #[test]
    fn map_reset_keeps_position(keys in prop::collection::vec(0u8..8, 1..20), pick in any::<prop::sample::Index>()) {
        let mut map: OrderedMap<u8, usize> = keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
        let order_before: Vec<_> = map.keys().copied().collect();

        let key = order_before[pick.index(order_before.len())];
        map.set(key, usize::MAX);

        prop_assert_eq!(map.keys().copied().collect::<Vec<_>>(), order_before);
        prop_assert_eq!(map.get(&key), Some(&usize::MAX));
    }

    #[test]
    fn map_clear_empties(pairs in prop::collection::vec((any::<u8>(), any::<u8>()), 0..32)) {
        let mut map: OrderedMap<u8, u8> = pairs.into_iter().collect();
        map.clear();

        prop_assert_eq!(map.size(), 0);
        prop_assert_eq!(map.entries().count(), 0);
    }
}

// ============================================================
// UniqueCollection
// ============================================================

proptest! {
    #[test]
    fn set_initializer_keeps_first_occurrences(items in prop::collection::vec(0u8..16, 0..64)) {
        let set: UniqueCollection<u8> = items.iter().copied().collect();
        let expected = first_occurrences(&items);

        prop_assert_eq!(set.size(), expected.len());
        prop_assert_eq!(set.to_vec(), expected);
    }

    #[test]
    fn set_add_is_idempotent(items in prop::collection::vec(0u8..16, 1..32)) {
        let mut set: UniqueCollection<u8> = items.iter().copied().collect();
        let before = set.to_vec();

        for item in &items {
            prop_assert!(!set.add(*item));
        }
        prop_assert_eq!(set.to_vec(), before);
    }
}

// ============================================================
// Record conversions
// ============================================================

proptest! {
    #[test]
    fn record_map_round_trip(fields in prop::collection::vec(("[a-z]{1,6}", any::<i64>()), 0..12)) {
        let record: Record = fields.iter().map(|(name, v)| (name.as_str(), *v)).collect();

        let map: OrderedMap<Arc<str>, Value> = record.to_map();
        prop_assert_eq!(map.size(), record.size());
        prop_assert_eq!(Record::from_map(&map), record.clone());
        prop_assert_eq!(Record::from(map), record);
    }
}
