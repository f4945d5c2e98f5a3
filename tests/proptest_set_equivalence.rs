// Property tests: ordering and set-equivalence should hold for any sorted,
// disjoint split of a key set, regardless of how it's built up.

use std::collections::BTreeSet;

use batch_skiplist::SkipList;
use proptest::prelude::*;

fn sorted_unique_keys() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(1u32..u32::MAX - 1, 1..500).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn level_zero_matches_input_after_bulk_build(keys in sorted_unique_keys()) {
        let sl = SkipList::from_ordered_keys(&keys).unwrap();
        prop_assert_eq!(sl.debug_get_nodes(0), keys.clone());
        prop_assert_eq!(sl.len(), keys.len());
    }

    #[test]
    fn level_zero_matches_union_after_one_merge(all in sorted_unique_keys(), split_at in 0usize..500) {
        if all.len() < 2 {
            return Ok(());
        }
        let split_at = split_at % all.len();
        let split_at = split_at.max(1);
        let (initial, batch) = all.split_at(split_at);
        if batch.is_empty() {
            return Ok(());
        }
        let mut sl = SkipList::from_ordered_keys(initial).unwrap();
        sl.insert_ordered(batch).unwrap();

        let expected: BTreeSet<u32> = all.iter().copied().collect();
        let actual: BTreeSet<u32> = sl.debug_get_nodes(0).into_iter().collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(sl.len(), all.len());
    }

    #[test]
    fn every_level_is_strictly_increasing(keys in sorted_unique_keys()) {
        let sl = SkipList::from_ordered_keys(&keys).unwrap();
        for level in 0..sl.height() {
            let nodes = sl.debug_get_nodes(level);
            for pair in nodes.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}
