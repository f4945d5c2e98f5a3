// Bulk construction from a sorted key sequence.

use batch_skiplist::{Config, SkipList, SkipListError};

fn init_logger() {
    let _ = env_logger::try_init();
}

#[test]
fn build_from_single_key() {
    init_logger();
    let sl = SkipList::from_ordered_keys(&[42]).unwrap();
    assert_eq!(sl.len(), 1);
    assert!(!sl.is_empty());
    assert_eq!(sl.debug_get_nodes(0), vec![42]);
}

#[test]
fn build_preserves_order_at_level_zero() {
    let keys: Vec<u32> = (0..2000).map(|i| i * 3).collect();
    let sl = SkipList::from_ordered_keys(&keys).unwrap();
    assert_eq!(sl.len(), keys.len());
    assert_eq!(sl.debug_get_nodes(0), keys);
}

fn is_subsequence(needle: &[u32], haystack: &[u32]) -> bool {
    let mut i = 0;
    for &h in haystack {
        if i < needle.len() && needle[i] == h {
            i += 1;
        }
    }
    i == needle.len()
}

#[test]
fn higher_levels_are_subsequences_of_level_zero() {
    let keys: Vec<u32> = (0..5000).collect();
    let sl = SkipList::from_ordered_keys(&keys).unwrap();
    let level0 = sl.debug_get_nodes(0);
    assert_eq!(level0, keys);
    for level in 1..sl.height() {
        let higher = sl.debug_get_nodes(level);
        assert!(
            is_subsequence(&higher, &level0),
            "level {level} is not an ordered subsequence of level 0"
        );
    }
}

#[test]
fn height_is_at_least_one() {
    let sl = SkipList::from_ordered_keys(&[1, 2, 3]).unwrap();
    assert!(sl.height() >= 1);
}

#[test]
fn empty_input_is_rejected() {
    let err = SkipList::from_ordered_keys(&[]).unwrap_err();
    assert_eq!(err, SkipListError::EmptyInput);
}

#[test]
fn unsorted_input_is_rejected() {
    let err = SkipList::from_ordered_keys(&[1, 3, 2]).unwrap_err();
    assert_eq!(err, SkipListError::NotSorted { index: 2 });
}

#[test]
fn duplicate_input_is_rejected_as_not_strictly_increasing() {
    let err = SkipList::from_ordered_keys(&[1, 1, 2]).unwrap_err();
    assert_eq!(err, SkipListError::NotSorted { index: 1 });
}

#[test]
fn sentinel_keys_are_rejected() {
    let err = SkipList::from_ordered_keys(&[0, 5]).unwrap_err();
    assert_eq!(err, SkipListError::KeyOutOfRange { key: 0 });

    let err = SkipList::from_ordered_keys(&[5, u32::MAX]).unwrap_err();
    assert_eq!(err, SkipListError::KeyOutOfRange { key: u32::MAX });
}

#[test]
fn fixed_seed_is_deterministic_across_builds() {
    let keys: Vec<u32> = (0..3000).collect();
    let a = SkipList::from_ordered_keys_with_config(&keys, Config::with_seed(7)).unwrap();
    let b = SkipList::from_ordered_keys_with_config(&keys, Config::with_seed(7)).unwrap();
    assert_eq!(a.height(), b.height());
    for level in 0..a.height() {
        assert_eq!(a.debug_get_nodes(level), b.debug_get_nodes(level));
    }
}

#[test]
fn different_seeds_can_produce_different_heights() {
    let keys: Vec<u32> = (0..2000).collect();
    let heights: std::collections::HashSet<usize> = (0..20)
        .map(|seed| {
            SkipList::from_ordered_keys_with_config(&keys, Config::with_seed(seed))
                .unwrap()
                .height()
        })
        .collect();
    assert!(heights.len() > 1, "expected some variation in height across seeds");
}
