//! Fold a sorted, disjoint batch of keys into an existing structure.
//!
//! Build an auxiliary structure over the batch; coerce both towers to a
//! common height; materialize the existing structure's full level-0 node
//! sequence once; then, level by level from the top down, merge the
//! existing and new subsequences at that level by key and re-link. The
//! same parallel-merge-and-relink step is used for every level, including
//! below the critical level, since the critical level only needs to gate
//! which materialization feeds a level (the cheap critical-level slice
//! above it, the one expensive full level-0 materialization at or below
//! it), not which levels a node participates in: every node, old or new,
//! appears at exactly its own drawn height's levels `0..height`.

use super::build::{self, Built};
use super::layer;
use super::node::NodePtr;
use super::parallel;
use crate::config::Config;

/// Grow both sentinels of a structure to `new_height`, leaving existing
/// interior links untouched. Sequential: this must complete before any
/// parallel phase below starts.
fn coerce_height_at_least(left: NodePtr, right: NodePtr, new_height: usize) {
    let old_height = left.height();
    if new_height <= old_height {
        return;
    }
    right.coerce_height(new_height, None);
    left.coerce_height(new_height, Some(right));
}

/// Merge `keys` (sorted, disjoint from the target's existing keys) into the
/// structure rooted at `left`/`right`, returning the new tower height.
pub(crate) fn merge_batch(
    left: NodePtr,
    right: NodePtr,
    target_height: usize,
    keys: &[u32],
    config: &Config,
) -> usize {
    log::debug!(
        "merge_batch: target_height={target_height} batch_len={}",
        keys.len()
    );

    // Phase 1: build an auxiliary skip list over the batch alone.
    let Built {
        nodes: batch_nodes,
        height: batch_height,
    } = build::build_nodes(keys, config);
    let batch_left = NodePtr::alloc(super::node::MIN_KEY, batch_height);
    let batch_right = NodePtr::alloc(super::node::MAX_KEY, batch_height);
    let mut batch_all = Vec::with_capacity(batch_nodes.len() + 2);
    batch_all.push(batch_left);
    batch_all.extend_from_slice(&batch_nodes);
    batch_all.push(batch_right);
    build::wire_levels(&batch_all, batch_height);

    // Phase 2: height coercion so both towers reach the same height.
    let new_height = target_height.max(batch_height);
    coerce_height_at_least(left, right, new_height);
    coerce_height_at_least(batch_left, batch_right, new_height);

    // Phase 3: critical level and its materialized layer. Both
    // materializations below must happen before any level is re-linked.
    // Re-linking upper levels first would make the level-0 walk observe
    // nodes the next phase already spliced in.
    let critical_level = new_height.saturating_sub(batch_height);
    log::debug!("merge_batch: new_height={new_height} critical_level={critical_level}");
    let crit_layer = layer::materialize(left, new_height - 1, critical_level);
    let old_layer_0 = layer::materialize(left, new_height - 1, 0);

    // Phase 4: merge every level, top down. Above the critical level, filter
    // from the small critical-level slice; at or below it, the existing
    // layer is no longer small, so filter from the level-0 materialization
    // instead.
    merge_levels_from(&crit_layer, &batch_all, critical_level + 1, new_height);
    merge_levels_from(&old_layer_0, &batch_all, 0, critical_level + 1);

    new_height
}

/// Merge and re-link every level in `start_level..end_level` (descending),
/// deriving each level's subsequence from `old_base`/`new_base` by height
/// filter.
fn merge_levels_from(old_base: &[NodePtr], new_base: &[NodePtr], start_level: usize, end_level: usize) {
    if start_level >= end_level {
        return;
    }
    for level in (start_level..end_level).rev() {
        let old_layer = build::filter_higher_than(old_base, level);
        let new_layer = build::filter_higher_than(new_base, level);
        log::trace!(
            "merge_levels_from: level={level} old={} new={}",
            old_layer.len(),
            new_layer.len()
        );
        if new_layer.len() <= 2 {
            // Only the batch's own sentinels reach this level: nothing new
            // to splice in, the existing layer is already correctly linked.
            continue;
        }
        let merged = parallel::merge_by_key(&old_layer, &new_layer, |n| n.key());
        build::fill_links(&merged, level);
    }
}
