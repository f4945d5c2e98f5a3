//! Bulk construction from a sorted key sequence: allocate every node in
//! parallel, draw its tower height, then wire each level's forward links.

use rayon::prelude::*;

use super::node::NodePtr;
use super::parallel;
use super::rng::{generate_height, generate_height_seeded};
use crate::config::Config;

/// The interior nodes of a freshly built layer structure, before sentinels
/// are attached.
pub(crate) struct Built {
    pub nodes: Vec<NodePtr>,
    pub height: usize,
}

/// Allocate one node per key, in parallel, each with an independently drawn
/// tower height.
pub(crate) fn build_nodes(keys: &[u32], config: &Config) -> Built {
    let nodes: Vec<NodePtr> = if let Some(seed) = config.seed {
        keys.par_iter()
            .enumerate()
            .map(|(i, &key)| NodePtr::alloc(key, generate_height_seeded(seed, i)))
            .collect()
    } else {
        keys.par_iter()
            .map(|&key| NodePtr::alloc(key, generate_height()))
            .collect()
    };
    let height = nodes
        .par_iter()
        .map(|n| n.height())
        .max()
        .unwrap_or(1);
    Built { nodes, height }
}

/// Link every level of `all` (assumed already the full tower-height-sorted
/// superset, sentinels included), from level 0 upward.
///
/// `layer_0` is the whole sequence; `layer_{l+1}` is the subsequence of
/// `layer_l` whose tower height exceeds `l`. Each level is linked with a
/// parallel-for over adjacent pairs before the next level's (smaller)
/// subsequence is filtered out of it.
pub(crate) fn wire_levels(all: &[NodePtr], height: usize) {
    let mut layer = all.to_vec();
    for level in 0..height {
        fill_links(&layer, level);
        if level + 1 < height {
            layer = filter_higher_than(&layer, level + 1);
        }
    }
}

/// Link adjacent nodes of `layer` at `level`, and record each node's
/// left-neighbor key for that level.
pub(crate) fn fill_links(layer: &[NodePtr], level: usize) {
    if layer.len() < 2 {
        return;
    }
    (0..layer.len() - 1).into_par_iter().for_each(|i| {
        layer[i].set_next(level, Some(layer[i + 1]));
        layer[i + 1].set_prev_key(level, layer[i].key());
    });
}

/// The subsequence of `layer` present at `level`, i.e. whose tower height
/// exceeds `level`.
pub(crate) fn filter_higher_than(layer: &[NodePtr], level: usize) -> Vec<NodePtr> {
    parallel::filter(layer, |n| n.height() > level)
}

/// Build a complete skip list (with sentinels) over a sorted, disjoint key
/// sequence, returning the left sentinel and the tower height.
pub(crate) fn build_with_sentinels(keys: &[u32], config: &Config) -> (NodePtr, NodePtr, usize) {
    let Built { nodes, height } = build_nodes(keys, config);
    let left = NodePtr::alloc(super::node::MIN_KEY, height);
    let right = NodePtr::alloc(super::node::MAX_KEY, height);

    let mut all = Vec::with_capacity(nodes.len() + 2);
    all.push(left);
    all.extend_from_slice(&nodes);
    all.push(right);

    wire_levels(&all, height);
    (left, right, height)
}
