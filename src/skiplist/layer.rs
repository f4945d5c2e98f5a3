//! Materialize the complete node sequence at a single level by walking
//! down from a higher level, in two passes: count descendants, then copy
//! into a contiguous buffer at the offsets the count pass computed.

use std::mem::MaybeUninit;

use super::node::{NodePtr, MAX_KEY, MIN_KEY};

/// Count, starting from `node` at `from_level`, how many nodes at
/// `target_level` fall in the zone this call owns, storing the result in
/// `node`'s `subtree_size[from_level]` scratch slot.
///
/// The zone owned by `(node, from_level)` runs from `node` itself up to
/// (but not including) the next node whose height reaches `from_level + 2`:
/// such a node is already owned by the parent call's own right-step one
/// level up, so stepping onto it here would double count it. Three
/// disjoint contributions make up the total:
///   - `node` itself, exactly when `from_level == target_level`;
///   - continuing right at `from_level`, while the next node's height
///     doesn't exceed `from_level + 1` (`go_right`);
///   - descending to `from_level - 1` on this same node, while
///     `from_level > target_level` (`go_down`).
/// `go_right` and `go_down` explore disjoint node ranges, so they fork with
/// `rayon::join` whenever both apply.
fn count_descendants(node: NodePtr, from_level: usize, target_level: usize) -> usize {
    debug_assert!(from_level >= target_level);
    let own = if from_level == target_level { 1 } else { 0 };

    let right = node.next(from_level);
    let go_right = matches!(right, Some(r) if r.height() <= from_level + 1);
    let go_down = from_level > target_level;

    let rest = match (go_right, go_down) {
        (true, true) => {
            let (r, d) = rayon::join(
                || count_descendants(right.unwrap(), from_level, target_level),
                || count_descendants(node, from_level - 1, target_level),
            );
            r + d
        }
        (true, false) => count_descendants(right.unwrap(), from_level, target_level),
        (false, true) => count_descendants(node, from_level - 1, target_level),
        (false, false) => 0,
    };

    let total = own + rest;
    node.set_subtree_size(from_level, total);
    total
}

/// Copy the `target_level` zone owned by `(node, from_level)` into
/// `out[offset..]`, using the `subtree_size` values `count_descendants`
/// computed to know how much space the down-branch owns before the
/// right-branch's own offset.
fn copy_descendants(
    node: NodePtr,
    from_level: usize,
    target_level: usize,
    offset: usize,
    out: &[MaybeUninit<NodePtr>],
) {
    debug_assert!(from_level >= target_level);

    let mut next_offset = offset;
    if from_level == target_level {
        unsafe {
            let slot = out.as_ptr().add(offset) as *mut MaybeUninit<NodePtr>;
            (*slot).write(node);
        }
        next_offset += 1;
    }

    let right = node.next(from_level);
    let go_right = matches!(right, Some(r) if r.height() <= from_level + 1);
    let go_down = from_level > target_level;
    let down_size = if go_down { node.subtree_size(from_level - 1) } else { 0 };

    match (go_right, go_down) {
        (true, true) => {
            rayon::join(
                || copy_descendants(node, from_level - 1, target_level, next_offset, out),
                || copy_descendants(right.unwrap(), from_level, target_level, next_offset + down_size, out),
            );
        }
        (true, false) => copy_descendants(right.unwrap(), from_level, target_level, next_offset, out),
        (false, true) => copy_descendants(node, from_level - 1, target_level, next_offset, out),
        (false, false) => {}
    }
}

/// Materialize the full node sequence at `target_level`, starting the walk
/// from `left` (the left sentinel) at `from_level`.
pub(crate) fn materialize(left: NodePtr, from_level: usize, target_level: usize) -> Vec<NodePtr> {
    let total = count_descendants(left, from_level, target_level);
    let mut out: Vec<MaybeUninit<NodePtr>> = Vec::with_capacity(total);
    out.resize_with(total, MaybeUninit::uninit);
    copy_descendants(left, from_level, target_level, 0, &out);
    // SAFETY: copy_descendants wrote every index in 0..total exactly once.
    unsafe {
        let mut out = std::mem::ManuallyDrop::new(out);
        Vec::from_raw_parts(out.as_mut_ptr().cast::<NodePtr>(), total, out.capacity())
    }
}
