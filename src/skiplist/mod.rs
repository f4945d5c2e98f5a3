//! A batch-parallel ordered set of `u32` keys.
//!
//! Construction and insertion both take a whole sorted batch at once and
//! fold it into the structure with fork/join parallelism; there is no
//! single-key insert, no lookup, and no delete (see the crate root docs).

mod build;
mod layer;
mod merge;
mod node;
mod parallel;
mod rng;

use node::{NodePtr, MAX_KEY, MIN_KEY};

use crate::config::Config;
use crate::error::{Result, SkipListError};

/// An ordered set of `u32` keys, built and extended in parallel batches.
pub struct SkipList {
    left: NodePtr,
    right: NodePtr,
    height: usize,
    len: usize,
}

// SAFETY: a `SkipList` is only ever accessed through `&self`/`&mut self` on
// a single owning thread at a time (the public API takes `&mut self` for
// every mutating operation); the parallelism happens *inside* a call, over
// `rayon`'s pool, and completes before the call returns.
unsafe impl Send for SkipList {}
unsafe impl Sync for SkipList {}

fn validate(keys: &[u32]) -> Result<()> {
    if keys.is_empty() {
        return Err(SkipListError::EmptyInput);
    }
    for (i, window) in keys.windows(2).enumerate() {
        if window[0] >= window[1] {
            return Err(SkipListError::NotSorted { index: i + 1 });
        }
    }
    for &key in keys {
        if key == MIN_KEY || key == MAX_KEY {
            return Err(SkipListError::KeyOutOfRange { key });
        }
    }
    Ok(())
}

#[cfg(debug_assertions)]
fn check_no_duplicates(existing_sorted: &[u32], batch_sorted: &[u32]) -> Result<()> {
    let (mut i, mut j) = (0, 0);
    while i < existing_sorted.len() && j < batch_sorted.len() {
        use std::cmp::Ordering::*;
        match existing_sorted[i].cmp(&batch_sorted[j]) {
            Less => i += 1,
            Greater => j += 1,
            Equal => {
                return Err(SkipListError::DuplicateKey {
                    key: batch_sorted[j],
                })
            }
        }
    }
    Ok(())
}

impl SkipList {
    /// Build a new set from a sorted, strictly increasing, disjoint
    /// sequence of keys.
    pub fn from_ordered_keys(keys: &[u32]) -> Result<Self> {
        Self::from_ordered_keys_with_config(keys, Config::new())
    }

    /// As [`Self::from_ordered_keys`], with an explicit [`Config`] (for a
    /// reproducible tower-height draw).
    pub fn from_ordered_keys_with_config(keys: &[u32], config: Config) -> Result<Self> {
        validate(keys)?;
        log::debug!("from_ordered_keys: n={}", keys.len());
        let (left, right, height) = build::build_with_sentinels(keys, &config);
        Ok(SkipList {
            left,
            right,
            height,
            len: keys.len(),
        })
    }

    /// Fold a sorted, strictly increasing batch of keys, disjoint from the
    /// keys already present, into this set.
    pub fn insert_ordered(&mut self, keys: &[u32]) -> Result<()> {
        self.insert_ordered_with_config(keys, Config::new())
    }

    /// As [`Self::insert_ordered`], with an explicit [`Config`].
    pub fn insert_ordered_with_config(&mut self, keys: &[u32], config: Config) -> Result<()> {
        validate(keys)?;

        #[cfg(debug_assertions)]
        {
            let existing = self.debug_get_nodes(0);
            check_no_duplicates(&existing, keys)?;
        }

        self.height = merge::merge_batch(self.left, self.right, self.height, keys, &config);
        self.len += keys.len();
        Ok(())
    }

    /// The current tower height (number of levels) of the structure.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `true` if the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of keys currently in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Walk level `level` from the left sentinel to the right, returning
    /// every user key present at that level in ascending order. Sentinels
    /// are excluded. For debugging and testing; not parallel, not meant for
    /// hot paths.
    pub fn debug_get_nodes(&self, level: usize) -> Vec<u32> {
        debug_assert!(level < self.height);
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.left.next(level);
        while let Some(node) = cursor {
            if node.is_sentinel() {
                break;
            }
            out.push(node.key());
            cursor = node.next(level);
        }
        out
    }
}

impl Drop for SkipList {
    fn drop(&mut self) {
        let mut cursor = Some(self.left);
        while let Some(node) = cursor {
            let next = node.next(0);
            unsafe {
                node.dealloc();
            }
            cursor = next;
        }
    }
}
