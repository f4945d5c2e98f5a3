//! # batch-skiplist
//!
//! An ordered set of `u32` keys backed by a skip list, built for the case
//! where keys arrive already sorted in batches rather than one at a time.
//!
//! ## Core idea
//! Instead of inserting keys one at a time, accept a whole sorted batch and
//! fold it into the structure with fork/join parallelism: draw every new
//! node's tower height up front, find where each batch splits the existing
//! levels, and relink each affected level concurrently. There is no
//! point-insert, no lookup, and no delete. See [`SkipList`] for the full
//! surface.

pub mod config;
pub mod error;
pub mod skiplist;

pub use config::Config;
pub use error::{Result, SkipListError};
pub use skiplist::SkipList;
