use thiserror::Error;

/// Contract violations rejected by the public bulk entry points.
///
/// These are the only error conditions this crate returns; an allocation
/// failure aborts the process (matching `Box`'s default behavior) and an
/// internal invariant violation is a `debug_assert!`, not a recoverable error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkipListError {
    #[error("input key sequence is empty")]
    EmptyInput,

    #[error("input keys are not strictly increasing at index {index}")]
    NotSorted { index: usize },

    #[error("key {key} is reserved for a sentinel and cannot be inserted")]
    KeyOutOfRange { key: u32 },

    #[error("key {key} already exists in the set")]
    DuplicateKey { key: u32 },
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SkipListError>;
