use thiserror::Error;

use crate::Key;

/// Errors returned by collection operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// `pop` on a collection without entries.
    #[error("collection is empty")]
    Empty,

    /// `pull` with a key that has no entry.
    #[error("no entry for key `{0}`")]
    MissingKey(Key),

    /// `push` after an entry keyed `i64::MAX`; the next index does not exist.
    #[error("no integer index left after {0}")]
    IndexOverflow(i64),

    /// An integer key outside the `i64` range.
    #[error("integer key {0} does not fit in i64")]
    KeyOutOfRange(i128),

    /// `combine` with a different number of keys and values.
    #[error("cannot combine {keys} keys with {values} values")]
    LengthMismatch { keys: usize, values: usize },

    /// `map_spread` on an element whose length differs from the callback arity.
    #[error("element `{key}` has {found} items, callback takes {expected}")]
    ArityMismatch {
        key: Key,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, CollectionError>;
