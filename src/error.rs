use thiserror::Error;

/// Errors reported by [`SplayRankMap`](crate::SplayRankMap) operations.
///
/// Every variant is a deterministic caller-contract violation or a resource
/// limit; nothing here is transient and nothing is retried internally.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested key is not in the tree.
    #[error("item not in tree")]
    KeyNotFound,

    /// The inserted key is already in the tree.
    #[error("item already in tree")]
    DuplicateKey,

    /// A rank query fell outside `[0, extent)`.
    #[error("rank {rank} out of range for extent {extent}")]
    RankOutOfRange {
        /// The requested rank.
        rank: usize,
        /// The tree's extent at the time of the call.
        extent: usize,
    },

    /// A count adjustment fell outside the `{0, +1, -1}` contract for this
    /// single-rank variant.
    #[error("count adjustment {delta} out of range")]
    DeltaOutOfRange {
        /// The offending delta.
        delta: i64,
    },

    /// The node pool is exhausted under a fixed-capacity allocation policy.
    #[error("node pool capacity {capacity} exhausted")]
    CapacityExhausted {
        /// The locked capacity.
        capacity: usize,
    },

    /// A fast cursor was advanced after a structural mutation of its map.
    /// Splaying counts: even a pure lookup elsewhere in the tree invalidates
    /// an in-flight fast cursor.
    #[error("cursor invalidated by structural mutation")]
    CursorInvalidated,

    /// The validator found a structural invariant violation.
    #[error("tree corrupted: {0}")]
    Corrupted(&'static str),
}
