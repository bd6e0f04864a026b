/// How the node pool allocates and recycles nodes.
///
/// Selected once at construction; see
/// [`SplayRankMap::with_policy`](crate::SplayRankMap::with_policy).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AllocationPolicy {
    /// Freed nodes are kept on a free stack for reuse; the pool grows without
    /// bound as needed. The default.
    #[default]
    DynamicGrow,

    /// Freed nodes are not retained for reuse. Intended for short-lived maps
    /// where repopulating a pool is wasted work; storage is reclaimed when
    /// the map is cleared or dropped.
    DynamicDiscard,

    /// The pool is reserved up front and never grows. Once `capacity` nodes
    /// are live, allocation fails with
    /// [`Error::CapacityExhausted`](crate::Error::CapacityExhausted).
    Fixed(usize),
}
