use super::handle::Handle;

/// A single splay tree node.
///
/// `offset` is the node's rank minus its parent's rank; the root's offset is
/// its absolute rank. Summing offsets from the root recovers any node's
/// absolute rank, which is what lets the tree answer positional queries
/// without maintaining subtree-size counters. Rotations never change a
/// node's rank, only how that fixed rank is expressed relative to a new
/// parent.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) offset: i64,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// A fresh leaf at absolute rank `offset` (callers attach children and
    /// re-base as part of the surrounding surgery).
    pub(crate) const fn new(key: K, value: V, offset: i64) -> Self {
        Self {
            key,
            value,
            offset,
            left: None,
            right: None,
        }
    }
}
