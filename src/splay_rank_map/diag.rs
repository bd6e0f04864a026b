//! Diagnostic-only structural inspection and validation.
//!
//! Nothing in the engine consumes this module; it exists for external test
//! harnesses that want to look at the tree without disturbing it. None of
//! these entry points splay, bump the version, or otherwise mutate.

use core::cmp::Ordering;

use alloc::vec::Vec;

use crate::error::Error;
use crate::order::Comparator;
use crate::raw::{Handle, RawSplayMap};

use super::SplayRankMap;

/// A read-only view of one tree node: key, value, structural links, and the
/// raw rank offset relative to its parent.
pub struct NodeView<'a, K, V> {
    raw: &'a RawSplayMap<K, V>,
    handle: Handle,
}

impl<'a, K, V> NodeView<'a, K, V> {
    #[must_use]
    pub fn key(&self) -> &'a K {
        &self.raw.node(self.handle).key
    }

    #[must_use]
    pub fn value(&self) -> &'a V {
        &self.raw.node(self.handle).value
    }

    /// The node's rank minus its parent's rank (the root's offset is its
    /// absolute rank).
    #[must_use]
    pub fn rank_offset(&self) -> i64 {
        self.raw.node(self.handle).offset
    }

    #[must_use]
    pub fn left(&self) -> Option<NodeView<'a, K, V>> {
        self.raw.node(self.handle).left.map(|handle| NodeView { raw: self.raw, handle })
    }

    #[must_use]
    pub fn right(&self) -> Option<NodeView<'a, K, V>> {
        self.raw.node(self.handle).right.map(|handle| NodeView { raw: self.raw, handle })
    }
}

impl<K, V, C> SplayRankMap<K, V, C> {
    /// Returns a read-only view of the root node, if any.
    #[must_use]
    pub fn root_view(&self) -> Option<NodeView<'_, K, V>> {
        self.raw.root().map(|handle| NodeView { raw: &self.raw, handle })
    }

    /// Walks the whole structure asserting its invariants:
    ///
    /// - no cycles reachable from the root, and the reachable node count
    ///   matches [`len`](Self::len);
    /// - `extent` equals the entry count (unit weights);
    /// - rank containment: every node's absolute rank (root-to-node offset
    ///   sum) lies strictly inside the open interval inherited from its
    ///   ancestors, which also forces ranks to be exactly `0..extent`;
    /// - BST ordering per the comparator along an in-order walk.
    ///
    /// # Errors
    ///
    /// [`Error::Corrupted`] naming the violated invariant. Any violation is
    /// a programming error in the engine (or memory corruption), never a
    /// recoverable condition.
    #[allow(clippy::cast_possible_wrap)]
    pub fn validate(&self) -> Result<(), Error>
    where
        C: Comparator<K>,
    {
        let len = self.len();
        if self.extent() != len {
            return Err(Error::Corrupted("extent does not match entry count"));
        }
        let Some(root) = self.raw.root() else {
            return if len == 0 { Ok(()) } else { Err(Error::Corrupted("empty root with live entries")) };
        };

        // Rank containment. The walk is budgeted by `len`: a cycle would
        // revisit nodes and blow the budget rather than hang.
        let mut stack: Vec<(Handle, i64, i64, i64)> = Vec::new();
        stack.push((root, 0, -1, len as i64));
        let mut seen = 0usize;
        while let Some((handle, parent_pos, lo, hi)) = stack.pop() {
            seen += 1;
            if seen > len {
                return Err(Error::Corrupted("cycle reachable from root"));
            }
            let node = self.raw.node(handle);
            let pos = parent_pos + node.offset;
            if pos <= lo || pos >= hi {
                return Err(Error::Corrupted("rank outside inherited bounds"));
            }
            if let Some(left) = node.left {
                stack.push((left, pos, lo, pos));
            }
            if let Some(right) = node.right {
                stack.push((right, pos, pos, hi));
            }
        }
        if seen != len {
            return Err(Error::Corrupted("reachable node count does not match len"));
        }

        // BST ordering at every edge, observed along the in-order walk.
        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(prev) = prev {
                if self.cmp.cmp(prev, key) != Ordering::Less {
                    return Err(Error::Corrupted("keys out of comparator order"));
                }
            }
            prev = Some(key);
        }
        Ok(())
    }
}
