use core::cmp::Ordering;

use crate::error::Error;
use crate::policy::AllocationPolicy;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// The comparator-free splay engine backing `SplayRankMap`.
///
/// Every key decision is delegated to an ordering closure supplied by the
/// caller (`FnMut(abs_position, &key) -> Ordering`, read as "where does the
/// target fall relative to this node"). One closure shape covers all three
/// search modes:
///
/// - splay-by-key: `|_, k| cmp(target, k)`
/// - splay-by-position: `|pos, _| target.cmp(&pos)`
/// - splay-to-extreme: `|_, _| Ordering::Less` (or `Greater`)
///
/// Offsets are parent-relative ranks, so the splay routine is translation
/// invariant and can be applied to any subtree as long as the closure does
/// not depend on absolute positions (the extreme closures used on subtrees
/// never do).
pub(crate) struct RawSplayMap<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
    /// Total rank span. Every entry has weight exactly 1 in this variant, so
    /// `extent` always equals the live node count; both are tracked because
    /// they diverge in the general weighted engine.
    extent: i64,
    /// Bumped by every splay, including the ones performed by pure lookups.
    /// Fast cursors snapshot this and refuse to advance after a mismatch.
    version: u64,
}

/// Single top-down splay pass over the subtree rooted at `root`.
///
/// Returns the new subtree root: the last node the search touched, which is
/// the target itself or one of its two nearest neighbors. Amortized
/// O(log n); exactly one descent, no parent pointers, no recursion.
///
/// Offset bookkeeping follows from one invariant: `offset = own rank -
/// parent rank`, with ranks fixed by in-order position and therefore
/// untouched by rotations. The running absolute position of the current
/// node (`t_pos`) is carried down the descent; every relink recomputes the
/// relinked node's offset as `own abs - new parent abs`. The first node of
/// each spine has no parent until reassembly, so its absolute position is
/// stashed in its offset field and re-based against the final root at the
/// end.
fn splay_subtree<K, V, F>(nodes: &mut Arena<Node<K, V>>, root: Handle, mut order: F) -> Handle
where
    F: FnMut(i64, &K) -> Ordering,
{
    let mut t = root;
    let mut t_pos = nodes.get(t).offset;

    // The two partial chains being assembled: everything on the left spine
    // is known less than the eventual root, everything on the right spine
    // known greater. `*_top` hangs off the conceptual header node; `*_deep`
    // is the attachment point for the next link.
    let mut left_top: Option<Handle> = None;
    let mut right_top: Option<Handle> = None;
    let mut left_deep: Option<Handle> = None;
    let mut right_deep: Option<Handle> = None;
    let mut l_pos = 0i64;
    let mut r_pos = 0i64;

    loop {
        match order(t_pos, &nodes.get(t).key) {
            Ordering::Less => {
                let Some(u) = nodes.get(t).left else { break };
                let u_pos = t_pos + nodes.get(u).offset;
                if order(u_pos, &nodes.get(u).key) == Ordering::Less {
                    // Zig-zig: rotate right around `t` before descending.
                    let off_u = u_pos - t_pos;
                    let b = nodes.get(u).right;
                    nodes.get_mut(t).left = b;
                    if let Some(b) = b {
                        // `b` moves from under `u` to under `t`.
                        nodes.get_mut(b).offset += off_u;
                    }
                    nodes.get_mut(t).offset = -off_u;
                    nodes.get_mut(u).right = Some(t);
                    t = u;
                    t_pos = u_pos;
                    if nodes.get(t).left.is_none() {
                        break;
                    }
                }
                // Link `t` (and its right subtree, all greater than the
                // target) onto the right spine.
                match right_deep {
                    Some(r) => {
                        nodes.get_mut(r).left = Some(t);
                        nodes.get_mut(t).offset = t_pos - r_pos;
                    }
                    None => {
                        right_top = Some(t);
                        nodes.get_mut(t).offset = t_pos;
                    }
                }
                right_deep = Some(t);
                r_pos = t_pos;
                let next = nodes.get(t).left.expect("descent checked a left child exists");
                t_pos += nodes.get(next).offset;
                t = next;
            }
            Ordering::Greater => {
                let Some(u) = nodes.get(t).right else { break };
                let u_pos = t_pos + nodes.get(u).offset;
                if order(u_pos, &nodes.get(u).key) == Ordering::Greater {
                    // Zag-zag: rotate left around `t` before descending.
                    let off_u = u_pos - t_pos;
                    let b = nodes.get(u).left;
                    nodes.get_mut(t).right = b;
                    if let Some(b) = b {
                        nodes.get_mut(b).offset += off_u;
                    }
                    nodes.get_mut(t).offset = -off_u;
                    nodes.get_mut(u).left = Some(t);
                    t = u;
                    t_pos = u_pos;
                    if nodes.get(t).right.is_none() {
                        break;
                    }
                }
                match left_deep {
                    Some(l) => {
                        nodes.get_mut(l).right = Some(t);
                        nodes.get_mut(t).offset = t_pos - l_pos;
                    }
                    None => {
                        left_top = Some(t);
                        nodes.get_mut(t).offset = t_pos;
                    }
                }
                left_deep = Some(t);
                l_pos = t_pos;
                let next = nodes.get(t).right.expect("descent checked a right child exists");
                t_pos += nodes.get(next).offset;
                t = next;
            }
            Ordering::Equal => break,
        }
    }

    // Reassemble: the residual children of the final root hang under the
    // deepest spine nodes; the spine tops become the new root's children.
    let a = nodes.get(t).left;
    let b = nodes.get(t).right;
    if let Some(l) = left_deep {
        nodes.get_mut(l).right = a;
        if let Some(a) = a {
            let a_pos = t_pos + nodes.get(a).offset;
            nodes.get_mut(a).offset = a_pos - l_pos;
        }
        let top = left_top.expect("non-empty left spine has a top");
        let top_pos = nodes.get(top).offset;
        nodes.get_mut(top).offset = top_pos - t_pos;
        nodes.get_mut(t).left = Some(top);
    }
    if let Some(r) = right_deep {
        nodes.get_mut(r).left = b;
        if let Some(b) = b {
            let b_pos = t_pos + nodes.get(b).offset;
            nodes.get_mut(b).offset = b_pos - r_pos;
        }
        let top = right_top.expect("non-empty right spine has a top");
        let top_pos = nodes.get(top).offset;
        nodes.get_mut(top).offset = top_pos - t_pos;
        nodes.get_mut(t).right = Some(top);
    }
    nodes.get_mut(t).offset = t_pos;
    t
}

impl<K, V> RawSplayMap<K, V> {
    pub(crate) fn new(policy: AllocationPolicy) -> Self {
        Self {
            nodes: Arena::new(policy),
            root: None,
            extent: 0,
            version: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[allow(clippy::cast_sign_loss)]
    pub(crate) const fn extent(&self) -> usize {
        self.extent as usize
    }

    pub(crate) const fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn policy(&self) -> AllocationPolicy {
        self.nodes.policy()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.extent = 0;
        self.version = self.version.wrapping_add(1);
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Absolute rank of the current root. Meaningless on an empty tree.
    pub(crate) fn root_rank(&self) -> i64 {
        self.root.map_or(0, |h| self.nodes.get(h).offset)
    }

    /// Splays the whole tree toward whatever the closure steers at and
    /// returns the new root. This is the only entry point that reshapes the
    /// tree from the top, so the version bump lives here.
    pub(crate) fn splay_root<F>(&mut self, order: F) -> Option<Handle>
    where
        F: FnMut(i64, &K) -> Ordering,
    {
        let root = self.root?;
        self.version = self.version.wrapping_add(1);
        let new_root = splay_subtree(&mut self.nodes, root, order);
        self.root = Some(new_root);
        Some(new_root)
    }

    /// Splays the least entry to the root. The documented slow path for
    /// `first_key_value`: O(depth), not O(1).
    pub(crate) fn splay_least(&mut self) -> Option<Handle> {
        self.splay_root(|_, _| Ordering::Less)
    }

    /// Splays the greatest entry to the root. Slow path, as `splay_least`.
    pub(crate) fn splay_greatest(&mut self) -> Option<Handle> {
        self.splay_root(|_, _| Ordering::Greater)
    }

    /// Splays the minimum of the root's right subtree to the top of that
    /// subtree and returns it with its absolute rank: the in-order successor
    /// of the root. `None` if the root has no right subtree.
    pub(crate) fn successor_of_root(&mut self) -> Option<(Handle, i64)> {
        let root = self.root?;
        let right = self.nodes.get(root).right?;
        self.version = self.version.wrapping_add(1);
        let succ = splay_subtree(&mut self.nodes, right, |_, _| Ordering::Less);
        self.nodes.get_mut(root).right = Some(succ);
        let rank = self.nodes.get(root).offset + self.nodes.get(succ).offset;
        Some((succ, rank))
    }

    /// Mirror image of [`successor_of_root`](Self::successor_of_root).
    pub(crate) fn predecessor_of_root(&mut self) -> Option<(Handle, i64)> {
        let root = self.root?;
        let left = self.nodes.get(root).left?;
        self.version = self.version.wrapping_add(1);
        let pred = splay_subtree(&mut self.nodes, left, |_, _| Ordering::Greater);
        self.nodes.get_mut(root).left = Some(pred);
        let rank = self.nodes.get(root).offset + self.nodes.get(pred).offset;
        Some((pred, rank))
    }

    fn alloc(&mut self, node: Node<K, V>) -> Result<Handle, Error> {
        let capacity = self.nodes.capacity();
        self.nodes.try_alloc(node).ok_or(Error::CapacityExhausted { capacity })
    }

    /// First insertion into an empty tree.
    pub(crate) fn insert_empty(&mut self, key: K, value: V) -> Result<(), Error> {
        debug_assert!(self.root.is_none());
        let h = self.alloc(Node::new(key, value, 0))?;
        self.root = Some(h);
        self.extent += 1;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Inserts a key that compares less than the current root, which must
    /// already be the splayed nearest neighbor (its left subtree then holds
    /// only keys less than `key`).
    ///
    /// The new node takes over the old root's rank `rp`; the old root and
    /// everything at rank `rp` or above shift up by one, expressed entirely
    /// through the old root's new `+1` offset.
    pub(crate) fn insert_before_root(&mut self, key: K, value: V) -> Result<(), Error> {
        let root = self.root.expect("insert_before_root requires a root");
        let rp = self.nodes.get(root).offset;
        let left = self.nodes.get(root).left;

        let h = self.alloc(Node {
            key,
            value,
            offset: rp,
            left,
            right: Some(root),
        })?;
        let old_root = self.nodes.get_mut(root);
        old_root.left = None;
        old_root.offset = 1;

        self.root = Some(h);
        self.extent += 1;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Symmetric case: the key compares greater than the splayed root. The
    /// new node takes rank `rp + 1`; the adopted right subtree keeps its
    /// offsets verbatim because its entries shift up by exactly the same
    /// amount as their new parent.
    pub(crate) fn insert_after_root(&mut self, key: K, value: V) -> Result<(), Error> {
        let root = self.root.expect("insert_after_root requires a root");
        let rp = self.nodes.get(root).offset;
        let right = self.nodes.get(root).right;

        let h = self.alloc(Node {
            key,
            value,
            offset: rp + 1,
            left: Some(root),
            right,
        })?;
        let old_root = self.nodes.get_mut(root);
        old_root.right = None;
        old_root.offset = -1;

        self.root = Some(h);
        self.extent += 1;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Removes the root entry (the caller has already splayed the victim to
    /// the root) and returns its key and value.
    ///
    /// The two subtrees merge by splaying the right subtree to its minimum —
    /// whose left child is then provably absent — and adopting the left
    /// subtree under it. Exactly one adopted node needs an offset re-base;
    /// the rest of the renumbering rides on the relative representation.
    pub(crate) fn remove_root(&mut self) -> (K, V) {
        let root = self.root.expect("remove_root requires a root");
        let rp = self.nodes.get(root).offset;
        let left = self.nodes.get(root).left;
        let right = self.nodes.get(root).right;

        self.root = match right {
            Some(right) => {
                let succ = splay_subtree(&mut self.nodes, right, |_, _| Ordering::Less);
                debug_assert!(self.nodes.get(succ).left.is_none());
                let sub_off = self.nodes.get(succ).offset;
                {
                    let succ_node = self.nodes.get_mut(succ);
                    succ_node.left = left;
                    // Ranks above the removed entry shift down by one.
                    succ_node.offset = rp + sub_off - 1;
                }
                if let Some(left) = left {
                    // Absolute rank unchanged; only the parent moved.
                    self.nodes.get_mut(left).offset += 1 - sub_off;
                }
                Some(succ)
            }
            None => {
                if let Some(left) = left {
                    // Left subtree becomes the whole tree; its root's offset
                    // becomes absolute.
                    self.nodes.get_mut(left).offset += rp;
                }
                left
            }
        };

        self.extent -= 1;
        self.version = self.version.wrapping_add(1);
        let node = self.nodes.take(root);
        (node.key, node.value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn by_key(key: i32) -> impl FnMut(i64, &i32) -> Ordering {
        move |_, k| key.cmp(k)
    }

    fn by_position(rank: i64) -> impl FnMut(i64, &i32) -> Ordering {
        move |pos, _| rank.cmp(&pos)
    }

    fn add(raw: &mut RawSplayMap<i32, i32>, key: i32) {
        if raw.is_empty() {
            raw.insert_empty(key, key * 10).unwrap();
            return;
        }
        let root = raw.splay_root(by_key(key)).unwrap();
        match key.cmp(&raw.node(root).key) {
            Ordering::Less => raw.insert_before_root(key, key * 10).unwrap(),
            Ordering::Greater => raw.insert_after_root(key, key * 10).unwrap(),
            Ordering::Equal => panic!("duplicate key in test"),
        }
    }

    fn remove(raw: &mut RawSplayMap<i32, i32>, key: i32) -> Option<(i32, i32)> {
        let root = raw.splay_root(by_key(key))?;
        (raw.node(root).key == key).then(|| raw.remove_root())
    }

    /// In-order walk resolving each node's absolute rank from root-to-node
    /// offset sums.
    fn inorder(raw: &RawSplayMap<i32, i32>) -> Vec<(i32, i64)> {
        fn walk(raw: &RawSplayMap<i32, i32>, h: Handle, parent_pos: i64, out: &mut Vec<(i32, i64)>) {
            let n = raw.node(h);
            let pos = parent_pos + n.offset;
            if let Some(l) = n.left {
                walk(raw, l, pos, out);
            }
            out.push((n.key, pos));
            if let Some(r) = n.right {
                walk(raw, r, pos, out);
            }
        }
        let mut out = Vec::new();
        if let Some(root) = raw.root() {
            walk(raw, root, 0, &mut out);
        }
        out
    }

    /// Keys sorted, ranks exactly 0..n in walk order.
    fn assert_coherent(raw: &RawSplayMap<i32, i32>) {
        let entries = inorder(raw);
        assert_eq!(entries.len(), raw.len());
        assert_eq!(raw.extent(), raw.len());
        for (i, window) in entries.windows(2).enumerate() {
            assert!(window[0].0 < window[1].0, "keys out of order at {i}: {entries:?}");
        }
        for (i, &(_, pos)) in entries.iter().enumerate() {
            assert_eq!(pos, i as i64, "ranks not contiguous: {entries:?}");
        }
    }

    #[test]
    fn splay_moves_target_to_root() {
        let mut raw = RawSplayMap::new(AllocationPolicy::DynamicGrow);
        for key in [5, 2, 8, 1, 9] {
            add(&mut raw, key);
            assert_eq!(raw.node(raw.root().unwrap()).key, key);
            assert_coherent(&raw);
        }
        for key in [1, 9, 5, 2, 8] {
            raw.splay_root(by_key(key)).unwrap();
            assert_eq!(raw.node(raw.root().unwrap()).key, key);
            assert_coherent(&raw);
        }
    }

    #[test]
    fn zig_zig_chain_stays_coherent() {
        // Ascending insertion builds a maximally left-leaning access
        // pattern; splaying the minimum afterwards exercises the zig-zig
        // rotation repeatedly in one descent.
        let mut raw = RawSplayMap::new(AllocationPolicy::DynamicGrow);
        for key in 0..64 {
            add(&mut raw, key);
        }
        let root = raw.splay_root(by_key(0)).unwrap();
        assert_eq!(raw.node(root).key, 0);
        assert_coherent(&raw);
    }

    #[test]
    fn splay_by_position_lands_exactly() {
        let mut raw = RawSplayMap::new(AllocationPolicy::DynamicGrow);
        for key in [5, 2, 8, 1, 9] {
            add(&mut raw, key);
        }
        for (rank, key) in [(0, 1), (1, 2), (2, 5), (3, 8), (4, 9)] {
            let root = raw.splay_root(by_position(rank)).unwrap();
            assert_eq!(raw.node(root).offset, rank);
            assert_eq!(raw.node(root).key, key);
            assert_coherent(&raw);
        }
    }

    #[test]
    fn extremes_splay_to_root() {
        let mut raw = RawSplayMap::new(AllocationPolicy::DynamicGrow);
        for key in [5, 2, 8, 1, 9] {
            add(&mut raw, key);
        }
        let least = raw.splay_least().unwrap();
        assert_eq!(raw.node(least).key, 1);
        assert_eq!(raw.node(least).offset, 0);
        assert!(raw.node(least).left.is_none());
        assert_coherent(&raw);

        let greatest = raw.splay_greatest().unwrap();
        assert_eq!(raw.node(greatest).key, 9);
        assert_eq!(raw.node(greatest).offset, 4);
        assert!(raw.node(greatest).right.is_none());
        assert_coherent(&raw);
    }

    #[test]
    fn removal_renumbers_by_offset_only() {
        let mut raw = RawSplayMap::new(AllocationPolicy::DynamicGrow);
        for key in [5, 2, 8, 1, 9, 3, 7] {
            add(&mut raw, key);
        }
        for key in [5, 1, 9, 3, 8, 2, 7] {
            let removed = remove(&mut raw, key).unwrap();
            assert_eq!(removed, (key, key * 10));
            assert_coherent(&raw);
        }
        assert!(raw.is_empty());
        assert_eq!(raw.extent(), 0);
    }

    #[test]
    fn neighbor_helpers_expose_adjacent_ranks() {
        let mut raw = RawSplayMap::new(AllocationPolicy::DynamicGrow);
        for key in [5, 2, 8] {
            add(&mut raw, key);
        }
        raw.splay_root(by_key(5)).unwrap();
        let (succ, rank) = raw.successor_of_root().unwrap();
        assert_eq!((raw.node(succ).key, rank), (8, 2));
        let (pred, rank) = raw.predecessor_of_root().unwrap();
        assert_eq!((raw.node(pred).key, rank), (2, 0));
        assert_coherent(&raw);
    }

    #[test]
    fn fixed_pool_exhaustion_is_an_error() {
        let mut raw = RawSplayMap::new(AllocationPolicy::Fixed(2));
        add(&mut raw, 1);
        add(&mut raw, 2);
        raw.splay_root(by_key(3)).unwrap();
        assert_eq!(raw.insert_after_root(3, 30), Err(Error::CapacityExhausted { capacity: 2 }));
        // The failed insert left the tree untouched apart from the splay.
        assert_coherent(&raw);
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn version_advances_on_pure_lookups() {
        let mut raw = RawSplayMap::new(AllocationPolicy::DynamicGrow);
        add(&mut raw, 1);
        add(&mut raw, 2);
        let before = raw.version();
        raw.splay_root(by_key(1)).unwrap();
        assert_ne!(raw.version(), before);
    }
}
