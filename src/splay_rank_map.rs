//! A rank-augmented, self-adjusting ordered map.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::error::Error;
use crate::order::{Comparator, NaturalOrder};
use crate::policy::AllocationPolicy;
use crate::raw::{Handle, RawSplayMap};

pub mod diag;

/// An ordered map over a splay tree, augmented with absolute ranks.
///
/// Entries are kept in comparator order and numbered contiguously from zero:
/// the **rank** of an entry is its position in sorted order, the map's
/// **extent** is the total rank span (always equal to [`len`](Self::len) in
/// this single-weight variant). Rank queries run in both directions —
/// [`rank_of`](Self::rank_of) and [`get_by_rank`](Self::get_by_rank) — in
/// amortized O(log n), without any subtree-size bookkeeping: each node only
/// stores its rank relative to its parent.
///
/// # Splaying mutates
///
/// Every operation, including pure lookups, splays its target (or the
/// target's nearest neighbor) to the root. This is what keeps the tree
/// balanced against the observed access pattern, and it is why **every query
/// method takes `&mut self`**. It also means any operation invalidates
/// in-flight [`FastCursor`]s; see [Enumeration](#enumeration).
///
/// The flip side: repeated access to recently used keys is cheap, and the
/// map needs no balance metadata at all.
///
/// # Enumeration
///
/// Two cursor strategies walk the map in key order, with different
/// tradeoffs:
///
/// - [`FastCursor`] — O(1) amortized per step, but bound to the tree
///   *version* captured at creation; advancing it after any operation on the
///   map (lookups included) fails with [`Error::CursorInvalidated`].
/// - [`RobustCursor`] — O(log n) per step, tolerant of arbitrary mutation
///   between steps; it re-derives its position from the last yielded key.
///
/// [`iter`](Self::iter) is the fast strategy expressed as an ordinary
/// borrowing iterator: the borrow checker statically prevents the mutation
/// that would invalidate it.
///
/// # Concurrency
///
/// None. No locks, no atomics; one logical operation at a time, enforced by
/// `&mut self`.
///
/// # Examples
///
/// ```
/// use splay_rank::SplayRankMap;
///
/// let mut map = SplayRankMap::new();
/// for key in [5, 2, 8, 1, 9] {
///     map.insert(key, key * 10).unwrap();
/// }
///
/// // Rank always tracks sorted position, regardless of insertion order.
/// assert_eq!(map.get_by_rank(0).unwrap(), (&1, &10));
/// assert_eq!(map.get_by_rank(4).unwrap(), (&9, &90));
/// assert_eq!(map.rank_of(&5), Some(2));
///
/// assert_eq!(map.remove(&5), Some(50));
/// assert_eq!(map.rank_of(&8), Some(2)); // ranks close up, no gaps
/// ```
pub struct SplayRankMap<K, V, C = NaturalOrder> {
    raw: RawSplayMap<K, V>,
    cmp: C,
}

impl<K, V> SplayRankMap<K, V, NaturalOrder> {
    /// Creates an empty map ordered by the key type's [`Ord`], with the
    /// default [`AllocationPolicy::DynamicGrow`] node pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::SplayRankMap;
    ///
    /// let mut map = SplayRankMap::new();
    /// map.insert("a", 1).unwrap();
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty [`Ord`]-ordered map with the given allocation
    /// policy.
    ///
    /// Under [`AllocationPolicy::Fixed`] the node pool is reserved up front
    /// and never grows; inserts past the capacity fail with
    /// [`Error::CapacityExhausted`].
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::{AllocationPolicy, Error, SplayRankMap};
    ///
    /// let mut map = SplayRankMap::with_policy(AllocationPolicy::Fixed(1));
    /// map.insert(1, "one").unwrap();
    /// assert_eq!(map.insert(2, "two"), Err(Error::CapacityExhausted { capacity: 1 }));
    /// ```
    #[must_use]
    pub fn with_policy(policy: AllocationPolicy) -> Self {
        Self::with_comparator_and_policy(NaturalOrder, policy)
    }
}

impl<K, V, C> SplayRankMap<K, V, C> {
    /// Creates an empty map ordered by a user-supplied [`Comparator`].
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_comparator_and_policy(cmp, AllocationPolicy::default())
    }

    /// Creates an empty map with both a comparator and an allocation policy.
    #[must_use]
    pub fn with_comparator_and_policy(cmp: C, policy: AllocationPolicy) -> Self {
        Self {
            raw: RawSplayMap::new(policy),
            cmp,
        }
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the map's total rank span.
    ///
    /// Every entry has weight exactly 1 in this variant, so the extent
    /// always equals [`len`](Self::len); valid ranks are `0..extent`.
    #[must_use]
    pub fn extent(&self) -> usize {
        self.raw.extent()
    }

    /// Returns the node pool capacity. Only a hard limit under
    /// [`AllocationPolicy::Fixed`].
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the allocation policy chosen at construction.
    #[must_use]
    pub fn policy(&self) -> AllocationPolicy {
        self.raw.policy()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a borrowing iterator over `(&key, &value)` in key order.
    ///
    /// Does not splay (the one read that leaves the tree alone); worst-case
    /// logarithmic and amortized constant time per item.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut stack = SmallVec::new();
        if let Some(root) = self.raw.root() {
            push_left_spine(&self.raw, root, &mut stack);
        }
        Iter {
            raw: &self.raw,
            stack,
            remaining: self.raw.len(),
        }
    }

    /// Starts a fast enumeration: O(1) amortized per step, invalidated by
    /// *any* subsequent operation on the map.
    ///
    /// The cursor holds no borrow; pass the map to each
    /// [`next`](FastCursor::next) call. See [`FastCursor`].
    #[must_use]
    pub fn fast_cursor(&self) -> FastCursor {
        let mut stack = SmallVec::new();
        if let Some(root) = self.raw.root() {
            push_left_spine(&self.raw, root, &mut stack);
        }
        FastCursor {
            stack,
            version: self.raw.version(),
            rank: 0,
        }
    }

    /// Starts a robust enumeration: O(log n) per step, tolerant of
    /// arbitrary mutation between steps. See [`RobustCursor`].
    #[must_use]
    pub fn robust_cursor(&self) -> RobustCursor<K> {
        RobustCursor { last: None }
    }
}

impl<K, V, C: Comparator<K>> SplayRankMap<K, V, C> {
    /// Splays toward `key` and reports how `key` compares to the resulting
    /// root (`Equal` means found; otherwise the root is the nearest
    /// neighbor on the reported side). `None` on an empty tree.
    fn splay_to(&mut self, key: &K) -> Option<Ordering> {
        let Self { raw, cmp } = self;
        let root = raw.splay_root(|_, k| cmp.cmp(key, k))?;
        Some(cmp.cmp(key, &raw.node(root).key))
    }

    /// Returns `true` if `key` is in the map.
    ///
    /// Splays, like every lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::SplayRankMap;
    ///
    /// let mut map = SplayRankMap::new();
    /// map.insert(1, "one").unwrap();
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key(&mut self, key: &K) -> bool {
        self.splay_to(key) == Some(Ordering::Equal)
    }

    /// Returns a reference to the value for `key`, if present.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::SplayRankMap;
    ///
    /// let mut map = SplayRankMap::new();
    /// map.insert(1, "one").unwrap();
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.splay_to(key)? != Ordering::Equal {
            return None;
        }
        let root = self.raw.root()?;
        Some(&self.raw.node(root).value)
    }

    /// Returns a mutable reference to the value for `key`, if present.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if self.splay_to(key)? != Ordering::Equal {
            return None;
        }
        let root = self.raw.root()?;
        Some(&mut self.raw.node_mut(root).value)
    }

    /// Replaces the value for an existing `key`, returning the old value.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent; the map is left unchanged
    /// apart from the splay.
    pub fn set_value(&mut self, key: &K, value: V) -> Result<V, Error> {
        if self.splay_to(key) != Some(Ordering::Equal) {
            return Err(Error::KeyNotFound);
        }
        let root = self.raw.root().ok_or(Error::KeyNotFound)?;
        Ok(core::mem::replace(&mut self.raw.node_mut(root).value, value))
    }

    /// Inserts a new entry. Unlike `BTreeMap::insert`, an existing key is
    /// an error, not a replacement — use [`set_value`](Self::set_value) or
    /// [`get_mut`](Self::get_mut) to update values.
    ///
    /// The new entry becomes the root; its rank is wherever the key lands
    /// in sorted order, and every entry at or above that rank shifts up by
    /// one (a single O(1) offset adjustment).
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateKey`] if the key is already present (the map is
    ///   unchanged apart from the splay).
    /// - [`Error::CapacityExhausted`] under a fixed-capacity pool with no
    ///   free nodes left.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::{Error, SplayRankMap};
    ///
    /// let mut map = SplayRankMap::new();
    /// assert_eq!(map.insert(1, "one"), Ok(()));
    /// assert_eq!(map.insert(1, "uno"), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<(), Error> {
        match self.splay_to(&key) {
            None => self.raw.insert_empty(key, value),
            Some(Ordering::Equal) => Err(Error::DuplicateKey),
            Some(Ordering::Less) => self.raw.insert_before_root(key, value),
            Some(Ordering::Greater) => self.raw.insert_after_root(key, value),
        }
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// Ranks above the removed entry close up by one; the renumbering is a
    /// constant number of offset adjustments, never a tree rewrite. The
    /// freed node returns to the pool (policy permitting).
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::SplayRankMap;
    ///
    /// let mut map = SplayRankMap::new();
    /// map.insert(1, "one").unwrap();
    /// assert_eq!(map.remove(&1), Some("one"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        (self.splay_to(key)? == Ordering::Equal).then(|| self.raw.remove_root())
    }

    /// Upsert and delete fused into one call, keyed on a weight delta.
    ///
    /// Every present key has weight exactly 1 in this variant, so the only
    /// legal adjustments are: `+1` on an absent key (inserts
    /// `V::default()`), `-1` on a present key (removes it), and `0`
    /// (no-op).
    ///
    /// # Errors
    ///
    /// [`Error::DeltaOutOfRange`] for any other delta — including `+1` on a
    /// present key, which would push its weight above 1 — and
    /// [`Error::CapacityExhausted`] if the insertion path cannot allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::{Error, SplayRankMap};
    ///
    /// let mut map: SplayRankMap<i32, i32> = SplayRankMap::new();
    /// map.adjust_count(7, 1).unwrap();
    /// assert_eq!(map.get(&7), Some(&0));
    /// assert_eq!(map.adjust_count(7, 1), Err(Error::DeltaOutOfRange { delta: 1 }));
    /// map.adjust_count(7, -1).unwrap();
    /// assert!(map.is_empty());
    /// ```
    pub fn adjust_count(&mut self, key: K, delta: i64) -> Result<(), Error>
    where
        V: Default,
    {
        match (self.splay_to(&key), delta) {
            (_, 0) => Ok(()),
            (Some(Ordering::Equal), -1) => {
                self.raw.remove_root();
                Ok(())
            }
            (None, 1) => self.raw.insert_empty(key, V::default()),
            (Some(Ordering::Less), 1) => self.raw.insert_before_root(key, V::default()),
            (Some(Ordering::Greater), 1) => self.raw.insert_after_root(key, V::default()),
            _ => Err(Error::DeltaOutOfRange { delta }),
        }
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if
    /// the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::SplayRankMap;
    ///
    /// let mut map = SplayRankMap::new();
    /// for key in [30, 10, 20] {
    ///     map.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(map.rank_of(&30), Some(2));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[allow(clippy::cast_sign_loss)]
    pub fn rank_of(&mut self, key: &K) -> Option<usize> {
        (self.splay_to(key)? == Ordering::Equal).then(|| self.raw.root_rank() as usize)
    }

    /// Returns the entry at position `rank` in sorted order.
    ///
    /// This is the splay-by-position path: the descent is steered by rank
    /// arithmetic on the offsets rather than by key comparisons, and the
    /// found entry ends up at the root like any other access.
    ///
    /// # Errors
    ///
    /// [`Error::RankOutOfRange`] if `rank >= extent` — a caller contract
    /// violation, not a transient condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::SplayRankMap;
    ///
    /// let mut map = SplayRankMap::new();
    /// for key in [5, 2, 8, 1, 9] {
    ///     map.insert(key, ()).unwrap();
    /// }
    /// let keys: Vec<i32> = (0..5).map(|r| *map.get_by_rank(r).unwrap().0).collect();
    /// assert_eq!(keys, [1, 2, 5, 8, 9]);
    /// assert!(map.get_by_rank(5).is_err());
    /// ```
    #[allow(clippy::cast_possible_wrap)]
    pub fn get_by_rank(&mut self, rank: usize) -> Result<(&K, &V), Error> {
        let extent = self.extent();
        if rank >= extent {
            return Err(Error::RankOutOfRange { rank, extent });
        }
        let target = rank as i64;
        let root = self
            .raw
            .splay_root(move |pos, _| target.cmp(&pos))
            .expect("rank in bounds implies a non-empty tree");
        let node = self.raw.node(root);
        debug_assert_eq!(node.offset, target, "contiguous unit weights land positional splays exactly");
        Ok((&node.key, &node.value))
    }

    /// Returns the greatest entry strictly less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_rank::SplayRankMap;
    ///
    /// let mut map = SplayRankMap::new();
    /// map.insert(10, ()).unwrap();
    /// map.insert(20, ()).unwrap();
    /// assert_eq!(map.nearest_less(&20).unwrap().0, &10);
    /// assert_eq!(map.nearest_less(&10), None);
    /// ```
    pub fn nearest_less(&mut self, key: &K) -> Option<(&K, &V)> {
        let (h, _) = self.raw_nearest_less(key)?;
        let node = self.raw.node(h);
        Some((&node.key, &node.value))
    }

    /// Returns the greatest entry less than or equal to `key`.
    pub fn nearest_less_or_equal(&mut self, key: &K) -> Option<(&K, &V)> {
        let (h, _) = self.raw_nearest_less_or_equal(key)?;
        let node = self.raw.node(h);
        Some((&node.key, &node.value))
    }

    /// Returns the least entry strictly greater than `key`.
    pub fn nearest_greater(&mut self, key: &K) -> Option<(&K, &V)> {
        let (h, _) = self.raw_nearest_greater(key)?;
        let node = self.raw.node(h);
        Some((&node.key, &node.value))
    }

    /// Returns the least entry greater than or equal to `key`.
    pub fn nearest_greater_or_equal(&mut self, key: &K) -> Option<(&K, &V)> {
        let (h, _) = self.raw_nearest_greater_or_equal(key)?;
        let node = self.raw.node(h);
        Some((&node.key, &node.value))
    }

    /// Returns the least entry.
    ///
    /// This is the documented slow path — O(depth) to reach the extreme,
    /// which then splays to the root like any access. Callers needing
    /// frequent min/max should track extremes externally or lean on the
    /// `nearest_*` queries with sentinel bounds.
    pub fn first_key_value(&mut self) -> Option<(&K, &V)> {
        let h = self.raw.splay_least()?;
        let node = self.raw.node(h);
        Some((&node.key, &node.value))
    }

    /// Returns the greatest entry. Slow path, as
    /// [`first_key_value`](Self::first_key_value).
    pub fn last_key_value(&mut self) -> Option<(&K, &V)> {
        let h = self.raw.splay_greatest()?;
        let node = self.raw.node(h);
        Some((&node.key, &node.value))
    }

    // ─── Neighbor plumbing shared with the robust cursor ────────────────────

    fn raw_root_entry(&self) -> (Handle, i64) {
        let root = self.raw.root().expect("caller checked the tree is non-empty");
        (root, self.raw.root_rank())
    }

    pub(crate) fn raw_nearest_greater(&mut self, key: &K) -> Option<(Handle, i64)> {
        match self.splay_to(key)? {
            // The splayed root is the nearest neighbor; if it is greater
            // than `key` it is exactly the successor.
            Ordering::Less => Some(self.raw_root_entry()),
            Ordering::Equal | Ordering::Greater => self.raw.successor_of_root(),
        }
    }

    fn raw_nearest_greater_or_equal(&mut self, key: &K) -> Option<(Handle, i64)> {
        match self.splay_to(key)? {
            Ordering::Less | Ordering::Equal => Some(self.raw_root_entry()),
            Ordering::Greater => self.raw.successor_of_root(),
        }
    }

    fn raw_nearest_less(&mut self, key: &K) -> Option<(Handle, i64)> {
        match self.splay_to(key)? {
            Ordering::Greater => Some(self.raw_root_entry()),
            Ordering::Equal | Ordering::Less => self.raw.predecessor_of_root(),
        }
    }

    fn raw_nearest_less_or_equal(&mut self, key: &K) -> Option<(Handle, i64)> {
        match self.splay_to(key)? {
            Ordering::Greater | Ordering::Equal => Some(self.raw_root_entry()),
            Ordering::Less => self.raw.predecessor_of_root(),
        }
    }
}

impl<K, V, C: Default> Default for SplayRankMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SplayRankMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a SplayRankMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pushes `start` and its chain of left descendants, leaving the subtree
/// minimum on top of the stack.
fn push_left_spine<K, V>(raw: &RawSplayMap<K, V>, start: Handle, stack: &mut SmallVec<[Handle; 16]>) {
    let mut h = start;
    loop {
        stack.push(h);
        match raw.node(h).left {
            Some(l) => h = l,
            None => break,
        }
    }
}

/// A borrowing iterator over the entries of a [`SplayRankMap`] in key
/// order.
///
/// Created by [`SplayRankMap::iter`]. Memory proportional to tree depth
/// (worst case O(n) for a splay tree, since nothing bounds its height).
pub struct Iter<'a, K, V> {
    raw: &'a RawSplayMap<K, V>,
    stack: SmallVec<[Handle; 16]>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.stack.pop()?;
        let node = self.raw.node(h);
        if let Some(r) = node.right {
            push_left_spine(self.raw, r, &mut self.stack);
        }
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// The fast enumeration strategy: a precomputed in-order walk.
///
/// O(1) amortized per step over shared access, at the price of rigidity:
/// the cursor snapshots the map's version at creation, and *any* subsequent
/// operation on the map — including lookups, which splay — invalidates it.
/// The next advance then fails with [`Error::CursorInvalidated`] rather
/// than ever yielding stale data.
///
/// The cursor holds no borrow of the map; pass the same map to every
/// [`next`](Self::next) call.
///
/// # Examples
///
/// ```
/// use splay_rank::{Error, SplayRankMap};
///
/// let mut map = SplayRankMap::new();
/// for key in [2, 1, 3] {
///     map.insert(key, ()).unwrap();
/// }
///
/// let mut cursor = map.fast_cursor();
/// assert_eq!(cursor.next(&map).unwrap(), Some((&1, &(), 0)));
///
/// // Even a pure lookup splays, so it invalidates the cursor.
/// map.contains_key(&3);
/// assert_eq!(cursor.next(&map), Err(Error::CursorInvalidated));
/// ```
pub struct FastCursor {
    stack: SmallVec<[Handle; 16]>,
    version: u64,
    rank: usize,
}

impl FastCursor {
    /// Advances the cursor, yielding `(key, value, rank)`, or `None` once
    /// the walk is exhausted.
    ///
    /// # Errors
    ///
    /// [`Error::CursorInvalidated`] if the map has been structurally
    /// mutated (or merely queried — lookups splay) since the cursor was
    /// created. This is a programming-contract violation and is never
    /// recovered internally.
    ///
    /// # Panics
    ///
    /// May panic if passed a different map than the one that created the
    /// cursor.
    pub fn next<'a, K, V, C>(&mut self, map: &'a SplayRankMap<K, V, C>) -> Result<Option<(&'a K, &'a V, usize)>, Error> {
        if self.version != map.raw.version() {
            return Err(Error::CursorInvalidated);
        }
        let Some(h) = self.stack.pop() else {
            return Ok(None);
        };
        let node = map.raw.node(h);
        if let Some(r) = node.right {
            push_left_spine(&map.raw, r, &mut self.stack);
        }
        let rank = self.rank;
        self.rank += 1;
        Ok(Some((&node.key, &node.value, rank)))
    }
}

/// The robust enumeration strategy: stateless between steps beyond the last
/// yielded key.
///
/// Each step re-derives its position with a nearest-greater query, so the
/// cursor tolerates arbitrary mutation of the map between steps — it simply
/// continues from the next key still present. Costs O(log n) amortized per
/// step, and each step splays (hence `&mut` access).
///
/// # Examples
///
/// ```
/// use splay_rank::SplayRankMap;
///
/// let mut map = SplayRankMap::new();
/// for key in [2, 1, 3] {
///     map.insert(key, ()).unwrap();
/// }
///
/// let mut cursor = map.robust_cursor();
/// assert_eq!(cursor.next(&mut map), Some((&1, &(), 0)));
///
/// // Mutation between steps is fine; the walk continues past it.
/// map.remove(&2);
/// assert_eq!(cursor.next(&mut map), Some((&3, &(), 1)));
/// assert_eq!(cursor.next(&mut map), None);
/// ```
pub struct RobustCursor<K> {
    last: Option<K>,
}

impl<K: Clone> RobustCursor<K> {
    /// Advances the cursor, yielding `(key, value, rank)`, or `None` when
    /// no greater key remains.
    ///
    /// The rank is the key's rank *at the time of this step*; earlier
    /// mutations may have shifted it since the key was yielded.
    #[allow(clippy::cast_sign_loss)]
    pub fn next<'a, V, C>(&mut self, map: &'a mut SplayRankMap<K, V, C>) -> Option<(&'a K, &'a V, usize)>
    where
        C: Comparator<K>,
    {
        let found = match self.last.take() {
            None => map.raw.splay_least().map(|h| (h, 0)),
            Some(last) => {
                let found = map.raw_nearest_greater(&last);
                if found.is_none() {
                    // Exhausted; stay parked at the end.
                    self.last = Some(last);
                }
                found
            }
        };
        let (h, rank) = found?;
        let node = map.raw.node(h);
        self.last = Some(node.key.clone());
        Some((&node.key, &node.value, rank as usize))
    }
}
