use core::cmp::Ordering;

/// A user-supplied total order over keys.
///
/// [`SplayRankMap`](crate::SplayRankMap) routes every key comparison through
/// its comparator, so keys only need [`Ord`] when the default
/// [`NaturalOrder`] is used.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator:
///
/// ```
/// use splay_rank::SplayRankMap;
///
/// let reverse = |a: &i32, b: &i32| b.cmp(a);
/// let mut map = SplayRankMap::with_comparator(reverse);
/// map.insert(1, "one").unwrap();
/// map.insert(2, "two").unwrap();
///
/// // Rank 0 is the *largest* key under the reversed order.
/// assert_eq!(map.get_by_rank(0).unwrap().0, &2);
/// ```
pub trait Comparator<K> {
    /// Compares two keys, returning a total [`Ordering`].
    fn cmp(&self, a: &K, b: &K) -> Ordering;
}

/// The default comparator: the key type's own [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    #[inline]
    fn cmp(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn cmp(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
