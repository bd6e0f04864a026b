use alloc::vec::Vec;

use crate::policy::AllocationPolicy;

use super::handle::Handle;

/// The node pool: a slot arena plus an explicit stack of free slot indices.
///
/// The [`AllocationPolicy`] chosen at construction decides what happens on
/// allocation pressure and on free:
///
/// - `DynamicGrow`: freed handles are pushed on the free stack; allocation
///   pops it or grows the slot vector without bound.
/// - `DynamicDiscard`: freed slots are abandoned instead of pooled. Trailing
///   freed slots are released outright; interior ones are reclaimed on
///   `clear`/drop.
/// - `Fixed(n)`: storage for `n` slots is reserved up front and the arena
///   refuses to grow past `n` live slots — `try_alloc` returns `None`.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
    /// Live slot count, tracked explicitly: under `DynamicDiscard` an
    /// interior freed slot sits on neither the free stack nor the tail, so
    /// `slots.len() - free.len()` would overcount.
    live: usize,
    policy: AllocationPolicy,
}

impl<T> Arena<T> {
    pub(crate) fn new(policy: AllocationPolicy) -> Self {
        let slots = match policy {
            AllocationPolicy::Fixed(capacity) => Vec::with_capacity(capacity),
            AllocationPolicy::DynamicGrow | AllocationPolicy::DynamicDiscard => Vec::new(),
        };
        Self {
            slots,
            free: Vec::new(),
            live: 0,
            policy,
        }
    }

    pub(crate) const fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    pub(crate) fn capacity(&self) -> usize {
        match self.policy {
            AllocationPolicy::Fixed(capacity) => capacity,
            AllocationPolicy::DynamicGrow | AllocationPolicy::DynamicDiscard => self.slots.capacity(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.live
    }

    /// Allocates a slot, reusing a pooled one if available.
    ///
    /// Returns `None` only under `Fixed` once the pool and backing store are
    /// exhausted; the caller surfaces that as a resource error.
    pub(crate) fn try_alloc(&mut self, element: T) -> Option<Handle> {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()] = Some(element);
            self.live += 1;
            return Some(h);
        }
        if let AllocationPolicy::Fixed(capacity) = self.policy {
            if self.slots.len() >= capacity {
                return None;
            }
        }
        // Use strict less-than to ensure total slot count doesn't exceed
        // Handle::MAX after the push.
        assert!(
            self.slots.len() < Handle::MAX,
            "`Arena::try_alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(Some(element));
        self.live += 1;
        Some(Handle::from_index(self.slots.len() - 1))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Frees a slot, returning its element. The slot is cleared first so no
    /// key/value ownership lingers in the pool.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.live -= 1;
        match self.policy {
            AllocationPolicy::DynamicDiscard => {
                // Not retained for reuse; give trailing slots back outright.
                while matches!(self.slots.last(), Some(None)) {
                    self.slots.pop();
                }
            }
            AllocationPolicy::DynamicGrow | AllocationPolicy::Fixed(_) => self.free.push(handle),
        }
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}
