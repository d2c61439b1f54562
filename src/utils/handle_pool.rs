use std::cmp::Ordering;
use std::collections::binary_heap::BinaryHeap;
use std::marker::PhantomData;

use super::handle::{HandleIndex, HandleLike};

#[derive(PartialEq, Eq)]
struct InverseHandleIndex(HandleIndex);

impl PartialOrd for InverseHandleIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InverseHandleIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

/// `HandlePool` manages the manipulations of a `Handle` collection, which are
/// created with a continuous `index` field. Freed indices are recycled, smallest
/// first, so the resources could be stored densely.
pub struct HandlePool<H: HandleLike> {
    alives: Vec<bool>,
    frees: BinaryHeap<InverseHandleIndex>,
    reserved: usize,
    _phantom: PhantomData<H>,
}

impl<H: HandleLike> Default for HandlePool<H> {
    fn default() -> Self {
        HandlePool::new()
    }
}

impl<H: HandleLike> HandlePool<H> {
    /// Constructs a new, empty `HandlePool`.
    pub fn new() -> Self {
        HandlePool {
            alives: Vec::new(),
            frees: BinaryHeap::new(),
            reserved: 0,
            _phantom: PhantomData,
        }
    }

    /// Constructs a new `HandlePool` whose first `n` indices are reserved. Reserved
    /// handles are alive forever and never returned by `create`.
    pub fn with_reserved(n: usize) -> Self {
        let mut pool = Self::new();
        pool.alives.resize(n, true);
        pool.reserved = n;
        pool
    }

    /// Creates a unused handle. Returns `None` if all the indices are exhausted.
    pub fn create(&mut self) -> Option<H> {
        if let Some(InverseHandleIndex(index)) = self.frees.pop() {
            self.alives[index as usize] = true;
            return Some(H::new(index));
        }

        // The maximum index is kept as the sentinel.
        let index = self.alives.len();
        if index >= HandleIndex::max_value() as usize {
            return None;
        }

        self.alives.push(true);
        Some(H::new(index as HandleIndex))
    }

    /// Returns true if this handle was created by `HandlePool`, and has not been
    /// freed yet.
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        handle.is_valid()
            && self
                .alives
                .get(handle.index() as usize)
                .cloned()
                .unwrap_or(false)
    }

    /// Recycles the handle index. Returns false if the handle is not alive or reserved.
    pub fn free(&mut self, handle: H) -> bool {
        if !self.contains(handle) || (handle.index() as usize) < self.reserved {
            return false;
        }

        self.alives[handle.index() as usize] = false;
        self.frees.push(InverseHandleIndex(handle.index()));
        true
    }

    /// Returns the total number of alive handle in this `HandlePool`.
    #[inline]
    pub fn len(&self) -> usize {
        self.alives.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the alive handles.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = H> + 'a {
        self.alives
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| H::new(i as HandleIndex))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::handle::Handle;

    #[test]
    fn basic() {
        let mut pool: HandlePool<Handle> = HandlePool::new();
        assert!(pool.is_empty());

        let e1 = pool.create().unwrap();
        assert!(e1.is_valid());
        assert!(pool.contains(e1));
        assert_eq!(pool.len(), 1);

        assert!(pool.free(e1));
        assert!(!pool.contains(e1));
        assert!(!pool.free(e1));
        assert_eq!(pool.len(), 0);

        assert!(!pool.contains(Handle::INVALID));
        assert!(!pool.free(Handle::INVALID));
    }

    #[test]
    fn index_reuse() {
        let mut pool: HandlePool<Handle> = HandlePool::new();
        let v: Vec<_> = (0..10).map(|_| pool.create().unwrap()).collect();

        pool.free(v[7]);
        pool.free(v[3]);

        assert_eq!(pool.create().unwrap().index(), 3);
        assert_eq!(pool.create().unwrap().index(), 7);
        assert_eq!(pool.create().unwrap().index(), 10);
    }

    #[test]
    fn reserved() {
        let mut pool: HandlePool<Handle> = HandlePool::with_reserved(1);
        assert!(pool.contains(Handle::new(0)));
        assert_eq!(pool.create().unwrap().index(), 1);
        assert!(!pool.free(Handle::new(0)));

        let alives: Vec<_> = pool.iter().map(|v| v.index()).collect();
        assert_eq!(alives, vec![0, 1]);
    }
}
