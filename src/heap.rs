//! Array-backed binary min-heap with an injected comparator.
//!
//! The queue stores its elements densely in a `Vec`, zero-indexed, with the
//! children of slot `i` at `2i + 1` and `2i + 2`. Ordering is supplied by a
//! [`Comparator`] bound at construction; there is no implicit fallback to
//! `Ord`, use [`NaturalOrder`] to ask for it explicitly.
//!
//! Beyond the usual push/pop, the queue supports removal of an arbitrary
//! element (restoring the invariant in a single directed pass), bottom-up
//! `heapify` and an in-place `heapsort` driven by the queue itself.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// Capacity a fresh or cleared queue starts from.
pub const INITIAL_CAPACITY: usize = 10;

/// A three-way comparison capability.
pub trait Comparator<T> {
    /// Compare `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Comparator delegating to `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Binary min-heap ordered by `C`.
#[derive(Clone)]
pub struct PriorityQueue<T, C> {
    elements: Vec<T>,
    comparator: C,
}

impl<T, C: Comparator<T>> PriorityQueue<T, C> {
    /// Create an empty queue ordered by `comparator`.
    pub fn new(comparator: C) -> Self {
        Self::with_capacity(INITIAL_CAPACITY, comparator)
    }

    /// Create an empty queue with room for `capacity` elements.
    pub fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            comparator,
        }
    }

    /// Insert `item`, sifting it up to its place.
    ///
    /// # Errors
    /// Returns `Error::Allocation` if the backing storage cannot grow.
    pub fn push(&mut self, item: T) -> Result<()> {
        self.ensure_capacity(self.elements.len() + 1)?;
        self.elements.push(item);
        self.sift_up(self.elements.len() - 1);
        Ok(())
    }

    /// Remove and return the minimum element.
    ///
    /// # Errors
    /// Returns `Error::Underflow` if the queue is empty.
    pub fn pop(&mut self) -> Result<T> {
        if self.elements.is_empty() {
            return Err(Error::Underflow);
        }
        // swap_remove moves the last element into the root slot.
        let root = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Ok(root)
    }

    /// Borrow the minimum element without removing it.
    ///
    /// # Errors
    /// Returns `Error::Underflow` if the queue is empty.
    pub fn peek(&self) -> Result<&T> {
        self.elements.first().ok_or(Error::Underflow)
    }

    /// Remove the first element comparing equal to `item` and return it.
    ///
    /// Absent items are a no-op. The hole is filled from the last slot and
    /// the moved element is sifted up if it beats its new parent, otherwise
    /// down; only one of the two directions can be violated.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let pos = self.position(item)?;
        let removed = self.elements.swap_remove(pos);
        if pos < self.elements.len() {
            if pos > 0 && self.less(pos, parent(pos)) {
                self.sift_up(pos);
            } else {
                self.sift_down(pos);
            }
        }
        Some(removed)
    }

    /// Like [`remove`](Self::remove), handing the removed value to `cleanup`.
    ///
    /// Returns whether an element was removed.
    pub fn remove_with<F>(&mut self, item: &T, cleanup: F) -> bool
    where
        F: FnOnce(T),
    {
        match self.remove(item) {
            Some(removed) => {
                cleanup(removed);
                true
            }
            None => false,
        }
    }

    /// Whether some element compares equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Allocated capacity of the backing storage.
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Drop all elements and shrink back to the initial capacity.
    pub fn clear(&mut self) {
        self.elements = Vec::with_capacity(INITIAL_CAPACITY);
    }

    /// Iterate over the elements in storage (heap) order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// The comparator this queue was built with.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Check the heap property at every slot.
    pub fn is_heap(&self) -> bool {
        (1..self.elements.len()).all(|i| !self.less(i, parent(i)))
    }

    fn ensure_capacity(&mut self, min_capacity: usize) -> Result<()> {
        let capacity = self.elements.capacity();
        if min_capacity > capacity {
            let grown = min_capacity.max(capacity + (capacity >> 1));
            self.elements
                .try_reserve_exact(grown - self.elements.len())?;
        }
        Ok(())
    }

    fn position(&self, item: &T) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| self.comparator.compare(e, item) == Ordering::Equal)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.comparator.compare(&self.elements[a], &self.elements[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let up = parent(pos);
            if !self.less(pos, up) {
                break;
            }
            self.elements.swap(pos, up);
            pos = up;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.elements.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, pos) {
                break;
            }
            self.elements.swap(pos, child);
            pos = child;
        }
    }
}

impl<T: Clone, C: Comparator<T>> PriorityQueue<T, C> {
    /// Replace the contents with copies of `items`, built bottom-up in O(n).
    ///
    /// # Errors
    /// Returns `Error::Allocation` if the backing storage cannot grow.
    pub fn heapify(&mut self, items: &[T]) -> Result<()> {
        self.clear();
        self.ensure_capacity(items.len())?;
        self.elements.extend_from_slice(items);
        for i in (0..items.len() / 2).rev() {
            self.sift_down(i);
        }
        Ok(())
    }

    /// Sort `items` ascending by pushing them through this queue.
    ///
    /// The queue is cleared first and left empty afterwards.
    ///
    /// # Errors
    /// Returns `Error::Allocation` if the backing storage cannot grow.
    pub fn heapsort(&mut self, items: &mut [T]) -> Result<()> {
        self.clear();
        self.ensure_capacity(items.len())?;
        for item in items.iter() {
            self.push(item.clone())?;
        }
        for slot in items.iter_mut() {
            *slot = self.pop()?;
        }
        Ok(())
    }
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

impl<'a, T, C> IntoIterator for &'a PriorityQueue<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}

/// Renders `[e0,e1,...]` in storage order.
impl<T: fmt::Display, C> fmt::Display for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn natural() -> PriorityQueue<i32, NaturalOrder> {
        PriorityQueue::new(NaturalOrder)
    }

    #[test]
    fn test_push_pop_ascending() {
        let mut heap = natural();
        for x in [5, 3, 8, 1, 9, 2] {
            heap.push(x).unwrap();
        }
        assert_eq!(*heap.peek().unwrap(), 1);
        let mut out = Vec::new();
        while !heap.is_empty() {
            out.push(heap.pop().unwrap());
        }
        assert_eq!(out, vec![1, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn test_underflow() {
        let mut heap = natural();
        assert!(matches!(heap.pop(), Err(Error::Underflow)));
        assert!(matches!(heap.peek(), Err(Error::Underflow)));
    }

    #[test]
    fn test_closure_comparator_max_heap() {
        let mut heap = PriorityQueue::new(|a: &i32, b: &i32| b.cmp(a));
        for x in [4, 7, 1] {
            heap.push(x).unwrap();
        }
        assert_eq!(heap.pop().unwrap(), 7);
        assert_eq!(heap.pop().unwrap(), 4);
    }

    #[test]
    fn test_growth_is_one_and_a_half() {
        let mut heap = natural();
        assert!(heap.capacity() >= INITIAL_CAPACITY);
        for x in 0..11 {
            heap.push(x).unwrap();
        }
        assert!(heap.capacity() >= 15);
        heap.clear();
        assert!(heap.is_empty());
        assert!(heap.capacity() >= INITIAL_CAPACITY);
    }

    #[test]
    fn test_remove_sifts_up_and_down() {
        let mut heap = natural();
        heap.heapify(&[1, 10, 2, 11, 12, 3, 4]).unwrap();
        // 4 moves into 11's slot below 10 and has to travel up.
        assert_eq!(heap.remove(&11), Some(11));
        assert!(heap.is_heap());
        assert_eq!(heap.iter().copied().collect::<Vec<_>>(), vec![1, 4, 2, 10, 12, 3]);
        // 3 moves into the root and has to travel down.
        assert_eq!(heap.remove(&1), Some(1));
        assert!(heap.is_heap());
        assert_eq!(*heap.peek().unwrap(), 2);
        assert_eq!(heap.remove(&99), None);
        assert_eq!(heap.len(), 5);
        assert!(!heap.contains(&11));
        assert!(heap.contains(&12));
    }

    #[test]
    fn test_remove_with_runs_cleanup() {
        let mut heap = natural();
        heap.heapify(&[3, 1, 2]).unwrap();
        let mut seen = None;
        assert!(heap.remove_with(&2, |v| seen = Some(v)));
        assert_eq!(seen, Some(2));
        assert!(!heap.remove_with(&2, |_| panic!("nothing to clean")));
    }

    #[test]
    fn test_heapsort_in_place() {
        let mut heap = natural();
        let mut items = vec![9, -1, 4, 4, 0, 7];
        heap.heapsort(&mut items).unwrap();
        assert_eq!(items, vec![-1, 0, 4, 4, 7, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut heap = natural();
        heap.heapify(&[2, 1, 3]).unwrap();
        let mut copy = heap.clone();
        copy.pop().unwrap();
        assert_eq!(heap.len(), 3);
        assert_eq!(copy.len(), 2);
        assert_eq!(*heap.peek().unwrap(), 1);
    }

    #[test]
    fn test_display() {
        let mut heap = natural();
        assert_eq!(heap.to_string(), "[]");
        heap.heapify(&[3, 1, 2]).unwrap();
        assert_eq!(heap.to_string(), "[1,3,2]");
        assert_eq!(heap.iter().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(i32),
        Pop,
        Remove(i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-50i32..50).prop_map(Op::Push),
            Just(Op::Pop),
            (-50i32..50).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_invariant_holds_after_any_ops(
            seed in prop::collection::vec(-50i32..50, 0..40),
            ops in prop::collection::vec(op(), 0..80),
        ) {
            let mut heap = PriorityQueue::new(NaturalOrder);
            heap.heapify(&seed).unwrap();
            prop_assert!(heap.is_heap());
            let mut model = seed.clone();

            for step in ops {
                match step {
                    Op::Push(x) => {
                        heap.push(x).unwrap();
                        model.push(x);
                    }
                    Op::Pop => {
                        match heap.pop() {
                            Ok(min) => {
                                let expected = *model.iter().min().unwrap();
                                prop_assert_eq!(min, expected);
                                let idx = model.iter().position(|&v| v == min).unwrap();
                                model.swap_remove(idx);
                            }
                            Err(_) => {
                                prop_assert!(model.is_empty());
                            }
                        }
                    }
                    Op::Remove(x) => {
                        let removed = heap.remove(&x);
                        match model.iter().position(|&v| v == x) {
                            Some(idx) => {
                                prop_assert_eq!(removed, Some(x));
                                model.swap_remove(idx);
                            }
                            None => {
                                prop_assert_eq!(removed, None);
                            }
                        }
                    }
                }
                prop_assert!(heap.is_heap());
                prop_assert_eq!(heap.len(), model.len());
            }
        }

        #[test]
        fn prop_heapsort_matches_std_sort(
            mut items in prop::collection::vec(any::<i16>(), 0..100),
        ) {
            let mut expected = items.clone();
            expected.sort();
            let mut heap = PriorityQueue::new(NaturalOrder);
            heap.heapsort(&mut items).unwrap();
            prop_assert_eq!(items, expected);
        }
    }
}
