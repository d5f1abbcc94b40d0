//! A stable priority queue on top of [`Tree`].

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use crate::balance::Scapegoat;
use crate::compare::{Comparator, Natural};
use crate::tree::{self, Tree};

/// A queued value with its arrival number.
#[derive(Clone, Debug)]
struct Ticket<T> {
    value: T,
    sequence: u64,
}

/// Orders tickets by the user comparator, then by arrival.
#[derive(Clone, Copy, Debug, Default)]
struct Arrival<C>(C);

impl<T, C: Comparator<T>> Comparator<Ticket<T>> for Arrival<C> {
    #[inline]
    fn compare(&self, a: &Ticket<T>, b: &Ticket<T>) -> Ordering {
        self.0.compare(&a.value, &b.value).then(a.sequence.cmp(&b.sequence))
    }
}

/// A min-priority queue with first-in, first-out order among equal priorities.
///
/// [`pop`](Self::pop) returns the smallest value under the comparator `C`. Values that compare
/// equal come out in the order they were pushed. Use [`Reversed`](crate::Reversed) for a
/// max-queue.
///
/// # Examples
///
/// ```
/// use sgtree::PriorityQueue;
///
/// let mut jobs = PriorityQueue::with_comparator(|a: &(u8, &str), b: &(u8, &str)| a.0.cmp(&b.0));
/// jobs.push((2, "compile"));
/// jobs.push((1, "fetch"));
/// jobs.push((2, "link"));
///
/// assert_eq!(jobs.peek(), Some(&(1, "fetch")));
/// assert_eq!(jobs.pop(), Some((1, "fetch")));
/// // Equal priorities leave in push order.
/// assert_eq!(jobs.pop(), Some((2, "compile")));
/// assert_eq!(jobs.pop(), Some((2, "link")));
/// assert_eq!(jobs.pop(), None);
/// ```
pub struct PriorityQueue<T, C = Natural> {
    tree: Tree<Ticket<T>, Arrival<C>, Scapegoat>,
    next_sequence: u64,
}

impl<T: Ord> PriorityQueue<T> {
    /// Creates an empty queue ordered by [`Ord`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> PriorityQueue<T, C> {
    /// Creates an empty queue ordered by `comparator`.
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: Tree::with_balancer(Arrival(comparator), Scapegoat::default()),
            next_sequence: 0,
        }
    }

    /// Returns the number of queued values.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the value [`pop`](Self::pop) would remove, without removing it.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.tree.first().map(|node| &node.value().value)
    }

    /// Returns the value [`pop_last`](Self::pop_last) would remove.
    #[must_use]
    pub fn peek_last(&self) -> Option<&T> {
        self.tree.last().map(|node| &node.value().value)
    }

    /// Gets an iterator over the queued values in the order [`pop`](Self::pop) would return
    /// them.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::PriorityQueue;
    ///
    /// let queue: PriorityQueue<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Consumes the queue and returns its values in the order [`pop`](Self::pop) would
    /// return them.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.tree.into_iter().map(|ticket| ticket.value).collect()
    }
}

impl<T, C: Comparator<T>> PriorityQueue<T, C> {
    /// Enqueues `value` behind every queued value it compares equal to.
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    pub fn push(&mut self, value: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.tree.add(Ticket { value, sequence });
    }

    /// Removes and returns the smallest value, the earliest pushed among equals.
    ///
    /// Returns `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        let id = self.tree.first()?.id();
        self.tree.delete(id).ok().map(|ticket| ticket.value)
    }

    /// Removes and returns the largest value, the latest pushed among equals.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<_> = [1, 9, 5].into_iter().collect();
    /// assert_eq!(queue.pop_last(), Some(9));
    /// assert_eq!(queue.pop(), Some(1));
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        let id = self.tree.last()?.id();
        self.tree.delete(id).ok().map(|ticket| ticket.value)
    }

    /// Drops every queued value.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.next_sequence = 0;
    }
}

impl<T: Clone, C: Clone> Clone for PriorityQueue<T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            next_sequence: self.next_sequence,
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for PriorityQueue<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T>> Extend<T> for PriorityQueue<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for PriorityQueue<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::default();
        queue.extend(iter);
        queue
    }
}

impl<'a, T, C> IntoIterator for &'a PriorityQueue<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An iterator over the values of a `PriorityQueue`, in pop order.
///
/// This `struct` is created by the [`iter`](PriorityQueue::iter) method on
/// [`PriorityQueue`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    inner: tree::Iter<'a, Ticket<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|ticket| &ticket.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Reversed;

    #[test]
    fn equal_priorities_are_fifo() {
        let mut queue = PriorityQueue::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        queue.push((5, 'a'));
        queue.push((5, 'b'));
        queue.push((1, 'c'));
        queue.push((5, 'd'));

        assert_eq!(queue.pop(), Some((1, 'c')));
        assert_eq!(queue.pop(), Some((5, 'a')));
        assert_eq!(queue.pop(), Some((5, 'b')));
        assert_eq!(queue.pop(), Some((5, 'd')));
        assert!(queue.is_empty());
    }

    #[test]
    fn reversed_pops_largest_first() {
        let mut queue = PriorityQueue::with_comparator(Reversed(Natural));
        queue.extend([4, 8, 1, 8]);
        assert_eq!(queue.peek(), Some(&8));
        assert_eq!(queue.peek_last(), Some(&1));
        assert_eq!(queue.into_sorted_vec(), [8, 8, 4, 1]);
    }

    #[test]
    fn empty_queue_is_none() {
        let mut queue: PriorityQueue<u8> = PriorityQueue::new();
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.pop_last(), None);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn tickets_never_compare_equal() {
        let order = Arrival(Natural);
        let first = Ticket { value: 7, sequence: 0 };
        let second = Ticket { value: 7, sequence: 1 };
        assert_eq!(order.compare(&first, &second), Ordering::Less);
        assert_eq!(order.compare(&second, &first), Ordering::Greater);
        assert_eq!(order.compare(&first, &first), Ordering::Equal);
    }

    #[test]
    fn clear_resets_and_reuses() {
        let mut queue: PriorityQueue<i32> = (0..100).collect();
        queue.clear();
        assert!(queue.is_empty());
        queue.push(3);
        assert_eq!(alloc::format!("{queue:?}"), "[3]");
    }
}
