//! Ordering strategies for tree payloads.

use core::cmp::Ordering;

/// A total order over `T`, chosen once per tree at construction.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator, as is [`Natural`] for `T: Ord`.
///
/// It is a logic error for a comparator to disagree with itself over the lifetime of a tree
/// (for example by consulting a `Cell`). The behavior resulting from such a logic error is
/// not specified, but will be encapsulated to the tree that observed it and not result in
/// undefined behavior.
///
/// # Examples
///
/// ```
/// use sgtree::Tree;
///
/// // Longest strings first.
/// let mut tree = Tree::with_comparator(|a: &&str, b: &&str| b.len().cmp(&a.len()).then(a.cmp(b)));
/// tree.extend(["fig", "banana", "kiwi"]);
/// let sorted: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(sorted, ["banana", "kiwi", "fig"]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The [`Ord`] order of `T`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator.
///
/// # Examples
///
/// ```
/// use sgtree::{Natural, PriorityQueue, Reversed};
///
/// let mut queue = PriorityQueue::with_comparator(Reversed(Natural));
/// queue.extend([1, 3, 2]);
/// assert_eq!(queue.pop(), Some(3));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
