use alloc::vec;
use core::fmt;
use core::iter::FusedIterator;

use super::NodeRef;
use crate::raw::{Handle, RawTree, Stack};

// All traversals keep pending nodes on an explicit stack rather than the call stack, so their
// memory is bounded by the tree height. Each knows how many nodes remain, which makes them
// exact-size.

/// An in-order (ascending) traversal over the nodes of a [`Tree`](crate::Tree).
///
/// This `struct` is created by [`Tree::in_order`](crate::Tree::in_order) or
/// [`NodeRef::in_order`]. A traversal is one-shot; call the factory again to restart.
///
/// # Examples
///
/// ```
/// use sgtree::Tree;
///
/// let tree = Tree::from([3, 1, 2]);
/// let values: Vec<_> = tree.in_order().map(|node| *node.value()).collect();
/// assert_eq!(values, [1, 2, 3]);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct InOrder<'a, T> {
    tree: &'a RawTree<T>,
    stack: Stack<Handle>,
    current: Option<Handle>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(tree: &'a RawTree<T>, start: Option<Handle>) -> Self {
        Self {
            tree,
            stack: Stack::new(),
            current: start,
            remaining: tree.size_of(start),
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.tree.node(handle).left();
        }

        let handle = self.stack.pop()?;
        self.current = self.tree.node(handle).right();
        self.remaining -= 1;
        Some(NodeRef::new(self.tree, handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// A pre-order (node, left, right) traversal over the nodes of a [`Tree`](crate::Tree).
///
/// This `struct` is created by [`Tree::pre_order`](crate::Tree::pre_order) or
/// [`NodeRef::pre_order`].
///
/// # Examples
///
/// ```
/// use sgtree::{Natural, Tree, Unbalanced};
///
/// let mut tree = Tree::with_balancer(Natural, Unbalanced);
/// tree.extend([2, 1, 3]);
/// let values: Vec<_> = tree.pre_order().map(|node| *node.value()).collect();
/// assert_eq!(values, [2, 1, 3]);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PreOrder<'a, T> {
    tree: &'a RawTree<T>,
    stack: Stack<Handle>,
    remaining: usize,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(tree: &'a RawTree<T>, start: Option<Handle>) -> Self {
        Self {
            tree,
            stack: start.into_iter().collect(),
            remaining: tree.size_of(start),
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let node = self.tree.node(handle);
        // Right first, so the left subtree is popped first.
        self.stack.extend([node.right(), node.left()].into_iter().flatten());
        self.remaining -= 1;
        Some(NodeRef::new(self.tree, handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// A post-order (left, right, node) traversal over the nodes of a [`Tree`](crate::Tree).
///
/// This `struct` is created by [`Tree::post_order`](crate::Tree::post_order) or
/// [`NodeRef::post_order`].
///
/// # Examples
///
/// ```
/// use sgtree::{Natural, Tree, Unbalanced};
///
/// let mut tree = Tree::with_balancer(Natural, Unbalanced);
/// tree.extend([2, 1, 3]);
/// let values: Vec<_> = tree.post_order().map(|node| *node.value()).collect();
/// assert_eq!(values, [1, 3, 2]);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PostOrder<'a, T> {
    tree: &'a RawTree<T>,
    // `true` once a node's children have been pushed above it.
    stack: Stack<(Handle, bool)>,
    remaining: usize,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(tree: &'a RawTree<T>, start: Option<Handle>) -> Self {
        Self {
            tree,
            stack: start.map(|handle| (handle, false)).into_iter().collect(),
            remaining: tree.size_of(start),
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (handle, expanded) = self.stack.pop()?;
            if expanded {
                self.remaining -= 1;
                return Some(NodeRef::new(self.tree, handle));
            }

            let node = self.tree.node(handle);
            self.stack.push((handle, true));
            self.stack.extend([node.right(), node.left()].into_iter().flatten().map(|child| (child, false)));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// An iterator over the values of a [`Tree`](crate::Tree), in ascending order.
///
/// This `struct` is created by the [`iter`](crate::Tree::iter) method on
/// [`Tree`](crate::Tree).
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    inner: InOrder<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a RawTree<T>) -> Self {
        Self {
            inner: InOrder::new(tree, tree.root()),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|node| node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An owning iterator over the values of a [`Tree`](crate::Tree), in ascending order.
///
/// This `struct` is created by the `into_iter` method on [`Tree`](crate::Tree) (provided by
/// the [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use sgtree::Tree;
///
/// let tree = Tree::from([String::from("b"), String::from("a")]);
/// let owned: Vec<String> = tree.into_iter().collect();
/// assert_eq!(owned, ["a", "b"]);
/// ```
#[derive(Clone)]
pub struct IntoIter<T> {
    inner: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: vec::Vec<T>) -> Self {
        Self {
            inner: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<T> Clone for InOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            current: self.current,
            remaining: self.remaining,
        }
    }
}

impl<T> Clone for PreOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T> Clone for PostOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

macro_rules! traversal_traits {
    ($($name:ident),* $(,)?) => {$(
        impl<T> ExactSizeIterator for $name<'_, T> {}

        impl<T> FusedIterator for $name<'_, T> {}

        impl<T: fmt::Debug> fmt::Debug for $name<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.clone()).finish()
            }
        }
    )*};
}

traversal_traits!(InOrder, PreOrder, PostOrder, Iter);
