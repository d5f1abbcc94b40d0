use super::Tree;
use crate::balance::Scapegoat;
use crate::compare::Natural;
use crate::raw::RawTree;

impl<T: Ord> Tree<T> {
    /// Creates an empty tree with room for at least `capacity` values before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::Tree;
    ///
    /// let tree: Tree<i32> = Tree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawTree::with_capacity(capacity),
            comparator: Natural,
            balancer: Scapegoat::default(),
        }
    }
}

impl<T, C, B> Tree<T, C, B> {
    /// Returns how many values the tree can hold without reallocating.
    ///
    /// Slots freed by deletions are reused before the tree grows.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves room for at least `additional` more values.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::Tree;
    ///
    /// let mut tree = Tree::from([1]);
    /// tree.reserve(10);
    /// assert!(tree.capacity() >= 11);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }
}
