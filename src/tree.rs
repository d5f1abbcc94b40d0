//! The ordered binary search tree at the core of the crate.

use core::cmp::Ordering;
use core::fmt;

use crate::TreeError;
use crate::balance::{self, Balancer, Restructure, Scapegoat};
use crate::compare::{Comparator, Natural};
use crate::raw::RawTree;

mod capacity;
mod node_ref;
mod traversal;

pub use node_ref::{NodeId, NodeRef};
pub use traversal::{InOrder, IntoIter, Iter, PostOrder, PreOrder};

/// An ordered binary search tree with a pluggable comparator and rebalancing strategy.
///
/// Values are kept in the order given by the comparator `C` ([`Natural`] by default). Equal
/// values are allowed and are placed after the ones already present. After every insertion
/// and deletion the balancer `B` ([`Scapegoat`] by default) may reshape the tree; reshaping
/// never changes the in-order sequence and never moves a value to a different [`NodeId`].
///
/// Nodes live in an arena owned by the tree, so dropping or clearing the tree drops every
/// value exactly once and no node is reachable from outside except through a borrow of the
/// tree.
///
/// It is a logic error for a value to be modified in such a way that its ordering relative
/// to any other value changes while it is in the tree. The behavior resulting from such a
/// logic error is not specified, but will be encapsulated to the tree that observed it and not
/// result in undefined behavior.
///
/// # Examples
///
/// ```
/// use sgtree::Tree;
///
/// let mut tree = Tree::new();
/// let five = tree.add(5);
/// tree.extend([3, 8, 1]);
///
/// assert_eq!(tree.len(), 4);
/// assert!(tree.contains(&3));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
///
/// assert_eq!(tree.delete(five), Ok(5));
/// assert_eq!(tree.first().map(|node| *node.value()), Some(1));
/// ```
#[derive(Clone)]
pub struct Tree<T, C = Natural, B = Scapegoat> {
    raw: RawTree<T>,
    comparator: C,
    balancer: B,
}

impl<T: Ord> Tree<T> {
    /// Makes a new, empty `Tree` ordered by [`Ord`] and balanced by a default [`Scapegoat`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_balancer(Natural, Scapegoat::default())
    }
}

impl<T, C: Comparator<T>> Tree<T, C> {
    /// Makes a new, empty `Tree` ordered by `comparator` and balanced by a default
    /// [`Scapegoat`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// tree.extend([1, 3, 2]);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_balancer(comparator, Scapegoat::default())
    }
}

impl<T, C, B: Balancer> Tree<T, C, B> {
    /// Makes a new, empty `Tree` with an explicit comparator and balancing strategy.
    ///
    /// `balancer` is reset with [`Balancer::on_clear`] first, so one taken from a populated
    /// tree starts counting from zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::{Natural, Scapegoat, Tree};
    ///
    /// let mut tree = Tree::with_balancer(Natural, Scapegoat::new(0.6));
    /// tree.add("a");
    /// assert_eq!(tree.balancer().alpha(), 0.6);
    /// ```
    #[must_use]
    pub fn with_balancer(comparator: C, mut balancer: B) -> Self {
        balancer.on_clear();
        Self {
            raw: RawTree::new(),
            comparator,
            balancer,
        }
    }
}

impl<T, C, B> Tree<T, C, B> {

    /// Returns the number of values in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The balancer attached at construction, for inspecting its state.
    #[must_use]
    pub fn balancer(&self) -> &B {
        &self.balancer
    }

    /// Returns the root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.raw.root().map(|handle| NodeRef::new(&self.raw, handle))
    }

    /// Returns the node named by `id`, or `None` if it is no longer in the tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.raw.contains(id.0).then(|| NodeRef::new(&self.raw, id.0))
    }

    /// Returns the node holding the smallest value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::Tree;
    ///
    /// let tree = Tree::from([2, 1, 3]);
    /// assert_eq!(tree.first().map(|node| *node.value()), Some(1));
    /// assert_eq!(tree.last().map(|node| *node.value()), Some(3));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn first(&self) -> Option<NodeRef<'_, T>> {
        self.root().map(|root| root.leftmost())
    }

    /// Returns the node holding the largest value.
    #[must_use]
    pub fn last(&self) -> Option<NodeRef<'_, T>> {
        self.root().map(|root| root.rightmost())
    }

    /// Returns the distance from the root to `id`.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `id` is no longer in the tree.
    pub fn depth(&self, id: NodeId) -> Result<usize, TreeError> {
        self.node(id).map(|node| node.depth()).ok_or(TreeError::StaleNode(id))
    }

    /// Returns the number of edges on the longest root-to-leaf path; `0` for an empty or
    /// single-node tree.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Visits every node in ascending order.
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(&self.raw, self.raw.root())
    }

    /// Visits every node parent-first, then its left and right subtrees.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(&self.raw, self.raw.root())
    }

    /// Visits every node after both of its subtrees.
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(&self.raw, self.raw.root())
    }

    /// Gets an iterator over the values of the tree, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::Tree;
    ///
    /// let tree = Tree::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.len(), 2);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw)
    }

    /// Promotes `id` one level, making its former parent its child.
    ///
    /// The child of `id` on the side facing the former parent moves under the former parent.
    /// The in-order sequence is unchanged and only the two rotated nodes change size.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `id` is no longer in the tree, [`TreeError::NoParent`] if
    /// it is the root. The tree is left untouched on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::{Natural, Tree, TreeError, Unbalanced};
    ///
    /// let mut tree = Tree::with_balancer(Natural, Unbalanced);
    /// let two = tree.add(2);
    /// let one = tree.add(1);
    ///
    /// tree.rotate(one)?;
    /// assert_eq!(tree.root().map(|node| node.id()), Some(one));
    /// assert_eq!(tree.rotate(one), Err(TreeError::NoParent(one)));
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2]);
    /// # let _ = two;
    /// # Ok::<(), TreeError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn rotate(&mut self, id: NodeId) -> Result<(), TreeError> {
        balance::rotate(&mut self.raw, id)
    }

    /// Gives mutable access to a value whose ordering the caller will not change.
    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut T {
        self.raw.node_mut(id.0).value_mut()
    }
}

impl<T, C: Comparator<T>, B> Tree<T, C, B> {
    /// Walks down from the root looking for `value`.
    ///
    /// Returns the node equal to `value` if there is one, otherwise the last node visited:
    /// the one below which `value` would be inserted.
    ///
    /// # Errors
    ///
    /// [`TreeError::Empty`] if the tree holds no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::{Tree, TreeError};
    ///
    /// let tree = Tree::from([10, 20, 30]);
    /// assert_eq!(*tree.search(&20)?.value(), 20);
    /// assert_eq!(*tree.search(&25)?.value(), 30);
    /// assert_eq!(Tree::<i32>::new().search(&1).err(), Some(TreeError::Empty));
    /// # Ok::<(), TreeError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height) comparisons.
    pub fn search(&self, value: &T) -> Result<NodeRef<'_, T>, TreeError> {
        self.search_by(|node| self.comparator.compare(value, node))
    }

    /// Like [`search`](Self::search), steered by `probe`, which reports how the sought
    /// position compares against a node's value.
    ///
    /// `probe` must be consistent with the tree's comparator.
    ///
    /// # Errors
    ///
    /// [`TreeError::Empty`] if the tree holds no values.
    pub fn search_by<F>(&self, probe: F) -> Result<NodeRef<'_, T>, TreeError>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.raw
            .search_by(probe)
            .map(|probe| NodeRef::new(&self.raw, probe.handle))
            .ok_or(TreeError::Empty)
    }

    /// Returns a node equal to `value`, if any.
    #[must_use]
    pub fn find(&self, value: &T) -> Option<NodeRef<'_, T>> {
        self.find_by(|node| self.comparator.compare(value, node))
    }

    /// Returns a node for which `probe` reports [`Ordering::Equal`], if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::Tree;
    ///
    /// let tree = Tree::from([(1, "one"), (2, "two")]);
    /// let two = tree.find_by(|(key, _)| 2.cmp(key));
    /// assert_eq!(two.map(|node| node.value().1), Some("two"));
    /// ```
    pub fn find_by<F>(&self, probe: F) -> Option<NodeRef<'_, T>>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.raw
            .search_by(probe)
            .filter(|probe| probe.ordering == Ordering::Equal)
            .map(|probe| NodeRef::new(&self.raw, probe.handle))
    }

    /// Returns `true` if the tree holds a value equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }
}

impl<T, C: Comparator<T>, B: Balancer> Tree<T, C, B> {
    /// Inserts `value` as a new leaf and returns its id.
    ///
    /// Values equal to ones already present are kept and ordered after them. The balancer
    /// runs once the leaf is linked in.
    ///
    /// # Complexity
    ///
    /// O(height) comparisons, plus whatever restructuring the balancer does.
    pub fn add(&mut self, value: T) -> NodeId {
        let comparator = &self.comparator;
        let node = NodeId(self.raw.insert_by(value, |new, existing| comparator.compare(new, existing)));
        self.balancer.on_insert(&mut Restructure::new(&mut self.raw), node);
        node
    }

    /// Removes the node named by `id` and returns its value.
    ///
    /// A node with two children is replaced by its in-order predecessor. Every other value
    /// keeps its id.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `id` is no longer in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// let id = tree.add('x');
    /// assert_eq!(tree.delete(id), Ok('x'));
    /// assert_eq!(tree.delete(id), Err(TreeError::StaleNode(id)));
    /// ```
    pub fn delete(&mut self, id: NodeId) -> Result<T, TreeError> {
        if !self.raw.contains(id.0) {
            return Err(TreeError::StaleNode(id));
        }
        let (value, parent) = self.raw.remove(id.0);
        self.balancer.on_delete(&mut Restructure::new(&mut self.raw), parent.map(NodeId));
        Ok(value)
    }

    /// Removes one value equal to `value` and returns it, or `None` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::Tree;
    ///
    /// let mut tree = Tree::from([1, 2, 2]);
    /// assert_eq!(tree.remove(&2), Some(2));
    /// assert_eq!(tree.remove(&2), Some(2));
    /// assert_eq!(tree.remove(&2), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let id = self.find(value)?.id();
        self.delete(id).ok()
    }

    /// Drops every value and resets the balancer.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.balancer.on_clear();
    }
}

impl<T: fmt::Debug, C, B> fmt::Debug for Tree<T, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default, B: Balancer + Default> Default for Tree<T, C, B> {
    fn default() -> Self {
        Self::with_balancer(C::default(), B::default())
    }
}

impl<T, C: Comparator<T>, B: Balancer> Extend<T> for Tree<T, C, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T, C, B> FromIterator<T> for Tree<T, C, B>
where
    C: Comparator<T> + Default,
    B: Balancer + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Tree<T> {
    /// Converts a `[T; N]` into a `Tree<T>`.
    ///
    /// ```
    /// use sgtree::Tree;
    ///
    /// let tree = Tree::from([4, 1, 3]);
    /// assert_eq!(tree.len(), 3);
    /// ```
    fn from(values: [T; N]) -> Self {
        let mut tree = Self::new();
        tree.raw.reserve(N);
        tree.extend(values);
        tree
    }
}

impl<'a, T, C, B> IntoIterator for &'a Tree<T, C, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C, B> IntoIterator for Tree<T, C, B> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Moves every value out of the tree, in ascending order.
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.raw.into_sorted_values())
    }
}
