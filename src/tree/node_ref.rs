use core::fmt;

use super::traversal::{InOrder, PostOrder, PreOrder};
use crate::raw::{Handle, RawTree};

/// Names one node of a [`Tree`](crate::Tree).
///
/// An id stays attached to its value for as long as the value is in the tree: rotations,
/// rebuilds and the deletion of other nodes never move a value to a different id. Once the
/// node itself is deleted the id is stale, and operations taking it report
/// [`TreeError::StaleNode`](crate::TreeError::StaleNode). A stale id may later be handed out
/// again for a new node; using an id after its node was deleted is a logic error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) Handle);

/// A borrowed view of one node and its neighbourhood.
///
/// # Examples
///
/// ```
/// use sgtree::{Tree, Unbalanced, Natural};
///
/// let mut tree = Tree::with_balancer(Natural, Unbalanced);
/// tree.extend([5, 3, 8, 1]);
///
/// let three = tree.find(&3).unwrap();
/// assert_eq!(three.parent().map(|n| *n.value()), Some(5));
/// assert_eq!(three.sibling().map(|n| *n.value()), Some(8));
/// assert_eq!(three.size(), 2);
/// assert_eq!(three.depth(), 1);
/// assert_eq!(*tree.root().unwrap().leftmost().value(), 1);
/// ```
pub struct NodeRef<'a, T> {
    tree: &'a RawTree<T>,
    handle: Handle,
}

impl<'a, T> NodeRef<'a, T> {
    #[inline]
    pub(crate) const fn new(tree: &'a RawTree<T>, handle: Handle) -> Self {
        Self { tree, handle }
    }

    #[inline]
    fn wrap(&self, handle: Option<Handle>) -> Option<Self> {
        handle.map(|handle| Self::new(self.tree, handle))
    }

    /// The id of this node.
    #[must_use]
    #[inline]
    pub const fn id(&self) -> NodeId {
        NodeId(self.handle)
    }

    /// The payload stored in this node.
    #[must_use]
    #[inline]
    pub fn value(&self) -> &'a T {
        self.tree.node(self.handle).value()
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.wrap(self.tree.node(self.handle).parent())
    }

    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.wrap(self.tree.node(self.handle).left())
    }

    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.wrap(self.tree.node(self.handle).right())
    }

    /// The other child of this node's parent; `None` for the root or an only child.
    #[must_use]
    pub fn sibling(&self) -> Option<Self> {
        self.wrap(self.tree.sibling(self.handle))
    }

    /// The minimum of this node's subtree, found by following left links.
    #[must_use]
    pub fn leftmost(&self) -> Self {
        Self::new(self.tree, self.tree.leftmost(self.handle))
    }

    /// The maximum of this node's subtree, found by following right links.
    #[must_use]
    pub fn rightmost(&self) -> Self {
        Self::new(self.tree, self.tree.rightmost(self.handle))
    }

    /// Number of nodes in this node's subtree, including itself.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tree.node(self.handle).size().to_usize()
    }

    /// Distance from the root, which has depth zero.
    ///
    /// # Complexity
    ///
    /// O(depth) - depth is derived from parent links, not stored.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tree.depth(self.handle)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tree.node(self.handle).parent().is_none()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.tree.node(self.handle).is_leaf()
    }

    /// In-order traversal of this node's subtree.
    pub fn in_order(&self) -> InOrder<'a, T> {
        InOrder::new(self.tree, Some(self.handle))
    }

    /// Pre-order traversal of this node's subtree.
    pub fn pre_order(&self) -> PreOrder<'a, T> {
        PreOrder::new(self.tree, Some(self.handle))
    }

    /// Post-order traversal of this node's subtree.
    pub fn post_order(&self) -> PostOrder<'a, T> {
        PostOrder::new(self.tree, Some(self.handle))
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.handle)
            .field("value", self.value())
            .field("size", &self.size())
            .finish()
    }
}
