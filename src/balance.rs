//! Rebalancing strategies.
//!
//! A [`Tree`](crate::Tree) owns exactly one [`Balancer`] and calls it synchronously after every
//! insertion and deletion, and on `clear`. The balancer sees the tree only through
//! [`Restructure`], which can relink nodes but never create, drop or modify values.

use crate::TreeError;
use crate::raw::RawTree;
use crate::tree::{NodeId, NodeRef};

mod scapegoat;

pub use scapegoat::Scapegoat;

/// Observes structural changes of a tree and may reshape it in response.
///
/// Every hook defaults to doing nothing.
pub trait Balancer {
    /// Called after `node` was linked into the tree as a new leaf.
    fn on_insert<T>(&mut self, tree: &mut Restructure<'_, T>, node: NodeId) {
        let _ = (tree, node);
    }

    /// Called after a node was removed. `parent` is the parent of the position the node
    /// occupied, or `None` if it was the root.
    fn on_delete<T>(&mut self, tree: &mut Restructure<'_, T>, parent: Option<NodeId>) {
        let _ = (tree, parent);
    }

    /// Called after every node was dropped.
    fn on_clear(&mut self) {}
}

/// The balancer that never rebalances; the tree's shape follows insertion order.
///
/// # Examples
///
/// ```
/// use sgtree::{Natural, Tree, Unbalanced};
///
/// let mut tree = Tree::with_balancer(Natural, Unbalanced);
/// tree.extend(1..=7);
/// assert_eq!(tree.height(), 6);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Unbalanced;

impl Balancer for Unbalanced {}

/// Restructuring access handed to a [`Balancer`].
///
/// Methods taking a [`NodeId`] panic if it does not name a live node; the ids a balancer
/// receives from its hooks always do.
pub struct Restructure<'a, T> {
    raw: &'a mut RawTree<T>,
}

impl<'a, T> Restructure<'a, T> {
    pub(crate) const fn new(raw: &'a mut RawTree<T>) -> Self {
        Self { raw }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.raw.root().map(NodeId)
    }

    /// A read-only view of `id`, or `None` if it is stale.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.raw.contains(id.0).then(|| NodeRef::new(&*self.raw, id.0))
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.raw.node(id.0).parent().map(NodeId)
    }

    #[must_use]
    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        self.raw.sibling(id.0).map(NodeId)
    }

    /// Number of nodes in the subtree rooted at `id`.
    #[must_use]
    pub fn size(&self, id: NodeId) -> usize {
        self.raw.size_of(Some(id.0))
    }

    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.raw.depth(id.0)
    }

    /// Promotes `id` one level above its parent; see [`Tree::rotate`](crate::Tree::rotate).
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] for a dead id, [`TreeError::NoParent`] for the root.
    pub fn rotate(&mut self, id: NodeId) -> Result<(), TreeError> {
        rotate(self.raw, id)
    }

    /// Reshapes the subtree rooted at `id` to minimal height.
    ///
    /// The node of in-order rank `size / 2` is rotated up into the subtree's root position,
    /// then both halves are rebuilt the same way. The in-order sequence is unchanged.
    ///
    /// # Complexity
    ///
    /// O(size × height) rotations in the worst case, O(size) for an already shallow subtree.
    pub fn rebuild(&mut self, id: NodeId) {
        self.raw.rebuild(id.0);
    }
}

pub(crate) fn rotate<T>(raw: &mut RawTree<T>, id: NodeId) -> Result<(), TreeError> {
    if !raw.contains(id.0) {
        return Err(TreeError::StaleNode(id));
    }
    if raw.node(id.0).parent().is_none() {
        return Err(TreeError::NoParent(id));
    }
    raw.rotate_up(id.0);
    Ok(())
}
