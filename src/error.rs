use thiserror::Error;

use crate::tree::NodeId;

/// Precondition failures of [`Tree`](crate::Tree) operations.
///
/// Absence (a missing key, an empty queue) is never an error; those operations return
/// `Option`.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum TreeError {
    /// The operation needs at least one node.
    #[error("the tree is empty")]
    Empty,
    /// Only a node with a parent can be rotated.
    #[error("node {0:?} is the root and has no parent to rotate above")]
    NoParent(NodeId),
    /// The id does not name a live node of this tree.
    #[error("node {0:?} is not in the tree")]
    StaleNode(NodeId),
}
