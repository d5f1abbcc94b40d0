use super::handle::Handle;
use super::size::Size;

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A binary search tree vertex stored in the arena.
///
/// Child links are the structural edges. `parent` is a back-reference used only to walk
/// upwards; it is never followed to drop anything.
#[derive(Clone)]
pub(crate) struct Node<T> {
    value: T,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    // The number of nodes in the subtree rooted here, including this one.
    size: Size,
}

impl<T> Node<T> {
    /// Creates a childless node hanging from `parent`.
    pub(crate) const fn new_leaf(value: T, parent: Option<Handle>) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub(crate) const fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns the side `child` hangs from, if it is a child of this node.
    #[inline]
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    pub(crate) const fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub(crate) const fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}
