use alloc::vec::Vec;
use core::cmp::Ordering;

use smallvec::{SmallVec, smallvec};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use super::size::Size;

/// Auxiliary stack used by walks that must not recurse; inline for trees up to 2^32 nodes
/// when balanced.
pub(crate) type Stack<T> = SmallVec<[T; 32]>;

/// The binary search tree core backing `Tree`.
///
/// Owns every node through the arena. The ordering of values is not known here: callers
/// steer every descent with a comparison closure, which keeps comparator and balancer
/// strategies out of the structural code.
#[derive(Clone)]
pub(crate) struct RawTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// Where a search walk stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Probe {
    /// The last node visited.
    pub(crate) handle: Handle,
    /// How the probe compared against that node's value.
    pub(crate) ordering: Ordering,
}

impl<T> RawTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Returns the number of nodes in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns `true` if `handle` names a live node of this tree.
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains(handle)
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    /// Size of the subtree behind a link; an absent link counts zero.
    #[inline]
    pub(crate) fn size_of(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |handle| self.node(handle).size().to_usize())
    }

    /// The other child of `handle`'s parent.
    pub(crate) fn sibling(&self, handle: Handle) -> Option<Handle> {
        let parent = self.node(self.node(handle).parent()?);
        parent.child(parent.side_of(handle)?.opposite())
    }

    /// Minimum of the subtree rooted at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    /// Maximum of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    /// Distance from the root; the root has depth zero.
    pub(crate) fn depth(&self, mut handle: Handle) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.node(handle).parent() {
            depth += 1;
            handle = parent;
        }
        depth
    }

    /// Greatest node depth, zero for an empty or single-node tree.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Stack<(Handle, usize)> = self.root.map(|root| (root, 0)).into_iter().collect();

        while let Some((handle, depth)) = pending.pop() {
            height = height.max(depth);
            let node = self.node(handle);
            pending.extend([node.left(), node.right()].into_iter().flatten().map(|child| (child, depth + 1)));
        }
        height
    }

    /// Walks down from the root steered by `probe`, which compares the sought position
    /// against a node's value. Stops at an equal node, or at the last node whose child in
    /// the required direction is absent.
    ///
    /// Returns `None` only if the tree is empty.
    pub(crate) fn search_by<F>(&self, mut probe: F) -> Option<Probe>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = self.root?;
        loop {
            let node = self.node(current);
            let ordering = probe(node.value());
            let next = match ordering {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => None,
            };
            match next {
                Some(child) => current = child,
                None => {
                    return Some(Probe {
                        handle: current,
                        ordering,
                    });
                }
            }
        }
    }

    /// Links `value` in as a new leaf and returns its handle.
    ///
    /// `compare(new, existing)` steers the descent; values comparing equal go right, after
    /// the existing ones.
    pub(crate) fn insert_by<F>(&mut self, value: T, mut compare: F) -> Handle
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let Some(mut current) = self.root else {
            let handle = self.nodes.insert(Node::new_leaf(value, None));
            self.root = Some(handle);
            return handle;
        };

        let side = loop {
            let node = self.node(current);
            let side = match compare(&value, node.value()) {
                Ordering::Less => Side::Left,
                Ordering::Equal | Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(child) => current = child,
                None => break side,
            }
        };

        let handle = self.nodes.insert(Node::new_leaf(value, Some(current)));
        self.node_mut(current).set_child(side, Some(handle));
        self.grow_path(Some(current));
        handle
    }

    /// Unlinks and frees `handle`, returning its value and the parent of the position it
    /// occupied.
    ///
    /// A node with two children is replaced by its in-order predecessor, which is first
    /// unlinked from its own (at most one-child) position. Every other node keeps its handle.
    pub(crate) fn remove(&mut self, handle: Handle) -> (T, Option<Handle>) {
        let node = self.node(handle);
        let parent = node.parent();

        match (node.left(), node.right()) {
            (Some(left), Some(_)) => {
                let predecessor = self.rightmost(left);
                self.splice_out(predecessor);
                self.transplant(handle, predecessor);
            }
            _ => self.splice_out(handle),
        }

        (self.nodes.remove(handle).into_value(), parent)
    }

    /// Promotes `handle` one level above its parent.
    ///
    /// The child of `handle` facing the old parent moves under the old parent; only the two
    /// rotated nodes change size.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is the root.
    pub(crate) fn rotate_up(&mut self, handle: Handle) {
        let parent = self.node(handle).parent().expect("`RawTree::rotate_up()` - the root has no parent!");
        let grandparent = self.node(parent).parent();
        let side = self.node(parent).side_of(handle).expect("`RawTree::rotate_up()` - broken parent link!");
        let inner = self.node(handle).child(side.opposite());

        self.node_mut(parent).set_child(side, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(parent));
        }

        self.replace_link(grandparent, parent, Some(handle));
        self.node_mut(handle).set_parent(grandparent);
        self.node_mut(handle).set_child(side.opposite(), Some(parent));
        self.node_mut(parent).set_parent(Some(handle));

        self.refresh_size(parent);
        self.refresh_size(handle);
    }

    /// Returns the node at in-order position `rank` within the subtree rooted at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not below the subtree size.
    pub(crate) fn select(&self, mut handle: Handle, mut rank: usize) -> Handle {
        assert!(rank < self.node(handle).size().to_usize(), "`RawTree::select()` - `rank` out of range!");
        loop {
            let node = self.node(handle);
            let left = self.size_of(node.left());
            match rank.cmp(&left) {
                Ordering::Equal => return handle,
                Ordering::Less => handle = node.left().expect("`RawTree::select()` - sizes out of sync!"),
                Ordering::Greater => {
                    rank -= left + 1;
                    handle = node.right().expect("`RawTree::select()` - sizes out of sync!");
                }
            }
        }
    }

    /// Reshapes the subtree rooted at `handle` to minimal height.
    ///
    /// The in-order median is rotated up into the subtree's root position, then each half is
    /// treated the same way. Only links change; values and handles stay put.
    pub(crate) fn rebuild(&mut self, handle: Handle) {
        let mut pending: Stack<Handle> = smallvec![handle];

        while let Some(top) = pending.pop() {
            let size = self.node(top).size().to_usize();
            // One or two nodes are already as short as they can be.
            if size < 3 {
                continue;
            }

            let anchor = self.node(top).parent();
            let median = self.select(top, size / 2);
            while self.node(median).parent() != anchor {
                self.rotate_up(median);
            }

            let median = self.node(median);
            pending.extend([median.left(), median.right()].into_iter().flatten());
        }
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Moves every value out, in in-order sequence.
    pub(crate) fn into_sorted_values(mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len());
        let mut pending: Stack<Handle> = Stack::new();
        let mut current = self.root;
        loop {
            while let Some(handle) = current {
                pending.push(handle);
                current = self.node(handle).left();
            }
            let Some(handle) = pending.pop() else {
                break;
            };
            order.push(handle);
            current = self.node(handle).right();
        }

        order.into_iter().map(|handle| self.nodes.remove(handle).into_value()).collect()
    }

    /// Unlinks a node with at most one child, splicing that child into its place.
    fn splice_out(&mut self, handle: Handle) {
        let node = self.node(handle);
        debug_assert!(node.left().is_none() || node.right().is_none(), "`RawTree::splice_out()` - two children!");
        let child = node.left().or(node.right());
        let parent = node.parent();

        if let Some(child) = child {
            self.node_mut(child).set_parent(parent);
        }
        self.replace_link(parent, handle, child);
        self.shrink_path(parent);
    }

    /// Moves the detached node `replacement` into the position of `old`.
    fn transplant(&mut self, old: Handle, replacement: Handle) {
        let node = self.node(old);
        let (parent, left, right, size) = (node.parent(), node.left(), node.right(), node.size());

        let moved = self.node_mut(replacement);
        moved.set_parent(parent);
        moved.set_child(Side::Left, left);
        moved.set_child(Side::Right, right);
        moved.set_size(size);

        for child in [left, right].into_iter().flatten() {
            self.node_mut(child).set_parent(Some(replacement));
        }
        self.replace_link(parent, old, Some(replacement));
    }

    /// Points the link that held `old` (a child of `parent`, or the root) at `new`.
    fn replace_link(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = self.node_mut(parent);
                let side = parent.side_of(old).expect("`RawTree::replace_link()` - broken parent link!");
                parent.set_child(side, new);
            }
        }
    }

    fn refresh_size(&mut self, handle: Handle) {
        let node = self.node(handle);
        let size = Size::joining(self.size_of(node.left()), self.size_of(node.right()));
        self.node_mut(handle).set_size(size);
    }

    fn grow_path(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            let node = self.node_mut(handle);
            node.set_size(node.size().incremented());
            current = node.parent();
        }
    }

    fn shrink_path(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            let node = self.node_mut(handle);
            node.set_size(node.size().decremented());
            current = node.parent();
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    impl<T: Ord + core::fmt::Debug> RawTree<T> {
        /// Validates ordering, size and link invariants. Panics with every violation found.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();
            let mut count = 0;

            if let Some(root) = self.root {
                if self.node(root).parent().is_some() {
                    errors.push(alloc::format!("root {root:?} has a parent"));
                }
                let mut pending: Vec<Handle> = alloc::vec![root];
                while let Some(handle) = pending.pop() {
                    count += 1;
                    let node = self.node(handle);
                    let expected = 1 + self.size_of(node.left()) + self.size_of(node.right());
                    if node.size().to_usize() != expected {
                        errors.push(alloc::format!(
                            "size mismatch at {handle:?}: stored {}, counted {expected}",
                            node.size().to_usize()
                        ));
                    }
                    for (child, side) in [(node.left(), Side::Left), (node.right(), Side::Right)] {
                        let Some(child) = child else { continue };
                        if self.node(child).parent() != Some(handle) {
                            errors.push(alloc::format!("{child:?} does not point back at {handle:?}"));
                        }
                        let ordering = self.node(child).value().cmp(node.value());
                        let ordered = match side {
                            Side::Left => ordering == Ordering::Less,
                            Side::Right => ordering != Ordering::Less,
                        };
                        if !ordered {
                            errors.push(alloc::format!("{side:?} child {child:?} out of order under {handle:?}"));
                        }
                        pending.push(child);
                    }
                }
            }

            if count != self.len() {
                errors.push(alloc::format!("reachable nodes {count}, arena holds {}", self.len()));
            }
            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        fn values_in_order(&self) -> Vec<&T> {
            let mut out = Vec::new();
            let mut pending: Vec<Handle> = Vec::new();
            let mut current = self.root;
            while current.is_some() || !pending.is_empty() {
                while let Some(handle) = current {
                    pending.push(handle);
                    current = self.node(handle).left();
                }
                let handle = pending.pop().unwrap();
                out.push(self.node(handle).value());
                current = self.node(handle).right();
            }
            out
        }

        fn insert(&mut self, value: T) -> Handle {
            self.insert_by(value, Ord::cmp)
        }

        fn find(&self, value: &T) -> Option<Handle> {
            self.search_by(|probe| value.cmp(probe))
                .filter(|probe| probe.ordering == Ordering::Equal)
                .map(|probe| probe.handle)
        }
    }

    fn tree_of(values: &[i32]) -> RawTree<i32> {
        let mut tree = RawTree::new();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    #[test]
    fn search_stops_at_nearest_position() {
        let tree = tree_of(&[5, 3, 8]);
        let probe = tree.search_by(|node| 4.cmp(node)).unwrap();
        assert_eq!(*tree.node(probe.handle).value(), 3);
        assert_eq!(probe.ordering, Ordering::Greater);

        let probe = tree.search_by(|node| 5.cmp(node)).unwrap();
        assert_eq!(Some(probe.handle), tree.root());
        assert_eq!(probe.ordering, Ordering::Equal);

        assert!(RawTree::<i32>::new().search_by(|node| 1.cmp(node)).is_none());
    }

    #[test]
    fn insert_into_full_tree_changes_nothing() {
        extern crate std;
        use crate::raw::size::Size;
        use std::panic::{AssertUnwindSafe, catch_unwind};

        // Midpoints first, so the tree stays shallow while it fills up.
        let mut tree: RawTree<u32> = RawTree::new();
        let mut ranges = alloc::vec![(0u32, u32::try_from(Size::MAX).unwrap())];
        while let Some((low, high)) = ranges.pop() {
            if low < high {
                let mid = low + (high - low) / 2;
                tree.insert(mid);
                ranges.push((low, mid));
                ranges.push((mid + 1, high));
            }
        }
        assert_eq!(tree.len(), Size::MAX);

        let outcome = catch_unwind(AssertUnwindSafe(|| tree.insert(u32::MAX)));
        assert!(outcome.is_err());
        assert_eq!(tree.len(), Size::MAX);
        assert_eq!(tree.size_of(tree.root()), Size::MAX);
        assert!(tree.find(&u32::MAX).is_none());
        tree.validate_invariants();
    }

    #[test]
    fn duplicates_descend_right() {
        let tree = tree_of(&[2, 2, 2]);
        tree.validate_invariants();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.values_in_order(), [&2, &2, &2]);
    }

    #[test]
    fn remove_two_children_relinks_predecessor() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let four = tree.find(&4).unwrap();
        let root = tree.root().unwrap();

        let (value, parent) = tree.remove(root);
        assert_eq!(value, 5);
        assert_eq!(parent, None);
        assert_eq!(tree.root(), Some(four));
        assert_eq!(tree.node(four).size().to_usize(), 6);
        assert_eq!(tree.values_in_order(), [&1, &3, &4, &7, &8, &9]);
        tree.validate_invariants();
    }

    #[test]
    fn remove_when_predecessor_is_left_child() {
        let mut tree = tree_of(&[5, 3, 8, 1]);
        let three = tree.find(&3).unwrap();
        let (value, _) = tree.remove(tree.root().unwrap());
        assert_eq!(value, 5);
        assert_eq!(tree.root(), Some(three));
        assert_eq!(*tree.node(tree.node(three).left().unwrap()).value(), 1);
        tree.validate_invariants();
    }

    #[test]
    fn rotate_preserves_order_and_sizes() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let two = tree.find(&2).unwrap();
        tree.rotate_up(two);

        assert_eq!(tree.root(), Some(two));
        assert_eq!(tree.node(two).size().to_usize(), 7);
        let four = tree.node(two).right().unwrap();
        assert_eq!(*tree.node(four).value(), 4);
        assert_eq!(tree.node(four).size().to_usize(), 5);
        assert_eq!(*tree.node(tree.node(four).left().unwrap()).value(), 3);
        assert_eq!(tree.values_in_order(), [&1, &2, &3, &4, &5, &6, &7]);
        tree.validate_invariants();
    }

    #[test]
    #[should_panic(expected = "`RawTree::rotate_up()` - the root has no parent!")]
    fn rotate_root_panics() {
        let mut tree = tree_of(&[1]);
        tree.rotate_up(tree.root().unwrap());
    }

    #[test]
    fn rebuild_chain_to_minimal_height() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.height(), 6);

        tree.rebuild(tree.root().unwrap());
        assert_eq!(tree.height(), 2);
        assert_eq!(*tree.node(tree.root().unwrap()).value(), 4);
        tree.validate_invariants();
    }

    #[test]
    fn sibling_and_extremes() {
        let tree = tree_of(&[5, 3, 8, 1]);
        let (three, eight, one) = (tree.find(&3).unwrap(), tree.find(&8).unwrap(), tree.find(&1).unwrap());
        assert_eq!(tree.sibling(three), Some(eight));
        assert_eq!(tree.sibling(eight), Some(three));
        assert_eq!(tree.sibling(one), None);
        assert_eq!(tree.sibling(tree.root().unwrap()), None);
        assert_eq!(tree.leftmost(tree.root().unwrap()), one);
        assert_eq!(tree.rightmost(tree.root().unwrap()), eight);
        assert_eq!(tree.depth(one), 2);
    }

    proptest! {
        #[test]
        fn matches_sorted_vec(ops in prop::collection::vec((any::<bool>(), -64i32..64), 0..400)) {
            let mut tree = RawTree::new();
            let mut model: Vec<i32> = Vec::new();

            for (insert, value) in ops {
                if insert {
                    tree.insert(value);
                    let at = model.partition_point(|&v| v <= value);
                    model.insert(at, value);
                } else if let Some(handle) = tree.find(&value) {
                    let (removed, _) = tree.remove(handle);
                    prop_assert_eq!(removed, value);
                    let at = model.iter().position(|&v| v == value).unwrap();
                    model.remove(at);
                } else {
                    prop_assert!(!model.contains(&value));
                }
            }

            tree.validate_invariants();
            prop_assert_eq!(tree.values_in_order(), model.iter().collect::<Vec<_>>());
        }

        #[test]
        fn rebuild_keeps_contents(values in prop::collection::vec(any::<i16>(), 1..300), at in any::<prop::sample::Index>()) {
            let mut tree = RawTree::new();
            let handles: Vec<Handle> = values.iter().map(|&v| tree.insert(v)).collect();
            let before: Vec<i16> = tree.values_in_order().into_iter().copied().collect();

            let target = handles[at.index(handles.len())];
            let anchor = tree.node(target).parent().map(|parent| (parent, tree.node(parent).side_of(target).unwrap()));
            let size = tree.node(target).size().to_usize();
            tree.rebuild(target);

            tree.validate_invariants();
            prop_assert_eq!(tree.values_in_order().into_iter().copied().collect::<Vec<_>>(), before);

            // The rebuilt subtree still hangs from the same link.
            let replacement = match anchor {
                None => tree.root(),
                Some((parent, side)) => tree.node(parent).child(side),
            };
            prop_assert_eq!(tree.size_of(replacement), size);

            tree.rebuild(tree.root().unwrap());
            prop_assert_eq!(tree.height(), values.len().ilog2() as usize);
        }
    }
}
