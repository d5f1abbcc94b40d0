use super::{Balancer, Restructure};
use crate::tree::NodeId;

/// Scapegoat-style weight balancer.
///
/// A node is *weight balanced* when neither child subtree holds more than `alpha` of the
/// node's subtree. Inserting a node deeper than `log_{1/alpha}(len)` means some ancestor has
/// lost its weight balance; the lowest such ancestor, the scapegoat, has its subtree rebuilt to
/// minimal height, repeating further up until the new node is back within the bound.
/// Deletions shrink the tree without making anything deeper, so the whole tree is only rebuilt
/// once it has shrunk to `alpha` of its largest size since the last full rebuild.
///
/// `alpha` lies in `[0.5, 1.0]`: `0.5` keeps the tree near-perfectly balanced at the cost of
/// frequent rebuilds, `1.0` never rebuilds.
///
/// # Examples
///
/// ```
/// use sgtree::{Natural, Scapegoat, Tree};
///
/// let mut tree = Tree::with_balancer(Natural, Scapegoat::new(0.5));
/// tree.extend(1..=7);
/// assert!(tree.height() <= 3);
///
/// // Out-of-range parameters are clamped, not rejected.
/// assert_eq!(Scapegoat::new(0.1).alpha(), 0.5);
/// assert_eq!(Scapegoat::new(7.0).alpha(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scapegoat {
    alpha: f64,
    // Nodes currently in the tree.
    size: usize,
    // Largest `size` since the last full rebuild.
    max: usize,
}

impl Scapegoat {
    /// The `alpha` used by [`Scapegoat::default`] and in place of a NaN parameter.
    pub const DEFAULT_ALPHA: f64 = 0.7;
    pub const MIN_ALPHA: f64 = 0.5;
    pub const MAX_ALPHA: f64 = 1.0;

    /// Creates a balancer for an empty tree, clamping `alpha` into `[0.5, 1.0]`.
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        let alpha = if alpha.is_nan() {
            Self::DEFAULT_ALPHA
        } else {
            alpha.clamp(Self::MIN_ALPHA, Self::MAX_ALPHA)
        };
        Self { alpha, size: 0, max: 0 }
    }

    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of nodes the balancer has seen inserted and not deleted.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Largest [`size`](Self::size) since the last full rebuild.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max
    }

    fn rebalances(&self) -> bool {
        self.alpha < Self::MAX_ALPHA
    }

    /// `depth > log_{1/alpha}(size)`, evaluated as `size * alpha^depth < 1`.
    #[allow(clippy::cast_precision_loss)]
    fn exceeds_height_bound(&self, depth: usize, size: usize) -> bool {
        let mut weight = size as f64;
        for _ in 0..depth {
            weight *= self.alpha;
            if weight < 1.0 {
                return true;
            }
        }
        false
    }

    #[allow(clippy::cast_precision_loss)]
    fn is_weight_balanced(&self, own: usize, sibling: usize) -> bool {
        let limit = self.alpha * (own + sibling + 1) as f64;
        own as f64 <= limit && sibling as f64 <= limit
    }

    /// Walks up from `node` to the first parent whose children are out of weight balance.
    fn find_scapegoat<T>(&self, tree: &Restructure<'_, T>, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = tree.parent(current) {
            let own = tree.size(current);
            let sibling = tree.sibling(current).map_or(0, |sibling| tree.size(sibling));
            if !self.is_weight_balanced(own, sibling) {
                return parent;
            }
            current = parent;
        }
        // Unreachable for a node past the height bound; rebuilding from the root is still sound.
        current
    }
}

impl Default for Scapegoat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA)
    }
}

impl Balancer for Scapegoat {
    fn on_insert<T>(&mut self, tree: &mut Restructure<'_, T>, node: NodeId) {
        self.size += 1;
        self.max = self.max.max(self.size);

        if !self.rebalances() {
            return;
        }
        // A rebuilt subtree is weight balanced throughout, so a repeated search climbs past it
        // to a strictly higher scapegoat. Rebuilding the root always satisfies the bound.
        while self.exceeds_height_bound(tree.depth(node), self.size) {
            let scapegoat = self.find_scapegoat(tree, node);
            let whole_tree = tree.parent(scapegoat).is_none();
            tree.rebuild(scapegoat);
            if whole_tree {
                break;
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn on_delete<T>(&mut self, tree: &mut Restructure<'_, T>, _parent: Option<NodeId>) {
        self.size = self.size.saturating_sub(1);

        if self.rebalances() && self.size as f64 <= self.alpha * self.max as f64 {
            if let Some(root) = tree.root() {
                tree.rebuild(root);
            }
            self.max = self.size;
        }
    }

    fn on_clear(&mut self) {
        self.size = 0;
        self.max = 0;
    }
}
