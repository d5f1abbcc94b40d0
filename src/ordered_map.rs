//! An ordered key/value map on top of [`Tree`].

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::ops::Index;

use crate::balance::Scapegoat;
use crate::compare::Comparator;
use crate::tree::{self, Tree};

/// Orders entries by key alone.
#[derive(Clone, Copy, Debug, Default)]
struct ByKey;

impl<K: Ord, V> Comparator<(K, V)> for ByKey {
    #[inline]
    fn compare(&self, a: &(K, V), b: &(K, V)) -> Ordering {
        a.0.cmp(&b.0)
    }
}

/// An ordered map based on a scapegoat-balanced binary search tree.
///
/// Each key appears at most once. Iteration yields entries in ascending key order.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to
/// the `OrderedMap` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use sgtree::OrderedMap;
///
/// let mut ratings = OrderedMap::new();
/// ratings.put("espresso", 4);
/// ratings.put("latte", 3);
/// ratings.put("mocha", 2);
///
/// // A second `put` replaces the value and hands back the old one.
/// assert_eq!(ratings.put("latte", 5), Some(3));
///
/// assert_eq!(ratings.get("latte"), Some(&5));
/// assert!(!ratings.contains_key("cortado"));
/// assert_eq!(ratings.remove("mocha"), Some(2));
///
/// for (drink, stars) in &ratings {
///     println!("{drink}: {stars}");
/// }
/// assert_eq!(ratings["espresso"], 4);
/// ```
///
/// A stored `None` is distinct from a missing key:
///
/// ```
/// use sgtree::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.put(1, None::<&str>);
/// assert_eq!(map.get(&1), Some(&None));
/// assert_eq!(map.get(&2), None);
/// ```
pub struct OrderedMap<K, V> {
    tree: Tree<(K, V), ByKey, Scapegoat>,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty `OrderedMap` with the default rebalancing parameter.
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub fn new() -> Self {
        Self::with_alpha(Scapegoat::DEFAULT_ALPHA)
    }

    /// Makes a new, empty `OrderedMap` whose tree is rebalanced with the given `alpha`; see
    /// [`Scapegoat`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::OrderedMap;
    ///
    /// let mut map = OrderedMap::with_alpha(0.55);
    /// map.put(1, 'a');
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            tree: Tree::with_balancer(ByKey, Scapegoat::new(alpha)),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::OrderedMap;
    ///
    /// let map = OrderedMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.tree.iter(),
        }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2, "b"), (1, "a")]);
    /// let values: Vec<&str> = map.values().copied().collect();
    /// assert_eq!(values, ["a", "b"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.tree.iter(),
        }
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|node| {
            let (key, value) = node.value();
            (key, value)
        })
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|node| {
            let (key, value) = node.value();
            (key, value)
        })
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Associates `value` with `key`.
    ///
    /// If the map did not have this key present, `None` is returned. If it did, the value is
    /// replaced in place and the old value is returned; the key itself is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.put(37, "a"), None);
    /// assert_eq!(map.put(37, "b"), Some("a"));
    /// assert_eq!(map[&37], "b");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(id) = self.tree.find_by(|(existing, _)| key.cmp(existing)).map(|node| node.id()) {
            return Some(mem::replace(&mut self.tree.value_mut(id).1, value));
        }
        self.tree.add((key, value));
        None
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the
    /// borrowed form *must* match the ordering on the key type.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find_by(|(existing, _)| key.cmp(existing.borrow())).map(|node| &node.value().1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("hits", 1)]);
    /// if let Some(hits) = map.get_mut("hits") {
    ///     *hits += 1;
    /// }
    /// assert_eq!(map["hits"], 2);
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.find_by(|(existing, _)| key.cmp(existing.borrow()))?.id();
        Some(&mut self.tree.value_mut(id).1)
    }

    /// Returns `true` if the map holds a value for `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// Removing a missing key leaves the map untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the map, returning the stored key and value if it was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.find_by(|(existing, _)| key.cmp(existing.borrow()))?.id();
        self.tree.delete(id).ok()
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sgtree::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([(2, 'b'), (1, 'a')]);
    /// assert_eq!(map.pop_first(), Some((1, 'a')));
    /// assert_eq!(map.pop_first(), Some((2, 'b')));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let id = self.tree.first()?.id();
        self.tree.delete(id).ok()
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let id = self.tree.last()?.id();
        self.tree.delete(id).ok()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for OrderedMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K, Q, V> Index<&Q> for OrderedMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `OrderedMap`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    /// Converts a `[(K, V); N]` into an `OrderedMap<K, V>`. Later duplicates win.
    ///
    /// ```
    /// use sgtree::OrderedMap;
    ///
    /// let map = OrderedMap::from([(1, 2), (3, 4), (1, 5)]);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map[&1], 5);
    /// ```
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Moves every entry out of the map, sorted by key.
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

/// An iterator over the entries of an `OrderedMap`.
///
/// This `struct` is created by the [`iter`] method on [`OrderedMap`].
///
/// [`iter`]: OrderedMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: tree::Iter<'a, (K, V)>,
}

/// An iterator over the keys of an `OrderedMap`.
///
/// This `struct` is created by the [`keys`] method on [`OrderedMap`].
///
/// [`keys`]: OrderedMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: tree::Iter<'a, (K, V)>,
}

/// An iterator over the values of an `OrderedMap`.
///
/// This `struct` is created by the [`values`] method on [`OrderedMap`].
///
/// [`values`]: OrderedMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: tree::Iter<'a, (K, V)>,
}

/// An owning iterator over the entries of an `OrderedMap`, sorted by key.
pub struct IntoIter<K, V> {
    inner: tree::IntoIter<(K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

macro_rules! borrowed_iter_traits {
    ($($name:ident),* $(,)?) => {$(
        impl<K, V> ExactSizeIterator for $name<'_, K, V> {}

        impl<K, V> FusedIterator for $name<'_, K, V> {}

        impl<K, V> Clone for $name<'_, K, V> {
            fn clone(&self) -> Self {
                Self {
                    inner: self.inner.clone(),
                }
            }
        }
    )*};
}

borrowed_iter_traits!(Iter, Keys, Values);

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.inner.len()).finish()
    }
}
