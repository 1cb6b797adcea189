use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{ControlFlow, Index};

use log::debug;

use crate::config::DEFAULT_ORDER;
use crate::error::Result;
use crate::raw::{RawIter, RawTreeMap};

mod capacity;

/// An ordered map based on a [B-Tree] whose nodes hold at most `ORDER - 1`
/// entries.
///
/// Keys must implement [`Ord`]. Entries are kept in ascending key order and
/// every iterator or visitor over the map produces them in that order.
///
/// Insertion splits full nodes on the way down, so a key is always added to a
/// leaf that has room and no split ever travels back up the tree. Removal
/// repairs under-filled nodes on the way back up by borrowing an entry from a
/// sibling through the parent, or by merging with one. Every leaf sits at the
/// same depth at all times.
///
/// `ORDER` must be even and at least 4; any other value fails to compile as
/// soon as a map of that order is created. The default is [`DEFAULT_ORDER`].
///
/// Insertion is fallible: before it changes anything the map reserves every
/// node it could possibly need, so running out of memory is reported as an
/// error and leaves the map exactly as it was. Removal never allocates.
///
/// It is a logic error for a key to be modified in such a way that the key's
/// ordering relative to any other key changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will not
/// result in undefined behavior.
///
/// # Examples
///
/// ```
/// use core::ops::ControlFlow;
/// use preemptive_btree::TreeMap;
///
/// let mut stock = TreeMap::new();
/// stock.insert("pears", 3)?;
/// stock.insert("apples", 12)?;
/// stock.insert("figs", 0)?;
///
/// assert_eq!(stock.get("apples"), Some(&12));
/// assert_eq!(stock.remove("figs"), Some(0));
/// assert_eq!(stock.remove("figs"), None);
///
/// // Visit entries in key order until one matches.
/// let low = stock.for_each(|fruit, &count| {
///     if count < 5 { ControlFlow::Break(*fruit) } else { ControlFlow::Continue(()) }
/// });
/// assert_eq!(low, ControlFlow::Break("pears"));
/// # Ok::<(), preemptive_btree::TreeError>(())
/// ```
///
/// A wider fanout is chosen through the type:
///
/// ```
/// use preemptive_btree::{TreeConfig, TreeMap};
///
/// let mut map: TreeMap<u32, u32, 16> = TreeMap::with_config(TreeConfig::new());
/// for key in 0..100 {
///     map.insert(key, key * key)?;
/// }
/// assert_eq!(map.height(), 2);
/// # Ok::<(), preemptive_btree::TreeError>(())
/// ```
///
/// [B-Tree]: https://en.wikipedia.org/wiki/B-tree
pub struct TreeMap<K, V, const ORDER: usize = DEFAULT_ORDER> {
    raw: RawTreeMap<K, V, ORDER>,
}

/// An iterator over the entries of a `TreeMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`TreeMap`].
///
/// # Examples
///
/// ```
/// use preemptive_btree::TreeMap;
///
/// let mut map = TreeMap::new();
/// map.insert(2, "b")?;
/// map.insert(1, "a")?;
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// # Ok::<(), preemptive_btree::TreeError>(())
/// ```
///
/// [`iter`]: TreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, const ORDER: usize = DEFAULT_ORDER> {
    inner: RawIter<'a, K, V, ORDER>,
}

/// An iterator over the keys of a `TreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`TreeMap`].
///
/// [`keys`]: TreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, const ORDER: usize = DEFAULT_ORDER> {
    inner: Iter<'a, K, V, ORDER>,
}

/// An iterator over the values of a `TreeMap`.
///
/// This `struct` is created by the [`values`] method on [`TreeMap`].
///
/// [`values`]: TreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, const ORDER: usize = DEFAULT_ORDER> {
    inner: Iter<'a, K, V, ORDER>,
}

impl<K, V> TreeMap<K, V> {
    /// Makes a new, empty `TreeMap` of the default order.
    ///
    /// Does not allocate anything on its own. Maps of another order are built
    /// with [`with_config`](TreeMap::with_config) or [`Default`].
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a")?;
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        TreeMap { raw: RawTreeMap::new() }
    }
}

impl<K, V, const ORDER: usize> TreeMap<K, V, ORDER> {
    /// Clears the map, removing all entries and releasing every node.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// a.insert(1, "a")?;
    /// a.clear();
    /// assert!(a.is_empty());
    /// assert_eq!(a.node_count(), 0);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing map: {} entries in {} nodes", self.raw.len(), self.raw.node_count());
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a")?;
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key-value pair corresponding to the supplied key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a")?;
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a")?;
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a")?;
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(2, "a")?;
    /// map.insert(1, "b")?;
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the entry with the largest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "b")?;
    /// map.insert(2, "a")?;
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `Ok(None)` is returned.
    ///
    /// If the key is already present, the outcome depends on the map's
    /// [`DuplicatePolicy`](crate::DuplicatePolicy): by default the value is
    /// replaced and the old one returned as `Ok(Some(old))`; the stored key is
    /// kept. Under `Reject` the map is left untouched and
    /// [`TreeError::DuplicateKey`](crate::TreeError::DuplicateKey) is returned.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::OutOfMemory`](crate::TreeError::OutOfMemory) or
    /// [`TreeError::NodeLimit`](crate::TreeError::NodeLimit) when the nodes this
    /// insertion may need cannot be reserved. The map is unchanged in that case.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.insert(37, "a")?, None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// assert_eq!(map.insert(37, "b")?, Some("a"));
    /// assert_eq!(map[&37], "b");
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>>
    where
        K: Ord,
    {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a")?;
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a")?;
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Calls `visit` on every entry in ascending key order, stopping as soon as
    /// it returns [`ControlFlow::Break`].
    ///
    /// Returns the break value, or `ControlFlow::Continue(())` once every entry
    /// has been visited.
    ///
    /// # Complexity
    ///
    /// O(n) when every entry is visited, with recursion depth equal to the height.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::ControlFlow;
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// for key in 1..=6 {
    ///     map.insert(key, key * 10)?;
    /// }
    ///
    /// let mut sum = 0;
    /// let stopped = map.for_each(|&key, &value| {
    ///     if key == 4 {
    ///         return ControlFlow::Break(key);
    ///     }
    ///     sum += value;
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(stopped, ControlFlow::Break(4));
    /// assert_eq!(sum, 60);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn for_each<B, F>(&self, visit: F) -> ControlFlow<B>
    where
        F: FnMut(&K, &V) -> ControlFlow<B>,
    {
        self.raw.for_each(visit)
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Complexity
    ///
    /// O(log n) to create; O(n) to exhaust.
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(3, "c")?;
    /// map.insert(2, "b")?;
    /// map.insert(1, "a")?;
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, ORDER> {
        Iter { inner: self.raw.iter() }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Complexity
    ///
    /// O(log n) to create; O(n) to exhaust.
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// a.insert(2, "b")?;
    /// a.insert(1, "a")?;
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V, ORDER> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Complexity
    ///
    /// O(log n) to create; O(n) to exhaust.
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// a.insert(1, "hello")?;
    /// a.insert(2, "goodbye")?;
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    pub fn values(&self) -> Values<'_, K, V, ORDER> {
        Values { inner: self.iter() }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a")?;
    /// assert_eq!(a.len(), 1);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a")?;
    /// assert!(!a.is_empty());
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl<K: Clone, V: Clone, const ORDER: usize> Clone for TreeMap<K, V, ORDER> {
    fn clone(&self) -> Self {
        TreeMap { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq, const ORDER: usize> PartialEq for TreeMap<K, V, ORDER> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, const ORDER: usize> Eq for TreeMap<K, V, ORDER> {}

impl<K: fmt::Debug, V: fmt::Debug, const ORDER: usize> fmt::Debug for TreeMap<K, V, ORDER> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, const ORDER: usize> Default for TreeMap<K, V, ORDER> {
    fn default() -> Self {
        TreeMap { raw: RawTreeMap::new() }
    }
}

impl<'a, K, V, const ORDER: usize> IntoIterator for &'a TreeMap<K, V, ORDER> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, ORDER>;

    fn into_iter(self) -> Iter<'a, K, V, ORDER> {
        self.iter()
    }
}

impl<K, Q, V, const ORDER: usize> Index<&Q> for TreeMap<K, V, ORDER>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, const ORDER: usize> Iterator for Iter<'a, K, V, ORDER> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, const ORDER: usize> ExactSizeIterator for Iter<'_, K, V, ORDER> {
    fn len(&self) -> usize {
        self.inner.remaining()
    }
}

impl<K, V, const ORDER: usize> FusedIterator for Iter<'_, K, V, ORDER> {}

impl<K, V, const ORDER: usize> Clone for Iter<'_, K, V, ORDER> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, const ORDER: usize> fmt::Debug for Iter<'_, K, V, ORDER> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, const ORDER: usize> Iterator for Keys<'a, K, V, ORDER> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, const ORDER: usize> ExactSizeIterator for Keys<'_, K, V, ORDER> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, const ORDER: usize> FusedIterator for Keys<'_, K, V, ORDER> {}

impl<K, V, const ORDER: usize> Clone for Keys<'_, K, V, ORDER> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V, const ORDER: usize> fmt::Debug for Keys<'_, K, V, ORDER> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, const ORDER: usize> Iterator for Values<'a, K, V, ORDER> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, const ORDER: usize> ExactSizeIterator for Values<'_, K, V, ORDER> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, const ORDER: usize> FusedIterator for Values<'_, K, V, ORDER> {}

impl<K, V, const ORDER: usize> Clone for Values<'_, K, V, ORDER> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug, const ORDER: usize> fmt::Debug for Values<'_, K, V, ORDER> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn debug_lists_entries_in_order() {
        let mut map = TreeMap::new();
        for key in [3, 1, 2] {
            map.insert(key, key * 10).expect("insert");
        }
        assert_eq!(format!("{map:?}"), "{1: 10, 2: 20, 3: 30}");
        assert_eq!(format!("{:?}", map.keys()), "[1, 2, 3]");
        assert_eq!(format!("{:?}", map.values()), "[10, 20, 30]");
    }

    #[test]
    fn iterators_report_exact_length() {
        let mut map = TreeMap::new();
        for key in 0..25u32 {
            map.insert(key, ()).expect("insert");
        }
        let mut keys = map.keys();
        assert_eq!(keys.len(), 25);
        keys.next();
        assert_eq!(keys.len(), 24);
        assert_eq!(keys.by_ref().count(), 24);
        assert_eq!(keys.next(), None);
        assert_eq!(keys.next(), None);
    }

    #[test]
    fn equality_ignores_shape() {
        let mut ascending = TreeMap::new();
        let mut descending = TreeMap::new();
        for key in 0..50u32 {
            ascending.insert(key, key).expect("insert");
            descending.insert(49 - key, 49 - key).expect("insert");
        }
        assert_eq!(ascending, descending);

        descending.remove(&0);
        assert_ne!(ascending, descending);
    }

    #[test]
    fn clone_is_independent() {
        let mut map = TreeMap::new();
        for key in 0..20u32 {
            map.insert(key, key).expect("insert");
        }
        let copy = map.clone();
        for key in 0..10u32 {
            map.remove(&key);
        }
        assert_eq!(copy.len(), 20);
        assert_eq!(copy.keys().copied().collect::<Vec<_>>(), (0..20).collect::<Vec<_>>());
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn default_supports_other_orders() {
        let mut map: TreeMap<u32, u32, 6> = TreeMap::default();
        for key in 0..5 {
            map.insert(key, key).expect("insert");
        }
        // Five entries fit in one node of order six.
        assert_eq!(map.height(), 1);
        map.insert(5, 5).expect("insert");
        assert_eq!(map.height(), 2);
    }

    #[test]
    fn borrowed_lookups() {
        let mut map = TreeMap::new();
        map.insert(alloc::string::String::from("key"), 1).expect("insert");
        assert_eq!(map.get("key"), Some(&1));
        assert!(map.contains_key("key"));
        assert_eq!(map["key"], 1);
        assert_eq!(map.remove("key"), Some(1));
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn index_panics_on_missing_key() {
        let map: TreeMap<u32, u32> = TreeMap::new();
        let _ = map[&1];
    }
}
