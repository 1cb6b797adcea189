use core::borrow::Borrow;

use smallvec::SmallVec;

use super::node_ref::NodeRef;

/// A B-tree node holding up to `ORDER - 1` entries and, when internal, one more
/// child than it has entries.
///
/// Unlike a B+tree, entries live in internal nodes as well as leaves: every
/// entry of an internal node separates the key ranges of its two neighbouring
/// children. Occupancy is the length of `entries`, so no key value is reserved
/// to mark an empty slot.
#[derive(Clone)]
pub(crate) struct Node<K, V, const ORDER: usize> {
    // Inline capacity is one more than a node ever holds after an operation completes.
    entries: SmallVec<[(K, V); ORDER]>,
    // Empty for leaves.
    children: SmallVec<[NodeRef; ORDER]>,
}

/// Result of searching for a key in a node.
pub(crate) enum SearchResult {
    /// Key was found at the given index.
    Found(usize),
    /// Key was not found; index is the child to descend into, which is also
    /// where the key would be inserted.
    NotFound(usize),
}

impl<K, V, const ORDER: usize> Node<K, V, ORDER> {
    pub(crate) const MAX_KEYS: usize = ORDER - 1;
    pub(crate) const MIN_KEYS: usize = ORDER / 2 - 1;
    pub(crate) const MEDIAN: usize = ORDER / 2 - 1;

    /// Rejects fanouts the split and merge arithmetic cannot handle.
    pub(crate) const VALID_ORDER: () = assert!(
        ORDER >= 4 && ORDER % 2 == 0,
        "B-tree ORDER must be even and at least 4"
    );

    /// Creates a new empty node. It is a leaf until a child is pushed.
    pub(crate) fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            children: SmallVec::new(),
        }
    }

    /// Creates a root holding a single separator between two subtrees.
    pub(crate) fn new_root(separator: (K, V), left: NodeRef, right: NodeRef) -> Self {
        let mut root = Self::new();
        root.entries.push(separator);
        root.children.push(left);
        root.children.push(right);
        root
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of occupied entry slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.entries.len() == Self::MAX_KEYS
    }

    /// Returns true if this node is below minimum occupancy and needs rebalancing.
    pub(crate) fn is_deficient(&self) -> bool {
        self.entries.len() < Self::MIN_KEYS
    }

    /// Returns true if this node can give an entry to a sibling.
    pub(crate) fn can_lend(&self) -> bool {
        self.entries.len() > Self::MIN_KEYS
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> &K {
        &self.entries[index].0
    }

    #[inline]
    pub(crate) fn entry(&self, index: usize) -> (&K, &V) {
        let (key, value) = &self.entries[index];
        (key, value)
    }

    pub(crate) fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, index: usize) -> &mut V {
        &mut self.entries[index].1
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> NodeRef {
        self.children[index]
    }

    pub(crate) fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Searches for `key` among this node's entries.
    #[inline]
    pub(crate) fn search<Q>(&self, key: &Q) -> SearchResult
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.entries.binary_search_by(|(k, _)| k.borrow().cmp(key)) {
            Ok(index) => SearchResult::Found(index),
            Err(index) => SearchResult::NotFound(index),
        }
    }

    /// Returns the first slot whose key is greater than `key`.
    #[inline]
    pub(crate) fn upper_slot(&self, key: &K) -> usize
    where
        K: Ord,
    {
        self.entries.partition_point(|(k, _)| k <= key)
    }

    /// Inserts an entry at `index`, shifting later entries right.
    pub(crate) fn insert_entry(&mut self, index: usize, entry: (K, V)) {
        debug_assert!(self.entries.len() < Self::MAX_KEYS, "insert into a full node");
        self.entries.insert(index, entry);
    }

    /// Inserts a child link at `index`, shifting later links right.
    pub(crate) fn insert_child(&mut self, index: usize, child: NodeRef) {
        self.children.insert(index, child);
    }

    /// Removes the entry at `index` from a leaf, shifting later entries left.
    pub(crate) fn remove_entry(&mut self, index: usize) -> (K, V) {
        debug_assert!(self.is_leaf(), "entries of internal nodes are replaced, not removed");
        self.entries.remove(index)
    }

    /// Overwrites the entry at `index`, returning the previous one.
    pub(crate) fn replace_entry(&mut self, index: usize, entry: (K, V)) -> (K, V) {
        core::mem::replace(&mut self.entries[index], entry)
    }

    /// Removes the separator at `index` together with the child to its right.
    pub(crate) fn remove_separator(&mut self, index: usize) -> ((K, V), NodeRef) {
        let separator = self.entries.remove(index);
        let child = self.children.remove(index + 1);
        (separator, child)
    }

    /// Appends an entry and, for internal nodes, the child that follows it.
    pub(crate) fn push_back(&mut self, entry: (K, V), child: Option<NodeRef>) {
        self.entries.push(entry);
        if let Some(child) = child {
            self.children.push(child);
        }
    }

    /// Prepends an entry and, for internal nodes, the child that precedes it.
    pub(crate) fn push_front(&mut self, entry: (K, V), child: Option<NodeRef>) {
        self.entries.insert(0, entry);
        if let Some(child) = child {
            self.children.insert(0, child);
        }
    }

    /// Removes the first entry and the child before it.
    pub(crate) fn pop_front(&mut self) -> Option<((K, V), Option<NodeRef>)> {
        if self.entries.is_empty() {
            return None;
        }
        let entry = self.entries.remove(0);
        let child = (!self.children.is_empty()).then(|| self.children.remove(0));
        Some((entry, child))
    }

    /// Removes the last entry and the child after it.
    pub(crate) fn pop_back(&mut self) -> Option<((K, V), Option<NodeRef>)> {
        let entry = self.entries.pop()?;
        let child = self.children.pop();
        Some((entry, child))
    }

    /// Splits a full node around its median entry.
    ///
    /// Entries and children to the right of the median move into the returned
    /// sibling; the median itself is handed back for promotion into the parent.
    pub(crate) fn split(&mut self) -> ((K, V), Self) {
        debug_assert!(self.is_full(), "only full nodes are split");

        let mut right = Self::new();
        right.entries = self.entries.drain(Self::MEDIAN + 1..).collect();
        if !self.is_leaf() {
            right.children = self.children.drain(Self::MEDIAN + 1..).collect();
        }

        let median = self.entries.remove(Self::MEDIAN);
        (median, right)
    }

    /// Folds `separator` and every entry and child of `right` onto the end of
    /// this node.
    pub(crate) fn absorb(&mut self, separator: (K, V), mut right: Self) {
        debug_assert_eq!(self.is_leaf(), right.is_leaf(), "siblings sit at the same depth");
        self.entries.push(separator);
        self.entries.append(&mut right.entries);
        self.children.append(&mut right.children);
        debug_assert!(self.entries.len() <= Self::MAX_KEYS, "merged node overflows");
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use static_assertions::const_assert_eq;

    type Node4 = Node<u64, u64, 4>;
    type Node8 = Node<u64, u64, 8>;

    const_assert_eq!(Node4::MAX_KEYS, 3);
    const_assert_eq!(Node4::MIN_KEYS, 1);
    const_assert_eq!(Node8::MEDIAN, 3);

    fn leaf(keys: &[u64]) -> Node4 {
        let mut node = Node4::new();
        for &key in keys {
            node.push_back((key, key * 10), None);
        }
        node
    }

    fn keys(node: &Node4) -> Vec<u64> {
        node.entries().iter().map(|&(k, _)| k).collect()
    }

    #[test]
    fn search_reports_slot() {
        let node = leaf(&[10, 20, 30]);
        assert!(matches!(node.search(&20), SearchResult::Found(1)));
        assert!(matches!(node.search(&5), SearchResult::NotFound(0)));
        assert!(matches!(node.search(&25), SearchResult::NotFound(2)));
        assert!(matches!(node.search(&35), SearchResult::NotFound(3)));
        assert_eq!(node.upper_slot(&20), 2);
        assert_eq!(node.upper_slot(&0), 0);
    }

    #[test]
    fn zero_is_an_ordinary_key() {
        let node = leaf(&[0, 1]);
        assert!(matches!(node.search(&0), SearchResult::Found(0)));
        assert_eq!(node.entry(0), (&0, &0));
    }

    #[test]
    fn leaf_split_promotes_median() {
        let mut node = leaf(&[1, 2, 3]);
        assert!(node.is_full());

        let (median, right) = node.split();
        assert_eq!(median, (2, 20));
        assert_eq!(keys(&node), [1]);
        assert_eq!(keys(&right), [3]);
        assert!(node.is_leaf() && right.is_leaf());
    }

    #[test]
    fn internal_split_moves_right_children() {
        let links: Vec<NodeRef> = (0..4).map(NodeRef::new).collect();
        let mut node = Node4::new();
        node.insert_child(0, links[0]);
        for (i, key) in [10, 20, 30].into_iter().enumerate() {
            node.push_back((key, key), Some(links[i + 1]));
        }

        let (median, right) = node.split();
        assert_eq!(median.0, 20);
        assert_eq!(node.children(), &links[..2]);
        assert_eq!(right.children(), &links[2..]);
        assert_eq!(node.len() + 1, node.children().len());
        assert_eq!(right.len() + 1, right.children().len());
    }

    #[test]
    fn absorb_folds_separator_between_halves() {
        let mut left = leaf(&[1]);
        let right = leaf(&[5]);
        left.absorb((3, 30), right);
        assert_eq!(keys(&left), [1, 3, 5]);
    }

    #[test]
    fn rotation_helpers_move_links_with_entries() {
        let a = NodeRef::new(0);
        let b = NodeRef::new(1);
        let c = NodeRef::new(2);

        let mut node = Node4::new();
        node.insert_child(0, a);
        node.push_back((1, 1), Some(b));
        node.push_front((0, 0), Some(c));
        assert_eq!(node.children(), &[c, a, b]);

        let (entry, child) = node.pop_back().expect("entry");
        assert_eq!((entry, child), ((1, 1), Some(b)));
        let (entry, child) = node.pop_front().expect("entry");
        assert_eq!((entry, child), ((0, 0), Some(c)));
        assert_eq!(node.len(), 0);
        assert!(node.pop_front().is_none());
    }

    #[test]
    fn remove_separator_drops_right_child() {
        let links: Vec<NodeRef> = (0..3).map(NodeRef::new).collect();
        let mut node = Node4::new();
        node.insert_child(0, links[0]);
        node.push_back((10, 10), Some(links[1]));
        node.push_back((20, 20), Some(links[2]));

        let (separator, child) = node.remove_separator(0);
        assert_eq!(separator, (10, 10));
        assert_eq!(child, links[1]);
        assert_eq!(node.children(), &[links[0], links[2]]);
    }
}
