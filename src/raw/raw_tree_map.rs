use core::borrow::Borrow;
use core::ops::ControlFlow;

use log::{trace, warn};
use smallvec::SmallVec;

use super::node::{Node, SearchResult};
use super::node_ref::NodeRef;
use super::node_store::NodeStore;
use crate::config::{DuplicatePolicy, TreeConfig};
use crate::error::{Result, TreeError};

/// The B-tree engine backing `TreeMap`.
///
/// Mutations carry parent context down the call chain as `(parent, slot)`
/// instead of storing back-links in the nodes, so every node has exactly one
/// owner: the root link here, or one slot of its parent's child list.
#[derive(Clone)]
pub(crate) struct RawTreeMap<K, V, const ORDER: usize> {
    /// Store owning every node of the tree.
    nodes: NodeStore<Node<K, V, ORDER>>,
    /// Root node, if the tree is non-empty.
    root: Option<NodeRef>,
    /// Total number of key-value pairs in the tree.
    len: usize,
    config: TreeConfig,
}

/// One level of an in-order walk: a node and the next entry to yield from it.
type Frame = (NodeRef, usize);

/// Explicit walk stack; its depth never exceeds the tree height.
type Stack = SmallVec<[Frame; 16]>;

impl<K, V, const ORDER: usize> RawTreeMap<K, V, ORDER> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        let () = Node::<K, V, ORDER>::VALID_ORDER;
        Self {
            nodes: NodeStore::new(),
            root: None,
            len: 0,
            config: TreeConfig::new(),
        }
    }

    /// Creates a new, empty tree using `config`.
    pub(crate) fn with_config(config: TreeConfig) -> Self {
        let () = Node::<K, V, ORDER>::VALID_ORDER;
        Self {
            nodes: NodeStore::with_capacity(config.initial_node_capacity()),
            root: None,
            len: 0,
            config,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Returns the number of live nodes.
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of nodes the store can hold before it must grow.
    pub(crate) fn node_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of levels: 0 for an empty tree, 1 for a lone leaf.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(node) = current {
            height += 1;
            current = self.nodes.get(node).children().first().copied();
        }
        height
    }

    /// Releases every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        debug_assert!(self.nodes.is_empty());
    }

    /// Returns the leftmost or rightmost entry.
    fn edge_entry(&self, rightmost: bool) -> Option<(&K, &V)> {
        let mut current = self.nodes.get(self.root?);
        while !current.is_leaf() {
            let index = if rightmost { current.len() } else { 0 };
            current = self.nodes.get(current.child(index));
        }
        let index = if rightmost { current.len().checked_sub(1)? } else { 0 };
        (index < current.len()).then(|| current.entry(index))
    }

    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        self.edge_entry(false)
    }

    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        self.edge_entry(true)
    }

    /// Visits every entry in ascending key order until `visit` breaks.
    pub(crate) fn for_each<B, F>(&self, mut visit: F) -> ControlFlow<B>
    where
        F: FnMut(&K, &V) -> ControlFlow<B>,
    {
        match self.root {
            Some(root) => self.walk(root, &mut visit),
            None => ControlFlow::Continue(()),
        }
    }

    fn walk<B, F>(&self, node: NodeRef, visit: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&K, &V) -> ControlFlow<B>,
    {
        let node = self.nodes.get(node);
        let children = node.children();
        for (index, (key, value)) in node.entries().iter().enumerate() {
            if let Some(&child) = children.get(index) {
                self.walk(child, visit)?;
            }
            visit(key, value)?;
        }
        if let Some(&last) = children.get(node.len()) {
            self.walk(last, visit)?;
        }
        ControlFlow::Continue(())
    }

    /// Returns a lazy in-order iterator over the entries.
    pub(crate) fn iter(&self) -> RawIter<'_, K, V, ORDER> {
        let mut iter = RawIter {
            tree: self,
            stack: Stack::new(),
            remaining: self.len,
        };
        if let Some(root) = self.root {
            iter.descend_leftmost(root);
        }
        iter
    }
}

impl<K: Ord, V, const ORDER: usize> RawTreeMap<K, V, ORDER> {
    /// Searches for a key and returns the node and slot holding it.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<(NodeRef, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            match node.search(key) {
                SearchResult::Found(index) => return Some((current, index)),
                SearchResult::NotFound(_) if node.is_leaf() => return None,
                SearchResult::NotFound(index) => current = node.child(index),
            }
        }
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (node, index) = self.search(key)?;
        Some(self.nodes.get(node).entry(index))
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (node, index) = self.search(key)?;
        Some(self.nodes.get_mut(node).value_mut(index))
    }

    /// Inserts a key-value pair.
    ///
    /// An existing key is handled by the configured [`DuplicatePolicy`] before
    /// anything else happens. Otherwise every node this insertion could
    /// allocate is reserved first, so a failed reservation leaves the tree
    /// untouched.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        if let Some((node, index)) = self.search(&key) {
            return match self.config.duplicate_policy() {
                DuplicatePolicy::Overwrite => {
                    Ok(Some(core::mem::replace(self.nodes.get_mut(node).value_mut(index), value)))
                }
                DuplicatePolicy::Reject => Err(TreeError::DuplicateKey),
            };
        }

        // Worst case every level splits and the root grows by one.
        let height = self.height();
        if let Err(err) = self.nodes.try_reserve(height + 1) {
            warn!("insert aborted: cannot reserve {} nodes: {}", height + 1, err);
            return Err(err);
        }

        let Some(root) = self.root else {
            let mut leaf = Node::new();
            leaf.insert_entry(0, (key, value));
            self.root = Some(self.nodes.alloc(leaf));
            self.len = 1;
            return Ok(None);
        };

        let mut current = root;
        let mut parent: Option<Frame> = None;
        loop {
            if self.nodes.get(current).is_full() {
                current = self.split(current, parent, &key);
            }

            let node = self.nodes.get(current);
            let slot = node.upper_slot(&key);
            debug_assert!(slot == 0 || *node.key(slot - 1) < key, "duplicate reached descent");

            if node.is_leaf() {
                self.nodes.get_mut(current).insert_entry(slot, (key, value));
                self.len += 1;
                return Ok(None);
            }

            parent = Some((current, slot));
            current = node.child(slot);
        }
    }

    /// Splits the full `node` and returns whichever half covers `key`.
    ///
    /// The parent always has room for the promoted median because it was split
    /// on the way down if it was full.
    fn split(&mut self, node: NodeRef, parent: Option<Frame>, key: &K) -> NodeRef {
        let (median, right) = self.nodes.get_mut(node).split();
        let goes_right = median.0 < *key;
        let right = self.nodes.alloc(right);

        match parent {
            Some((parent, slot)) => {
                let parent_node = self.nodes.get_mut(parent);
                debug_assert!(!parent_node.is_full(), "parent of a split must have room");
                parent_node.insert_entry(slot, median);
                parent_node.insert_child(slot + 1, right);
                trace!("split {node:?} into {right:?}, median promoted into {parent:?} at slot {slot}");
            }
            None => {
                let root = self.nodes.alloc(Node::new_root(median, node, right));
                self.root = Some(root);
                trace!("split root {node:?} into {right:?}, new root {root:?}");
            }
        }

        if goes_right { right } else { node }
    }

    /// Removes a key from the tree and returns the value.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the tree and returns the key-value pair.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let root = self.root?;
        let removed = self.remove_from(root, key)?;
        self.len -= 1;
        self.shrink_root(root);
        Some(removed)
    }

    /// Removes `key` from the subtree under `node`.
    ///
    /// Children are repaired before returning; `node` itself may be left
    /// deficient for its caller to fix.
    fn remove_from<Q>(&mut self, node: NodeRef, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let current = self.nodes.get(node);
        match current.search(key) {
            SearchResult::Found(index) if current.is_leaf() => Some(self.nodes.get_mut(node).remove_entry(index)),
            SearchResult::Found(index) => {
                // Internal slots must stay populated: pull up the in-order successor.
                let right = current.child(index + 1);
                let successor = self.pop_first_from(right);
                let removed = self.nodes.get_mut(node).replace_entry(index, successor);
                self.repair_child(node, index + 1);
                Some(removed)
            }
            SearchResult::NotFound(_) if current.is_leaf() => None,
            SearchResult::NotFound(index) => {
                let child = current.child(index);
                let removed = self.remove_from(child, key)?;
                self.repair_child(node, index);
                Some(removed)
            }
        }
    }

    /// Removes the smallest entry under `node`, repairing every level below it.
    fn pop_first_from(&mut self, node: NodeRef) -> (K, V) {
        let current = self.nodes.get(node);
        if current.is_leaf() {
            return self.nodes.get_mut(node).remove_entry(0);
        }
        let first = current.child(0);
        let entry = self.pop_first_from(first);
        self.repair_child(node, 0);
        entry
    }

    /// Restores minimum occupancy of `parent.children[slot]` by rotating an
    /// entry in from a sibling, or by merging with one.
    fn repair_child(&mut self, parent: NodeRef, slot: usize) {
        let parent_node = self.nodes.get(parent);
        let child = parent_node.child(slot);
        if !self.nodes.get(child).is_deficient() {
            return;
        }

        let right = (slot < parent_node.len()).then(|| parent_node.child(slot + 1));
        let left = slot.checked_sub(1).map(|index| parent_node.child(index));

        if right.is_some_and(|right| self.nodes.get(right).can_lend()) {
            self.rotate_right(parent, slot);
        } else if left.is_some_and(|left| self.nodes.get(left).can_lend()) {
            self.rotate_left(parent, slot);
        } else if right.is_some() {
            self.merge(parent, slot);
        } else {
            self.merge(parent, slot - 1);
        }
    }

    /// Moves the separator at `slot` down into the deficient child and promotes
    /// the right sibling's first entry in its place.
    fn rotate_right(&mut self, parent: NodeRef, slot: usize) {
        let parent_node = self.nodes.get(parent);
        let child = parent_node.child(slot);
        let right = parent_node.child(slot + 1);

        let Some((entry, link)) = self.nodes.get_mut(right).pop_front() else {
            unreachable!("a lending sibling has entries");
        };
        let separator = self.nodes.get_mut(parent).replace_entry(slot, entry);
        self.nodes.get_mut(child).push_back(separator, link);
        trace!("rotated {right:?} into {child:?} through {parent:?}");
    }

    /// Moves the separator left of `slot` down into the deficient child and
    /// promotes the left sibling's last entry in its place.
    fn rotate_left(&mut self, parent: NodeRef, slot: usize) {
        let parent_node = self.nodes.get(parent);
        let child = parent_node.child(slot);
        let left = parent_node.child(slot - 1);

        let Some((entry, link)) = self.nodes.get_mut(left).pop_back() else {
            unreachable!("a lending sibling has entries");
        };
        let separator = self.nodes.get_mut(parent).replace_entry(slot - 1, entry);
        self.nodes.get_mut(child).push_front(separator, link);
        trace!("rotated {left:?} into {child:?} through {parent:?}");
    }

    /// Folds the children on either side of separator `index`, and the
    /// separator itself, into the left child and releases the right one.
    fn merge(&mut self, parent: NodeRef, index: usize) {
        let (separator, right) = self.nodes.get_mut(parent).remove_separator(index);
        let left = self.nodes.get(parent).child(index);
        let absorbed = self.nodes.take(right);
        self.nodes.get_mut(left).absorb(separator, absorbed);
        trace!("merged {right:?} into {left:?} under {parent:?}");
    }

    /// Drops a root left without entries: an empty leaf empties the tree, an
    /// empty internal root hands the root link to its only child.
    fn shrink_root(&mut self, root: NodeRef) {
        let root_node = self.nodes.get(root);
        if root_node.len() > 0 {
            return;
        }
        let child = root_node.children().first().copied();
        self.nodes.release(root);
        self.root = child;
        trace!("released empty root {root:?}, new root {child:?}");
    }
}

/// Lazy in-order iterator over a [`RawTreeMap`].
pub(crate) struct RawIter<'a, K, V, const ORDER: usize> {
    tree: &'a RawTreeMap<K, V, ORDER>,
    stack: Stack,
    remaining: usize,
}

impl<K, V, const ORDER: usize> Clone for RawIter<'_, K, V, ORDER> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V, const ORDER: usize> RawIter<'_, K, V, ORDER> {
    fn descend_leftmost(&mut self, mut node: NodeRef) {
        loop {
            self.stack.push((node, 0));
            match self.tree.nodes.get(node).children().first() {
                Some(&first) => node = first,
                None => return,
            }
        }
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<'a, K, V, const ORDER: usize> Iterator for RawIter<'a, K, V, ORDER> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(frame) = self.stack.last_mut() {
            let node = tree.nodes.get(frame.0);
            let index = frame.1;
            if index < node.len() {
                frame.1 += 1;
                if !node.is_leaf() {
                    self.descend_leftmost(node.child(index + 1));
                }
                self.remaining -= 1;
                return Some(node.entry(index));
            }
            self.stack.pop();
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
