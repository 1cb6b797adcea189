use alloc::vec::Vec;

use super::node_ref::NodeRef;
use crate::error::{Result, TreeError};

/// Slot arena owning every node of one tree.
///
/// The store has no notion of tree shape: a parent owns its children only
/// through the `NodeRef`s it holds, and releasing a slot never touches the
/// slots it used to point at.
pub(crate) struct NodeStore<T> {
    slots: Vec<Option<T>>,
    // Kept at least as large as `slots` so that `release` never allocates.
    free: Vec<NodeRef>,
}

impl<T> NodeStore<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes sure the next `additional` calls to [`alloc`](Self::alloc) and any
    /// number of calls to [`release`](Self::release) succeed without growing.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let needed = additional.saturating_sub(self.free.len());
        let total = self.slots.len() + needed;
        if total > NodeRef::LIMIT {
            return Err(TreeError::NodeLimit { max: NodeRef::LIMIT });
        }

        self.slots.try_reserve(needed)?;
        self.free.try_reserve(total - self.free.len())?;
        Ok(())
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeRef {
        if let Some(node) = self.free.pop() {
            self.slots[node.slot()] = Some(element);
            node
        } else {
            let node = NodeRef::new(self.slots.len());
            self.slots.push(Some(element));
            node
        }
    }

    #[inline]
    pub(crate) fn get(&self, node: NodeRef) -> &T {
        self.slots[node.slot()].as_ref().expect("`NodeStore::get()` - `node` is released!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, node: NodeRef) -> &mut T {
        self.slots[node.slot()].as_mut().expect("`NodeStore::get_mut()` - `node` is released!")
    }

    /// Moves a node out of the store and frees its slot.
    pub(crate) fn take(&mut self, node: NodeRef) -> T {
        let element = self.slots[node.slot()].take().expect("`NodeStore::take()` - `node` is released!");
        self.free.push(node);
        element
    }

    pub(crate) fn release(&mut self, node: NodeRef) {
        drop(self.take(node));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T: Clone> Clone for NodeStore<T> {
    fn clone(&self) -> Self {
        let mut free = Vec::with_capacity(self.slots.len());
        free.extend_from_slice(&self.free);
        Self {
            slots: self.slots.clone(),
            free,
        }
    }
}
