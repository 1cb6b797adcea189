use core::fmt;
use core::num::NonZero;

// Narrow under test so the store limit is reachable.
#[cfg(test)]
type Slot = u16;
#[cfg(not(test))]
type Slot = u32;

/// Link to a node slot in a [`NodeStore`](super::node_store::NodeStore).
///
/// Child lists hold these instead of pointers. The slot is stored off by one,
/// so `Option<NodeRef>` costs nothing over `NodeRef`.
#[derive(Clone, Copy, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct NodeRef(NonZero<Slot>);

impl NodeRef {
    /// Number of distinct slots a `NodeRef` can name; also the most nodes one
    /// tree can hold.
    pub(crate) const LIMIT: usize = Slot::MAX as usize;

    /// Returns a link to `slot`, or `None` if it is not addressable.
    #[inline]
    pub(crate) const fn checked(slot: usize) -> Option<Self> {
        if slot >= Self::LIMIT {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let raw = (slot + 1) as Slot;
        match NonZero::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    #[inline]
    pub(crate) const fn new(slot: usize) -> Self {
        match Self::checked(slot) {
            Some(node) => node,
            None => panic!("`NodeRef::new()` - `slot` >= `NodeRef::LIMIT`!"),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot())
    }
}
