/// Order used by [`TreeMap`](crate::TreeMap) when none is given: at most four
/// children and three entries per node.
pub const DEFAULT_ORDER: usize = 4;

/// What an insertion does when its key is already in the map.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DuplicatePolicy {
    /// Replace the stored value and hand the previous one back.
    #[default]
    Overwrite,
    /// Leave the map untouched and fail with
    /// [`TreeError::DuplicateKey`](crate::TreeError::DuplicateKey).
    Reject,
}

/// Run-time settings for a [`TreeMap`](crate::TreeMap).
///
/// The fanout is a compile-time property of the map type (its `ORDER`
/// parameter); everything else lives here.
///
/// # Examples
///
/// ```
/// use preemptive_btree::{DuplicatePolicy, TreeConfig, TreeMap};
///
/// let config = TreeConfig::new().duplicates(DuplicatePolicy::Reject).node_capacity(64);
/// let map: TreeMap<u64, u64> = TreeMap::with_config(config);
/// assert_eq!(map.config().duplicate_policy(), DuplicatePolicy::Reject);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct TreeConfig {
    duplicates: DuplicatePolicy,
    node_capacity: usize,
}

impl TreeConfig {
    /// Default settings: overwrite duplicates, no preallocated nodes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duplicates: DuplicatePolicy::Overwrite,
            node_capacity: 0,
        }
    }

    /// Sets the duplicate-key policy.
    #[must_use]
    pub const fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Sets how many nodes the store reserves up front.
    #[must_use]
    pub const fn node_capacity(mut self, nodes: usize) -> Self {
        self.node_capacity = nodes;
        self
    }

    /// Returns the duplicate-key policy.
    #[must_use]
    pub const fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Returns the number of nodes reserved at construction.
    #[must_use]
    pub const fn initial_node_capacity(&self) -> usize {
        self.node_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_overwrite_without_capacity() {
        let config = TreeConfig::default();
        assert_eq!(config, TreeConfig::new());
        assert_eq!(config.duplicate_policy(), DuplicatePolicy::Overwrite);
        assert_eq!(config.initial_node_capacity(), 0);
    }

    #[test]
    fn setters_chain() {
        let config = TreeConfig::new().node_capacity(8).duplicates(DuplicatePolicy::Reject);
        assert_eq!(config.duplicate_policy(), DuplicatePolicy::Reject);
        assert_eq!(config.initial_node_capacity(), 8);
    }
}
