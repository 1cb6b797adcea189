use log::debug;

use super::TreeMap;
use crate::config::TreeConfig;
use crate::raw::RawTreeMap;

impl<K, V, const ORDER: usize> TreeMap<K, V, ORDER> {
    /// Creates an empty map using `config`, reserving
    /// [`node_capacity`](TreeConfig::node_capacity) nodes up front.
    ///
    /// This is the constructor for maps whose `ORDER` is not the default.
    ///
    /// # Complexity
    ///
    /// O(node capacity) for memory allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use preemptive_btree::{TreeConfig, TreeMap};
    ///
    /// let map: TreeMap<i32, i32, 8> = TreeMap::with_config(TreeConfig::new().node_capacity(32));
    /// assert!(map.is_empty());
    /// assert!(map.node_capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_config(config: TreeConfig) -> Self {
        debug!("creating map of order {ORDER} with {config:?}");
        TreeMap {
            raw: RawTreeMap::with_config(config),
        }
    }

    /// Returns the settings this map was created with.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn config(&self) -> &TreeConfig {
        self.raw.config()
    }

    /// Returns how many nodes the map can hold before it has to allocate.
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
    /// let map: TreeMap<i32, i32> = TreeMap::new();
    /// assert_eq!(map.node_capacity(), 0);
    /// ```
    #[must_use]
    pub fn node_capacity(&self) -> usize {
        self.raw.node_capacity()
    }

    /// Returns the number of nodes currently in the tree.
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
    /// for key in 1..=3 {
    ///     map.insert(key, ())?;
    /// }
    /// assert_eq!(map.node_count(), 1);
    ///
    /// // The fourth key finds the root full and splits it.
    /// map.insert(4, ())?;
    /// assert_eq!(map.node_count(), 3);
    /// # Ok::<(), preemptive_btree::TreeError>(())
    /// ```
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.raw.node_count()
    }

    /// Returns the number of levels in the tree: 0 when empty, 1 while the
    /// root is the only node.
    ///
    /// Every leaf is at this depth.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }
}
