use alloc::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by fallible [`TreeMap`](crate::TreeMap) operations.
///
/// A missing key is never an error: lookups and removals report it with `None`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The node store could not grow to hold the nodes an insertion may need.
    ///
    /// The map is left exactly as it was before the call.
    #[error("node store allocation failed: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// The tree would need more nodes than a node reference can address.
    #[error("node store is full ({max} nodes)")]
    NodeLimit {
        /// Number of nodes a single store can hold.
        max: usize,
    },

    /// The key is already present and the map was configured with
    /// [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
    #[error("key is already present in the map")]
    DuplicateKey,
}

/// Result type alias for [`TreeMap`](crate::TreeMap) operations.
pub type Result<T, E = TreeError> = core::result::Result<T, E>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn reservation_failure_converts() {
        let cause = Vec::<u64>::new().try_reserve(usize::MAX).unwrap_err();
        let err: TreeError = cause.clone().into();
        assert_eq!(err, TreeError::OutOfMemory(cause));
        assert!(err.to_string().starts_with("node store allocation failed: "));
    }

    #[test]
    fn node_limit_names_the_limit() {
        assert_eq!(TreeError::NodeLimit { max: 7 }.to_string(), "node store is full (7 nodes)");
    }
}
