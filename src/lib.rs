//! An in-memory ordered map built on a classic B-tree.
//!
//! [`TreeMap`] keeps key-value pairs sorted by key in nodes of a fixed fanout
//! `ORDER` (4 unless chosen otherwise). Entries live in internal nodes as well
//! as in leaves, and every leaf is at the same depth.
//!
//! # Example
//!
//! ```
//! use core::ops::ControlFlow;
//! use preemptive_btree::TreeMap;
//!
//! let mut map = TreeMap::new();
//! for key in 1..=6 {
//!     map.insert(key, key)?;
//! }
//! assert_eq!(map.get(&4), Some(&4));
//! assert_eq!(map.height(), 2);
//!
//! // In-order traversal with early stop.
//! let mut seen = Vec::new();
//! let _ = map.for_each(|&key, _| {
//!     seen.push(key);
//!     if key == 3 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
//! });
//! assert_eq!(seen, [1, 2, 3]);
//!
//! for key in 1..=6 {
//!     assert_eq!(map.remove(&key), Some(key));
//! }
//! assert!(map.is_empty());
//! # Ok::<(), preemptive_btree::TreeError>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Single-pass insertion** - Full nodes are split on the way down, so an insert never revisits a level
//! - **Fallible allocation** - Nodes an insert may need are reserved before the tree is touched
//! - **Early-stopping traversal** - [`TreeMap::for_each`] visits entries in order until the visitor breaks
//!
//! # Implementation
//!
//! Nodes live in a slot arena owned by the map and refer to their children by
//! index, so a node has exactly one owner and no back-links. Splits, rotations
//! and merges are logged at `trace` level through the [`log`] facade.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod config;
mod error;
mod raw;

pub mod tree_map;

pub use config::{DEFAULT_ORDER, DuplicatePolicy, TreeConfig};
pub use error::{Result, TreeError};
pub use tree_map::TreeMap;
