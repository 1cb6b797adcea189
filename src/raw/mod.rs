mod node;
mod node_ref;
mod node_store;
mod raw_tree_map;

pub(crate) use raw_tree_map::{RawIter, RawTreeMap};
