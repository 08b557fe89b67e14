//! Host Tree Layer
//!
//! - [`ContentTree`] - the capabilities the resolvers need from the host tree
//! - [`MemoryTree`] - in-memory implementation used by tooling and tests

mod content_tree;
mod memory_tree;

pub use content_tree::ContentTree;
pub use memory_tree::{MemoryTree, TreeSnapshot};
