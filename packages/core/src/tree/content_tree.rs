//! ContentTree Trait - Host Tree Abstraction
//!
//! The content tree belongs to the host application. This trait is the only
//! way the resolvers read it, so any backend (a CMS cache, a database view,
//! the in-memory [`MemoryTree`](super::MemoryTree)) can sit behind it.
//!
//! # Design Decisions
//!
//! 1. **Synchronous**: Collision checks run to completion inside the host's
//!    pre-save hook, so there is nothing to await
//! 2. **Owned snapshots**: Methods return owned [`TreeNode`] values; the
//!    resolvers never hold borrows into host storage across calls
//! 3. **Error Handling**: Uses `anyhow::Result` so hosts can surface their own
//!    error types with context
//! 4. **Variant scoping**: Navigation takes the language variant so hosts can
//!    hide nodes that do not exist in that language
//!
//! # Examples
//!
//! ```rust
//! use namescope_core::models::{TreeNode, Variant, ROOT_ID};
//! use namescope_core::tree::{ContentTree, MemoryTree};
//!
//! # fn main() -> anyhow::Result<()> {
//! let tree = MemoryTree::from_nodes(vec![
//!     TreeNode::new(1, ROOT_ID, "home", "Home"),
//!     TreeNode::new(2, 1, "page", "About"),
//!     TreeNode::new(3, 1, "page", "Contact"),
//! ])?;
//!
//! let about = tree.get_node(2)?.expect("about exists");
//! let siblings = tree.siblings_and_self(&about, &Variant::Invariant)?;
//! assert_eq!(siblings.len(), 2);
//! # Ok(())
//! # }
//! ```

use crate::models::{NodeId, TreeNode, Variant};
use anyhow::Result;

/// Read access to the host content tree
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: the host may run saves for
/// different nodes concurrently against the same tree.
pub trait ContentTree: Send + Sync {
    /// Get node by ID
    ///
    /// # Returns
    ///
    /// - `Ok(Some(node))` if node exists
    /// - `Ok(None)` if node doesn't exist (not an error)
    /// - `Err(_)` if the host failed to read its tree
    fn get_node(&self, id: NodeId) -> Result<Option<TreeNode>>;

    /// Parent of `node`, or `None` for top-level nodes
    ///
    /// The default implementation looks the parent up by ID and treats the
    /// tree-root sentinel as "no parent".
    fn parent(&self, node: &TreeNode) -> Result<Option<TreeNode>> {
        if !node.has_parent() {
            return Ok(None);
        }
        self.get_node(node.parent_id)
    }

    /// All nodes sharing `node`'s parent, `node` included, visible in `variant`
    fn siblings_and_self(&self, node: &TreeNode, variant: &Variant) -> Result<Vec<TreeNode>>;

    /// Direct children of `node` visible in `variant`
    fn children(&self, node: &TreeNode, variant: &Variant) -> Result<Vec<TreeNode>>;
}
