//! In-memory content tree
//!
//! Reference [`ContentTree`] implementation. Hosts that already hold a
//! snapshot of their tree in memory can load it here, and the test suites
//! build their fixtures with it. Child order is insertion order.

use super::ContentTree;
use crate::models::{NodeId, TreeNode, ValidationError, Variant};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// JSON fixture layout: `{ "nodes": [ ... ] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeSnapshot {
    #[serde(default)]
    pub nodes: Vec<TreeNode>,
}

/// Content tree held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nodes: BTreeMap<NodeId, TreeNode>,
    /// parent id -> child ids, in insertion order (`ROOT_ID` holds top-level nodes)
    children: BTreeMap<NodeId, Vec<NodeId>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from nodes in the order given
    ///
    /// Parents do not have to be inserted before their children, and
    /// parent links are not checked for cycles: malformed trees are
    /// representable on purpose so the resolvers' loop guards can be exercised.
    pub fn from_nodes(nodes: impl IntoIterator<Item = TreeNode>) -> Result<Self, ValidationError> {
        let mut tree = Self::new();
        for node in nodes {
            tree.insert(node)?;
        }
        Ok(tree)
    }

    /// Parse a JSON snapshot (`{"nodes": [...]}`)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: TreeSnapshot =
            serde_json::from_str(json).context("Failed to parse tree snapshot")?;
        Ok(Self::from_nodes(snapshot.nodes)?)
    }

    /// Load a JSON snapshot from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tree snapshot {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Add a node
    ///
    /// # Errors
    ///
    /// Fails if the node does not validate or its ID is already taken.
    pub fn insert(&mut self, node: TreeNode) -> Result<(), ValidationError> {
        node.validate()?;

        if self.nodes.contains_key(&node.id) {
            return Err(ValidationError::InvalidId(format!(
                "duplicate node id {}",
                node.id
            )));
        }

        self.children.entry(node.parent_id).or_default().push(node.id);
        self.nodes.insert(node.id, node);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Export the current contents as a snapshot
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            nodes: self.nodes.values().cloned().collect(),
        }
    }

    fn children_of(&self, parent_id: NodeId, variant: &Variant) -> Vec<TreeNode> {
        self.children
            .get(&parent_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.nodes.get(id))
            .filter(|node| node.available_in(variant))
            .cloned()
            .collect()
    }
}

impl ContentTree for MemoryTree {
    fn get_node(&self, id: NodeId) -> Result<Option<TreeNode>> {
        Ok(self.nodes.get(&id).cloned())
    }

    fn siblings_and_self(&self, node: &TreeNode, variant: &Variant) -> Result<Vec<TreeNode>> {
        Ok(self.children_of(node.parent_id, variant))
    }

    fn children(&self, node: &TreeNode, variant: &Variant) -> Result<Vec<TreeNode>> {
        Ok(self.children_of(node.id, variant))
    }
}
