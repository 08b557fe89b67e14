//! Marker Resolver
//!
//! A node is *marked* when its type alias is in the configured marked-type
//! set, or when its reserved attribute is true. Marked nodes bound the scope
//! in which sibling names must be unique.

use crate::config::ScopeConfig;
use crate::models::{TreeNode, Variant, ROOT_ID};
use crate::tree::ContentTree;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of [`MarkerResolver::nearest_marked_ancestor`]
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedAncestor {
    /// Whether a marked node was found
    pub found: bool,
    /// The marked node, or the last node visited when none was found
    pub node: TreeNode,
    /// Upward steps taken (0 when the start node itself is marked)
    pub steps: usize,
}

/// Decides which nodes are marked and finds the nearest marked ancestor
#[derive(Debug, Clone)]
pub struct MarkerResolver {
    config: Arc<ScopeConfig>,
}

impl MarkerResolver {
    pub fn new(config: Arc<ScopeConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    /// True if the node's type is marked or its reserved attribute is set
    pub fn is_marked(&self, node: &TreeNode) -> bool {
        self.config.is_marked_type(&node.node_type)
            || node.attribute_flag(&self.config.reserved_attribute)
    }

    /// Variant-aware form of [`is_marked`](Self::is_marked)
    ///
    /// Marking does not depend on the variant today; the parameter keeps
    /// call sites that iterate per variant uniform.
    pub fn is_marked_in(&self, node: &TreeNode, _variant: &Variant) -> bool {
        self.is_marked(node)
    }

    /// Find the closest marked node among `node` and its ancestors
    ///
    /// Returns immediately with zero steps when `node` is itself marked.
    /// Otherwise walks parent links until a marked node is found, the parent
    /// is missing, or the parent is the tree-root sentinel. The walk is
    /// bounded by `max_walk_iterations`, so cyclic parent links cannot hang it.
    ///
    /// `variant` and `recursive` are accepted for call-site symmetry and do
    /// not change the outcome.
    ///
    /// # Errors
    ///
    /// Propagates host tree read failures.
    pub fn nearest_marked_ancestor(
        &self,
        tree: &dyn ContentTree,
        node: &TreeNode,
        variant: &Variant,
        recursive: bool,
    ) -> Result<MarkedAncestor> {
        if self.is_marked_in(node, variant) {
            return Ok(MarkedAncestor {
                found: true,
                node: node.clone(),
                steps: 0,
            });
        }

        let limit = self.config.max_walk_iterations;
        let mut current = node.clone();
        let mut steps = 0;

        while steps < limit {
            let parent = match tree.parent(&current)? {
                Some(parent) if parent.id != ROOT_ID => parent,
                _ => {
                    debug!(
                        "No marked ancestor for node {} ({}, recursive={}), stopped at {}",
                        node.id, variant, recursive, current.id
                    );
                    return Ok(MarkedAncestor {
                        found: false,
                        node: current,
                        steps,
                    });
                }
            };

            current = parent;
            steps += 1;

            if self.is_marked_in(&current, variant) {
                return Ok(MarkedAncestor {
                    found: true,
                    node: current,
                    steps,
                });
            }
        }

        warn!(
            "Marked-ancestor walk from node {} hit the iteration limit ({}), stopping at {}",
            node.id, limit, current.id
        );
        Ok(MarkedAncestor {
            found: false,
            node: current,
            steps,
        })
    }
}
