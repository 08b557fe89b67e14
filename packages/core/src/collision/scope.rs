//! Scope discovery and candidate enumeration
//!
//! The scope root is found by climbing from the saving node's parent through
//! chains of marked nodes. Candidates are the scope root's siblings (only
//! when the root itself is marked) plus every marked child of those
//! siblings, descending further only through marked nodes.

use super::outcome::SkipReason;
use crate::marker::MarkerResolver;
use crate::models::{NodeId, SavingNode, TreeNode, Variant, ROOT_ID};
use crate::tree::ContentTree;
use anyhow::Result;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Node under which collisions are checked
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeRoot {
    pub node: TreeNode,
    /// Upward iterations performed to reach it
    pub iterations: usize,
}

/// Find the scope root for one variant of a saving node
///
/// Starts at the node's parent and, while the current candidate is marked
/// and has a real parent, jumps to the nearest marked ancestor of that
/// parent. Stops after `max_walk_iterations` jumps; the candidate reached at
/// that point is used as-is.
pub fn find_scope_root(
    marker: &MarkerResolver,
    tree: &dyn ContentTree,
    saving: &SavingNode,
    variant: &Variant,
) -> Result<ScopeRoot, SkipReason> {
    let mut candidate = tree
        .get_node(saving.parent_id)
        .map_err(SkipReason::tree_error)?
        .ok_or(SkipReason::ParentNotFound {
            parent_id: saving.parent_id,
        })?;

    let limit = marker.config().max_walk_iterations;
    let mut iterations = 0;

    while candidate.has_parent() && marker.is_marked_in(&candidate, variant) {
        if iterations >= limit {
            warn!(
                "Scope walk for {} hit the iteration limit ({}), using node {} as scope root",
                describe(saving),
                limit,
                candidate.id
            );
            break;
        }

        let parent = match tree.parent(&candidate).map_err(SkipReason::tree_error)? {
            Some(parent) if parent.id != ROOT_ID => parent,
            _ => break,
        };

        candidate = marker
            .nearest_marked_ancestor(tree, &parent, variant, true)
            .map_err(SkipReason::tree_error)?
            .node;
        iterations += 1;
    }

    debug!(
        "Scope root for {} ({}) is node {} after {} iteration(s)",
        describe(saving),
        variant,
        candidate.id,
        iterations
    );

    Ok(ScopeRoot {
        node: candidate,
        iterations,
    })
}

/// Flatten every node whose name competes with the saving node
///
/// `exclude` is the saving node's own ID: it is never a candidate and its
/// subtree is not entered. Each node is yielded at most once, so cyclic
/// child links cannot loop.
pub fn collect_candidates(
    marker: &MarkerResolver,
    tree: &dyn ContentTree,
    scope_root: &TreeNode,
    variant: &Variant,
    exclude: Option<NodeId>,
) -> Result<Vec<TreeNode>> {
    let root_is_marked = marker.is_marked_in(scope_root, variant);
    let mut walker = CandidateWalker {
        marker,
        tree,
        variant,
        exclude,
        visited: HashSet::new(),
        found: Vec::new(),
    };

    for sibling in tree.siblings_and_self(scope_root, variant)? {
        let children = tree.children(&sibling, variant)?;

        if root_is_marked {
            walker.descend(sibling)?;
        }

        for child in children {
            if marker.is_marked_in(&child, variant) {
                walker.descend(child)?;
            }
        }
    }

    Ok(walker.found)
}

struct CandidateWalker<'a> {
    marker: &'a MarkerResolver,
    tree: &'a dyn ContentTree,
    variant: &'a Variant,
    exclude: Option<NodeId>,
    visited: HashSet<NodeId>,
    found: Vec<TreeNode>,
}

impl CandidateWalker<'_> {
    /// Depth-first from `start`, entering children only below marked nodes
    fn descend(&mut self, start: TreeNode) -> Result<()> {
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if Some(node.id) == self.exclude || !self.visited.insert(node.id) {
                continue;
            }

            if self.marker.is_marked_in(&node, self.variant) {
                let mut children = self.tree.children(&node, self.variant)?;
                children.reverse();
                stack.extend(children);
            }

            self.found.push(node);
        }

        Ok(())
    }
}

fn describe(saving: &SavingNode) -> String {
    match saving.id {
        Some(id) => format!("node {}", id),
        None => format!("new node '{}'", saving.name),
    }
}
