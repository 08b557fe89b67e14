//! Per-variant outcomes and the save report
//!
//! A failure confined to one variant of one node is a [`SkipReason`], not an
//! error: the save goes ahead with that name untouched.

use crate::models::{NodeId, Variant};
use thiserror::Error;

/// Why a variant was left alone without a collision check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Persisted root node (identity, depth 0, no parent)
    #[error("node is a persisted tree root")]
    RootNode,

    /// The parent could not be found in the tree
    #[error("parent node {parent_id} not found")]
    ParentNotFound { parent_id: NodeId },

    /// The host tree failed while resolving the scope or enumerating it
    #[error("content tree error: {0}")]
    TreeError(String),
}

impl SkipReason {
    pub fn tree_error(err: impl std::fmt::Display) -> Self {
        Self::TreeError(err.to_string())
    }
}

/// What happened to one variant of one saving node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantOutcome {
    /// A collision was found and a suffix appended
    Renamed { from: String, to: String },
    /// Checked (or not dirty); the name stays as it is
    Unchanged,
    /// Processing for this variant was abandoned
    Skipped(SkipReason),
}

/// Outcomes for one saving node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    /// Host ID, `None` for nodes saved for the first time
    pub node_id: Option<NodeId>,
    /// False when the applicability gate skipped the whole node
    pub checked: bool,
    pub outcomes: Vec<(Variant, VariantOutcome)>,
}

impl NodeReport {
    pub(crate) fn not_checked(node_id: Option<NodeId>) -> Self {
        Self {
            node_id,
            checked: false,
            outcomes: Vec::new(),
        }
    }

    /// Outcome recorded for `variant`, if it was processed
    pub fn outcome(&self, variant: &Variant) -> Option<&VariantOutcome> {
        self.outcomes
            .iter()
            .find(|(v, _)| v == variant)
            .map(|(_, outcome)| outcome)
    }
}

/// Everything one save-hook invocation did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub nodes: Vec<NodeReport>,
}

impl SaveReport {
    /// Number of variant names that received a suffix
    pub fn renamed_count(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|node| node.outcomes.iter())
            .filter(|(_, outcome)| matches!(outcome, VariantOutcome::Renamed { .. }))
            .count()
    }

    /// Number of variants abandoned with a [`SkipReason`]
    pub fn skipped_count(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|node| node.outcomes.iter())
            .filter(|(_, outcome)| matches!(outcome, VariantOutcome::Skipped(_)))
            .count()
    }
}
