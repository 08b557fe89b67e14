//! Collision Resolver
//!
//! Runs once per save, before the host commits. For every saving node and
//! every language variant it reports, the resolver:
//!
//! 1. applies the applicability gate (unchanged persisted nodes are skipped)
//! 2. finds the scope root for the variant
//! 3. enumerates competing names inside that scope
//! 4. appends ` (n) ` to the variant name when anything collides, with
//!    `n` one past the largest suffix already in use
//!
//! Failures confined to a variant are recorded as
//! [`SkipReason`](super::SkipReason) and never abort the save.

use super::naming::{normalize_name, Tally};
use super::outcome::{NodeReport, SaveReport, SkipReason, VariantOutcome};
use super::scope::{collect_candidates, find_scope_root, ScopeRoot};
use crate::config::ScopeConfig;
use crate::marker::MarkerResolver;
use crate::models::{SavingNode, TreeNode, Variant};
use crate::tree::ContentTree;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Detects and resolves sibling name collisions for nodes being saved
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    marker: MarkerResolver,
}

impl CollisionResolver {
    pub fn new(config: Arc<ScopeConfig>) -> Self {
        Self {
            marker: MarkerResolver::new(config),
        }
    }

    pub fn marker(&self) -> &MarkerResolver {
        &self.marker
    }

    /// Process every node of a pending save, renaming in place
    pub fn process(&self, tree: &dyn ContentTree, nodes: &mut [SavingNode]) -> SaveReport {
        SaveReport {
            nodes: nodes
                .iter_mut()
                .map(|node| self.process_node(tree, node))
                .collect(),
        }
    }

    /// Process one saving node across all of its variants
    pub fn process_node(&self, tree: &dyn ContentTree, node: &mut SavingNode) -> NodeReport {
        if node.has_identity() && !node.name_has_changed() {
            debug!(
                "Skipping node {:?}: persisted and name unchanged",
                node.id
            );
            return NodeReport::not_checked(node.id);
        }

        let outcomes = node
            .variant_worklist()
            .into_iter()
            .map(|variant| {
                let outcome = self.resolve_variant(tree, node, &variant);
                (variant, outcome)
            })
            .collect();

        NodeReport {
            node_id: node.id,
            checked: true,
            outcomes,
        }
    }

    /// Check one variant and append a suffix if its name collides
    pub fn resolve_variant(
        &self,
        tree: &dyn ContentTree,
        node: &mut SavingNode,
        variant: &Variant,
    ) -> VariantOutcome {
        if node.is_persisted_root() {
            return VariantOutcome::Skipped(SkipReason::RootNode);
        }

        let scope = match find_scope_root(&self.marker, tree, node, variant) {
            Ok(scope) => scope,
            Err(reason) => {
                warn!(
                    "Skipping collision check for node {:?} ({}): {}",
                    node.id, variant, reason
                );
                return VariantOutcome::Skipped(reason);
            }
        };

        let tally = match self.tally(tree, node, &scope, variant) {
            Ok(tally) => tally,
            Err(reason) => {
                warn!(
                    "Skipping collision check for node {:?} ({}): {}",
                    node.id, variant, reason
                );
                return VariantOutcome::Skipped(reason);
            }
        };

        let Some(suffix) = tally.suffix() else {
            return VariantOutcome::Unchanged;
        };

        let from = node.name_for(variant).to_string();
        let to = format!("{}{}", from, suffix);
        node.set_name(to.clone(), variant);

        info!(
            "Renamed node {:?} ({}) from '{}' to '{}' ({} duplicate(s) under scope root {})",
            node.id, variant, from, to, tally.duplicates, scope.node.id
        );

        VariantOutcome::Renamed { from, to }
    }

    /// Count collisions for one variant inside `scope`
    ///
    /// A culture variant whose name is not dirty never collides: only names
    /// that actually changed are acted on.
    pub fn tally(
        &self,
        tree: &dyn ContentTree,
        node: &SavingNode,
        scope: &ScopeRoot,
        variant: &Variant,
    ) -> Result<Tally, SkipReason> {
        let candidates = collect_candidates(&self.marker, tree, &scope.node, variant, node.id)
            .map_err(SkipReason::tree_error)?;

        let saved_name = normalize_name(node.name_for(variant));

        Ok(candidates
            .iter()
            .fold(Tally::default(), |tally, candidate| {
                score_candidate(tally, node, candidate, &saved_name, variant)
            }))
    }
}

fn score_candidate(
    tally: Tally,
    node: &SavingNode,
    candidate: &TreeNode,
    saved_name: &str,
    variant: &Variant,
) -> Tally {
    if !variant.is_invariant() && !node.is_name_dirty(variant) {
        return tally;
    }

    let candidate_name = normalize_name(candidate.name_for(variant));
    tally.score(saved_name, &candidate_name)
}
