//! Collision Resolution
//!
//! - [`CollisionResolver`] - per-save, per-variant collision check and rename
//! - [`find_scope_root`] / [`collect_candidates`] - scope discovery and traversal
//! - [`Tally`] and the naming helpers - comparison and suffix arithmetic
//! - [`SaveReport`] - what a save-hook invocation did, variant by variant

mod naming;
mod outcome;
mod resolver;
mod scope;

pub use naming::{disambiguation_suffix, normalize_name, suffix_number, Tally};
pub use outcome::{NodeReport, SaveReport, SkipReason, VariantOutcome};
pub use resolver::CollisionResolver;
pub use scope::{collect_candidates, find_scope_root, ScopeRoot};
