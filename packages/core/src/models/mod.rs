//! Data Models
//!
//! This module contains the data structures shared by every component:
//!
//! - `TreeNode` - published snapshot of a node as the host tree returns it
//! - `SavingNode` - editable node inside the host save pipeline
//! - `Variant` - language variant a comparison is scoped to
//!
//! All of them are owned and supplied by the host; this crate keeps no
//! persistent state of its own.

mod node;
mod variant;

pub use node::{NodeId, SavingNode, TreeNode, ValidationError, VariantName, ROOT_ID};
pub use variant::Variant;
