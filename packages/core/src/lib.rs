//! NameScope Core
//!
//! Detects and resolves sibling name collisions in a hierarchical content
//! tree just before a node is persisted.
//!
//! # Architecture
//!
//! - **Marked nodes**: nodes whose type is in the configured marked-type set,
//!   or whose reserved attribute is true, widen the scope in which names
//!   must be unique
//! - **Scope root**: found by climbing from the saving node's parent through
//!   marked ancestors, with a bounded loop so cyclic trees cannot hang a save
//! - **Per-variant**: every language variant is checked and renamed on its own
//! - **Deterministic suffix**: a colliding name gets ` (n) ` appended, where `n`
//!   is one past the largest suffix already in scope
//!
//! # Modules
//!
//! - [`models`] - Tree and saving node structures, language variants
//! - [`tree`] - Host content-tree abstraction and in-memory implementation
//! - [`config`] - Marked-type set, iteration limit, reserved attribute
//! - [`marker`] - Marker resolver (is-marked, nearest marked ancestor)
//! - [`collision`] - Collision resolver (scope, candidates, scoring, renaming)
//! - [`notification`] - Host save-pipeline handler

pub mod collision;
pub mod config;
pub mod error;
pub mod marker;
pub mod models;
pub mod notification;
pub mod tree;

// Re-export commonly used types
pub use collision::{CollisionResolver, SaveReport, SkipReason, VariantOutcome};
pub use config::ScopeConfig;
pub use error::{ConfigError, NameScopeError};
pub use marker::{MarkedAncestor, MarkerResolver};
pub use models::*;
pub use notification::{ContentSavingHandler, NotificationHandler, SavingNotification};
pub use tree::{ContentTree, MemoryTree};
