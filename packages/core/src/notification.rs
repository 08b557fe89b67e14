//! Save-pipeline integration
//!
//! The host raises a [`SavingNotification`] with every node about to be
//! committed and hands it to registered [`NotificationHandler`]s before the
//! save proceeds. [`ContentSavingHandler`] is the handler that runs the
//! collision check; it may rename nodes in place, and the host persists
//! whatever names it finds afterwards.
//!
//! # Examples
//!
//! ```rust
//! use namescope_core::config::ScopeConfig;
//! use namescope_core::models::{SavingNode, TreeNode, ROOT_ID};
//! use namescope_core::notification::{
//!     ContentSavingHandler, NotificationHandler, SavingNotification, StaticTreeAccessor,
//! };
//! use namescope_core::tree::MemoryTree;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let tree = MemoryTree::from_nodes(vec![
//!     TreeNode::new(1, ROOT_ID, "home", "Home"),
//!     TreeNode::new(2, 1, "folder", "Folder"),
//!     TreeNode::new(3, 2, "page", "Contact"),
//! ])?;
//! let config = Arc::new(ScopeConfig::default().with_marked_types(["folder"]));
//! let handler = ContentSavingHandler::new(StaticTreeAccessor::new(Arc::new(tree)), config);
//!
//! let mut notification = SavingNotification::new(vec![SavingNode::new(1, "page", "Contact")]);
//! handler.handle(&mut notification)?;
//!
//! assert_eq!(notification.saved_entities[0].name, "Contact (1) ");
//! # Ok(())
//! # }
//! ```

use crate::collision::{CollisionResolver, SaveReport};
use crate::config::ScopeConfig;
use crate::error::NameScopeError;
use crate::models::SavingNode;
use crate::tree::ContentTree;
use std::sync::Arc;
use tracing::debug;

/// Nodes about to be committed by the host
#[derive(Debug, Clone, Default)]
pub struct SavingNotification {
    pub saved_entities: Vec<SavingNode>,
}

impl SavingNotification {
    pub fn new(saved_entities: Vec<SavingNode>) -> Self {
        Self { saved_entities }
    }
}

/// Handler invoked synchronously by the host for a notification of type `N`
pub trait NotificationHandler<N> {
    /// Handle the notification
    ///
    /// Returning `Err` tells the host to abort the operation.
    fn handle(&self, notification: &mut N) -> Result<(), NameScopeError>;
}

/// Gives access to the host's current content tree
///
/// Returns `None` when no request or session context is active.
pub trait TreeContextAccessor: Send + Sync {
    fn tree(&self) -> Option<Arc<dyn ContentTree>>;
}

/// Accessor that always returns the same tree
#[derive(Clone)]
pub struct StaticTreeAccessor {
    tree: Arc<dyn ContentTree>,
}

impl StaticTreeAccessor {
    pub fn new(tree: Arc<dyn ContentTree>) -> Self {
        Self { tree }
    }
}

impl TreeContextAccessor for StaticTreeAccessor {
    fn tree(&self) -> Option<Arc<dyn ContentTree>> {
        Some(self.tree.clone())
    }
}

/// Runs collision resolution on every content save
pub struct ContentSavingHandler<A> {
    accessor: A,
    resolver: CollisionResolver,
}

impl<A: TreeContextAccessor> ContentSavingHandler<A> {
    pub fn new(accessor: A, config: Arc<ScopeConfig>) -> Self {
        Self {
            accessor,
            resolver: CollisionResolver::new(config),
        }
    }

    pub fn resolver(&self) -> &CollisionResolver {
        &self.resolver
    }

    /// Same as [`handle`](NotificationHandler::handle) but returns what was done
    ///
    /// # Errors
    ///
    /// `NameScopeError::ContextUnavailable` when the accessor has no tree;
    /// the host must abort the save.
    pub fn handle_with_report(
        &self,
        notification: &mut SavingNotification,
    ) -> Result<SaveReport, NameScopeError> {
        let tree = self
            .accessor
            .tree()
            .ok_or(NameScopeError::ContextUnavailable)?;

        let report = self
            .resolver
            .process(tree.as_ref(), &mut notification.saved_entities);

        debug!(
            "Collision check finished for {} node(s): {} renamed, {} skipped variant(s)",
            notification.saved_entities.len(),
            report.renamed_count(),
            report.skipped_count()
        );

        Ok(report)
    }
}

impl<A: TreeContextAccessor> NotificationHandler<SavingNotification> for ContentSavingHandler<A> {
    fn handle(&self, notification: &mut SavingNotification) -> Result<(), NameScopeError> {
        self.handle_with_report(notification).map(|_| ())
    }
}
