//! Node Data Structures
//!
//! Two views of a content node travel through a save:
//!
//! - [`TreeNode`] - the published snapshot the host tree hands out when we
//!   navigate (parents, siblings, children). Read-only for this crate.
//! - [`SavingNode`] - the editable entity inside the save pipeline. Its names
//!   carry dirty flags, and it is the only thing this crate ever mutates.
//!
//! # Examples
//!
//! ```rust
//! use namescope_core::models::{SavingNode, TreeNode, Variant};
//! use serde_json::json;
//!
//! // A published folder marked through its attribute bag
//! let folder = TreeNode::new(10, 1, "folder", "Archive")
//!     .with_property("namescopeMarked", json!(true));
//! assert_eq!(folder.name_for(&Variant::Invariant), "Archive");
//!
//! // A brand new page about to be saved under it
//! let page = SavingNode::new(10, "page", "Archive");
//! assert!(!page.has_identity());
//! assert!(page.is_name_dirty(&Variant::Invariant));
//! ```

use super::variant::Variant;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Host node identifier
pub type NodeId = i64;

/// Tree-root sentinel: a node whose parent is `ROOT_ID` sits at the top of the tree
pub const ROOT_ID: NodeId = 0;

fn empty_properties() -> Value {
    Value::Object(Default::default())
}

/// Validation errors for nodes handed to an in-memory tree
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid node ID: {0}")]
    InvalidId(String),

    #[error("Invalid parent reference: {0}")]
    InvalidParent(String),

    #[error("Properties validation failed: {0}")]
    InvalidProperties(String),
}

/// Published snapshot of a content node.
///
/// # Fields
///
/// - `id`: Unique host identifier (never `ROOT_ID`)
/// - `parent_id`: Parent identifier, `ROOT_ID` for top-level nodes
/// - `node_type`: Type alias (e.g., "page", "folder"), compared case-insensitively
/// - `name`: Primary (invariant) name
/// - `variant_names`: Localized names keyed by culture token
/// - `properties`: Arbitrary attribute bag (JSON object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: NodeId,

    #[serde(default)]
    pub parent_id: NodeId,

    pub node_type: String,

    pub name: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variant_names: BTreeMap<String, String>,

    #[serde(default = "empty_properties")]
    pub properties: Value,
}

impl TreeNode {
    /// Create an invariant node with an empty attribute bag
    pub fn new(
        id: NodeId,
        parent_id: NodeId,
        node_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            parent_id,
            node_type: node_type.into(),
            name: name.into(),
            variant_names: BTreeMap::new(),
            properties: empty_properties(),
        }
    }

    /// Add a localized name, turning the node into a variant node
    pub fn with_variant_name(mut self, culture: impl Into<String>, name: impl Into<String>) -> Self {
        self.variant_names.insert(culture.into(), name.into());
        self
    }

    /// Set one attribute in the attribute bag
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        if !self.properties.is_object() {
            self.properties = empty_properties();
        }
        if let Value::Object(map) = &mut self.properties {
            map.insert(key.into(), value);
        }
        self
    }

    /// True if the node has a parent below the tree-root sentinel
    pub fn has_parent(&self) -> bool {
        self.parent_id != ROOT_ID
    }

    pub fn is_invariant(&self) -> bool {
        self.variant_names.is_empty()
    }

    /// Name of this node as seen from `variant`
    ///
    /// Falls back to the primary name when the node has no entry for the
    /// requested culture (invariant nodes show the same name everywhere).
    pub fn name_for(&self, variant: &Variant) -> &str {
        match variant.code() {
            Some(code) => self
                .variant_names
                .get(code)
                .map(String::as_str)
                .unwrap_or(&self.name),
            None => &self.name,
        }
    }

    /// Whether the node is visible when navigating in `variant`
    pub fn available_in(&self, variant: &Variant) -> bool {
        match variant.code() {
            Some(code) => self.is_invariant() || self.variant_names.contains_key(code),
            None => true,
        }
    }

    /// Read a boolean attribute
    ///
    /// Host attribute bags store booleans loosely, so `true`, `"true"`,
    /// `"1"` and `1` all read as `true`. Missing keys read as `false`.
    pub fn attribute_flag(&self, key: &str) -> bool {
        match self.properties.get(key) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(text)) => {
                let text = text.trim();
                text.eq_ignore_ascii_case("true") || text == "1"
            }
            Some(Value::Number(number)) => number.as_i64() == Some(1),
            _ => false,
        }
    }

    /// Validate node structure before it enters a tree
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id == ROOT_ID {
            return Err(ValidationError::InvalidId(format!(
                "{} is reserved for the tree root",
                ROOT_ID
            )));
        }

        if self.node_type.is_empty() {
            return Err(ValidationError::MissingField("node_type".to_string()));
        }

        if !self.properties.is_object() {
            return Err(ValidationError::InvalidProperties(
                "properties must be a JSON object".to_string(),
            ));
        }

        if self.parent_id == self.id {
            return Err(ValidationError::InvalidParent(
                "Node cannot be its own parent".to_string(),
            ));
        }

        Ok(())
    }
}

/// Localized name of a saving node plus its "changed since last save" flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantName {
    pub name: String,

    #[serde(default)]
    pub dirty: bool,
}

/// Node travelling through the host save pipeline.
///
/// `id` is `None` until the host has persisted the node once. A node with no
/// `variants` entries is invariant and is named by `name`; otherwise each
/// variant entry carries its own name and dirty flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingNode {
    #[serde(default)]
    pub id: Option<NodeId>,

    #[serde(default)]
    pub parent_id: NodeId,

    #[serde(default)]
    pub level: u32,

    pub node_type: String,

    pub name: String,

    #[serde(default)]
    pub name_dirty: bool,

    #[serde(default)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variants: BTreeMap<String, VariantName>,
}

impl SavingNode {
    /// A node that has never been persisted; its name counts as changed
    pub fn new(parent_id: NodeId, node_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            parent_id,
            level: 0,
            node_type: node_type.into(),
            name: name.into(),
            name_dirty: true,
            variants: BTreeMap::new(),
        }
    }

    /// A previously persisted node whose names are all clean
    pub fn persisted(
        id: NodeId,
        parent_id: NodeId,
        level: u32,
        node_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            parent_id,
            level,
            node_type: node_type.into(),
            name: name.into(),
            name_dirty: false,
            variants: BTreeMap::new(),
        }
    }

    /// Add a variant entry, turning the node into a variant node
    pub fn with_variant(mut self, culture: impl Into<String>, name: impl Into<String>, dirty: bool) -> Self {
        self.variants.insert(
            culture.into(),
            VariantName {
                name: name.into(),
                dirty,
            },
        );
        self
    }

    pub fn has_identity(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_invariant(&self) -> bool {
        self.variants.is_empty()
    }

    /// Persisted top-level node (identity, depth 0, no parent)
    pub fn is_persisted_root(&self) -> bool {
        self.has_identity() && self.level == 0 && self.parent_id == ROOT_ID
    }

    /// Current name for `variant`; falls back to the primary name
    pub fn name_for(&self, variant: &Variant) -> &str {
        match variant.code() {
            Some(code) => self
                .variants
                .get(code)
                .map(|entry| entry.name.as_str())
                .unwrap_or(&self.name),
            None => &self.name,
        }
    }

    /// Whether the name for `variant` changed since the last save
    pub fn is_name_dirty(&self, variant: &Variant) -> bool {
        match variant.code() {
            Some(code) => self.variants.get(code).is_some_and(|entry| entry.dirty),
            None => self.name_dirty,
        }
    }

    /// Replace the name for `variant` and flag it as changed
    pub fn set_name(&mut self, name: impl Into<String>, variant: &Variant) {
        let name = name.into();
        match variant.code() {
            Some(code) => {
                let entry = self.variants.entry(code.to_string()).or_insert(VariantName {
                    name: String::new(),
                    dirty: false,
                });
                entry.name = name;
                entry.dirty = true;
            }
            None => {
                self.name = name;
                self.name_dirty = true;
            }
        }
    }

    /// Variants the host reports for this node, `[Invariant]` for invariant nodes
    pub fn variant_worklist(&self) -> Vec<Variant> {
        if self.is_invariant() {
            vec![Variant::Invariant]
        } else {
            self.variants.keys().map(Variant::culture).collect()
        }
    }

    /// Whether any name on this node needs checking
    ///
    /// Invariant nodes look at the primary dirty flag. Variant nodes are
    /// always checked once they have at least one variant entry; the
    /// per-variant dirty flag is consulted later, candidate by candidate.
    pub fn name_has_changed(&self) -> bool {
        if self.is_invariant() {
            self.name_dirty
        } else {
            !self.variants.is_empty()
        }
    }
}
