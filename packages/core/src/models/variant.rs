//! Language variants
//!
//! Every traversal and name comparison is scoped to exactly one variant.
//! `Invariant` stands for nodes that carry a single global name; a
//! `Culture` is an opaque locale token such as `"en-US"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language variant a name lookup or traversal is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variant {
    /// The node has one name for every language
    Invariant,
    /// A specific language variant (locale code or any other host token)
    Culture(String),
}

impl Variant {
    /// Build a culture variant from a host token
    pub fn culture(code: impl Into<String>) -> Self {
        Self::Culture(code.into())
    }

    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::Invariant)
    }

    /// Culture token, or `None` for the invariant case
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Invariant => None,
            Self::Culture(code) => Some(code.as_str()),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invariant => f.write_str("invariant"),
            Self::Culture(code) => f.write_str(code),
        }
    }
}
