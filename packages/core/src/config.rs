//! Process-wide collision-scope configuration
//!
//! Loaded once at startup and shared read-only (behind `Arc`) by the marker
//! and collision resolvers. A TOML file looks like:
//!
//! ```toml
//! marked_types = ["folder", "newsArchive"]
//! max_walk_iterations = 100
//! reserved_attribute = "namescopeMarked"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Attribute key that marks a node regardless of its type
pub const DEFAULT_RESERVED_ATTRIBUTE: &str = "namescopeMarked";

/// Default bound on upward walks
pub const DEFAULT_MAX_WALK_ITERATIONS: usize = 100;

fn default_max_walk_iterations() -> usize {
    DEFAULT_MAX_WALK_ITERATIONS
}

fn default_reserved_attribute() -> String {
    DEFAULT_RESERVED_ATTRIBUTE.to_string()
}

/// Marked-type set, iteration limit and reserved attribute key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Type aliases whose nodes are marked (stored lower-cased)
    #[serde(default)]
    pub marked_types: BTreeSet<String>,

    /// Upper bound on iterations of any upward walk (cycle guard)
    #[serde(default = "default_max_walk_iterations")]
    pub max_walk_iterations: usize,

    /// Boolean attribute that marks a node when true
    #[serde(default = "default_reserved_attribute")]
    pub reserved_attribute: String,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            marked_types: BTreeSet::new(),
            max_walk_iterations: default_max_walk_iterations(),
            reserved_attribute: default_reserved_attribute(),
        }
    }
}

impl ScopeConfig {
    /// Replace the marked-type set; aliases are lower-cased
    pub fn with_marked_types<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.marked_types = aliases
            .into_iter()
            .map(|alias| alias.as_ref().trim().to_lowercase())
            .collect();
        self
    }

    pub fn with_max_walk_iterations(mut self, limit: usize) -> Self {
        self.max_walk_iterations = limit;
        self
    }

    pub fn with_reserved_attribute(mut self, key: impl Into<String>) -> Self {
        self.reserved_attribute = key.into();
        self
    }

    /// Parse, normalise and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let parsed: ScopeConfig = toml::from_str(source)?;
        let config = parsed.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source =
            std::fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        let config = Self::from_toml_str(&source)?;
        debug!(
            "Loaded scope configuration from {} ({} marked types, walk limit {})",
            path.display(),
            config.marked_types.len(),
            config.max_walk_iterations
        );
        Ok(config)
    }

    /// Case-insensitive membership test against the marked-type set
    pub fn is_marked_type(&self, node_type: &str) -> bool {
        self.marked_types.contains(&node_type.to_lowercase())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_walk_iterations == 0 {
            return Err(ConfigError::invalid(
                "max_walk_iterations must be greater than 0",
            ));
        }

        if self.reserved_attribute.trim().is_empty() {
            return Err(ConfigError::invalid("reserved_attribute cannot be empty"));
        }

        if self.marked_types.iter().any(|alias| alias.is_empty()) {
            return Err(ConfigError::invalid("marked_types cannot contain empty aliases"));
        }

        Ok(())
    }

    fn normalized(self) -> Self {
        let aliases = self.marked_types.clone();
        self.with_marked_types(aliases)
    }
}
