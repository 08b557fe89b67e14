//! Error Types
//!
//! Only faults that should abort the whole save hook are errors. Problems
//! limited to one variant of one node are reported as
//! [`SkipReason`](crate::collision::SkipReason) and never reach the host as `Err`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the host save pipeline
#[derive(Error, Debug)]
pub enum NameScopeError {
    /// No tree context is available to resolve nodes against
    #[error("Content tree context unavailable")]
    ContextUnavailable,

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Host tree failure the caller chose to propagate
    #[error("Content tree error: {0}")]
    Tree(#[from] anyhow::Error),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("Failed to read configuration at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// TOML syntax or type error
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantically invalid values
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create an IO error with the offending path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
