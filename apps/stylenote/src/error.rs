//! Error types for fatal failures, per-file load failures, and rule failures.
//!
//! Only `Error` aborts a run (exit code 2). `LoadError` and `RuleError` are
//! recovered locally and surface as findings.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Fatal errors that stop a run before any report is produced.
pub enum Error {
    #[error("root path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("unknown rule '{name}' (known: {known})")]
    UnknownRule { name: String, known: String },

    #[error("rule '{0}' is registered more than once")]
    DuplicateRule(String),

    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("failed to build worker pool: {0}")]
    Pool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for fatal operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
/// A single file that could not be loaded as text.
#[error("failed to read {}: {source}", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    /// Document identifier the file would have had.
    pub id: String,
    #[source]
    pub source: std::io::Error,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Internal failure of a rule while checking a document.
#[error("{0}")]
pub struct RuleError(pub String);

impl RuleError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}
