//! Error taxonomy for the rule engine and the meta-linter.
//!
//! Engine-level failures (registry configuration, unreadable or unparsable
//! inputs) are returned as `Err` and abort the unit of work. Rule-level
//! failures never cross the engine boundary; they are folded into a `Fatal`
//! result by the engine.

use std::path::PathBuf;
use thiserror::Error;

/// Startup failures while assembling or filtering the lint registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("lint `{0}` is already registered")]
    DuplicateLint(String),
    #[error("lint `{name}` failed to initialize: {reason}")]
    Initialization { name: String, reason: String },
    #[error("unknown lint `{0}` in filter")]
    UnknownLint(String),
    #[error("unknown lint source `{0}` in filter")]
    UnknownSource(String),
    #[error("invalid policy date `{0}` (expected YYYY-MM-DD)")]
    InvalidPolicyDate(String),
    #[error("invalid exclude pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("invalid config {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },
}

/// Failures while loading or parsing a source file for the meta-linter.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{}: syntax error: {message}", path.display(), line.map_or_else(|| "?".to_string(), |l| l.to_string()))]
    Syntax {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("source parser unavailable: {0}")]
    Parser(String),
}

/// Failure reported by a lint's own `initialize` or `execute`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct LintError(pub String);

impl LintError {
    pub fn new(msg: impl Into<String>) -> Self {
        LintError(msg.into())
    }
}

/// Failures while loading a certificate record from disk.
#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("failed to read certificate {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("certificate {} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
