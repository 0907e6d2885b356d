//! Shared data models for lint verdicts, certificates, and reports.

pub mod certificate;
pub mod report;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Verdict of one lint against one certificate.
pub enum LintStatus {
    Pass,
    Warn,
    Error,
    #[serde(rename = "na")]
    NotApplicable,
    Fatal,
}

impl LintStatus {
    /// True for verdicts that should fail a CI run.
    pub fn is_failure(self) -> bool {
        matches!(self, LintStatus::Warn | LintStatus::Error | LintStatus::Fatal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LintStatus::Pass => "pass",
            LintStatus::Warn => "warn",
            LintStatus::Error => "error",
            LintStatus::NotApplicable => "na",
            LintStatus::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Outcome of running a single lint. `details` explains non-pass verdicts.
pub struct LintResult {
    pub result: LintStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LintResult {
    pub fn new(result: LintStatus) -> Self {
        LintResult {
            result,
            details: None,
        }
    }

    pub fn pass() -> Self {
        Self::new(LintStatus::Pass)
    }

    pub fn error(details: impl Into<String>) -> Self {
        LintResult {
            result: LintStatus::Error,
            details: Some(details.into()),
        }
    }

    pub fn warn(details: impl Into<String>) -> Self {
        LintResult {
            result: LintStatus::Warn,
            details: Some(details.into()),
        }
    }

    pub fn fatal(details: impl Into<String>) -> Self {
        LintResult {
            result: LintStatus::Fatal,
            details: Some(details.into()),
        }
    }
}
