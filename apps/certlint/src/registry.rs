//! Lint registry with an explicit build phase and a frozen read phase.
//!
//! Lints are registered into a [`RegistryBuilder`] from an explicit list of
//! registration calls, then [`RegistryBuilder::freeze`] yields a read-only
//! [`Registry`]. Only the builder can register, so no write can happen after
//! the first query.

use crate::boundary;
use crate::error::{ConfigurationError, LintError};
use crate::models::certificate::Certificate;
use crate::models::LintResult;
use crate::policy;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// Capability set every lint implements.
pub trait LintTest: Send + Sync {
    /// One-time setup, run at registration.
    fn initialize(&mut self) -> Result<(), LintError> {
        Ok(())
    }
    /// Whether the lint is relevant to `cert`. Must be pure.
    fn check_applies(&self, cert: &dyn Certificate) -> bool;
    /// Run the check. Only called when `check_applies` holds.
    fn execute(&self, cert: &dyn Certificate) -> Result<LintResult, LintError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// Body that publishes the requirement a lint enforces.
pub enum LintSource {
    #[serde(rename = "RFC5280")]
    Rfc5280,
    #[serde(rename = "CABF_BR")]
    CabfBaselineRequirements,
    #[serde(rename = "Community")]
    Community,
}

impl LintSource {
    pub const ALL: [LintSource; 3] = [
        LintSource::Rfc5280,
        LintSource::CabfBaselineRequirements,
        LintSource::Community,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LintSource::Rfc5280 => "RFC5280",
            LintSource::CabfBaselineRequirements => "CABF_BR",
            LintSource::Community => "Community",
        }
    }

    pub fn parse(s: &str) -> Option<LintSource> {
        LintSource::ALL
            .into_iter()
            .find(|src| src.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for LintSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered lint: metadata plus its test implementation.
pub struct Lint {
    pub name: String,
    pub description: String,
    /// Section of the governing document, e.g. `CAB: 7.1.4.2.1`.
    pub citation: String,
    pub source: LintSource,
    pub effective_date: NaiveDate,
    pub test: Box<dyn LintTest>,
}

impl Lint {
    /// Whether this lint is active under `policy`.
    pub fn is_active(&self, policy: NaiveDate) -> bool {
        policy::is_active(self.effective_date, policy)
    }

    /// Applicability with a failure boundary: a panic means "not applicable".
    pub fn applies_to(&self, cert: &dyn Certificate) -> bool {
        boundary::contain(|| self.test.check_applies(cert)).unwrap_or(false)
    }
}

impl fmt::Debug for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lint")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("effective_date", &self.effective_date)
            .finish_non_exhaustive()
    }
}

/// Write-phase registry.
#[derive(Default)]
pub struct RegistryBuilder {
    lints: BTreeMap<String, Lint>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lint. Fails without side effects when the name is taken or
    /// the lint fails to initialize.
    pub fn register(&mut self, mut lint: Lint) -> Result<(), ConfigurationError> {
        if self.lints.contains_key(&lint.name) {
            return Err(ConfigurationError::DuplicateLint(lint.name));
        }
        if let Err(e) = lint.test.initialize() {
            return Err(ConfigurationError::Initialization {
                name: lint.name,
                reason: e.to_string(),
            });
        }
        debug!(lint = %lint.name, source = %lint.source, "registered lint");
        self.lints.insert(lint.name.clone(), lint);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lints.is_empty()
    }

    /// End the write phase.
    pub fn freeze(self) -> Registry {
        debug!(count = self.lints.len(), "lint registry frozen");
        Registry { lints: self.lints }
    }
}

/// Frozen, read-only lint catalog. Iteration is always in name order.
pub struct Registry {
    lints: BTreeMap<String, Lint>,
}

impl Registry {
    /// All lints, sorted by name.
    pub fn lints(&self) -> impl Iterator<Item = &Lint> {
        self.lints.values()
    }

    pub fn len(&self) -> usize {
        self.lints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lints.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Option<&Lint> {
        self.lints.get(name)
    }

    /// Lints whose applicability predicate holds for `cert`.
    pub fn applicable_to<'a>(&'a self, cert: &'a dyn Certificate) -> impl Iterator<Item = &'a Lint> {
        self.lints().filter(move |l| l.applies_to(cert))
    }

    /// Lints active under the policy version `policy`.
    pub fn active_at(&self, policy: NaiveDate) -> impl Iterator<Item = &Lint> {
        self.lints().filter(move |l| l.is_active(policy))
    }

    /// Lints kept by `filter`, sorted by name. Unknown names are rejected so
    /// a typo cannot silently disable a lint.
    pub fn select(&self, filter: &LintFilter) -> Result<Vec<&Lint>, ConfigurationError> {
        for name in filter.include.iter().chain(filter.exclude.iter()) {
            if !self.lints.contains_key(name) {
                return Err(ConfigurationError::UnknownLint(name.clone()));
            }
        }
        Ok(self.lints().filter(|l| filter.keeps(l)).collect())
    }
}

#[derive(Debug, Default, Clone)]
/// Name and source based lint selection. Empty include sets mean "all".
pub struct LintFilter {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
    pub include_sources: BTreeSet<LintSource>,
    pub exclude_sources: BTreeSet<LintSource>,
}

impl LintFilter {
    /// Build a filter from raw name and source lists as given on the CLI or
    /// in config.
    pub fn from_lists(
        include: &[String],
        exclude: &[String],
        include_sources: &[String],
        exclude_sources: &[String],
    ) -> Result<Self, ConfigurationError> {
        let parse_sources = |raw: &[String]| -> Result<BTreeSet<LintSource>, ConfigurationError> {
            raw.iter()
                .map(|s| LintSource::parse(s).ok_or_else(|| ConfigurationError::UnknownSource(s.clone())))
                .collect()
        };
        Ok(LintFilter {
            include: include.iter().map(|s| s.trim().to_string()).collect(),
            exclude: exclude.iter().map(|s| s.trim().to_string()).collect(),
            include_sources: parse_sources(include_sources)?,
            exclude_sources: parse_sources(exclude_sources)?,
        })
    }

    pub fn keeps(&self, lint: &Lint) -> bool {
        if !self.include.is_empty() && !self.include.contains(&lint.name) {
            return false;
        }
        if self.exclude.contains(&lint.name) {
            return false;
        }
        if !self.include_sources.is_empty() && !self.include_sources.contains(&lint.source) {
            return false;
        }
        !self.exclude_sources.contains(&lint.source)
    }
}
