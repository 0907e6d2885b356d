//! Per-certificate lint report.

use crate::models::{LintResult, LintStatus};
use crate::registry::Lint;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// One evaluated lint. Borrows the lint from the frozen registry.
#[derive(Debug, Clone)]
pub struct ReportEntry<'r> {
    pub lint: &'r Lint,
    pub result: LintResult,
}

/// Results for one certificate, sorted by lint name. Lints that were inactive
/// or inapplicable have no entry.
#[derive(Debug, Clone, Default)]
pub struct Report<'r> {
    entries: Vec<ReportEntry<'r>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Counts by verdict.
pub struct Summary {
    pub pass: usize,
    pub warn: usize,
    pub error: usize,
    pub na: usize,
    pub fatal: usize,
}

impl<'r> Report<'r> {
    /// Build a report; entries are sorted by lint name so output never
    /// depends on evaluation order.
    pub fn new(mut entries: Vec<ReportEntry<'r>>) -> Self {
        entries.sort_by(|a, b| a.lint.name.cmp(&b.lint.name));
        Report { entries }
    }

    pub fn entries(&self) -> &[ReportEntry<'r>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&LintResult> {
        self.entries
            .binary_search_by(|e| e.lint.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.entries[i].result)
    }

    pub fn summary(&self) -> Summary {
        let mut s = Summary::default();
        for e in &self.entries {
            match e.result.result {
                LintStatus::Pass => s.pass += 1,
                LintStatus::Warn => s.warn += 1,
                LintStatus::Error => s.error += 1,
                LintStatus::NotApplicable => s.na += 1,
                LintStatus::Fatal => s.fatal += 1,
            }
        }
        s
    }

    pub fn warnings_present(&self) -> bool {
        self.has(LintStatus::Warn)
    }

    pub fn errors_present(&self) -> bool {
        self.has(LintStatus::Error)
    }

    pub fn fatals_present(&self) -> bool {
        self.has(LintStatus::Fatal)
    }

    /// True when any entry is Warn, Error or Fatal.
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|e| e.result.result.is_failure())
    }

    fn has(&self, status: LintStatus) -> bool {
        self.entries.iter().any(|e| e.result.result == status)
    }
}

struct Results<'a, 'r>(&'a [ReportEntry<'r>]);

impl Serialize for Results<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for e in self.0 {
            map.serialize_entry(&e.lint.name, &e.result)?;
        }
        map.end()
    }
}

impl Serialize for Report<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Report", 2)?;
        st.serialize_field("results", &Results(&self.entries))?;
        st.serialize_field("summary", &self.summary())?;
        st.end()
    }
}
