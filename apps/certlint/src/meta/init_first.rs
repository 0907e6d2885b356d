//! Initializer-first check for lint implementation files.
//!
//! The first function or method declared in a lint file must be its
//! initializer. Which shape counts as the initializer depends on the
//! registry generation the lint targets.

use super::filters;
use super::{Diagnostic, SourceLint};
use crate::declarations::Declaration;
use crate::source::SourceFile;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Mandated initializer shape, by registry generation.
pub enum InitializerShape {
    /// `func init()`: self-registration as a load-time side effect.
    #[default]
    Legacy,
    /// `func (l *T) Initialize() error`.
    Current,
}

impl InitializerShape {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Some(InitializerShape::Legacy),
            "current" => Some(InitializerShape::Current),
            _ => None,
        }
    }

    /// Whether `decl` has exactly this shape.
    pub fn matches(self, decl: &Declaration) -> bool {
        match self {
            InitializerShape::Legacy => {
                decl.name() == "init"
                    && !decl.is_method()
                    && decl.param_count() == 0
                    && decl.results().is_empty()
            }
            InitializerShape::Current => {
                decl.name() == "Initialize"
                    && decl.receiver().is_some_and(|r| r.is_pointer)
                    && decl.param_count() == 0
                    && decl.results() == ["error"]
            }
        }
    }

    fn signature(self) -> &'static str {
        match self {
            InitializerShape::Legacy => "func init() { ... }",
            InitializerShape::Current => "func (l *<lint type>) Initialize() error { ... }",
        }
    }

    fn citations(self) -> [&'static str; 2] {
        match self {
            InitializerShape::Legacy => [
                "https://github.com/zmap/zlint/issues/371",
                "https://golang.org/doc/effective_go.html#init",
            ],
            InitializerShape::Current => [
                "https://github.com/zmap/zlint/issues/371",
                "https://golang.org/doc/effective_go.html#pointers_vs_values",
            ],
        }
    }
}

impl fmt::Display for InitializerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitializerShape::Legacy => f.write_str("legacy"),
            InitializerShape::Current => f.write_str("current"),
        }
    }
}

/// Requires the initializer to be the first declaration in a lint file.
#[derive(Debug, Default, Clone, Copy)]
pub struct InitFirst {
    pub shape: InitializerShape,
}

impl InitFirst {
    pub fn new(shape: InitializerShape) -> Self {
        InitFirst { shape }
    }
}

impl SourceLint for InitFirst {
    fn check_applies(&self, path: &Path) -> bool {
        filters::is_a_lint(path)
    }

    fn lint(&self, decls: &[Declaration], file: &SourceFile) -> Option<Diagnostic> {
        let Some(first) = decls.first() else {
            return Some(
                Diagnostic::new(
                    "No declarations found: lint does not contain any functions or methods",
                )
                .with_code_citation(0..0, file),
            );
        };
        if self.shape.matches(first) {
            return None;
        }
        Some(
            Diagnostic::new(format!(
                "Got the wrong method signature as the first function declaration within the linter.\n\
                 Lints must have {} as their first function declaration",
                self.shape.signature()
            ))
            .with_code_citation(first.span(), file)
            .with_citations(self.shape.citations()),
        )
    }
}
