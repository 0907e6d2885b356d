//! Meta-linter: structural checks over the source of lint implementations.
//!
//! A [`SourceLint`] decides from the file name whether it applies, then
//! inspects the file's declarations and returns at most one [`Diagnostic`].

pub mod discover;
pub mod filters;
pub mod init_first;

use crate::declarations::{parse_path, Declaration, DeclarationParser};
use crate::error::SourceError;
use crate::source::SourceFile;
use std::fmt;
use std::ops::Range;
use std::path::Path;

/// A structural check over one source file.
pub trait SourceLint: Send + Sync {
    /// Pure naming gate on the file's path.
    fn check_applies(&self, path: &Path) -> bool;
    /// `None` means the file conforms.
    fn lint(&self, decls: &[Declaration], file: &SourceFile) -> Option<Diagnostic>;
}

/// A quoted piece of source attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCitation {
    pub path: String,
    pub line: Option<usize>,
    pub excerpt: String,
}

impl fmt::Display for CodeCitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(n) => write!(f, "File {}, line {}\n\n{}\n\n", self.path, n, self.excerpt),
            None => write!(f, "File {}, line unknown\n\n{}\n\n", self.path, self.excerpt),
        }
    }
}

/// A structural violation with code and reference citations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    code_citations: Vec<CodeCitation>,
    citations: Vec<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            code_citations: Vec::new(),
            citations: Vec::new(),
        }
    }

    /// Quote `span` of `file`, resolving its start to a line number.
    pub fn with_code_citation(mut self, span: Range<usize>, file: &SourceFile) -> Self {
        self.code_citations.push(CodeCitation {
            path: file.path().to_string_lossy().to_string(),
            line: file.line_of(span.start),
            excerpt: file.excerpt(span).to_string(),
        });
        self
    }

    pub fn with_citations<I, S>(mut self, citations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.citations = citations.into_iter().map(Into::into).collect();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code_citations(&self) -> &[CodeCitation] {
        &self.code_citations
    }

    pub fn citations(&self) -> &[String] {
        &self.citations
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("--------------------\n")?;
        f.write_str("Linting Error\n\n")?;
        f.write_str(&self.message)?;
        f.write_str("\n\n")?;
        for code in &self.code_citations {
            write!(f, "{}", code)?;
        }
        if !self.citations.is_empty() {
            f.write_str("For more information, please see the following citations.\n")?;
        }
        for citation in &self.citations {
            writeln!(f, "\t{}", citation)?;
        }
        Ok(())
    }
}

/// Run a single lint against the file at `path`, ignoring its naming gate.
pub fn run_lint(
    path: &Path,
    lint: &dyn SourceLint,
    parser: &dyn DeclarationParser,
) -> Result<Option<Diagnostic>, SourceError> {
    let (file, decls) = parse_path(path, parser)?;
    Ok(lint.lint(&decls, &file))
}

/// Run every applicable lint against the file at `path`. The file is only
/// read and parsed when at least one lint applies.
pub fn run_lints(
    path: &Path,
    lints: &[Box<dyn SourceLint>],
    parser: &dyn DeclarationParser,
) -> Result<Vec<Diagnostic>, SourceError> {
    let applicable: Vec<&dyn SourceLint> = lints
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| l.check_applies(path))
        .collect();
    if applicable.is_empty() {
        return Ok(Vec::new());
    }
    let (file, decls) = parse_path(path, parser)?;
    Ok(applicable
        .into_iter()
        .filter_map(|l| l.lint(&decls, &file))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_text_format() {
        let file = SourceFile::new("lints/lint_a.go", "package lints\n\nfunc helper() {}\n");
        let d = Diagnostic::new("Bad first function")
            .with_code_citation(15..31, &file)
            .with_citations(["https://a.example", "https://b.example"]);
        let expected = "--------------------\n\
Linting Error\n\n\
Bad first function\n\n\
File lints/lint_a.go, line 3\n\n\
func helper() {}\n\n\
For more information, please see the following citations.\n\
\thttps://a.example\n\
\thttps://b.example\n";
        assert_eq!(d.to_string(), expected);
    }

    #[test]
    fn test_diagnostic_without_citations_has_no_header() {
        let file = SourceFile::new("lint_b.go", "package lints\n");
        let d = Diagnostic::new("empty").with_code_citation(0..0, &file);
        assert_eq!(
            d.to_string(),
            "--------------------\nLinting Error\n\nempty\n\nFile lint_b.go, line 1\n\n\n\n"
        );
    }
}
