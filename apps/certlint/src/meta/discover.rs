//! Directory discovery for the meta-linter.
//!
//! Walks a tree in file-name order, keeps the files some lint applies to,
//! validates them on the rayon pool and concatenates diagnostics back in
//! traversal order. Any unreadable or unparsable file fails the whole run.

use super::init_first::{InitFirst, InitializerShape};
use super::{run_lints, Diagnostic, SourceLint};
use crate::declarations::{DeclarationParser, GoParser};
use crate::error::{ConfigurationError, SourceError};
use glob::Pattern;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Outcome of a meta-lint run.
#[derive(Debug, Default)]
pub struct MetaRun {
    pub diagnostics: Vec<Diagnostic>,
    pub files_checked: usize,
}

impl MetaRun {
    /// A run is clean when it produced no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Process exit code: 0 when clean, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            1
        }
    }
}

/// The structural lints run by default for a registry generation.
pub fn default_lints(shape: InitializerShape) -> Vec<Box<dyn SourceLint>> {
    vec![Box::new(InitFirst::new(shape))]
}

/// Drives source lints over a directory tree.
pub struct Discoverer {
    lints: Vec<Box<dyn SourceLint>>,
    parser: Box<dyn DeclarationParser>,
    exclude: Vec<Pattern>,
}

impl Discoverer {
    pub fn new(lints: Vec<Box<dyn SourceLint>>) -> Self {
        Discoverer {
            lints,
            parser: Box::new(GoParser),
            exclude: Vec::new(),
        }
    }

    pub fn with_parser(mut self, parser: Box<dyn DeclarationParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Skip paths matching any of the glob `patterns`.
    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self, ConfigurationError> {
        for p in patterns {
            let pat = Pattern::new(p).map_err(|e| ConfigurationError::InvalidPattern {
                pattern: p.clone(),
                reason: e.to_string(),
            })?;
            self.exclude.push(pat);
        }
        Ok(self)
    }

    fn excluded(&self, path: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(path))
    }

    fn candidates(&self, dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
        let mut out = Vec::new();
        for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if self.excluded(path) {
                debug!(path = %path.display(), "excluded by pattern");
                continue;
            }
            if self.lints.iter().any(|l| l.check_applies(path)) {
                out.push(path.to_path_buf());
            }
        }
        Ok(out)
    }

    /// Validate every candidate file under `dir`.
    pub fn run(&self, dir: &Path) -> Result<MetaRun, SourceError> {
        let files = self.candidates(dir)?;
        // First failure in traversal order wins.
        let outcomes: Vec<Result<Vec<Diagnostic>, SourceError>> = files
            .par_iter()
            .map(|path| {
                debug!(path = %path.display(), "checking lint source");
                run_lints(path, &self.lints, self.parser.as_ref())
            })
            .collect();
        let per_file = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;
        let diagnostics: Vec<Diagnostic> = per_file.into_iter().flatten().collect();
        info!(
            files = files.len(),
            violations = diagnostics.len(),
            "meta-lint finished"
        );
        Ok(MetaRun {
            diagnostics,
            files_checked: files.len(),
        })
    }
}

/// Run the default lints for `shape` over `dir`.
pub fn run(dir: &Path, shape: InitializerShape) -> Result<MetaRun, SourceError> {
    Discoverer::new(default_lints(shape)).run(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const GOOD: &str = "package lints\n\nfunc init() {\n\tRegisterLint(nil)\n}\n";
    const BAD: &str = "package lints\n\nfunc helper() {}\n\nfunc init() {}\n";

    fn write(dir: &Path, rel: &str, src: &str) {
        let p = dir.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, src).unwrap();
    }

    #[test]
    fn test_one_bad_among_many() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            write(dir.path(), &format!("lints/lint_good_{}.go", i), GOOD);
        }
        write(dir.path(), "lints/nested/lint_bad.go", BAD);
        write(dir.path(), "lints/lint_bad_test.go", BAD);
        write(dir.path(), "lints/helpers.go", BAD);
        let res = run(dir.path(), InitializerShape::Legacy).unwrap();
        assert_eq!(res.files_checked, 6);
        assert_eq!(res.diagnostics.len(), 1);
        assert_eq!(res.exit_code(), 1);
        let cite = &res.diagnostics[0].code_citations()[0];
        assert!(cite.path.ends_with("lint_bad.go"));
        assert_eq!(cite.line, Some(3));
    }

    #[test]
    fn test_all_conforming_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lint_a.go", GOOD);
        write(dir.path(), "lint_b.go", GOOD);
        let res = run(dir.path(), InitializerShape::Legacy).unwrap();
        assert!(res.is_clean());
        assert_eq!(res.exit_code(), 0);
    }

    #[test]
    fn test_diagnostics_follow_traversal_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lint_c.go", BAD);
        write(dir.path(), "lint_a.go", BAD);
        write(dir.path(), "lint_b.go", GOOD);
        let res = run(dir.path(), InitializerShape::Legacy).unwrap();
        let files: Vec<_> = res
            .diagnostics
            .iter()
            .map(|d| d.code_citations()[0].path.clone())
            .collect();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("lint_a.go"));
        assert!(files[1].ends_with("lint_c.go"));
    }

    #[test]
    fn test_syntax_error_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lint_a.go", GOOD);
        write(dir.path(), "lint_broken.go", "package lints\nfunc init( {\n");
        let err = run(dir.path(), InitializerShape::Legacy).unwrap_err();
        assert!(matches!(err, SourceError::Syntax { .. }));
    }

    #[test]
    fn test_first_failure_in_traversal_order_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lint_a_broken.go", "package lints\nfunc init( {\n");
        for i in 0..16 {
            write(dir.path(), &format!("lint_m_{:02}.go", i), GOOD);
        }
        write(dir.path(), "lint_z_broken.go", "package lints\nfunc (\n");
        for _ in 0..8 {
            match run(dir.path(), InitializerShape::Legacy).unwrap_err() {
                SourceError::Syntax { path, .. } => assert!(path.ends_with("lint_a_broken.go")),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_non_lint_files_are_not_parsed() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "util.go", "this is not go");
        write(dir.path(), "lint_a.go", GOOD);
        assert!(run(dir.path(), InitializerShape::Legacy).unwrap().is_clean());
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "testdata/lint_bad.go", BAD);
        write(dir.path(), "lint_a.go", GOOD);
        let d = Discoverer::new(default_lints(InitializerShape::Legacy))
            .with_exclude(&["**/testdata/**".to_string()])
            .unwrap();
        let res = d.run(dir.path()).unwrap();
        assert!(res.is_clean());
        assert_eq!(res.files_checked, 1);

        let err = Discoverer::new(Vec::new())
            .with_exclude(&["[".to_string()])
            .err()
            .unwrap();
        assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
    }

    #[test]
    fn test_missing_directory_is_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("nope"), InitializerShape::Legacy).unwrap_err();
        assert!(matches!(err, SourceError::Walk(_)));
    }
}
