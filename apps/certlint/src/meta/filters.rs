//! File naming predicates for lint implementation sources.

use std::path::Path;

/// Prefix every lint implementation file carries.
pub const LINT_FILE_PREFIX: &str = "lint_";
pub const GO_EXTENSION: &str = ".go";
pub const TEST_SUFFIX: &str = "_test.go";

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// A non-test Go file whose name starts with `lint_`.
pub fn is_a_lint(path: &Path) -> bool {
    file_name(path).starts_with(LINT_FILE_PREFIX) && is_a_go_file(path) && !is_a_test(path)
}

pub fn is_a_go_file(path: &Path) -> bool {
    file_name(path).ends_with(GO_EXTENSION)
}

pub fn is_a_test(path: &Path) -> bool {
    file_name(path).ends_with(TEST_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_file_names() {
        assert!(is_a_lint(Path::new("lints/lint_ext_san_missing.go")));
        assert!(!is_a_lint(Path::new("lints/lint_ext_san_missing_test.go")));
        assert!(!is_a_lint(Path::new("lints/base.go")));
        assert!(!is_a_lint(Path::new("lints/lint_ext_san_missing.rs")));
        // only the file name counts, not parent directories
        assert!(!is_a_lint(Path::new("lint_dir/helper.go")));
        assert!(is_a_lint(Path::new("lint_latest.go")));
    }
}
