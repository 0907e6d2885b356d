//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "certlint",
    version,
    about = "certlint: X.509 certificate compliance linter",
    long_about = "certlint — evaluate certificates against an effective-date gated lint catalog, and check lint sources for the initializer-first convention.\n\nConfiguration precedence: CLI > certlint.toml > defaults.",
    after_help = "Examples:\n  certlint lint cert.json --policy-date 2020-01-01\n  certlint lint cert.json --exclude-sources community --output json\n  certlint list\n  certlint meta v3/lints",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current certlint version.")]
    Version,
    /// Lint a certificate
    #[command(
        about = "Run lints against a certificate",
        long_about = "Evaluate a certificate (JSON field record) against every active, applicable lint. Exits 1 when any lint warns, errors or fails.",
        after_help = "Examples:\n  certlint lint cert.json\n  certlint lint cert.json --include e_ext_san_missing,e_ext_san_no_entries"
    )]
    Lint {
        #[arg(help = "Path to the certificate JSON record")]
        certificate: String,
        #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Policy version as YYYY-MM-DD (default: certificate notBefore)")]
        policy_date: Option<String>,
        #[arg(long, value_delimiter = ',', help = "Only run these lints")]
        include: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',', help = "Skip these lints")]
        exclude: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',', help = "Only run lints from these sources (RFC5280, CABF_BR, Community)")]
        include_sources: Option<Vec<String>>,
        #[arg(long, value_delimiter = ',', help = "Skip lints from these sources")]
        exclude_sources: Option<Vec<String>>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// List the lint catalog
    #[command(about = "List registered lints", long_about = "Print every registered lint with its source, citation and effective date.")]
    List {
        #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Check lint sources for the initializer-first convention
    #[command(
        about = "Meta-lint lint implementation sources",
        long_about = "Walk a directory and check that every lint_*.go file declares its initializer first. Exits 1 on violations, 2 on unreadable or unparsable files.",
        after_help = "Examples:\n  certlint meta v3/lints\n  certlint meta v3/lints --generation current"
    )]
    Meta {
        #[arg(help = "Directory containing lint sources")]
        dir: String,
        #[arg(long, help = "Initializer shape: legacy|current (default: legacy)")]
        generation: Option<String>,
        #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
        repo_root: Option<String>,
    },
}
