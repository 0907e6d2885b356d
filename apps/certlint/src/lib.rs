//! certlint core library.
//!
//! This crate exposes programmatic APIs for linting certificates against an
//! effective-date gated lint catalog, and for meta-linting the Go sources of
//! lint implementations.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `registry`: Lint trait, build-then-freeze registry, and filters.
//! - `policy`: Effective dates and applicability helpers.
//! - `boundary`: Panic containment around lint code.
//! - `engine`: Parallel, fault-isolated certificate evaluation.
//! - `lints`: Built-in lint catalog and its explicit registration list.
//! - `models`: Verdicts, certificate boundary, and reports.
//! - `source`: Source files and offset-to-line mapping.
//! - `declarations`: Top-level declaration extraction (tree-sitter Go).
//! - `meta`: Structural checks, diagnostics, and directory discovery.
//! - `output`: Human/JSON printers.
//! - `error`: Error taxonomy.
pub mod boundary;
pub mod cli;
pub mod config;
pub mod declarations;
pub mod engine;
pub mod error;
pub mod lints;
pub mod meta;
pub mod models;
pub mod output;
pub mod policy;
pub mod registry;
pub mod source;
