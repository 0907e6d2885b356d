//! Output rendering for lint reports, the lint catalog, and meta-lint runs.
//!
//! Reports and the catalog support `human` (default) and `json`. Meta-lint
//! diagnostics always use their fixed plain-text layout.

use crate::meta::discover::MetaRun;
use crate::models::report::Report;
use crate::models::LintStatus;
use crate::registry::Registry;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors("human") {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors("human") {
        "note:".blue().bold().to_string()
    } else {
        "note:".to_string()
    }
}

fn print_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", error_prefix(), e),
    }
}

/// Print a certificate report in the requested format.
pub fn print_report(report: &Report<'_>, output: &str) {
    match output {
        "json" => print_json(&compose_report_json(report)),
        _ => {
            let color = use_colors(output);
            for e in report.entries() {
                let status = e.result.result;
                let tag = format!("⟦{}⟧", status);
                let tag = if !color {
                    tag
                } else {
                    match status {
                        LintStatus::Error | LintStatus::Fatal => tag.red().bold().to_string(),
                        LintStatus::Warn => tag.yellow().bold().to_string(),
                        LintStatus::Pass => tag.green().to_string(),
                        LintStatus::NotApplicable => tag.bright_black().to_string(),
                    }
                };
                match &e.result.details {
                    Some(d) => println!("{} {} ❲{}❳ — {}", tag, e.lint.name, e.lint.citation, d),
                    None => println!("{} {} ❲{}❳", tag, e.lint.name, e.lint.citation),
                }
            }
            let s = report.summary();
            let summary = format!(
                "— Summary — pass={} warn={} error={} na={} fatal={}",
                s.pass, s.warn, s.error, s.na, s.fatal
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print the lint catalog.
pub fn print_catalog(registry: &Registry, output: &str) {
    match output {
        "json" => print_json(&compose_catalog_json(registry)),
        _ => {
            let color = use_colors(output);
            for l in registry.lints() {
                let name = if color {
                    l.name.clone().bold().to_string()
                } else {
                    l.name.clone()
                };
                println!(
                    "{} [{}] {} (effective {}): {}",
                    name, l.source, l.citation, l.effective_date, l.description
                );
            }
        }
    }
}

/// Print a meta-lint run: a count line followed by each diagnostic.
pub fn print_meta(run: &MetaRun) {
    print!("{}", compose_meta_text(run));
}

/// Compose report JSON (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &Report<'_>) -> JsonVal {
    serde_json::to_value(report).unwrap_or(JsonVal::Null)
}

/// Compose catalog JSON (pure) for testing/snapshot purposes.
pub fn compose_catalog_json(registry: &Registry) -> JsonVal {
    let items: Vec<_> = registry
        .lints()
        .map(|l| {
            json!({
                "name": l.name,
                "description": l.description,
                "citation": l.citation,
                "source": l.source,
                "effective_date": l.effective_date.to_string(),
            })
        })
        .collect();
    json!({ "lints": items, "total": registry.len() })
}

/// Compose the meta-lint stdout text (pure).
pub fn compose_meta_text(run: &MetaRun) -> String {
    let mut out = String::new();
    if !run.is_clean() {
        out.push_str(&format!("Found {} linting errors\n", run.diagnostics.len()));
    }
    for d in &run.diagnostics {
        out.push_str(&d.to_string());
        out.push('\n');
    }
    out
}
