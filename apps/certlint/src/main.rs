//! certlint CLI binary entry point.
//! Delegates to the library for linting and meta-linting and maps outcomes
//! to exit codes: 0 clean, 1 findings, 2 fatal error.

use certlint::cli::{Cli, Commands};
use certlint::config::{self, CliOverrides, Effective};
use certlint::meta::discover::{default_lints, Discoverer};
use certlint::meta::init_first::InitializerShape;
use certlint::models::certificate::CertificateFields;
use certlint::{boundary, engine, lints, output, policy};
use clap::Parser;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CERTLINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fatal(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} A fatal error has occurred: {}", output::error_prefix(), msg);
    process::exit(2);
}

fn resolve(cli: &CliOverrides) -> Effective {
    match config::resolve_effective(cli) {
        Ok(eff) => eff,
        Err(e) => fatal(e),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    boundary::install_panic_hook();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            certificate,
            repo_root,
            policy_date,
            include,
            exclude,
            include_sources,
            exclude_sources,
            output: out,
        } => {
            let eff = resolve(&CliOverrides {
                repo_root,
                output: out,
                policy_date,
                include,
                exclude,
                include_sources,
                exclude_sources,
                generation: None,
            });
            if !eff.config_found && eff.output != "json" {
                eprintln!("{} No certlint.toml found; using defaults.", output::note_prefix());
            }
            let registry = lints::default_registry().unwrap_or_else(|e| fatal(e));
            let cert = CertificateFields::load(Path::new(&certificate)).unwrap_or_else(|e| fatal(e));
            let policy_date = eff
                .policy_date
                .unwrap_or_else(|| policy::default_policy_for(&cert, chrono::Utc::now().date_naive()));
            let report = engine::evaluate_filtered(&cert, &registry, policy_date, &eff.filter)
                .unwrap_or_else(|e| fatal(e));
            output::print_report(&report, &eff.output);
            if report.has_failures() {
                process::exit(1);
            }
        }
        Commands::List {
            repo_root,
            output: out,
        } => {
            let eff = resolve(&CliOverrides {
                repo_root,
                output: out,
                ..Default::default()
            });
            let registry = lints::default_registry().unwrap_or_else(|e| fatal(e));
            output::print_catalog(&registry, &eff.output);
        }
        Commands::Meta {
            dir,
            generation,
            repo_root,
        } => {
            let generation = match generation.as_deref().map(InitializerShape::parse) {
                None => None,
                Some(Some(g)) => Some(g),
                Some(None) => fatal("--generation must be legacy or current"),
            };
            let eff = resolve(&CliOverrides {
                repo_root,
                generation,
                ..Default::default()
            });
            let discoverer = Discoverer::new(default_lints(eff.generation))
                .with_exclude(&eff.meta_exclude)
                .unwrap_or_else(|e| fatal(e));
            let run = discoverer.run(Path::new(&dir)).unwrap_or_else(|e| fatal(e));
            output::print_meta(&run);
            process::exit(run.exit_code());
        }
    }
}
