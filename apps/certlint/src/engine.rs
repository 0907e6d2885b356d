//! Rule execution engine.
//!
//! Each active, applicable lint runs on the rayon pool behind its own failure
//! boundary. A lint that panics or returns `Err` becomes a `Fatal` entry;
//! its siblings are unaffected. The report is sorted by lint name after the
//! parallel pass.

use crate::boundary::{self, panic_message};
use crate::error::ConfigurationError;
use crate::models::certificate::Certificate;
use crate::models::report::{Report, ReportEntry};
use crate::models::LintResult;
use crate::registry::{Lint, LintFilter, Registry};
use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Evaluate `cert` against every lint in `registry` active under `policy`.
pub fn evaluate<'r>(cert: &dyn Certificate, registry: &'r Registry, policy: NaiveDate) -> Report<'r> {
    let lints: Vec<&Lint> = registry.lints().collect();
    evaluate_lints(cert, &lints, policy)
}

/// Like [`evaluate`], restricted to the lints kept by `filter`.
pub fn evaluate_filtered<'r>(
    cert: &dyn Certificate,
    registry: &'r Registry,
    policy: NaiveDate,
    filter: &LintFilter,
) -> Result<Report<'r>, ConfigurationError> {
    let lints = registry.select(filter)?;
    Ok(evaluate_lints(cert, &lints, policy))
}

fn evaluate_lints<'r>(cert: &dyn Certificate, lints: &[&'r Lint], policy: NaiveDate) -> Report<'r> {
    let entries: Vec<ReportEntry<'r>> = lints
        .par_iter()
        .filter(|lint| lint.is_active(policy))
        .filter(|lint| lint.applies_to(cert))
        .map(|lint| ReportEntry {
            lint: *lint,
            result: run_one(lint, cert),
        })
        .collect();
    debug!(evaluated = entries.len(), total = lints.len(), %policy, "certificate evaluated");
    Report::new(entries)
}

/// Run one lint's test, converting any failure into a `Fatal` result.
fn run_one(lint: &Lint, cert: &dyn Certificate) -> LintResult {
    match boundary::contain(|| lint.test.execute(cert)) {
        Ok(Ok(res)) => res,
        Ok(Err(e)) => {
            warn!(lint = %lint.name, error = %e, "lint returned an error");
            LintResult::fatal(format!("{}: {}", lint.name, e))
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            warn!(lint = %lint.name, panic = %msg, "lint panicked");
            LintResult::fatal(format!("{}: {}", lint.name, msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LintError;
    use crate::models::certificate::{CertificateFields, SubjectAltName, SAN_OID};
    use crate::models::LintStatus;
    use crate::policy::EffectiveDate;
    use crate::registry::{LintSource, LintTest, RegistryBuilder};

    struct SanPresent;

    impl LintTest for SanPresent {
        fn check_applies(&self, cert: &dyn Certificate) -> bool {
            cert.has_extension(SAN_OID)
        }
        fn execute(&self, cert: &dyn Certificate) -> Result<LintResult, LintError> {
            if cert.dns_names().is_empty() {
                Ok(LintResult::warn("no dNSName entries"))
            } else {
                Ok(LintResult::pass())
            }
        }
    }

    struct Panics;

    impl LintTest for Panics {
        fn check_applies(&self, _cert: &dyn Certificate) -> bool {
            true
        }
        fn execute(&self, _cert: &dyn Certificate) -> Result<LintResult, LintError> {
            panic!("index out of range")
        }
    }

    struct Errs;

    impl LintTest for Errs {
        fn check_applies(&self, _cert: &dyn Certificate) -> bool {
            true
        }
        fn execute(&self, _cert: &dyn Certificate) -> Result<LintResult, LintError> {
            Err(LintError::new("malformed extension"))
        }
    }

    struct ReportsContainment;

    impl LintTest for ReportsContainment {
        fn check_applies(&self, _cert: &dyn Certificate) -> bool {
            boundary::is_contained()
        }
        fn execute(&self, _cert: &dyn Certificate) -> Result<LintResult, LintError> {
            if boundary::is_contained() {
                Ok(LintResult::pass())
            } else {
                Ok(LintResult::error("ran outside the failure boundary"))
            }
        }
    }

    fn lint(name: &str, date: EffectiveDate, test: Box<dyn LintTest>) -> Lint {
        Lint {
            name: name.into(),
            description: String::new(),
            citation: String::new(),
            source: LintSource::Community,
            effective_date: date.date(),
            test,
        }
    }

    fn registry() -> Registry {
        let mut b = RegistryBuilder::new();
        b.register(lint("w_san_present", EffectiveDate::Rfc5280, Box::new(SanPresent)))
            .unwrap();
        b.register(lint("e_panics", EffectiveDate::Rfc5280, Box::new(Panics))).unwrap();
        b.register(lint("e_errs", EffectiveDate::Rfc5280, Box::new(Errs))).unwrap();
        b.register(lint("e_future", EffectiveDate::CabSc12Underscore, Box::new(Panics)))
            .unwrap();
        b.freeze()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_failures_are_isolated_as_fatal() {
        let reg = registry();
        let cert = CertificateFields::default().with_san(SubjectAltName {
            dns_names: vec!["example.com".into()],
            ..Default::default()
        });
        let report = evaluate(&cert, &reg, ymd(2015, 1, 1));
        let names: Vec<_> = report.entries().iter().map(|e| e.lint.name.as_str()).collect();
        assert_eq!(names, vec!["e_errs", "e_panics", "w_san_present"]);

        let p = report.get("e_panics").unwrap();
        assert_eq!(p.result, LintStatus::Fatal);
        assert_eq!(p.details.as_deref(), Some("e_panics: index out of range"));
        let e = report.get("e_errs").unwrap();
        assert_eq!(e.result, LintStatus::Fatal);
        assert_eq!(e.details.as_deref(), Some("e_errs: malformed extension"));
        assert_eq!(report.get("w_san_present").unwrap().result, LintStatus::Pass);
        assert!(report.fatals_present());
    }

    #[test]
    fn test_inapplicable_and_inactive_lints_are_omitted() {
        let reg = registry();
        let cert = CertificateFields::default();
        let report = evaluate(&cert, &reg, ymd(2015, 1, 1));
        assert!(report.get("w_san_present").is_none());
        assert!(report.get("e_future").is_none());
        assert_eq!(report.len(), 2);

        let later = evaluate(&cert, &reg, ymd(2019, 4, 1));
        assert_eq!(later.get("e_future").unwrap().result, LintStatus::Fatal);
    }

    #[test]
    fn test_reports_are_byte_identical() {
        let reg = registry();
        let cert = CertificateFields::default().with_san(SubjectAltName::default());
        let first = serde_json::to_string(&evaluate(&cert, &reg, ymd(2020, 1, 1))).unwrap();
        for _ in 0..8 {
            let again = serde_json::to_string(&evaluate(&cert, &reg, ymd(2020, 1, 1))).unwrap();
            assert_eq!(first, again);
        }
        assert!(first.starts_with(r#"{"results":{"e_errs":"#));
    }

    #[test]
    fn test_lint_code_runs_inside_boundary() {
        let mut b = RegistryBuilder::new();
        b.register(lint("e_contained", EffectiveDate::Zero, Box::new(ReportsContainment)))
            .unwrap();
        let reg = b.freeze();
        let report = evaluate(&CertificateFields::default(), &reg, ymd(2020, 1, 1));
        assert_eq!(report.get("e_contained").unwrap().result, LintStatus::Pass);
        assert!(!boundary::is_contained());
    }

    #[test]
    fn test_filtered_evaluation() {
        let reg = registry();
        let cert = CertificateFields::default();
        let filter = LintFilter::from_lists(&["e_errs".into()], &[], &[], &[]).unwrap();
        let report = evaluate_filtered(&cert, &reg, ymd(2020, 1, 1), &filter).unwrap();
        assert_eq!(report.len(), 1);
        assert!(report.get("e_errs").is_some());
    }
}
