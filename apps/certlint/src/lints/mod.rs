//! Built-in lint catalog.
//!
//! Every lint lives in its own `lint_*.rs` file exposing a `register`
//! function. [`REGISTRATIONS`] is the explicit startup list; nothing
//! registers itself implicitly.

mod lint_ext_san_directory_name_present;
mod lint_ext_san_missing;
mod lint_ext_san_no_entries;
mod lint_ext_san_rfc822_name_present;
mod lint_ext_san_uniform_resource_identifier_present;
mod lint_san_dns_name_bad_character;
mod lint_san_dns_name_underscore;

use crate::error::ConfigurationError;
use crate::registry::{Registry, RegistryBuilder};

type Registration = fn(&mut RegistryBuilder) -> Result<(), ConfigurationError>;

const REGISTRATIONS: &[Registration] = &[
    lint_ext_san_directory_name_present::register,
    lint_ext_san_missing::register,
    lint_ext_san_no_entries::register,
    lint_ext_san_rfc822_name_present::register,
    lint_ext_san_uniform_resource_identifier_present::register,
    lint_san_dns_name_bad_character::register,
    lint_san_dns_name_underscore::register,
];

/// Register every built-in lint into `builder`.
pub fn register_all(builder: &mut RegistryBuilder) -> Result<(), ConfigurationError> {
    for register in REGISTRATIONS {
        register(builder)?;
    }
    Ok(())
}

/// Build and freeze the built-in registry.
pub fn default_registry() -> Result<Registry, ConfigurationError> {
    let mut builder = RegistryBuilder::new();
    register_all(&mut builder)?;
    Ok(builder.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate;
    use crate::models::certificate::{CertificateFields, SubjectAltName};
    use crate::models::LintStatus;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn san_cert(san: SubjectAltName) -> CertificateFields {
        CertificateFields::default().with_san(san)
    }

    #[test]
    fn test_catalog_registers_once() {
        let reg = default_registry().unwrap();
        assert_eq!(reg.len(), REGISTRATIONS.len());
        let mut again = RegistryBuilder::new();
        register_all(&mut again).unwrap();
        let err = register_all(&mut again).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateLint(_)));
    }

    #[test]
    fn test_directory_name_present() {
        let reg = default_registry().unwrap();
        let cert = san_cert(SubjectAltName {
            dns_names: vec!["example.com".into()],
            directory_names: vec!["CN=Example".into()],
            ..Default::default()
        });
        let report = evaluate(&cert, &reg, ymd(2016, 1, 1));
        assert_eq!(
            report.get("e_ext_san_directory_name_present").unwrap().result,
            LintStatus::Error
        );
        assert_eq!(report.get("e_ext_san_no_entries").unwrap().result, LintStatus::Pass);
    }

    #[test]
    fn test_clean_subscriber_passes_everything() {
        let reg = default_registry().unwrap();
        let cert = san_cert(SubjectAltName {
            dns_names: vec!["*.example.com".into(), "www.example.org".into()],
            ip_addresses: vec!["192.0.2.10".parse().unwrap()],
            ..Default::default()
        });
        let report = evaluate(&cert, &reg, ymd(2020, 1, 1));
        assert_eq!(report.len(), REGISTRATIONS.len());
        assert!(!report.has_failures());
    }

    #[test]
    fn test_missing_san_skips_san_content_lints() {
        let reg = default_registry().unwrap();
        let report = evaluate(&CertificateFields::default(), &reg, ymd(2020, 1, 1));
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("e_ext_san_missing").unwrap().result, LintStatus::Error);

        let ca = CertificateFields {
            is_ca: true,
            ..Default::default()
        };
        assert!(evaluate(&ca, &reg, ymd(2020, 1, 1)).is_empty());
    }

    #[test]
    fn test_underscore_gated_by_effective_date() {
        let reg = default_registry().unwrap();
        let cert = san_cert(SubjectAltName {
            dns_names: vec!["my_host.example.com".into()],
            ..Default::default()
        });
        let before = evaluate(&cert, &reg, ymd(2019, 3, 31));
        assert!(before.get("e_san_dns_name_underscore").is_none());
        assert_eq!(
            before.get("e_san_dns_name_bad_character_in_label").unwrap().result,
            LintStatus::Pass
        );
        let after = evaluate(&cert, &reg, ymd(2019, 4, 1));
        assert_eq!(after.get("e_san_dns_name_underscore").unwrap().result, LintStatus::Error);
    }

    #[test]
    fn test_bad_label_characters() {
        let reg = default_registry().unwrap();
        let cert = san_cert(SubjectAltName {
            dns_names: vec!["exa mple.com".into()],
            email_addresses: vec!["admin@example.com".into()],
            uris: vec!["https://example.com".into()],
            ..Default::default()
        });
        let report = evaluate(&cert, &reg, ymd(2020, 1, 1));
        for name in [
            "e_san_dns_name_bad_character_in_label",
            "e_ext_san_rfc822_name_present",
            "e_ext_san_uniform_resource_identifier_present",
        ] {
            assert_eq!(report.get(name).unwrap().result, LintStatus::Error, "{}", name);
        }
    }
}
