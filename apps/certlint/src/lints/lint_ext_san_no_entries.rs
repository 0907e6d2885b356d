//! RFC 5280 4.2.1.6: a present SAN extension must hold at least one entry.

use crate::error::{ConfigurationError, LintError};
use crate::models::certificate::{Certificate, SAN_OID};
use crate::models::LintResult;
use crate::policy::{is_ext_in_cert, EffectiveDate};
use crate::registry::{Lint, LintSource, LintTest, RegistryBuilder};

pub(crate) fn register(registry: &mut RegistryBuilder) -> Result<(), ConfigurationError> {
    registry.register(Lint {
        name: "e_ext_san_no_entries".into(),
        description: "If present, the SAN extension MUST contain at least one entry".into(),
        citation: "RFC 5280: 4.2.1.6".into(),
        source: LintSource::Rfc5280,
        effective_date: EffectiveDate::Rfc5280.date(),
        test: Box::new(SanNoEntries),
    })
}

struct SanNoEntries;

impl LintTest for SanNoEntries {
    fn check_applies(&self, cert: &dyn Certificate) -> bool {
        is_ext_in_cert(cert, SAN_OID)
    }

    fn execute(&self, cert: &dyn Certificate) -> Result<LintResult, LintError> {
        let empty = cert.dns_names().is_empty()
            && cert.ip_addresses().is_empty()
            && cert.directory_names().is_empty()
            && cert.email_addresses().is_empty()
            && cert.uris().is_empty();
        if empty {
            Ok(LintResult::error("SAN extension is empty"))
        } else {
            Ok(LintResult::pass())
        }
    }
}
