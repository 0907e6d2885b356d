//! Ballot SC12: underscores are no longer allowed in dNSName entries.

use crate::error::{ConfigurationError, LintError};
use crate::models::certificate::{Certificate, SAN_OID};
use crate::models::LintResult;
use crate::policy::{is_ext_in_cert, EffectiveDate};
use crate::registry::{Lint, LintSource, LintTest, RegistryBuilder};

pub(crate) fn register(registry: &mut RegistryBuilder) -> Result<(), ConfigurationError> {
    registry.register(Lint {
        name: "e_san_dns_name_underscore".into(),
        description: "DNSNames MUST NOT contain underscore characters".into(),
        citation: "CAB: 7.1.4.2.1, Ballot SC12".into(),
        source: LintSource::CabfBaselineRequirements,
        effective_date: EffectiveDate::CabSc12Underscore.date(),
        test: Box::new(DnsNameUnderscore),
    })
}

struct DnsNameUnderscore;

impl LintTest for DnsNameUnderscore {
    fn check_applies(&self, cert: &dyn Certificate) -> bool {
        is_ext_in_cert(cert, SAN_OID) && !cert.dns_names().is_empty()
    }

    fn execute(&self, cert: &dyn Certificate) -> Result<LintResult, LintError> {
        match cert.dns_names().iter().find(|n| n.contains('_')) {
            Some(name) => Ok(LintResult::error(format!("dNSName `{}` contains an underscore", name))),
            None => Ok(LintResult::pass()),
        }
    }
}
