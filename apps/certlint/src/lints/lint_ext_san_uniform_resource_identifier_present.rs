//! CAB BR 7.1.4.2.1: uniformResourceIdentifier is not a permitted SAN entry type.

use crate::error::{ConfigurationError, LintError};
use crate::models::certificate::{Certificate, SAN_OID};
use crate::models::LintResult;
use crate::policy::{is_ext_in_cert, EffectiveDate};
use crate::registry::{Lint, LintSource, LintTest, RegistryBuilder};

pub(crate) fn register(registry: &mut RegistryBuilder) -> Result<(), ConfigurationError> {
    registry.register(Lint {
        name: "e_ext_san_uniform_resource_identifier_present".into(),
        description: "The Subject Alternate Name extension must contain only dnsName and ipaddress name types".into(),
        citation: "CAB: 7.1.4.2.1".into(),
        source: LintSource::CabfBaselineRequirements,
        effective_date: EffectiveDate::CabBaselineRequirements.date(),
        test: Box::new(SanUri),
    })
}

struct SanUri;

impl LintTest for SanUri {
    fn check_applies(&self, cert: &dyn Certificate) -> bool {
        is_ext_in_cert(cert, SAN_OID)
    }

    fn execute(&self, cert: &dyn Certificate) -> Result<LintResult, LintError> {
        if cert.uris().is_empty() {
            Ok(LintResult::pass())
        } else {
            Ok(LintResult::error("SAN contains a uniformResourceIdentifier entry"))
        }
    }
}
