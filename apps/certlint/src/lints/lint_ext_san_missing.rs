//! CAB BR 7.1.4.2.1: subscriber certificates must carry a SAN extension.

use crate::error::{ConfigurationError, LintError};
use crate::models::certificate::{Certificate, SAN_OID};
use crate::models::LintResult;
use crate::policy::{is_ext_in_cert, EffectiveDate};
use crate::registry::{Lint, LintSource, LintTest, RegistryBuilder};

pub(crate) fn register(registry: &mut RegistryBuilder) -> Result<(), ConfigurationError> {
    registry.register(Lint {
        name: "e_ext_san_missing".into(),
        description: "Subscriber certificates MUST contain the Subject Alternate Name extension".into(),
        citation: "CAB: 7.1.4.2.1".into(),
        source: LintSource::CabfBaselineRequirements,
        effective_date: EffectiveDate::CabBaselineRequirements.date(),
        test: Box::new(SanMissing),
    })
}

struct SanMissing;

impl LintTest for SanMissing {
    fn check_applies(&self, cert: &dyn Certificate) -> bool {
        !cert.is_ca()
    }

    fn execute(&self, cert: &dyn Certificate) -> Result<LintResult, LintError> {
        if is_ext_in_cert(cert, SAN_OID) {
            Ok(LintResult::pass())
        } else {
            Ok(LintResult::error("subscriber certificate has no SAN extension"))
        }
    }
}
