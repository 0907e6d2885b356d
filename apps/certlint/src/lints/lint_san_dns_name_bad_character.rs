//! CAB BR 7.1.4.2.1: dNSName labels may only use letters, digits, hyphens
//! (and underscores, policed separately), with an optional leading wildcard.

use crate::error::{ConfigurationError, LintError};
use crate::models::certificate::{Certificate, SAN_OID};
use crate::models::LintResult;
use crate::policy::{is_ext_in_cert, EffectiveDate};
use crate::registry::{Lint, LintSource, LintTest, RegistryBuilder};
use regex::Regex;

const LABEL_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

pub(crate) fn register(registry: &mut RegistryBuilder) -> Result<(), ConfigurationError> {
    registry.register(Lint {
        name: "e_san_dns_name_bad_character_in_label".into(),
        description: "DNSName labels MUST consist of letters, digits and hyphens".into(),
        citation: "CAB: 7.1.4.2.1".into(),
        source: LintSource::CabfBaselineRequirements,
        effective_date: EffectiveDate::CabBaselineRequirements.date(),
        test: Box::new(DnsNameBadCharacter { label: None }),
    })
}

struct DnsNameBadCharacter {
    label: Option<Regex>,
}

impl LintTest for DnsNameBadCharacter {
    fn initialize(&mut self) -> Result<(), LintError> {
        let re = Regex::new(LABEL_PATTERN).map_err(|e| LintError::new(e.to_string()))?;
        self.label = Some(re);
        Ok(())
    }

    fn check_applies(&self, cert: &dyn Certificate) -> bool {
        is_ext_in_cert(cert, SAN_OID) && !cert.dns_names().is_empty()
    }

    fn execute(&self, cert: &dyn Certificate) -> Result<LintResult, LintError> {
        let re = self
            .label
            .as_ref()
            .ok_or_else(|| LintError::new("label pattern not initialized"))?;
        for name in cert.dns_names() {
            let host = name.strip_prefix("*.").unwrap_or(name);
            if host.split('.').any(|label| !re.is_match(label)) {
                return Ok(LintResult::error(format!(
                    "dNSName `{}` has a label with a forbidden character",
                    name
                )));
            }
        }
        Ok(LintResult::pass())
    }
}
