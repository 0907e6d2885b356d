//! Effective-date gating and applicability helpers.
//!
//! A lint is active under a policy version (a calendar date) when its
//! effective date is on or before that version. Applicability is decided by
//! each lint, usually by testing extension presence with [`is_ext_in_cert`].

use crate::models::certificate::Certificate;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Publication dates of the standards lints are tied to.
pub enum EffectiveDate {
    /// Always active.
    Zero,
    /// RFC 5280 publication.
    Rfc5280,
    /// CA/Browser Forum Baseline Requirements v1.0.
    CabBaselineRequirements,
    /// CA/Browser Forum ballot SC12: underscores in dNSName sunset.
    CabSc12Underscore,
}

impl EffectiveDate {
    pub fn date(self) -> NaiveDate {
        let (y, m, d) = match self {
            EffectiveDate::Zero => return NaiveDate::MIN,
            EffectiveDate::Rfc5280 => (2008, 5, 1),
            EffectiveDate::CabBaselineRequirements => (2012, 7, 1),
            EffectiveDate::CabSc12Underscore => (2019, 4, 1),
        };
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for EffectiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date())
    }
}

/// A lint with `effective` activation is active under `policy` iff
/// `effective <= policy`.
pub fn is_active(effective: NaiveDate, policy: NaiveDate) -> bool {
    effective <= policy
}

/// Whether the certificate carries the extension identified by `oid`.
pub fn is_ext_in_cert(cert: &dyn Certificate, oid: &str) -> bool {
    cert.has_extension(oid)
}

/// Parse a `YYYY-MM-DD` policy version.
pub fn parse_policy_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Policy version for a certificate when the caller does not pin one:
/// the certificate's `not_before`, else `today`.
pub fn default_policy_for(cert: &dyn Certificate, today: NaiveDate) -> NaiveDate {
    cert.not_before().unwrap_or(today)
}
