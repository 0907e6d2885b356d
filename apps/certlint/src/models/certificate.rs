//! Certificate boundary consumed by lints.
//!
//! Lints never decode ASN.1 themselves; they only read field presence and
//! values through the [`Certificate`] trait. [`CertificateFields`] is a plain
//! record implementing it, loaded from JSON by the CLI and built directly in
//! tests.

use crate::error::CertificateError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::net::IpAddr;
use std::path::Path;

/// Subject Alternative Name extension OID.
pub const SAN_OID: &str = "2.5.29.17";
/// Basic Constraints extension OID.
pub const BASIC_CONSTRAINTS_OID: &str = "2.5.29.19";

/// Read-only accessors over a parsed certificate.
pub trait Certificate: Sync {
    /// Start of the validity period, when known.
    fn not_before(&self) -> Option<NaiveDate>;
    /// Whether an extension with `oid` is present.
    fn has_extension(&self, oid: &str) -> bool;
    fn subject_common_names(&self) -> &[String];
    fn dns_names(&self) -> &[String];
    fn ip_addresses(&self) -> &[IpAddr];
    fn directory_names(&self) -> &[String];
    fn email_addresses(&self) -> &[String];
    fn uris(&self) -> &[String];
    fn is_ca(&self) -> bool;
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// Subject Alternative Name entries grouped by general name type.
pub struct SubjectAltName {
    #[serde(default)]
    pub dns_names: Vec<String>,
    #[serde(default)]
    pub ip_addresses: Vec<IpAddr>,
    #[serde(default)]
    pub directory_names: Vec<String>,
    #[serde(default)]
    pub email_addresses: Vec<String>,
    #[serde(default)]
    pub uris: Vec<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// Decoded certificate fields.
///
/// A SAN block is only meaningful when [`SAN_OID`] is listed in
/// `extensions`; the block itself never implies presence.
pub struct CertificateFields {
    #[serde(default)]
    pub not_before: Option<NaiveDate>,
    #[serde(default)]
    pub subject_common_names: Vec<String>,
    #[serde(default)]
    pub extensions: BTreeSet<String>,
    #[serde(default)]
    pub subject_alt_name: SubjectAltName,
    #[serde(default)]
    pub is_ca: bool,
}

impl CertificateFields {
    /// Load a certificate record from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CertificateError> {
        let data = fs::read_to_string(path).map_err(|source| CertificateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| CertificateError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Mark the SAN extension present and replace its entries.
    pub fn with_san(mut self, san: SubjectAltName) -> Self {
        self.extensions.insert(SAN_OID.to_string());
        self.subject_alt_name = san;
        self
    }
}

impl Certificate for CertificateFields {
    fn not_before(&self) -> Option<NaiveDate> {
        self.not_before
    }

    fn has_extension(&self, oid: &str) -> bool {
        self.extensions.contains(oid)
    }

    fn subject_common_names(&self) -> &[String] {
        &self.subject_common_names
    }

    fn dns_names(&self) -> &[String] {
        &self.subject_alt_name.dns_names
    }

    fn ip_addresses(&self) -> &[IpAddr] {
        &self.subject_alt_name.ip_addresses
    }

    fn directory_names(&self) -> &[String] {
        &self.subject_alt_name.directory_names
    }

    fn email_addresses(&self) -> &[String] {
        &self.subject_alt_name.email_addresses
    }

    fn uris(&self) -> &[String] {
        &self.subject_alt_name.uris
    }

    fn is_ca(&self) -> bool {
        self.is_ca
    }
}
