// Scan Result - Accumulates cipher probe observations for one target
//
// The scanner adds one record per (protocol, cipher) probe and optionally
// attaches the server certificate. Every query below is recomputed from the
// records on each call.

use super::config::ResultConfig;
use super::filter::{VersionFilter, join_protocols};
use super::record::{CipherRecord, CipherRecordSet, CipherStatus};
use crate::Result;
use crate::certificates::{Certificate, CertificateInfo};
use crate::ciphers::classifier::CipherClassifier;
use crate::constants::DEFAULT_SUPPORTED_VERSIONS;
use crate::data::CipherCatalog;
use crate::error::ScanError;
use crate::protocols::Protocol;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cipher probe results and certificate for a single scan target
#[derive(Debug, Clone)]
pub struct ScanResult {
    cert: Option<Certificate>,
    supported_versions: Vec<Protocol>,
    ciphers: CipherRecordSet,
    classifier: CipherClassifier,
}

/// Serializable snapshot of a scan result for report renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub certificate: Option<CertificateInfo>,
    pub supported_versions: Vec<Protocol>,
    pub ciphers: Vec<CipherRecord>,
    pub accepted_count: usize,
    pub rejected_count: usize,
    pub weak_count: usize,
    pub supports_sslv2: bool,
    pub supports_sslv3: bool,
    pub supports_tlsv1: bool,
    pub supports_ssl: bool,
    pub supports_weak_ciphers: bool,
    pub standards_compliant: bool,
}

impl Default for ScanResult {
    fn default() -> Self {
        Self {
            cert: None,
            supported_versions: DEFAULT_SUPPORTED_VERSIONS.to_vec(),
            ciphers: CipherRecordSet::new(),
            classifier: CipherClassifier::default(),
        }
    }
}

impl ScanResult {
    /// Empty result using the embedded cipher catalog and the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty result with a custom protocol universe, policy and catalog
    pub fn with_config(config: &ResultConfig, catalog: Arc<dyn CipherCatalog>) -> Result<Self> {
        let supported_versions = config.versions()?;
        let policy = config.policy()?;

        tracing::debug!(
            "Creating scan result for [{}] with policy {:?}",
            join_protocols(&supported_versions),
            policy.as_str()
        );

        Ok(Self {
            cert: None,
            supported_versions,
            ciphers: CipherRecordSet::new(),
            classifier: CipherClassifier::new(catalog, policy),
        })
    }

    // ----------------------------------------------------------------------
    // Certificate
    // ----------------------------------------------------------------------

    pub fn cert(&self) -> Option<&Certificate> {
        self.cert.as_ref()
    }

    /// Replace the stored certificate; `None` clears it
    pub fn set_cert(&mut self, cert: Option<Certificate>) {
        if let Some(cert) = &cert {
            tracing::debug!("Attaching certificate {}", cert.subject());
        }
        self.cert = cert;
    }

    /// Parse and store a DER certificate. On error the stored certificate is kept.
    pub fn set_cert_der(&mut self, der: &[u8]) -> Result<()> {
        let cert = Certificate::from_der(der)?;
        self.set_cert(Some(cert));
        Ok(())
    }

    /// Parse and store a PEM certificate. On error the stored certificate is kept.
    pub fn set_cert_pem(&mut self, pem: &str) -> Result<()> {
        let cert = Certificate::from_pem(pem)?;
        self.set_cert(Some(cert));
        Ok(())
    }

    pub fn take_cert(&mut self) -> Option<Certificate> {
        self.cert.take()
    }

    // ----------------------------------------------------------------------
    // Insertion
    // ----------------------------------------------------------------------

    /// Record the outcome of probing `cipher` on `version`.
    ///
    /// Fails without touching the records when `version` is outside the
    /// supported versions or the catalog does not list `cipher` for it.
    /// Re-adding an identical observation is a no-op.
    pub fn add_cipher(
        &mut self,
        version: Protocol,
        cipher: &str,
        key_length: u32,
        status: CipherStatus,
    ) -> Result<()> {
        if !self.supported_versions.contains(&version) {
            return Err(ScanError::UnsupportedVersion {
                protocol: version,
                supported: join_protocols(&self.supported_versions),
            });
        }

        if !self.classifier.is_valid(version, cipher) {
            return Err(ScanError::UnknownCipher {
                cipher: cipher.to_string(),
                protocol: version,
            });
        }

        let record = CipherRecord {
            version,
            cipher: cipher.to_string(),
            key_length,
            weak: self.classifier.is_weak(version, cipher),
            status,
        };

        if self.ciphers.insert(record) {
            tracing::debug!(
                "Recorded {} {} ({} bits) as {}",
                version,
                cipher,
                key_length,
                status
            );
        } else {
            tracing::debug!(
                "Ignoring duplicate {} {} ({} bits, {})",
                version,
                cipher,
                key_length,
                status
            );
        }

        Ok(())
    }

    /// Same as [`add_cipher`](Self::add_cipher) for textual scanner output
    pub fn add_cipher_str(
        &mut self,
        version: &str,
        cipher: &str,
        key_length: &str,
        status: &str,
    ) -> Result<()> {
        let version: Protocol = version.parse()?;
        let key_length: u32 = key_length
            .trim()
            .parse()
            .map_err(|_| ScanError::InvalidKeyLength {
                value: key_length.to_string(),
            })?;
        let status: CipherStatus = status.parse()?;

        self.add_cipher(version, cipher, key_length, status)
    }

    // ----------------------------------------------------------------------
    // Views
    // ----------------------------------------------------------------------

    pub fn supported_versions(&self) -> &[Protocol] {
        &self.supported_versions
    }

    /// All records in insertion order
    pub fn ciphers(&self) -> &[CipherRecord] {
        self.ciphers.as_slice()
    }

    pub fn len(&self) -> usize {
        self.ciphers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphers.is_empty()
    }

    pub fn by_version(&self, version: Protocol) -> Vec<&CipherRecord> {
        self.ciphers.iter().filter(|r| r.version == version).collect()
    }

    pub fn sslv2(&self) -> Vec<&CipherRecord> {
        self.by_version(Protocol::SSLv2)
    }

    pub fn sslv3(&self) -> Vec<&CipherRecord> {
        self.by_version(Protocol::SSLv3)
    }

    pub fn tlsv1(&self) -> Vec<&CipherRecord> {
        self.by_version(Protocol::TLS10)
    }

    pub fn weak_ciphers(&self) -> Vec<&CipherRecord> {
        self.ciphers.iter().filter(|r| r.weak).collect()
    }

    pub fn strong_ciphers(&self) -> Vec<&CipherRecord> {
        self.ciphers.iter().filter(|r| !r.weak).collect()
    }

    // ----------------------------------------------------------------------
    // Status queries
    // ----------------------------------------------------------------------

    /// Accepted records restricted by `filter`
    pub fn accepted(&self, filter: impl Into<VersionFilter>) -> Result<Vec<&CipherRecord>> {
        Ok(self.each_accepted(filter)?.collect())
    }

    /// Rejected records restricted by `filter`
    pub fn rejected(&self, filter: impl Into<VersionFilter>) -> Result<Vec<&CipherRecord>> {
        Ok(self.each_rejected(filter)?.collect())
    }

    /// Lazy form of [`accepted`](Self::accepted)
    pub fn each_accepted(
        &self,
        filter: impl Into<VersionFilter>,
    ) -> Result<impl Iterator<Item = &CipherRecord> + '_> {
        self.with_status(CipherStatus::Accepted, filter.into())
    }

    /// Lazy form of [`rejected`](Self::rejected)
    pub fn each_rejected(
        &self,
        filter: impl Into<VersionFilter>,
    ) -> Result<impl Iterator<Item = &CipherRecord> + '_> {
        self.with_status(CipherStatus::Rejected, filter.into())
    }

    fn with_status(
        &self,
        status: CipherStatus,
        filter: VersionFilter,
    ) -> Result<impl Iterator<Item = &CipherRecord> + '_> {
        let versions = filter.normalize(&self.supported_versions)?;

        Ok(self.ciphers.iter().filter(move |record| {
            record.status == status
                && versions
                    .as_ref()
                    .is_none_or(|versions| versions.contains(&record.version))
        }))
    }

    // ----------------------------------------------------------------------
    // Predicates
    // ----------------------------------------------------------------------

    fn supports(&self, version: Protocol) -> bool {
        self.ciphers
            .iter()
            .any(|r| r.version == version && r.is_accepted())
    }

    pub fn supports_sslv2(&self) -> bool {
        self.supports(Protocol::SSLv2)
    }

    pub fn supports_sslv3(&self) -> bool {
        self.supports(Protocol::SSLv3)
    }

    pub fn supports_tlsv1(&self) -> bool {
        self.supports(Protocol::TLS10)
    }

    pub fn supports_ssl(&self) -> bool {
        self.supports_sslv2() || self.supports_sslv3() || self.supports_tlsv1()
    }

    /// Any weak cipher was observed, whether accepted or rejected
    pub fn supports_weak_ciphers(&self) -> bool {
        self.ciphers.iter().any(|r| r.weak)
    }

    /// A target supporting nothing is compliant. Otherwise it must support
    /// neither SSLv2 nor any weak cipher.
    pub fn standards_compliant(&self) -> bool {
        !(self.supports_ssl() && (self.supports_sslv2() || self.supports_weak_ciphers()))
    }

    pub fn summary(&self) -> ScanSummary {
        let accepted_count = self.ciphers.iter().filter(|r| r.is_accepted()).count();

        ScanSummary {
            certificate: self.cert.as_ref().map(|c| c.info().clone()),
            supported_versions: self.supported_versions.clone(),
            ciphers: self.ciphers.as_slice().to_vec(),
            accepted_count,
            rejected_count: self.ciphers.len() - accepted_count,
            weak_count: self.ciphers.iter().filter(|r| r.weak).count(),
            supports_sslv2: self.supports_sslv2(),
            supports_sslv3: self.supports_sslv3(),
            supports_tlsv1: self.supports_tlsv1(),
            supports_ssl: self.supports_ssl(),
            supports_weak_ciphers: self.supports_weak_ciphers(),
            standards_compliant: self.standards_compliant(),
        }
    }
}
