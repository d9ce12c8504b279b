//! Configuration for scan result construction.
//!
//! Carries only what the record store needs: the protocol universe it accepts
//! records for and the policy that separates strong from weak ciphers.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::ciphers::policy::CipherPolicy;
use crate::constants::{DEFAULT_SUPPORTED_VERSIONS, STRONG_CIPHER_POLICY};
use crate::error::ScanError;
use crate::protocols::Protocol;
use crate::scanner::filter::join_protocols;

/// Configuration for a scan result
///
/// The support and compliance predicates only look at SSLv2, SSLv3 and TLSv1,
/// so `supported_versions` must name at least one of them. Newer versions may
/// be added next to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultConfig {
    /// Protocol versions records may be added for
    pub supported_versions: Vec<Protocol>,
    /// Cipher list string selecting the strong ciphers
    pub strong_cipher_policy: String,
}

impl Default for ResultConfig {
    fn default() -> Self {
        Self {
            supported_versions: DEFAULT_SUPPORTED_VERSIONS.to_vec(),
            strong_cipher_policy: STRONG_CIPHER_POLICY.to_string(),
        }
    }
}

impl ResultConfig {
    /// Parse configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScanError::InvalidConfig {
            message: format!("Failed to parse result configuration: {}", e),
        })
    }

    /// Supported versions in configured order, without repeats.
    ///
    /// Fails when no version the predicates report on is listed.
    pub fn versions(&self) -> Result<Vec<Protocol>> {
        let mut versions: Vec<Protocol> = Vec::with_capacity(self.supported_versions.len());
        for protocol in &self.supported_versions {
            if !versions.contains(protocol) {
                versions.push(*protocol);
            }
        }

        if versions.is_empty() {
            return Err(ScanError::InvalidConfig {
                message: "supported_versions must name at least one protocol".to_string(),
            });
        }

        if !versions.iter().any(|p| DEFAULT_SUPPORTED_VERSIONS.contains(p)) {
            return Err(ScanError::InvalidConfig {
                message: format!(
                    "supported_versions [{}] must include one of [{}]",
                    join_protocols(&versions),
                    join_protocols(&DEFAULT_SUPPORTED_VERSIONS)
                ),
            });
        }

        Ok(versions)
    }

    /// Parsed strong-cipher policy
    pub fn policy(&self) -> Result<CipherPolicy> {
        CipherPolicy::parse(&self.strong_cipher_policy)
    }
}
