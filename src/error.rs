// Error types for the scan result model
//
// Every failure raised by the record store is a synchronous validation error at
// the point of misuse. Variants stay structured so callers can match on the
// exact condition instead of parsing messages.

use crate::protocols::Protocol;
use thiserror::Error;

/// Main error type for scan result operations
#[derive(Debug, Error)]
pub enum ScanError {
    /// Protocol version is outside the result's supported universe
    #[error("Must be a supported SSL version: {protocol} is not one of [{supported}]")]
    UnsupportedVersion { protocol: Protocol, supported: String },

    /// Cipher suite is not valid for the protocol version according to the catalog
    #[error("Must be a valid SSL cipher for {protocol}: {cipher}")]
    UnknownCipher { cipher: String, protocol: Protocol },

    /// Key length supplied as text did not parse as a non-negative integer
    #[error("Must supply a valid key length, got {value:?}")]
    InvalidKeyLength { value: String },

    /// Probe status is neither accepted nor rejected
    #[error("Status must be either accepted or rejected, got {value:?}")]
    InvalidStatus { value: String },

    /// Protocol name could not be recognised
    #[error("Invalid SSL version supplied: {value}")]
    UnknownProtocol { value: String },

    /// Version filter is neither ALL, a supported version, nor a set of versions
    #[error("Invalid version filter: {message}")]
    InvalidVersionFilter { message: String },

    /// Certificate input is not an X.509 certificate
    #[error("Must be an X509 certificate: {details}")]
    InvalidCertificate { details: String },

    /// Cipher policy string is malformed
    #[error("Invalid cipher policy {policy:?}: {message}")]
    InvalidPolicy { policy: String, message: String },

    /// Result configuration is malformed or inconsistent
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Cipher catalog data could not be loaded
    #[error("Cipher catalog error: {0}")]
    Catalog(String),
}

impl ScanError {
    /// Whether this error reports caller misuse (an invalid argument)
    ///
    /// Only catalog data failures are excluded: they describe the embedded or
    /// supplied catalog, not the arguments of the failing call.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, ScanError::Catalog(_))
    }
}

/// Conversion from anyhow::Error for catalog loaders
impl From<anyhow::Error> for ScanError {
    fn from(err: anyhow::Error) -> Self {
        ScanError::Catalog(err.to_string())
    }
}
