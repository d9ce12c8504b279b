// sslscan-result - Cipher probe result model for TLS/SSL scanners

//! Stores the outcome of each (protocol, cipher) probe a scanner performs
//! against one target, classifies every cipher as weak or strong with an
//! OpenSSL-style cipher policy, and answers the questions a scan report needs:
//! which protocols the target supports, which weak ciphers it offers, and
//! whether it is standards compliant.

pub mod certificates;
pub mod ciphers;
pub mod constants;
pub mod data;
pub mod error;
pub mod protocols;
pub mod scanner;

// Re-export commonly used types
pub use crate::certificates::{Certificate, CertificateInfo};
pub use crate::ciphers::policy::CipherPolicy;
pub use crate::data::{CIPHER_DB, CipherCatalog, CipherDatabase};
pub use crate::error::ScanError;
pub use crate::protocols::Protocol;
pub use crate::scanner::{
    CipherRecord, CipherStatus, ResultConfig, ScanResult, ScanSummary, VersionFilter,
};

/// Result type for scan result operations
pub type Result<T> = std::result::Result<T, ScanError>;
