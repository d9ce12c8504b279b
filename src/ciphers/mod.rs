// Ciphers module - Cipher suite definitions, strength classes and the strong-cipher policy

use crate::protocols::Protocol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cipher suite information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherSuite {
    pub hexcode: String,
    pub openssl_name: String,
    pub iana_name: String,
    pub protocol: String,
    pub key_exchange: String,
    pub authentication: String,
    pub encryption: String,
    pub mac: String,
    pub bits: u16,
    pub export: bool,
}

/// Cipher strength category, following OpenSSL's LOW/MEDIUM/HIGH classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherStrength {
    NULL,
    Export,
    Low,
    Medium,
    High,
}

impl CipherSuite {
    pub fn strength(&self) -> CipherStrength {
        if self.is_null_encryption() {
            CipherStrength::NULL
        } else if self.export {
            CipherStrength::Export
        } else if self.bits < 128 {
            CipherStrength::Low
        } else if self.uses_cipher("RC4")
            || self.uses_cipher("RC2")
            || self.uses_cipher("SEED")
            || self.uses_cipher("IDEA")
        {
            CipherStrength::Medium
        } else {
            CipherStrength::High
        }
    }

    /// Protocol version the suite first appeared in
    pub fn min_protocol(&self) -> Option<Protocol> {
        self.protocol.parse().ok()
    }

    /// Whether a client speaking `protocol` can offer this suite
    ///
    /// An SSLv2-compatible hello carries SSLv2 cipher kinds alongside the
    /// SSLv3 suite family. TLS 1.3 suites are not usable by earlier versions
    /// and earlier suites are not usable by TLS 1.3.
    pub fn available_in(&self, protocol: Protocol) -> bool {
        let Some(introduced) = self.min_protocol() else {
            return false;
        };

        match protocol {
            Protocol::SSLv2 => matches!(introduced, Protocol::SSLv2 | Protocol::SSLv3),
            Protocol::TLS13 => introduced == Protocol::TLS13,
            _ => {
                introduced != Protocol::SSLv2
                    && introduced != Protocol::TLS13
                    && introduced <= protocol
            }
        }
    }

    /// Key exchange without the export key size, e.g. `RSA(512)` -> `RSA`
    pub fn key_exchange_family(&self) -> &str {
        family(&self.key_exchange)
    }

    /// Authentication algorithm without any size suffix
    pub fn authentication_family(&self) -> &str {
        family(&self.authentication)
    }

    pub fn is_null_encryption(&self) -> bool {
        self.encryption.eq_ignore_ascii_case("None") || self.encryption.contains("NULL")
    }

    pub fn is_anonymous(&self) -> bool {
        self.authentication_family().eq_ignore_ascii_case("None")
    }

    /// Whether the bulk cipher belongs to `name` (e.g. `AES`, `RC4`, `3DES`)
    pub fn uses_cipher(&self, name: &str) -> bool {
        let enc = family(&self.encryption);
        match name {
            "DES" => enc == "DES",
            "AES" | "CHACHA20" => enc.starts_with(name),
            _ => enc.eq_ignore_ascii_case(name),
        }
    }
}

/// Strip a parenthesised size suffix: `AES(256)` -> `AES`
fn family(field: &str) -> &str {
    match field.find('(') {
        Some(idx) => &field[..idx],
        None => field,
    }
}

impl fmt::Display for CipherStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherStrength::NULL => write!(f, "NULL"),
            CipherStrength::Export => write!(f, "EXPORT"),
            CipherStrength::Low => write!(f, "LOW"),
            CipherStrength::Medium => write!(f, "MEDIUM"),
            CipherStrength::High => write!(f, "HIGH"),
        }
    }
}

pub mod classifier;
pub mod policy;

#[cfg(test)]
pub(crate) fn suite(
    name: &str,
    protocol: &str,
    kx: &str,
    au: &str,
    enc: &str,
    bits: u16,
) -> CipherSuite {
    CipherSuite {
        hexcode: String::new(),
        openssl_name: name.to_string(),
        iana_name: String::new(),
        protocol: protocol.to_string(),
        key_exchange: kx.to_string(),
        authentication: au.to_string(),
        encryption: enc.to_string(),
        mac: "SHA1".to_string(),
        bits,
        export: name.starts_with("EXP"),
    }
}
