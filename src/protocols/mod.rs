// Protocols module - TLS/SSL protocol versions known to the result model

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// TLS/SSL protocol versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Protocol {
    SSLv2,
    SSLv3,
    #[serde(rename = "TLSv1")]
    TLS10,
    #[serde(rename = "TLSv1.1")]
    TLS11,
    #[serde(rename = "TLSv1.2")]
    TLS12,
    #[serde(rename = "TLSv1.3")]
    TLS13,
}

impl Protocol {
    /// Protocol name as OpenSSL and the cipher mapping data spell it
    pub fn openssl_name(&self) -> &'static str {
        match self {
            Protocol::SSLv2 => "SSLv2",
            Protocol::SSLv3 => "SSLv3",
            Protocol::TLS10 => "TLSv1",
            Protocol::TLS11 => "TLSv1.1",
            Protocol::TLS12 => "TLSv1.2",
            Protocol::TLS13 => "TLSv1.3",
        }
    }

    /// Check if protocol is deprecated
    pub fn is_deprecated(&self) -> bool {
        matches!(
            self,
            Protocol::SSLv2 | Protocol::SSLv3 | Protocol::TLS10 | Protocol::TLS11
        )
    }

    /// Get all protocols
    pub fn all() -> Vec<Protocol> {
        vec![
            Protocol::SSLv2,
            Protocol::SSLv3,
            Protocol::TLS10,
            Protocol::TLS11,
            Protocol::TLS12,
            Protocol::TLS13,
        ]
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.openssl_name())
    }
}

impl FromStr for Protocol {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "SSLv2" | "SSL 2.0" => Ok(Protocol::SSLv2),
            "SSLv3" | "SSL 3.0" => Ok(Protocol::SSLv3),
            "TLS 1.0" | "TLSv1.0" | "TLSv1" => Ok(Protocol::TLS10),
            "TLS 1.1" | "TLSv1.1" => Ok(Protocol::TLS11),
            "TLS 1.2" | "TLSv1.2" => Ok(Protocol::TLS12),
            "TLS 1.3" | "TLSv1.3" => Ok(Protocol::TLS13),
            other => Err(ScanError::UnknownProtocol {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_openssl_and_display_names() {
        assert_eq!("TLSv1".parse::<Protocol>().unwrap(), Protocol::TLS10);
        assert_eq!("TLS 1.0".parse::<Protocol>().unwrap(), Protocol::TLS10);
        assert_eq!("SSL 2.0".parse::<Protocol>().unwrap(), Protocol::SSLv2);
        assert_eq!(" SSLv3 ".parse::<Protocol>().unwrap(), Protocol::SSLv3);
    }

    #[test]
    fn test_parse_unknown_protocol() {
        let err = "Bogus".parse::<Protocol>().unwrap_err();
        assert!(matches!(err, ScanError::UnknownProtocol { ref value } if value == "Bogus"));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for protocol in Protocol::all() {
            assert_eq!(protocol.to_string().parse::<Protocol>().unwrap(), protocol);
        }
    }

    #[test]
    fn test_ordering_follows_version() {
        assert!(Protocol::SSLv2 < Protocol::SSLv3);
        assert!(Protocol::SSLv3 < Protocol::TLS10);
        assert!(Protocol::TLS12 < Protocol::TLS13);
        assert!(Protocol::TLS10.is_deprecated());
        assert!(!Protocol::TLS12.is_deprecated());
    }

    #[test]
    fn test_serde_uses_openssl_names() {
        let json = serde_json::to_string(&Protocol::TLS10).unwrap();
        assert_eq!(json, "\"TLSv1\"");
        let back: Protocol = serde_json::from_str("\"SSLv2\"").unwrap();
        assert_eq!(back, Protocol::SSLv2);
    }
}
