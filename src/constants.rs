//! Scan Result Constants
//!
//! Centralized policy and protocol constants used by the result model, so the
//! classification policy and the default protocol universe are defined in one
//! place.

use crate::protocols::Protocol;

// =============================================================================
// Cipher classification
// =============================================================================

/// Strong-cipher policy in OpenSSL cipher list syntax
///
/// Starts from ALL, then drops anonymous authentication, null encryption,
/// low-strength and export-grade ciphers, and RC4 combined with RSA key
/// exchange. HIGH and MEDIUM ciphers that remain (RC4 with non-RSA key
/// exchange among them) are strong. A cipher outside the resulting list is
/// classified weak.
pub const STRONG_CIPHER_POLICY: &str = "ALL:!aNULL:!eNULL:!LOW:!EXP:!RC4+RSA:+HIGH:+MEDIUM";

/// Characters separating entries in a cipher list string
pub const POLICY_SEPARATORS: &[char] = &[':', ',', ' ', ';'];

// =============================================================================
// Protocol universe
// =============================================================================

/// Protocol versions a scan result accepts records for by default
pub const DEFAULT_SUPPORTED_VERSIONS: [Protocol; 3] =
    [Protocol::SSLv2, Protocol::SSLv3, Protocol::TLS10];

/// Keyword selecting every protocol version in a textual version filter
pub const ALL_VERSIONS_KEYWORD: &str = "all";
