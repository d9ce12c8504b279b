// Cipher Mapping Parser - Parses cipher-mapping.txt into the protocol-capability catalog

use crate::ciphers::CipherSuite;
use crate::protocols::Protocol;
use anyhow::Result;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

lazy_static! {
    /// Global cipher database loaded at startup
    pub static ref CIPHER_DB: Arc<CipherDatabase> = Arc::new(
        CipherDatabase::load().expect("Failed to load cipher database")
    );
}

/// Source of the cipher suites valid for each protocol version
///
/// The scan result asks the catalog whether a reported cipher exists for the
/// probed version, and the classifier evaluates the strong-cipher policy over
/// the same list.
pub trait CipherCatalog: Send + Sync {
    /// Suites a client speaking `protocol` can offer, in catalog order
    fn ciphers_for(&self, protocol: Protocol) -> Vec<&CipherSuite>;

    /// Whether `name` is a valid OpenSSL cipher name for `protocol`
    fn contains(&self, protocol: Protocol, name: &str) -> bool {
        self.ciphers_for(protocol)
            .iter()
            .any(|cipher| cipher.openssl_name == name)
    }
}

/// Database of all cipher suites
#[derive(Debug, Clone, Default)]
pub struct CipherDatabase {
    /// Suites in file order
    suites: Vec<CipherSuite>,
    /// Map from hexcode to suite index
    by_hexcode: HashMap<String, usize>,
    /// Map from OpenSSL name to suite indices (SSLv2 and SSLv3 reuse some names)
    by_openssl_name: HashMap<String, Vec<usize>>,
    /// Map from IANA name to suite index
    by_iana_name: HashMap<String, usize>,
}

impl CipherDatabase {
    /// Load cipher database from embedded data
    pub fn load() -> Result<Self> {
        let data = include_str!("../../data/cipher-mapping.txt");
        Self::parse(data)
    }

    /// Parse cipher-mapping.txt format
    /// Format: 0xHH,0xHH - OpenSSLName  IANAName  Version  Kx=X  Au=Y  Enc=Z  Mac=W
    pub fn parse(data: &str) -> Result<Self> {
        let mut db = Self::default();

        for (line_num, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match Self::parse_line(line) {
                Ok(cipher) => db.insert(cipher),
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse cipher mapping line {}: {} - {}",
                        line_num + 1,
                        line,
                        e
                    );
                }
            }
        }

        if db.suites.is_empty() {
            anyhow::bail!("Cipher mapping contains no cipher suites");
        }

        tracing::debug!("Loaded {} cipher suites", db.suites.len());
        Ok(db)
    }

    fn insert(&mut self, cipher: CipherSuite) {
        let idx = self.suites.len();
        self.by_hexcode.insert(cipher.hexcode.clone(), idx);
        self.by_openssl_name
            .entry(cipher.openssl_name.clone())
            .or_default()
            .push(idx);
        self.by_iana_name.insert(cipher.iana_name.clone(), idx);
        self.suites.push(cipher);
    }

    /// Parse a single line from cipher-mapping.txt
    fn parse_line(line: &str) -> Result<CipherSuite> {
        let Some((hexcode, rest)) = line.split_once(" - ") else {
            anyhow::bail!("Invalid format: missing ' - ' separator");
        };

        // "0xCC,0x14" -> "cc14"
        let hexcode = hexcode
            .trim()
            .replace("0x", "")
            .replace(',', "")
            .to_lowercase();

        let fields: Vec<&str> = rest.split_whitespace().collect();
        if fields.len() < 3 {
            anyhow::bail!("Invalid format: not enough fields");
        }

        let openssl_name = fields[0].to_string();
        let iana_name = fields[1].to_string();
        let protocol = fields[2].to_string();

        if protocol.parse::<Protocol>().is_err() {
            anyhow::bail!("Unknown protocol version {}", protocol);
        }

        let mut kx = String::new();
        let mut auth = String::new();
        let mut enc = String::new();
        let mut mac = String::new();

        for field in &fields[3..] {
            if let Some(value) = field.strip_prefix("Kx=") {
                kx = value.to_string();
            } else if let Some(value) = field.strip_prefix("Au=") {
                auth = value.to_string();
            } else if let Some(value) = field.strip_prefix("Enc=") {
                enc = value.to_string();
            } else if let Some(value) = field.strip_prefix("Mac=") {
                mac = value.to_string();
            }
        }

        if enc.is_empty() {
            anyhow::bail!("Invalid format: missing Enc= field");
        }

        let bits = Self::extract_bits(&enc)?;
        let export = openssl_name.contains("EXP") || openssl_name.contains("EXPORT");

        Ok(CipherSuite {
            hexcode,
            openssl_name,
            iana_name,
            protocol,
            key_exchange: kx,
            authentication: auth,
            encryption: enc,
            mac,
            bits,
            export,
        })
    }

    /// Extract bit strength from encryption string (e.g., "AES(256)" -> 256)
    fn extract_bits(enc: &str) -> Result<u16> {
        if let Some((_, size)) = enc.split_once('(') {
            let Some(bits) = size.strip_suffix(')') else {
                anyhow::bail!("Invalid Enc= field {}: unterminated key size", enc);
            };
            return bits
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("Invalid Enc= field {}: bad key size", enc));
        }
        if enc.contains(')') {
            anyhow::bail!("Invalid Enc= field {}: unbalanced parenthesis", enc);
        }

        if enc.eq_ignore_ascii_case("None") || enc.contains("NULL") {
            return Ok(0);
        }
        if enc.contains("3DES") {
            return Ok(168);
        }
        if enc == "DES" {
            return Ok(56);
        }

        Ok(128)
    }

    /// Get cipher by hexcode (reference)
    pub fn get_by_hexcode_ref(&self, hexcode: &str) -> Option<&CipherSuite> {
        self.by_hexcode.get(hexcode).map(|&idx| &self.suites[idx])
    }

    /// Get cipher by OpenSSL name (first catalog entry carrying the name)
    pub fn get_by_openssl_name(&self, name: &str) -> Option<&CipherSuite> {
        self.by_openssl_name
            .get(name)
            .and_then(|indices| indices.first())
            .map(|&idx| &self.suites[idx])
    }

    /// Get cipher by IANA name
    pub fn get_by_iana_name(&self, name: &str) -> Option<&CipherSuite> {
        self.by_iana_name.get(name).map(|&idx| &self.suites[idx])
    }

    /// Get cipher count
    pub fn count(&self) -> usize {
        self.suites.len()
    }
}

impl CipherCatalog for CipherDatabase {
    fn ciphers_for(&self, protocol: Protocol) -> Vec<&CipherSuite> {
        self.suites
            .iter()
            .filter(|c| c.available_in(protocol))
            .collect()
    }

    fn contains(&self, protocol: Protocol, name: &str) -> bool {
        self.by_openssl_name.get(name).is_some_and(|indices| {
            indices
                .iter()
                .any(|&idx| self.suites[idx].available_in(protocol))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cipher_line() {
        let line = "0xCC,0xA9 - ECDHE-ECDSA-CHACHA20-POLY1305  TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256  TLSv1.2  Kx=ECDH  Au=ECDSA  Enc=CHACHA20/POLY1305(256)  Mac=AEAD";

        let cipher = CipherDatabase::parse_line(line).unwrap();

        assert_eq!(cipher.hexcode, "cca9");
        assert_eq!(cipher.openssl_name, "ECDHE-ECDSA-CHACHA20-POLY1305");
        assert_eq!(cipher.protocol, "TLSv1.2");
        assert_eq!(cipher.key_exchange, "ECDH");
        assert_eq!(cipher.authentication, "ECDSA");
        assert_eq!(cipher.bits, 256);
        assert!(!cipher.export);
        assert!(cipher.uses_cipher("CHACHA20"));
    }

    #[test]
    fn test_parse_export_cipher() {
        let line = "0x00,0x03 - EXP-RC4-MD5  TLS_RSA_EXPORT_WITH_RC4_40_MD5  SSLv3  Kx=RSA(512)  Au=RSA  Enc=RC4(40)  Mac=MD5";

        let cipher = CipherDatabase::parse_line(line).unwrap();

        assert_eq!(cipher.hexcode, "0003");
        assert_eq!(cipher.bits, 40);
        assert!(cipher.export);
        assert_eq!(cipher.key_exchange_family(), "RSA");
    }

    #[test]
    fn test_parse_null_cipher_has_zero_bits() {
        let line = "0x00,0x02 - NULL-SHA  TLS_RSA_WITH_NULL_SHA  SSLv3  Kx=RSA  Au=RSA  Enc=None  Mac=SHA1";

        let cipher = CipherDatabase::parse_line(line).unwrap();

        assert_eq!(cipher.bits, 0);
        assert!(cipher.is_null_encryption());
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(CipherDatabase::parse_line("0x00,0x02 NULL-SHA").is_err());
        assert!(CipherDatabase::parse_line("0x00,0x02 - NULL-SHA TLS_RSA_WITH_NULL_SHA").is_err());
        assert!(
            CipherDatabase::parse_line("0x00,0x02 - NULL-SHA TLS_RSA_WITH_NULL_SHA SSLv9 Enc=None")
                .is_err()
        );
    }

    #[test]
    fn test_parse_skips_bad_lines_but_fails_when_empty() {
        let data = "# comment\n\ngarbage line\n0x00,0x35 - AES256-SHA  TLS_RSA_WITH_AES_256_CBC_SHA  SSLv3  Kx=RSA  Au=RSA  Enc=AES(256)  Mac=SHA1\n";
        let db = CipherDatabase::parse(data).unwrap();
        assert_eq!(db.count(), 1);

        assert!(CipherDatabase::parse("# only comments\n").is_err());
    }

    #[test]
    fn test_parse_skips_malformed_key_sizes() {
        let data = "\
0x00,0x35 - AES256-SHA  TLS_RSA_WITH_AES_256_CBC_SHA  SSLv3  Kx=RSA  Au=RSA  Enc=AES(256)  Mac=SHA1
0x00,0x36 - ODD  TLS_ODD  SSLv3  Kx=RSA  Au=RSA  Enc=X)Y(  Mac=SHA1
0x00,0x37 - ODD2  TLS_ODD2  SSLv3  Kx=RSA  Au=RSA  Enc=AES(256  Mac=SHA1
0x00,0x38 - ODD3  TLS_ODD3  SSLv3  Kx=RSA  Au=RSA  Enc=AES(big)  Mac=SHA1
0x00,0x39 - ODD4  TLS_ODD4  SSLv3  Kx=RSA  Au=RSA  Enc=AES)  Mac=SHA1
";
        let db = CipherDatabase::parse(data).unwrap();

        assert_eq!(db.count(), 1);
        assert!(db.get_by_openssl_name("AES256-SHA").is_some());
        for name in ["ODD", "ODD2", "ODD3", "ODD4"] {
            assert!(db.get_by_openssl_name(name).is_none(), "{} was accepted", name);
        }
    }

    #[test]
    fn test_load_database() {
        let db = CipherDatabase::load().unwrap();
        assert!(db.count() > 70);
    }

    #[test]
    fn test_lookups() {
        let db = CIPHER_DB.as_ref();

        let by_hex = db.get_by_hexcode_ref("c030").unwrap();
        assert_eq!(by_hex.openssl_name, "ECDHE-RSA-AES256-GCM-SHA384");

        let by_iana = db.get_by_iana_name("TLS_RSA_WITH_AES_256_CBC_SHA").unwrap();
        assert_eq!(by_iana.openssl_name, "AES256-SHA");

        // SSLv2 kind listed first in the mapping
        let rc4 = db.get_by_openssl_name("RC4-MD5").unwrap();
        assert_eq!(rc4.protocol, "SSLv2");
    }

    #[test]
    fn test_catalog_membership_per_protocol() {
        let db = CIPHER_DB.as_ref();

        assert!(db.contains(Protocol::TLS10, "AES256-SHA"));
        assert!(db.contains(Protocol::SSLv2, "DES-CBC-MD5"));
        assert!(db.contains(Protocol::SSLv2, "DES-CBC-SHA"));
        assert!(!db.contains(Protocol::SSLv3, "DES-CBC-MD5"));
        assert!(!db.contains(Protocol::SSLv3, "ECDHE-RSA-AES256-SHA"));
        assert!(db.contains(Protocol::TLS10, "ECDHE-RSA-AES256-SHA"));
        assert!(!db.contains(Protocol::TLS10, "AES256-GCM-SHA384"));
        assert!(db.contains(Protocol::TLS12, "AES256-GCM-SHA384"));
        assert!(!db.contains(Protocol::TLS10, "NOT-A-CIPHER"));
    }

    #[test]
    fn test_contains_agrees_with_ciphers_for() {
        let db = CIPHER_DB.as_ref();

        for protocol in Protocol::all() {
            for cipher in db.ciphers_for(protocol) {
                assert!(db.contains(protocol, &cipher.openssl_name));
            }
        }
    }
}
