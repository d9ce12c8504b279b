// Cipher Policy - OpenSSL-style cipher list strings evaluated over the catalog
//
// Supports the list operators OpenSSL understands: plain entries append,
// `-` removes (re-addable later), `!` removes permanently, `+` moves already
// selected ciphers to the end, `A+B` selects the intersection of aliases and
// `@STRENGTH` sorts by symmetric key bits.

use super::{CipherStrength, CipherSuite};
use crate::Result;
use crate::constants::{POLICY_SEPARATORS, STRONG_CIPHER_POLICY};
use crate::data::CipherCatalog;
use crate::error::ScanError;
use crate::protocols::Protocol;
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// The built-in strong-cipher policy
    pub static ref STRONG_POLICY: CipherPolicy = CipherPolicy::parse(STRONG_CIPHER_POLICY)
        .expect("Built-in strong cipher policy must parse");
}

/// Named cipher group understood in a policy string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlias {
    /// Every cipher except those without encryption
    All,
    /// Ciphers not covered by ALL
    ComplementOfAll,
    Strength(CipherStrength),
    /// Null encryption
    ENull,
    /// Anonymous authentication
    ANull,
    KeyExchange(&'static str),
    Authentication(&'static str),
    /// Ephemeral key exchange of the family, authenticated
    Ephemeral(&'static str),
    /// Anonymous key exchange of the family
    Anonymous(&'static str),
    Encryption(&'static str),
    Mac(&'static str),
}

impl CipherAlias {
    /// Resolve an alias token; `None` means the token names a single cipher
    pub fn from_token(token: &str) -> Option<Self> {
        let alias = match token {
            "ALL" => CipherAlias::All,
            "COMPLEMENTOFALL" => CipherAlias::ComplementOfAll,
            "HIGH" => CipherAlias::Strength(CipherStrength::High),
            "MEDIUM" => CipherAlias::Strength(CipherStrength::Medium),
            "LOW" => CipherAlias::Strength(CipherStrength::Low),
            "EXP" | "EXPORT" => CipherAlias::Strength(CipherStrength::Export),
            "eNULL" | "NULL" => CipherAlias::ENull,
            "aNULL" => CipherAlias::ANull,
            "RSA" | "kRSA" => CipherAlias::KeyExchange("RSA"),
            "aRSA" => CipherAlias::Authentication("RSA"),
            "DH" | "kEDH" | "kDHE" => CipherAlias::KeyExchange("DH"),
            "EDH" | "DHE" => CipherAlias::Ephemeral("DH"),
            "ADH" => CipherAlias::Anonymous("DH"),
            "ECDH" | "kECDHE" | "kEECDH" => CipherAlias::KeyExchange("ECDH"),
            "EECDH" | "ECDHE" => CipherAlias::Ephemeral("ECDH"),
            "AECDH" => CipherAlias::Anonymous("ECDH"),
            "DSS" | "aDSS" => CipherAlias::Authentication("DSS"),
            "ECDSA" | "aECDSA" => CipherAlias::Authentication("ECDSA"),
            "RC4" => CipherAlias::Encryption("RC4"),
            "RC2" => CipherAlias::Encryption("RC2"),
            "DES" => CipherAlias::Encryption("DES"),
            "3DES" => CipherAlias::Encryption("3DES"),
            "IDEA" => CipherAlias::Encryption("IDEA"),
            "SEED" => CipherAlias::Encryption("SEED"),
            "AES" => CipherAlias::Encryption("AES"),
            "AESGCM" => CipherAlias::Encryption("AESGCM"),
            "CAMELLIA" => CipherAlias::Encryption("Camellia"),
            "CHACHA20" => CipherAlias::Encryption("CHACHA20"),
            "MD5" => CipherAlias::Mac("MD5"),
            "SHA1" | "SHA" => CipherAlias::Mac("SHA1"),
            "SHA256" => CipherAlias::Mac("SHA256"),
            "SHA384" => CipherAlias::Mac("SHA384"),
            _ => return None,
        };
        Some(alias)
    }

    pub fn matches(&self, cipher: &CipherSuite) -> bool {
        match self {
            CipherAlias::All => !cipher.is_null_encryption(),
            CipherAlias::ComplementOfAll | CipherAlias::ENull => cipher.is_null_encryption(),
            CipherAlias::Strength(strength) => cipher.strength() == *strength,
            CipherAlias::ANull => cipher.is_anonymous(),
            CipherAlias::KeyExchange(kx) => cipher.key_exchange_family() == *kx,
            CipherAlias::Authentication(au) => cipher.authentication_family() == *au,
            CipherAlias::Ephemeral(kx) => {
                cipher.key_exchange_family() == *kx && !cipher.is_anonymous()
            }
            CipherAlias::Anonymous(kx) => {
                cipher.key_exchange_family() == *kx && cipher.is_anonymous()
            }
            CipherAlias::Encryption(enc) => cipher.uses_cipher(enc),
            CipherAlias::Mac(mac) => cipher.mac == *mac,
        }
    }
}

/// One `+`-joined component of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Alias(CipherAlias),
    Name(String),
}

impl Selector {
    fn matches(&self, cipher: &CipherSuite) -> bool {
        match self {
            Selector::Alias(alias) => alias.matches(cipher),
            Selector::Name(name) => cipher.openssl_name == *name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleOp {
    Add,
    Remove,
    Kill,
    MoveToEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PolicyRule {
    Select { op: RuleOp, selectors: Vec<Selector> },
    SortByStrength,
}

/// A parsed cipher list string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherPolicy {
    source: String,
    rules: Vec<PolicyRule>,
}

impl CipherPolicy {
    /// Parse a cipher list such as `ALL:!aNULL:!eNULL:+HIGH`
    pub fn parse(policy: &str) -> Result<Self> {
        let invalid = |message: String| ScanError::InvalidPolicy {
            policy: policy.to_string(),
            message,
        };

        let mut rules = Vec::new();
        for token in policy
            .split(|c: char| POLICY_SEPARATORS.contains(&c))
            .filter(|t| !t.is_empty())
        {
            if let Some(directive) = token.strip_prefix('@') {
                if directive != "STRENGTH" {
                    return Err(invalid(format!("unknown directive @{}", directive)));
                }
                rules.push(PolicyRule::SortByStrength);
                continue;
            }

            let (op, body) = match token.chars().next() {
                Some('!') => (RuleOp::Kill, &token[1..]),
                Some('-') => (RuleOp::Remove, &token[1..]),
                Some('+') => (RuleOp::MoveToEnd, &token[1..]),
                _ => (RuleOp::Add, token),
            };

            let mut selectors = Vec::new();
            for part in body.split('+') {
                if part.is_empty() {
                    return Err(invalid(format!("empty cipher selector in {:?}", token)));
                }
                selectors.push(match CipherAlias::from_token(part) {
                    Some(alias) => Selector::Alias(alias),
                    None => Selector::Name(part.to_string()),
                });
            }

            rules.push(PolicyRule::Select { op, selectors });
        }

        if rules.is_empty() {
            return Err(invalid("no cipher rules".to_string()));
        }

        Ok(Self {
            source: policy.to_string(),
            rules,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluate the rules over candidate suites and return the selected ones in list order
    pub fn select<'a>(&self, candidates: &[&'a CipherSuite]) -> Vec<&'a CipherSuite> {
        let mut active: Vec<usize> = Vec::new();
        let mut killed: HashSet<usize> = HashSet::new();

        for rule in &self.rules {
            let (op, selectors) = match rule {
                PolicyRule::SortByStrength => {
                    active.sort_by(|a, b| candidates[*b].bits.cmp(&candidates[*a].bits));
                    continue;
                }
                PolicyRule::Select { op, selectors } => (*op, selectors),
            };

            let matched = |idx: usize| selectors.iter().all(|s| s.matches(candidates[idx]));

            match op {
                RuleOp::Add => {
                    for idx in 0..candidates.len() {
                        if matched(idx) && !killed.contains(&idx) && !active.contains(&idx) {
                            active.push(idx);
                        }
                    }
                }
                RuleOp::Remove => active.retain(|&idx| !matched(idx)),
                RuleOp::Kill => {
                    active.retain(|&idx| !matched(idx));
                    killed.extend((0..candidates.len()).filter(|&idx| matched(idx)));
                }
                RuleOp::MoveToEnd => {
                    let (moved, kept): (Vec<usize>, Vec<usize>) =
                        active.iter().partition(|&&idx| matched(idx));
                    active = kept;
                    active.extend(moved);
                }
            }
        }

        active.into_iter().map(|idx| candidates[idx]).collect()
    }

    /// Names of the catalog ciphers for `protocol` selected by this policy
    ///
    /// A name offered under several cipher kinds (SSLv2 and SSLv3 share some)
    /// appears once, at its first position.
    pub fn apply(&self, catalog: &dyn CipherCatalog, protocol: Protocol) -> Vec<String> {
        let candidates = catalog.ciphers_for(protocol);
        let mut seen = HashSet::new();

        self.select(&candidates)
            .into_iter()
            .filter(|cipher| seen.insert(cipher.openssl_name.as_str()))
            .map(|cipher| cipher.openssl_name.clone())
            .collect()
    }
}

impl Default for CipherPolicy {
    fn default() -> Self {
        STRONG_POLICY.clone()
    }
}
