// Cipher Classifier - Weak/strong classification against the catalog and strong-cipher policy

use super::policy::CipherPolicy;
use crate::data::{CIPHER_DB, CipherCatalog};
use crate::protocols::Protocol;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Classifies reported ciphers as weak or strong
///
/// The strong set for a protocol depends only on the catalog and the policy,
/// both fixed for the classifier's lifetime, so each protocol's set is
/// computed once and reused.
#[derive(Clone)]
pub struct CipherClassifier {
    catalog: Arc<dyn CipherCatalog>,
    policy: CipherPolicy,
    strong: HashMap<Protocol, HashSet<String>>,
}

impl CipherClassifier {
    pub fn new(catalog: Arc<dyn CipherCatalog>, policy: CipherPolicy) -> Self {
        Self {
            catalog,
            policy,
            strong: HashMap::new(),
        }
    }

    /// Whether the catalog lists `cipher` for `protocol`
    pub fn is_valid(&self, protocol: Protocol, cipher: &str) -> bool {
        self.catalog.contains(protocol, cipher)
    }

    /// Names of the ciphers the policy keeps for `protocol`
    pub fn strong_ciphers(&mut self, protocol: Protocol) -> &HashSet<String> {
        let catalog = &self.catalog;
        let policy = &self.policy;

        self.strong.entry(protocol).or_insert_with(|| {
            let strong: HashSet<String> = policy
                .apply(catalog.as_ref(), protocol)
                .into_iter()
                .collect();
            tracing::trace!(
                "Computed {} strong ciphers for {} using {:?}",
                strong.len(),
                protocol,
                policy.as_str()
            );
            strong
        })
    }

    /// A cipher is weak unless the strong-cipher policy selects it for `protocol`
    pub fn is_weak(&mut self, protocol: Protocol, cipher: &str) -> bool {
        !self.strong_ciphers(protocol).contains(cipher)
    }
}

impl Default for CipherClassifier {
    fn default() -> Self {
        let catalog: Arc<dyn CipherCatalog> = CIPHER_DB.clone();
        Self::new(catalog, CipherPolicy::default())
    }
}

impl fmt::Debug for CipherClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherClassifier")
            .field("policy", &self.policy.as_str())
            .field("cached_protocols", &self.strong.keys().collect::<Vec<_>>())
            .finish()
    }
}
