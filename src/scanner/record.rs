// Cipher records - One observation per (protocol, cipher) probe

use crate::error::ScanError;
use crate::protocols::Protocol;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Outcome of probing a cipher on a protocol version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherStatus {
    Accepted,
    Rejected,
}

impl CipherStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherStatus::Accepted => "accepted",
            CipherStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CipherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherStatus {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accepted" => Ok(CipherStatus::Accepted),
            "rejected" => Ok(CipherStatus::Rejected),
            _ => Err(ScanError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// A single cipher probe result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CipherRecord {
    pub version: Protocol,
    pub cipher: String,
    pub key_length: u32,
    pub weak: bool,
    pub status: CipherStatus,
}

impl CipherRecord {
    pub fn is_accepted(&self) -> bool {
        self.status == CipherStatus::Accepted
    }

    pub fn is_rejected(&self) -> bool {
        self.status == CipherStatus::Rejected
    }
}

/// Insertion-ordered set of records keyed by the full record
#[derive(Debug, Clone, Default)]
pub struct CipherRecordSet {
    records: Vec<CipherRecord>,
    index: HashMap<CipherRecord, usize>,
}

impl CipherRecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` unless an identical one is present.
    /// Returns whether the set grew.
    pub fn insert(&mut self, record: CipherRecord) -> bool {
        if self.index.contains_key(&record) {
            return false;
        }

        self.index.insert(record.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn contains(&self, record: &CipherRecord) -> bool {
        self.index.contains_key(record)
    }

    /// Position of `record` in insertion order
    pub fn position(&self, record: &CipherRecord) -> Option<usize> {
        self.index.get(record).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CipherRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[CipherRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a CipherRecordSet {
    type Item = &'a CipherRecord;
    type IntoIter = std::slice::Iter<'a, CipherRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
