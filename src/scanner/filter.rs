// Version filter - Protocol restriction for accepted/rejected queries

use crate::Result;
use crate::constants::ALL_VERSIONS_KEYWORD;
use crate::error::ScanError;
use crate::protocols::Protocol;
use std::str::FromStr;

/// Separators of a textual version list; spaces belong to names like "TLS 1.0"
const LIST_SEPARATORS: &[char] = &[',', ';'];

/// Which protocol versions a status query covers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionFilter {
    /// Every version
    #[default]
    All,
    /// Exactly one version, which must be supported
    One(Protocol),
    /// Any version of the set that is also supported.
    /// An empty intersection with the supported versions selects everything.
    Set(Vec<Protocol>),
}

impl VersionFilter {
    /// Build a set filter from protocol names, dropping names that are not protocols
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let protocols = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                match name.parse::<Protocol>() {
                    Ok(protocol) => Some(protocol),
                    Err(_) => {
                        tracing::trace!("Dropping unknown protocol {:?} from version filter", name);
                        None
                    }
                }
            })
            .collect();

        VersionFilter::Set(protocols)
    }

    /// Resolve against the supported versions.
    ///
    /// `None` means no version restriction.
    pub fn normalize(&self, supported: &[Protocol]) -> Result<Option<Vec<Protocol>>> {
        match self {
            VersionFilter::All => Ok(None),
            VersionFilter::One(protocol) => {
                if supported.contains(protocol) {
                    Ok(Some(vec![*protocol]))
                } else {
                    Err(ScanError::InvalidVersionFilter {
                        message: format!(
                            "{} is not one of [{}]",
                            protocol,
                            join_protocols(supported)
                        ),
                    })
                }
            }
            VersionFilter::Set(protocols) => {
                let mut selected: Vec<Protocol> = Vec::new();
                for protocol in protocols {
                    if supported.contains(protocol) && !selected.contains(protocol) {
                        selected.push(*protocol);
                    }
                }

                if selected.is_empty() {
                    tracing::debug!(
                        "Version filter {:?} shares nothing with [{}], selecting all versions",
                        protocols,
                        join_protocols(supported)
                    );
                    Ok(None)
                } else {
                    Ok(Some(selected))
                }
            }
        }
    }
}

pub(crate) fn join_protocols(protocols: &[Protocol]) -> String {
    protocols
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Protocol> for VersionFilter {
    fn from(protocol: Protocol) -> Self {
        VersionFilter::One(protocol)
    }
}

impl From<Vec<Protocol>> for VersionFilter {
    fn from(protocols: Vec<Protocol>) -> Self {
        VersionFilter::Set(protocols)
    }
}

impl From<&[Protocol]> for VersionFilter {
    fn from(protocols: &[Protocol]) -> Self {
        VersionFilter::Set(protocols.to_vec())
    }
}

impl<const N: usize> From<[Protocol; N]> for VersionFilter {
    fn from(protocols: [Protocol; N]) -> Self {
        VersionFilter::Set(protocols.to_vec())
    }
}

impl FromStr for VersionFilter {
    type Err = ScanError;

    /// `"all"`, a single protocol name, or a separated list of names
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL_VERSIONS_KEYWORD) {
            return Ok(VersionFilter::All);
        }

        if trimmed.contains(LIST_SEPARATORS) {
            let names = trimmed
                .split(LIST_SEPARATORS)
                .map(str::trim)
                .filter(|name| !name.is_empty());
            return Ok(VersionFilter::from_names(names));
        }

        trimmed
            .parse::<Protocol>()
            .map(VersionFilter::One)
            .map_err(|_| ScanError::InvalidVersionFilter {
                message: format!(
                    "expected \"{}\", a protocol or a list of protocols, got {:?}",
                    ALL_VERSIONS_KEYWORD, s
                ),
            })
    }
}
