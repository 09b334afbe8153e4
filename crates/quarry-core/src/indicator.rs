//! Indicator kinds and normalised indicator values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of indicator kinds Quarry recognises.
///
/// Each kind has a canonical lowercase label without spaces. The labels form
/// the type vocabulary of the menu identifier grammar, so they must stay
/// stable once published.
///
/// # Example
///
/// ```
/// use quarry_core::IndicatorType;
///
/// assert_eq!(IndicatorType::Ipv4.as_str(), "ipv4");
/// assert_eq!(IndicatorType::from_label("cve"), Some(IndicatorType::Cve));
/// assert_eq!(IndicatorType::from_label("CVE"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorType {
    /// Free-form text accepted by keyword search engines.
    Text,
    /// An IPv4 address.
    Ipv4,
    /// An IPv6 address.
    Ipv6,
    /// A registrable domain or host name.
    Domain,
    /// An absolute `http`, `https`, or `ftp` URL.
    Url,
    /// An email address.
    Email,
    /// A file hash (MD5, SHA-1, SHA-256, or SHA-512).
    Hash,
    /// A CVE identifier such as `CVE-2021-44228`.
    Cve,
    /// An autonomous system number such as `AS13335`.
    Asn,
    /// A Bitcoin address.
    Btc,
    /// An Ethereum address.
    Eth,
    /// A Google AdSense publisher identifier (`pub-` followed by 16 digits).
    GaPubId,
    /// A Google Analytics tracking identifier (`UA-NNNN-N`).
    GaTrackId,
}

impl IndicatorType {
    /// Every indicator kind, in label-table order.
    pub const ALL: [Self; 13] = [
        Self::Text,
        Self::Ipv4,
        Self::Ipv6,
        Self::Domain,
        Self::Url,
        Self::Email,
        Self::Hash,
        Self::Cve,
        Self::Asn,
        Self::Btc,
        Self::Eth,
        Self::GaPubId,
        Self::GaTrackId,
    ];

    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Domain => "domain",
            Self::Url => "url",
            Self::Email => "email",
            Self::Hash => "hash",
            Self::Cve => "cve",
            Self::Asn => "asn",
            Self::Btc => "btc",
            Self::Eth => "eth",
            Self::GaPubId => "gapubid",
            Self::GaTrackId => "gatrackid",
        }
    }

    /// Looks up a kind by its exact canonical label.
    ///
    /// Matching is case-sensitive: the identifier grammar only ever carries
    /// canonical labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == label)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digest family of a [`IndicatorType::Hash`] query, inferred from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// 32 hexadecimal characters.
    Md5,
    /// 40 hexadecimal characters.
    Sha1,
    /// 64 hexadecimal characters.
    Sha256,
    /// 128 hexadecimal characters.
    Sha512,
}

impl HashAlgorithm {
    /// Returns the algorithm whose hex digest has exactly `len` characters.
    #[must_use]
    pub const fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            32 => Some(Self::Md5),
            40 => Some(Self::Sha1),
            64 => Some(Self::Sha256),
            128 => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Returns the lowercase algorithm name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalised query of a single indicator kind.
///
/// Indicators are produced by [`classify`](crate::classify) and by decoded
/// commands. The query is the normalised matched substring (for example
/// lower-cased hex for hashes) and is never empty when produced by the
/// detector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Indicator {
    kind: IndicatorType,
    query: String,
}

impl Indicator {
    /// Creates an indicator from a kind and an already-normalised query.
    #[must_use]
    pub fn new(kind: IndicatorType, query: impl Into<String>) -> Self {
        Self {
            kind,
            query: query.into(),
        }
    }

    /// Returns the indicator kind.
    #[must_use]
    pub const fn kind(&self) -> IndicatorType {
        self.kind
    }

    /// Returns the normalised query.
    #[must_use]
    pub const fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Returns the digest family when this is a hash indicator.
    #[must_use]
    pub fn hash_algorithm(&self) -> Option<HashAlgorithm> {
        match self.kind {
            IndicatorType::Hash => HashAlgorithm::from_hex_len(self.query.len()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn labels_are_unique_and_round_trip() {
        for kind in IndicatorType::ALL {
            assert_eq!(IndicatorType::from_label(kind.as_str()), Some(kind));
        }
        let mut labels: Vec<&str> = IndicatorType::ALL.iter().map(|kind| kind.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), IndicatorType::ALL.len());
    }

    #[rstest]
    #[case::ga_pub_id(IndicatorType::GaPubId, "\"gapubid\"")]
    #[case::ipv6(IndicatorType::Ipv6, "\"ipv6\"")]
    fn serde_uses_canonical_labels(#[case] kind: IndicatorType, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&kind).expect("serialise"), json);
        assert_eq!(
            serde_json::from_str::<IndicatorType>(json).expect("deserialise"),
            kind
        );
    }

    #[test]
    fn non_hash_indicators_have_no_algorithm() {
        let domain = Indicator::new(IndicatorType::Domain, "a".repeat(32));
        assert_eq!(domain.hash_algorithm(), None);
    }
}
