//! User preferences consulted at dispatch time.
//!
//! Both maps serialise as plain JSON objects keyed by analyzer name so they
//! can be read straight from a settings store snapshot.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-analyzer enabled flags. Analyzers without an entry are enabled.
///
/// # Example
///
/// ```
/// use quarry_analyzers::SearcherStates;
///
/// let states: SearcherStates = serde_json::from_str(r#"{"Shodan": false}"#).expect("valid");
/// assert!(!states.is_enabled("Shodan"));
/// assert!(states.is_enabled("Censys"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearcherStates(BTreeMap<String, bool>);

impl SearcherStates {
    /// Creates a snapshot in which every analyzer is enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records whether the named analyzer is enabled.
    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.0.insert(name.into(), enabled);
    }

    /// Returns `false` only when the analyzer was explicitly disabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(true)
    }
}

impl FromIterator<(String, bool)> for SearcherStates {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A service credential.
///
/// The secret is only reachable through [`ApiKey::expose`]; `Debug` output
/// is redacted so keys cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the secret for use in an outgoing request.
    #[must_use]
    pub const fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// API keys keyed by analyzer name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeys(BTreeMap<String, ApiKey>);

impl ApiKeys {
    /// Creates an empty key set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the key for the named analyzer, replacing any previous key.
    pub fn insert(&mut self, name: impl Into<String>, key: ApiKey) {
        self.0.insert(name.into(), key);
    }

    /// Returns the key for the named analyzer. Blank secrets count as
    /// absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ApiKey> {
        self.0.get(name).filter(|key| !key.expose().trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("s3cr3t-token");
        let mut keys = ApiKeys::new();
        keys.insert("urlscan.io", key.clone());

        assert!(!format!("{key:?}").contains("s3cr3t"));
        assert!(!format!("{keys:?}").contains("s3cr3t"));
        assert_eq!(key.expose(), "s3cr3t-token");
    }

    #[test]
    fn blank_api_keys_are_absent() {
        let keys: ApiKeys =
            serde_json::from_str(r#"{"VirusTotal": "  ", "urlscan.io": "abc"}"#).expect("valid");
        assert!(keys.get("VirusTotal").is_none());
        assert_eq!(keys.get("urlscan.io").map(ApiKey::expose), Some("abc"));
    }

    #[test]
    fn searcher_states_default_to_enabled() {
        let mut states = SearcherStates::new();
        assert!(states.is_enabled("Shodan"));
        states.set("Shodan", false);
        assert!(!states.is_enabled("Shodan"));
        states.set("Shodan", true);
        assert!(states.is_enabled("Shodan"));
    }
}
