//! The persisted settings store.
//!
//! The store is a JSON document with the same shape as the browser
//! extension's synced storage:
//!
//! ```json
//! {"searcherStates": {"Shodan": false}, "apiKeys": {"urlscan.io": "..."}}
//! ```
//!
//! Both keys are optional, and a missing file means every searcher is
//! enabled and no keys are configured.

use std::{fs, io};

use camino::{Utf8Path, Utf8PathBuf};
use quarry_analyzers::{ApiKeys, SearcherStates};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Snapshot of the user's searcher toggles and API keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    searcher_states: SearcherStates,
    api_keys: ApiKeys,
}

impl Settings {
    /// Creates a snapshot from its parts.
    #[must_use]
    pub const fn new(searcher_states: SearcherStates, api_keys: ApiKeys) -> Self {
        Self {
            searcher_states,
            api_keys,
        }
    }

    /// Reads the store at `path`, treating a missing file as empty.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Read`] if the file exists but cannot be
    /// read and [`SettingsError::Parse`] if it is not a valid store.
    pub fn load(path: &Utf8Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(
                    target: "quarry::settings",
                    %path,
                    "settings store not found; using defaults"
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: "quarry::settings", %path, "loaded settings store");
        Ok(settings)
    }

    /// Reads the store at `path` when one is configured.
    ///
    /// # Errors
    ///
    /// Returns whatever [`Settings::load`] returns.
    pub fn load_optional(path: Option<&Utf8Path>) -> Result<Self, SettingsError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Returns the searcher toggles.
    #[must_use]
    pub const fn searcher_states(&self) -> &SearcherStates {
        &self.searcher_states
    }

    /// Returns the API keys.
    #[must_use]
    pub const fn api_keys(&self) -> &ApiKeys {
        &self.api_keys
    }
}

/// Errors raised while reading the settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The store exists but could not be read.
    #[error("failed to read settings store '{path}': {source}")]
    Read {
        /// Store location.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The store is not a valid settings document.
    #[error("failed to parse settings store '{path}': {source}")]
    Parse {
        /// Store location.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
