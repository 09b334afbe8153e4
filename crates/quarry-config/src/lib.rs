//! Layered configuration for the Quarry command-line tool.
//!
//! [`Config`] is assembled by `ortho_config` from built-in defaults, an
//! optional TOML file (`--config-path` or `QUARRY_CONFIG_PATH`),
//! `QUARRY_*` environment variables and command-line flags, in increasing
//! order of precedence. The [`Settings`] store, holding searcher toggles and
//! API keys, is a separate JSON document located by
//! [`Config::settings_path`].

mod defaults;
mod logging;
mod settings;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use self::defaults::{
    CONFIG_DIRECTORY_NAME, DEFAULT_LOG_FILTER, SETTINGS_FILE_NAME, default_log_filter,
    default_log_filter_string, default_log_format, default_settings_path,
};
pub use self::logging::{LogFormat, LogFormatParseError};
pub use self::settings::{Settings, SettingsError};

/// Runtime configuration for the `quarry` binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "QUARRY")]
pub struct Config {
    /// Tracing filter expression, for example `quarry=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Settings store location overriding the per-user default.
    pub settings_path: Option<Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            settings_path: None,
        }
    }
}

impl Config {
    /// Returns the tracing filter expression.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the settings store location, falling back to
    /// `<config dir>/quarry/settings.json`.
    #[must_use]
    pub fn settings_path(&self) -> Option<Utf8PathBuf> {
        self.settings_path.clone().or_else(default_settings_path)
    }

    /// Loads the settings store this configuration points at.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the store exists but cannot be read
    /// or parsed.
    pub fn load_settings(&self) -> Result<Settings, SettingsError> {
        Settings::load_optional(self.settings_path().as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_quiet_and_compact() {
        let config = Config::default();
        assert_eq!(config.log_filter(), "warn");
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn explicit_settings_path_wins() {
        let config = Config {
            settings_path: Some(Utf8PathBuf::from("/tmp/quarry-test/settings.json")),
            ..Config::default()
        };
        assert_eq!(
            config.settings_path().as_deref().map(camino::Utf8Path::as_str),
            Some("/tmp/quarry-test/settings.json")
        );
    }

    #[test]
    fn default_settings_path_ends_with_store_name() {
        if let Some(path) = Config::default().settings_path() {
            assert!(path.ends_with("quarry/settings.json"), "got {path}");
        }
    }
}
