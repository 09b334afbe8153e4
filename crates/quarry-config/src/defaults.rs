use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Directory under the user configuration directory holding Quarry files.
pub const CONFIG_DIRECTORY_NAME: &str = "quarry";

/// File name of the settings store.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Computes the default settings store location.
///
/// Returns `None` when the platform has no user configuration directory or
/// it is not valid UTF-8.
#[must_use]
pub fn default_settings_path() -> Option<Utf8PathBuf> {
    let base = dirs::config_dir().and_then(|path| Utf8PathBuf::from_path_buf(path).ok())?;
    Some(base.join(CONFIG_DIRECTORY_NAME).join(SETTINGS_FILE_NAME))
}
