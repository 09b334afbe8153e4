//! Rendering of menus and resolved URLs.
//!
//! Menus render as a JSON array of `{id, title}` objects or, for humans, as
//! each title followed by its indented identifier. Resolved URLs are always
//! written one per line so they can be piped to an opener.

use std::io::Write;

use clap::ValueEnum;
use quarry_dispatch::MenuItem;
use url::Url;

use crate::errors::AppError;

/// Output format selection for menus.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit JSON.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Titles with indented identifiers.
    Human,
    /// A JSON array of menu items.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

/// Renders menu items for a terminal.
#[must_use]
pub fn render_human_menu(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return String::from("No menu items for this selection.\n");
    }
    items.iter().fold(String::new(), |mut rendered, item| {
        rendered.push_str(item.title());
        rendered.push_str("\n    ");
        rendered.push_str(item.id());
        rendered.push('\n');
        rendered
    })
}

pub(crate) fn write_menu<W: Write>(
    stdout: &mut W,
    items: &[MenuItem],
    format: ResolvedOutputFormat,
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Human => stdout
            .write_all(render_human_menu(items).as_bytes())
            .map_err(AppError::WriteOutput)?,
        ResolvedOutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *stdout, items).map_err(AppError::SerialiseMenu)?;
            writeln!(stdout).map_err(AppError::WriteOutput)?;
        }
    }
    stdout.flush().map_err(AppError::WriteOutput)
}

pub(crate) fn write_urls<W: Write>(stdout: &mut W, urls: &[Url]) -> Result<(), AppError> {
    for url in urls {
        writeln!(stdout, "{url}").map_err(AppError::WriteOutput)?;
    }
    stdout.flush().map_err(AppError::WriteOutput)
}
