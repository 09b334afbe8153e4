//! CLI argument definitions for Quarry.

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Command-line interface for Quarry.
#[derive(Parser, Debug)]
#[command(
    name = "quarry",
    version,
    about = "Classify selected text and open it in threat-intelligence services",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// The operation to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Operations offered by the CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Lists the menu items offered for a selection.
    Menu {
        /// Controls how menu items are rendered.
        #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
        output: OutputFormat,
        /// Reads JSON selection requests from stdin, one per line.
        #[arg(long)]
        stdin: bool,
        /// The selected text. Multiple words are joined with spaces.
        #[arg(
            value_name = "SELECTION",
            required_unless_present = "stdin",
            conflicts_with = "stdin",
            num_args = 1..
        )]
        selection: Vec<String>,
    },
    /// Resolves a menu item identifier and prints the URLs to open.
    Open {
        /// A menu item identifier such as `Search 8.8.8.8 as a ipv4 on Shodan`.
        #[arg(value_name = "ID")]
        id: String,
    },
}
