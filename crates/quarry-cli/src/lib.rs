//! Command-line runtime for Quarry.
//!
//! The runtime splits configuration flags from the command, loads the
//! layered [`quarry_config::Config`] and the settings store, builds the
//! bundled analyzer catalogue and runs one of two commands:
//!
//! - `quarry menu <SELECTION>...` lists the menu items for a selection.
//!   With `--stdin` it instead answers one JSON selection request per input
//!   line, such as `{"selection":"example[.]com"}`.
//! - `quarry open <ID>` resolves a menu item identifier and prints the URLs
//!   to open, one per line.
//!
//! Configuration loading and IO streams can be substituted so tests can
//! drive the runtime in-process.

use std::ffi::OsString;
use std::future::Future;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use quarry_analyzers::{AnalyzerRegistry, SearcherStates};
use quarry_config::Settings;
use quarry_dispatch::{Dispatcher, MenuBuilder, SelectionRequest};
use tracing::debug;

mod cli;
mod config;
mod errors;
pub mod output;
mod telemetry;

use self::cli::{Cli, CliCommand};
use self::config::{ConfigLoader, OrthoConfigLoader, command_arguments, split_config_arguments};
use self::errors::AppError;
pub use self::output::{OutputFormat, ResolvedOutputFormat, render_human_menu};

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, R: BufRead, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, R: BufRead, W: Write, E: Write> IoStreams<'a, R, W, E> {
    pub(crate) const fn new(
        stdin: &'a mut R,
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, R, W, E>(
    args: I,
    stdin: &mut R,
    stdout: &mut W,
    stderr: &mut E,
    stdout_is_terminal: bool,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdin, stdout, stderr, stdout_is_terminal);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    match execute(args, io, loader) {
        Ok(()) => ExitCode::SUCCESS,
        // Help and version requests are successful clap "errors".
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            let _ = write!(io.stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(io.stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> Result<(), AppError>
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);
    let cli = Cli::try_parse_from(command_arguments(&args, &split)).map_err(AppError::CliUsage)?;
    let config = loader.load(&split.config_arguments)?;
    telemetry::initialise(&config)?;

    let settings = config.load_settings()?;
    let http = reqwest::Client::builder()
        .build()
        .map_err(AppError::HttpClient)?;
    let registry = AnalyzerRegistry::builtin(&http)?;
    debug!(target: "quarry::cli", analyzers = registry.len(), "loaded analyzer catalogue");

    match cli.command {
        CliCommand::Menu {
            output,
            stdin,
            selection,
        } => {
            let format = output.resolve(io.stdout_is_terminal());
            let builder = MenuBuilder::new(&registry);
            if stdin {
                return menus_from_input(io, &builder, settings.searcher_states(), format);
            }
            let request = SelectionRequest::new(selection.join(" "));
            let items = builder.build(&request, settings.searcher_states());
            output::write_menu(io.stdout, &items, format)
        }
        CliCommand::Open { id } => {
            let urls = open(&registry, &settings, &id)?;
            output::write_urls(io.stdout, &urls)
        }
    }
}

/// Answers one JSON selection request per input line until end of input.
///
/// Blank lines are skipped. The first malformed line stops processing.
fn menus_from_input<R, W, E>(
    io: &mut IoStreams<'_, R, W, E>,
    builder: &MenuBuilder<'_>,
    states: &SearcherStates,
    format: ResolvedOutputFormat,
) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut line = String::new();
    while io.stdin.read_line(&mut line).map_err(AppError::ReadInput)? != 0 {
        if !line.trim().is_empty() {
            let request = SelectionRequest::parse(line.as_bytes())?;
            debug!(target: "quarry::cli", "answering selection request from stdin");
            output::write_menu(io.stdout, &builder.build(&request, states), format)?;
        }
        line.clear();
    }
    Ok(())
}

fn open(
    registry: &AnalyzerRegistry,
    settings: &Settings,
    id: &str,
) -> Result<Vec<url::Url>, AppError> {
    let dispatcher = Dispatcher::new(registry);
    let urls = block_on(dispatcher.open(id, settings.searcher_states(), settings.api_keys()))??;
    Ok(urls)
}

/// Drives one future to completion on a current-thread runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, AppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;
    Ok(runtime.block_on(future))
}
