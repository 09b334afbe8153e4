//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use quarry_analyzers::AnalyzerError;
use quarry_config::SettingsError;
use quarry_dispatch::DispatchError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("invalid analyzer catalogue: {0}")]
    Catalogue(#[from] AnalyzerError),
    #[error("failed to read selection requests: {0}")]
    ReadInput(io::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(io::Error),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("failed to serialise menu: {0}")]
    SerialiseMenu(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
