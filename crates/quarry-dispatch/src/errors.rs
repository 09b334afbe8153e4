//! Error types for dispatch failures.
//!
//! Each variant maps to one way a menu selection can fail to produce a
//! lookup URL. All of them are recoverable: the caller reports the message
//! and carries on.

use std::sync::Arc;

use quarry_analyzers::{AnalyzerError, Capability, ScanError};
use quarry_core::{DecodeError, IndicatorType};
use thiserror::Error;

/// Errors surfaced while resolving a command into URLs.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The menu identifier could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The selection request could not be parsed.
    #[error("malformed selection request: {message}")]
    MalformedRequest {
        /// Parser message.
        message: String,
        /// Underlying JSON error, when there is one.
        #[source]
        source: Option<Arc<serde_json::Error>>,
    },

    /// No registered analyzer matches the name, capability and kind.
    #[error("no analyzer named '{name}' can {capability} indicators of type {kind}")]
    UnresolvedAnalyzer {
        /// Analyzer name from the command target.
        name: String,
        /// Capability the command needs.
        capability: Capability,
        /// Indicator kind from the command.
        kind: IndicatorType,
    },

    /// The analyzer needs an API key and none is configured.
    #[error("an API key for {name} is required to scan")]
    MissingApiKey {
        /// Analyzer name.
        name: String,
    },

    /// The analyzer's remote scan failed.
    #[error("scan on {name} failed: {source}")]
    RemoteFailure {
        /// Analyzer name.
        name: String,
        /// Error reported by the scanner.
        #[source]
        source: ScanError,
    },

    /// The analyzer could not build a URL.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

impl DispatchError {
    /// Creates an unresolved analyzer error.
    #[must_use]
    pub fn unresolved(
        name: impl Into<String>,
        capability: Capability,
        kind: IndicatorType,
    ) -> Self {
        Self::UnresolvedAnalyzer {
            name: name.into(),
            capability,
            kind,
        }
    }

    /// Creates a malformed request error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedRequest {
            message: source.to_string(),
            source: Some(Arc::new(source)),
        }
    }

    /// Creates a malformed request error with a custom message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
            source: None,
        }
    }
}
