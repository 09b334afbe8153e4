//! Errors raised while registering analyzers, building lookup URLs and
//! scanning.
//!
//! Every enum carries structured context so callers can inspect failures
//! programmatically. Transport errors are wrapped in `Arc` to keep
//! [`ScanError`] cheap to clone and within the `result_large_err` limit.

use std::sync::Arc;

use quarry_core::IndicatorType;
use thiserror::Error;

use crate::capability::Capability;

/// Errors arising from analyzer registration and URL building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    /// The analyzer name is empty or collides with a reserved word.
    #[error("invalid analyzer name '{name}': {message}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Why the name was refused.
        message: String,
    },

    /// An analyzer with the same name is already registered.
    #[error("analyzer '{name}' is already registered")]
    Duplicate {
        /// Name that was registered twice.
        name: String,
    },

    /// The analyzer supports neither searching nor scanning.
    #[error("analyzer '{name}' declares no capability")]
    NoCapability {
        /// Analyzer name.
        name: String,
    },

    /// A search template does not produce a usable URL.
    #[error("analyzer '{name}' has an invalid {kind} search template: {source}")]
    InvalidTemplate {
        /// Analyzer name.
        name: String,
        /// Indicator kind the template was declared for.
        kind: IndicatorType,
        /// What is wrong with the template.
        #[source]
        source: TemplateError,
    },

    /// The analyzer does not offer the capability for the indicator kind.
    #[error("analyzer '{name}' cannot {capability} indicators of type {kind}")]
    Unsupported {
        /// Analyzer name.
        name: String,
        /// Requested capability.
        capability: Capability,
        /// Indicator kind that was requested.
        kind: IndicatorType,
    },

    /// Substituting the query produced an unparseable URL.
    #[error("analyzer '{name}' built an invalid URL: {message}")]
    InvalidUrl {
        /// Analyzer name.
        name: String,
        /// Parser message.
        message: String,
    },
}

impl AnalyzerError {
    /// Creates an invalid name error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid template error.
    #[must_use]
    pub fn invalid_template(
        name: impl Into<String>,
        kind: IndicatorType,
        source: TemplateError,
    ) -> Self {
        Self::InvalidTemplate {
            name: name.into(),
            kind,
            source,
        }
    }
}

/// Reasons a search URL template is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template has neither `{query}` nor `{raw}`.
    #[error("template '{template}' has neither {{query}} nor {{raw}}")]
    MissingPlaceholder {
        /// Offending template.
        template: String,
    },

    /// Substituting a sample query does not give an absolute URL.
    #[error("template '{template}' is not a URL: {source}")]
    NotAUrl {
        /// Offending template.
        template: String,
        /// Parser error for the rendered sample.
        #[source]
        source: url::ParseError,
    },

    /// The rendered URL is neither `http` nor `https`.
    #[error("template '{template}' uses unsupported scheme {scheme}")]
    UnsupportedScheme {
        /// Offending template.
        template: String,
        /// Scheme of the rendered URL.
        scheme: String,
    },
}

/// Errors reported by a [`Scanner`](crate::Scanner).
#[derive(Debug, Clone, Error)]
pub enum ScanError {
    /// The scanner does not accept this indicator kind.
    #[error("{scanner} cannot scan indicators of type {kind}")]
    UnsupportedType {
        /// Scanner name.
        scanner: String,
        /// Rejected indicator kind.
        kind: IndicatorType,
    },

    /// The scanner needs an API key and none was supplied.
    #[error("{scanner} requires an API key")]
    MissingApiKey {
        /// Scanner name.
        scanner: String,
    },

    /// The HTTP request could not be sent or its body could not be read.
    #[error("request to {scanner} failed: {source}")]
    Transport {
        /// Scanner name.
        scanner: String,
        /// Underlying HTTP client error.
        #[source]
        source: Arc<reqwest::Error>,
    },

    /// The service answered with a non-success status.
    #[error("{scanner} returned HTTP {status}: {message}")]
    Status {
        /// Scanner name.
        scanner: String,
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The service answered successfully but the payload was not understood.
    #[error("unexpected response from {scanner}: {message}")]
    Payload {
        /// Scanner name.
        scanner: String,
        /// Description of the problem.
        message: String,
    },
}

impl ScanError {
    /// Wraps an HTTP client error.
    #[must_use]
    pub fn transport(scanner: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            scanner: scanner.into(),
            source: Arc::new(source),
        }
    }

    /// Creates an unexpected payload error.
    #[must_use]
    pub fn payload(scanner: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Payload {
            scanner: scanner.into(),
            message: message.into(),
        }
    }
}
