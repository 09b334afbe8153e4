//! Remote scan submission.
//!
//! A [`Scanner`] submits an indicator to an external service and returns the
//! URL of the result page. Scanning is the only operation in Quarry that
//! performs network I/O; everything else is pure. Implementations do not
//! retry and impose no timeout beyond whatever the injected HTTP client is
//! configured with.

mod hybrid_analysis;
mod urlscan;
mod virustotal;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use quarry_core::IndicatorType;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ScanError;
use crate::settings::ApiKey;

pub use self::hybrid_analysis::HybridAnalysisScanner;
pub use self::urlscan::UrlscanScanner;
pub use self::virustotal::VirusTotalScanner;

/// One scan submission.
///
/// The API key is carried here rather than stored in the scanner so that a
/// single registry can serve callers with different credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    kind: IndicatorType,
    query: String,
    api_key: Option<ApiKey>,
}

impl ScanRequest {
    /// Creates a request for `query` of the given kind.
    #[must_use]
    pub fn new(kind: IndicatorType, query: impl Into<String>, api_key: Option<ApiKey>) -> Self {
        Self {
            kind,
            query: query.into(),
            api_key,
        }
    }

    /// Returns the indicator kind.
    #[must_use]
    pub const fn kind(&self) -> IndicatorType {
        self.kind
    }

    /// Returns the query.
    #[must_use]
    pub const fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Returns the credential, if any.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }
}

/// Submits indicators to a remote analysis service.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use quarry_analyzers::{ScanError, ScanRequest, Scanner};
/// use quarry_core::IndicatorType;
/// use url::Url;
///
/// struct Echo;
///
/// #[async_trait]
/// impl Scanner for Echo {
///     fn supported_types(&self) -> Vec<IndicatorType> {
///         vec![IndicatorType::Url]
///     }
///
///     fn requires_api_key(&self) -> bool {
///         false
///     }
///
///     async fn scan(&self, request: &ScanRequest) -> Result<Url, ScanError> {
///         Url::parse(request.query()).map_err(|e| ScanError::payload("echo", e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Indicator kinds this scanner accepts.
    fn supported_types(&self) -> Vec<IndicatorType>;

    /// Whether [`Scanner::scan`] needs [`ScanRequest::api_key`] to be set.
    fn requires_api_key(&self) -> bool;

    /// Submits the request and returns the result page URL.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] when the request cannot be sent, the service
    /// rejects it, or the response cannot be understood.
    async fn scan(&self, request: &ScanRequest) -> Result<Url, ScanError>;
}

/// Checks the preconditions every bundled scanner shares and returns the key.
fn require_key<'a>(
    scanner: &str,
    supported: &[IndicatorType],
    request: &'a ScanRequest,
) -> Result<&'a ApiKey, ScanError> {
    if !supported.contains(&request.kind()) {
        return Err(ScanError::UnsupportedType {
            scanner: scanner.to_owned(),
            kind: request.kind(),
        });
    }
    request.api_key().ok_or_else(|| ScanError::MissingApiKey {
        scanner: scanner.to_owned(),
    })
}

/// Reads a JSON body, turning non-success statuses into [`ScanError::Status`].
async fn read_json<T: DeserializeOwned>(
    scanner: &str,
    response: reqwest::Response,
) -> Result<T, ScanError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ScanError::Status {
            scanner: scanner.to_owned(),
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|error| ScanError::payload(scanner, error.to_string()))
}

/// Extracts a human-readable message from an error body.
///
/// The bundled services answer errors with JSON carrying `message` or
/// `error.message`; anything else is truncated.
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error").and_then(|error| error.get("message")))
        })
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| body.chars().take(200).collect(), str::to_owned)
}

/// Parses a result page URL built from a service response.
fn result_url(scanner: &str, text: &str) -> Result<Url, ScanError> {
    Url::parse(text)
        .map_err(|error| {
            ScanError::payload(scanner, format!("invalid result URL '{text}': {error}"))
        })
}

fn trim_base(base_url: impl Into<String>) -> String {
    let mut base = base_url.into();
    while base.ends_with('/') {
        base.pop();
    }
    base
}
