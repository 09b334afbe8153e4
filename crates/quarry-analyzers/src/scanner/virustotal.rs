//! VirusTotal URL submission.

use async_trait::async_trait;
use quarry_core::IndicatorType;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{ScanRequest, Scanner, read_json, require_key, result_url, trim_base};
use crate::error::ScanError;

const NAME: &str = "VirusTotal";
const DEFAULT_BASE_URL: &str = "https://www.virustotal.com";
const SUPPORTED: [IndicatorType; 1] = [IndicatorType::Url];

#[derive(Deserialize)]
struct Accepted {
    data: Analysis,
}

#[derive(Deserialize)]
struct Analysis {
    id: String,
}

/// Submits URLs to the VirusTotal v3 API and links to the URL report.
#[derive(Debug, Clone)]
pub struct VirusTotalScanner {
    http: reqwest::Client,
    base_url: String,
}

impl VirusTotalScanner {
    /// Creates a scanner talking to the public VirusTotal API.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Creates a scanner talking to another deployment of the API.
    #[must_use]
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: trim_base(base_url),
        }
    }
}

/// Extracts the URL identifier from an analysis id of the form
/// `u-<sha256>-<timestamp>`.
fn url_identifier(analysis_id: &str) -> Option<&str> {
    analysis_id
        .strip_prefix("u-")
        .and_then(|rest| rest.split('-').next())
        .filter(|id| !id.is_empty())
}

#[async_trait]
impl Scanner for VirusTotalScanner {
    fn supported_types(&self) -> Vec<IndicatorType> {
        SUPPORTED.to_vec()
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    async fn scan(&self, request: &ScanRequest) -> Result<Url, ScanError> {
        let key = require_key(NAME, &SUPPORTED, request)?;
        let endpoint = format!("{}/api/v3/urls", self.base_url);
        debug!(
            target: "quarry::scanner",
            scanner = NAME,
            kind = %request.kind(),
            "submitting scan"
        );

        let response = self
            .http
            .post(&endpoint)
            .header("x-apikey", key.expose())
            .form(&[("url", request.query())])
            .send()
            .await
            .map_err(|error| ScanError::transport(NAME, error))?;
        let accepted: Accepted = read_json(NAME, response).await?;
        let id = url_identifier(&accepted.data.id).ok_or_else(|| {
            ScanError::payload(NAME, format!("unexpected analysis id '{}'", accepted.data.id))
        })?;
        result_url(NAME, &format!("{}/gui/url/{id}", self.base_url))
    }
}
