//! Hybrid Analysis quick scan submission.

use async_trait::async_trait;
use quarry_core::IndicatorType;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{ScanRequest, Scanner, read_json, require_key, result_url, trim_base};
use crate::error::ScanError;

const NAME: &str = "HybridAnalysis";
const DEFAULT_BASE_URL: &str = "https://www.hybrid-analysis.com";
const USER_AGENT: &str = "Falcon Sandbox";
const SUPPORTED: [IndicatorType; 1] = [IndicatorType::Url];

#[derive(Deserialize)]
struct Accepted {
    sha256: String,
}

/// Submits URLs to the Hybrid Analysis quick scan API.
#[derive(Debug, Clone)]
pub struct HybridAnalysisScanner {
    http: reqwest::Client,
    base_url: String,
}

impl HybridAnalysisScanner {
    /// Creates a scanner talking to the public Hybrid Analysis API.
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

#[async_trait]
impl Scanner for HybridAnalysisScanner {
    fn supported_types(&self) -> Vec<IndicatorType> {
        SUPPORTED.to_vec()
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    async fn scan(&self, request: &ScanRequest) -> Result<Url, ScanError> {
        let key = require_key(NAME, &SUPPORTED, request)?;
        let endpoint = format!("{}/api/v2/quick-scan/url", self.base_url);
        debug!(
            target: "quarry::scanner",
            scanner = NAME,
            kind = %request.kind(),
            "submitting scan"
        );

        let response = self
            .http
            .post(&endpoint)
            .header("api-key", key.expose())
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .form(&[("scan_type", "all"), ("url", request.query())])
            .send()
            .await
            .map_err(|error| ScanError::transport(NAME, error))?;
        let accepted: Accepted = read_json(NAME, response).await?;
        result_url(NAME, &format!("{}/sample/{}", self.base_url, accepted.sha256))
    }
}
