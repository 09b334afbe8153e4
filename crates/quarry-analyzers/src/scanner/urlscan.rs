//! urlscan.io submission.

use async_trait::async_trait;
use quarry_core::IndicatorType;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{ScanRequest, Scanner, read_json, require_key, result_url, trim_base};
use crate::error::ScanError;

const NAME: &str = "urlscan.io";
const DEFAULT_BASE_URL: &str = "https://urlscan.io";
const SUPPORTED: [IndicatorType; 3] =
    [IndicatorType::Ipv4, IndicatorType::Domain, IndicatorType::Url];

#[derive(Serialize)]
struct Submission<'a> {
    url: &'a str,
    visibility: &'static str,
}

#[derive(Deserialize)]
struct Accepted {
    result: String,
}

/// Submits IPs, domains and URLs to urlscan.io as public scans.
#[derive(Debug, Clone)]
pub struct UrlscanScanner {
    http: reqwest::Client,
    base_url: String,
}

impl UrlscanScanner {
    /// Creates a scanner talking to the public urlscan.io API.
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
impl Scanner for UrlscanScanner {
    fn supported_types(&self) -> Vec<IndicatorType> {
        SUPPORTED.to_vec()
    }

    fn requires_api_key(&self) -> bool {
        true
    }

    async fn scan(&self, request: &ScanRequest) -> Result<Url, ScanError> {
        let key = require_key(NAME, &SUPPORTED, request)?;
        let endpoint = format!("{}/api/v1/scan/", self.base_url);
        debug!(
            target: "quarry::scanner",
            scanner = NAME,
            kind = %request.kind(),
            "submitting scan"
        );

        let response = self
            .http
            .post(&endpoint)
            .header("API-Key", key.expose())
            .json(&Submission {
                url: request.query(),
                visibility: "public",
            })
            .send()
            .await
            .map_err(|error| ScanError::transport(NAME, error))?;
        let accepted: Accepted = read_json(NAME, response).await?;
        result_url(NAME, &accepted.result)
    }
}
