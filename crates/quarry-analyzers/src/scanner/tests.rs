//! HTTP tests for the bundled scanners against a local mock server.

use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn keyed(kind: IndicatorType, query: &str) -> ScanRequest {
    ScanRequest::new(kind, query, Some(ApiKey::new("test-key")))
}

// ---------------------------------------------------------------------------
// urlscan.io
// ---------------------------------------------------------------------------

#[tokio::test]
async fn urlscan_returns_result_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/scan/"))
        .and(header("API-Key", "test-key"))
        .and(body_json(json!({
            "url": "https://evil.example/a",
            "visibility": "public",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Submission successful",
            "uuid": "0e37e828-a9d9-45c0-ac50-1ca579b86c72",
            "result": "https://urlscan.io/result/0e37e828-a9d9-45c0-ac50-1ca579b86c72/",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scanner = UrlscanScanner::with_base_url(reqwest::Client::new(), server.uri());
    let url = scanner
        .scan(&keyed(IndicatorType::Url, "https://evil.example/a"))
        .await
        .expect("scan succeeds");

    assert_eq!(
        url.as_str(),
        "https://urlscan.io/result/0e37e828-a9d9-45c0-ac50-1ca579b86c72/"
    );
}

#[tokio::test]
async fn urlscan_surfaces_service_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/scan/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "DNS Error - Could not resolve domain",
            "status": 400,
        })))
        .mount(&server)
        .await;

    let scanner = UrlscanScanner::with_base_url(reqwest::Client::new(), server.uri());
    let error = scanner
        .scan(&keyed(IndicatorType::Domain, "nx.example"))
        .await
        .expect_err("scan fails");

    match error {
        ScanError::Status {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "DNS Error - Could not resolve domain");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn urlscan_rejects_unparseable_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "not a url" })))
        .mount(&server)
        .await;

    let scanner = UrlscanScanner::with_base_url(reqwest::Client::new(), server.uri());
    let error = scanner
        .scan(&keyed(IndicatorType::Ipv4, "192.0.2.1"))
        .await
        .expect_err("scan fails");
    assert!(matches!(error, ScanError::Payload { .. }), "got {error:?}");
}

// ---------------------------------------------------------------------------
// VirusTotal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn virustotal_links_to_url_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/urls"))
        .and(header("x-apikey", "test-key"))
        .and(body_string_contains("url=https%3A%2F%2Fevil.example%2F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "type": "analysis", "id": "u-4f5e6d-1700000000" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scanner = VirusTotalScanner::with_base_url(reqwest::Client::new(), server.uri());
    let url = scanner
        .scan(&keyed(IndicatorType::Url, "https://evil.example/"))
        .await
        .expect("scan succeeds");

    assert_eq!(url.as_str(), format!("{}/gui/url/4f5e6d", server.uri()));
}

#[tokio::test]
async fn virustotal_reports_malformed_analysis_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "type": "analysis", "id": "bogus" }
        })))
        .mount(&server)
        .await;

    let scanner = VirusTotalScanner::with_base_url(reqwest::Client::new(), server.uri());
    let error = scanner
        .scan(&keyed(IndicatorType::Url, "https://evil.example/"))
        .await
        .expect_err("scan fails");
    assert!(error.to_string().contains("bogus"), "got {error}");
}

// ---------------------------------------------------------------------------
// Hybrid Analysis
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hybrid_analysis_links_to_sample() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/quick-scan/url"))
        .and(header("api-key", "test-key"))
        .and(header("user-agent", "Falcon Sandbox"))
        .and(body_string_contains("scan_type=all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha256": "abc123",
            "scan_id": "1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scanner = HybridAnalysisScanner::with_base_url(reqwest::Client::new(), server.uri());
    let url = scanner
        .scan(&keyed(IndicatorType::Url, "https://evil.example/"))
        .await
        .expect("scan succeeds");

    assert_eq!(url.as_str(), format!("{}/sample/abc123", server.uri()));
}

// ---------------------------------------------------------------------------
// Shared preconditions
// ---------------------------------------------------------------------------

#[rstest]
#[case::hash(IndicatorType::Hash)]
#[case::email(IndicatorType::Email)]
#[tokio::test]
async fn unsupported_kind_is_rejected_before_sending(#[case] kind: IndicatorType) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let scanner = UrlscanScanner::with_base_url(reqwest::Client::new(), server.uri());
    let error = scanner
        .scan(&keyed(kind, "anything"))
        .await
        .expect_err("scan fails");
    assert!(matches!(error, ScanError::UnsupportedType { .. }), "got {error:?}");
}

#[tokio::test]
async fn missing_key_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let scanner = HybridAnalysisScanner::with_base_url(reqwest::Client::new(), server.uri());
    let request = ScanRequest::new(IndicatorType::Url, "https://evil.example/", None);
    let error = scanner.scan(&request).await.expect_err("scan fails");
    assert!(matches!(error, ScanError::MissingApiKey { .. }), "got {error:?}");
}

#[rstest]
#[case::json_message(r#"{"message": "quota exceeded"}"#, "quota exceeded")]
#[case::nested_message(r#"{"error": {"code": "X", "message": "bad key"}}"#, "bad key")]
#[case::plain_text("Service Unavailable", "Service Unavailable")]
fn extracts_error_messages(#[case] body: &str, #[case] expected: &str) {
    assert_eq!(error_message(body), expected);
}

#[test]
fn trims_trailing_slashes_from_base() {
    assert_eq!(trim_base("http://127.0.0.1:8080//"), "http://127.0.0.1:8080");
}
