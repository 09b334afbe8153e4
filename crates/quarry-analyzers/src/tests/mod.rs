//! Crate-level integration and BDD tests.

use quarry_core::{IndicatorType, classify};

use crate::capability::Capability;
use crate::registry::AnalyzerRegistry;


#[test]
fn builtin_catalogue_serves_a_classified_selection() {
    let registry = AnalyzerRegistry::builtin(&reqwest::Client::new()).expect("catalogue");
    let indicators = classify("hxxps://evil[.]example/login");

    let search = registry.entries_for(&indicators, Capability::Search);
    assert!(
        search
            .iter()
            .any(|entry| entry.indicator().kind() == IndicatorType::Url),
        "expected a URL searcher"
    );

    let scan = registry.entries_for(&indicators, Capability::Scan);
    let scanners: Vec<&str> = scan.iter().map(|entry| entry.analyzer().name()).collect();
    assert_eq!(scanners, ["urlscan.io", "VirusTotal", "HybridAnalysis"]);
}
