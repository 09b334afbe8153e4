//! Crate-level tests joining menu building and dispatch.

use quarry_analyzers::{Analyzer, AnalyzerRegistry, ApiKeys, SearcherStates};
use quarry_core::IndicatorType;

use crate::{Dispatcher, MenuBuilder, SelectionRequest};


fn registry() -> AnalyzerRegistry {
    let mut registry = AnalyzerRegistry::new();
    registry
        .register(
            Analyzer::new("Google")
                .with_search(&[IndicatorType::Text], "https://www.google.com/search?q={query}"),
        )
        .expect("register Google");
    registry
        .register(
            Analyzer::new("NVD")
                .with_search(&[IndicatorType::Cve], "https://nvd.nist.gov/vuln/detail/{raw}"),
        )
        .expect("register NVD");
    registry
}

#[tokio::test]
async fn every_menu_item_opens() {
    let registry = registry();
    let states = SearcherStates::new();
    let keys = ApiKeys::new();
    let request =
        SelectionRequest::parse(b"{\"selection\":\"see cve-2021-44228\"}").expect("request");

    let items = MenuBuilder::new(&registry).build(&request, &states);
    assert_eq!(items.len(), 3);

    let dispatcher = Dispatcher::new(&registry);
    let mut opened = Vec::new();
    for item in &items {
        let urls = dispatcher.open(item.id(), &states, &keys).await.expect("opens");
        opened.extend(urls.into_iter().map(String::from));
    }
    assert_eq!(
        opened,
        [
            "https://nvd.nist.gov/vuln/detail/CVE-2021-44228",
            "https://www.google.com/search?q=see%20cve-2021-44228",
            "https://nvd.nist.gov/vuln/detail/CVE-2021-44228",
        ]
    );
}
