//! Crate-level integration and BDD tests.

use crate::command::{ALL_TARGET, Action, Command};
use crate::detector::classify;
use crate::indicator::IndicatorType;

mod behaviour;

#[test]
fn classified_indicators_encode_to_decodable_identifiers() {
    let selection = "CVE-2021-44228 hit 203.0.113.9 from hxxps://evil[.]example/x";
    for indicator in classify(selection) {
        let command = Command::from_indicator(Action::Search, &indicator, ALL_TARGET);
        let decoded = Command::decode(&command.encode()).expect("decodes");
        assert_eq!(decoded.indicator(), indicator);
    }
}

#[test]
fn every_type_label_survives_a_codec_pass() {
    for kind in IndicatorType::ALL {
        let command = Command::new(Action::Scan, "sample query", kind, "Analyzer");
        let decoded = Command::decode(&command.encode()).expect("decodes");
        assert_eq!(decoded.kind(), kind);
    }
}
