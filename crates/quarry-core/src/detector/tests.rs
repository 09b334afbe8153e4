//! Unit tests for selection classification.

use rstest::rstest;

use super::*;
use crate::indicator::HashAlgorithm;

fn kinds(text: &str) -> Vec<IndicatorType> {
    classify(text).iter().map(Indicator::kind).collect()
}

fn query_for(text: &str, kind: IndicatorType) -> Option<String> {
    classify(text)
        .into_iter()
        .find(|indicator| indicator.kind() == kind)
        .map(|indicator| indicator.query().to_owned())
}

// ---------------------------------------------------------------------------
// Empty input
// ---------------------------------------------------------------------------

#[rstest]
#[case::empty("")]
#[case::spaces("   ")]
#[case::mixed_whitespace(" \t\n ")]
fn blank_selection_yields_nothing(#[case] text: &str) {
    assert!(classify(text).is_empty());
}

// ---------------------------------------------------------------------------
// One sample per kind
// ---------------------------------------------------------------------------

#[rstest]
#[case::md5(
    IndicatorType::Hash,
    "44D88612FEA8A8F36DE82E1278ABB02F",
    "44d88612fea8a8f36de82e1278abb02f"
)]
#[case::cve(IndicatorType::Cve, "cve-2021-44228", "CVE-2021-44228")]
#[case::asn(IndicatorType::Asn, "as13335", "AS13335")]
#[case::btc_legacy(
    IndicatorType::Btc,
    "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
    "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"
)]
#[case::btc_bech32(
    IndicatorType::Btc,
    "BC1QAR0SRRR7XFKVY5L643LYDNW9RE59GTZZWF5MDQ",
    "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"
)]
#[case::eth(
    IndicatorType::Eth,
    "0xDE0B295669A9FD93D5F28D9EC85E40F4CB697BAE",
    "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae"
)]
#[case::ga_pub_id(IndicatorType::GaPubId, "PUB-1234567891234567", "pub-1234567891234567")]
#[case::ga_track_id(IndicatorType::GaTrackId, "ua-12345678-1", "UA-12345678-1")]
#[case::ipv4(IndicatorType::Ipv4, "8.8.8.8", "8.8.8.8")]
#[case::ipv6(IndicatorType::Ipv6, "2001:DB8:0:0:0:0:0:1", "2001:db8::1")]
#[case::domain(IndicatorType::Domain, "Example.COM", "example.com")]
#[case::url(IndicatorType::Url, "https://Example.com/path?q=1", "https://example.com/path?q=1")]
#[case::email(IndicatorType::Email, "Analyst@Example.org", "analyst@example.org")]
#[case::text(IndicatorType::Text, "  some   free text ", "some free text")]
fn classifies_sample_of_each_kind(
    #[case] kind: IndicatorType,
    #[case] text: &str,
    #[case] expected: &str,
) {
    assert_eq!(query_for(text, kind).as_deref(), Some(expected));
}

#[test]
fn ipv4_literal_yields_exactly_one_indicator() {
    assert_eq!(
        classify("8.8.8.8"),
        vec![Indicator::new(IndicatorType::Ipv4, "8.8.8.8")]
    );
}

#[test]
fn ipv6_literal_is_not_text() {
    assert_eq!(kinds("2001:db8::1"), vec![IndicatorType::Ipv6]);
}

#[test]
fn sha256_is_lower_cased_hash() {
    let upper = "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855";
    let indicators = classify(upper);
    let hash = indicators
        .iter()
        .find(|indicator| indicator.kind() == IndicatorType::Hash)
        .expect("hash indicator");
    assert_eq!(hash.query(), upper.to_ascii_lowercase());
    assert_eq!(hash.hash_algorithm(), Some(HashAlgorithm::Sha256));
}

#[rstest]
#[case::md5(32, HashAlgorithm::Md5)]
#[case::sha1(40, HashAlgorithm::Sha1)]
#[case::sha256(64, HashAlgorithm::Sha256)]
#[case::sha512(128, HashAlgorithm::Sha512)]
fn hash_lengths_map_to_algorithms(#[case] len: usize, #[case] algorithm: HashAlgorithm) {
    let digest = "a".repeat(len);
    let query = query_for(&digest, IndicatorType::Hash).expect("hash");
    let hash = Indicator::new(IndicatorType::Hash, query);
    assert_eq!(hash.hash_algorithm(), Some(algorithm));
}

#[rstest]
#[case::too_short("abcdef0123")]
#[case::odd_length(&"a".repeat(33))]
#[case::not_hex(&"g".repeat(32))]
fn non_digest_hex_is_not_a_hash(#[case] text: &str) {
    assert!(!kinds(text).contains(&IndicatorType::Hash));
}

// ---------------------------------------------------------------------------
// Priority and multiplicity
// ---------------------------------------------------------------------------

#[test]
fn domain_also_classifies_as_text() {
    assert_eq!(
        kinds("malware.exe.example.com"),
        vec![IndicatorType::Domain, IndicatorType::Text]
    );
}

#[test]
fn output_follows_matcher_priority() {
    let text = "CVE-2014-0160 exploited from 203.0.113.7 via https://evil.example/x";
    assert_eq!(
        kinds(text),
        vec![
            IndicatorType::Cve,
            IndicatorType::Ipv4,
            IndicatorType::Url,
            IndicatorType::Text,
        ]
    );
}

#[test]
fn first_matching_token_wins_within_a_kind() {
    assert_eq!(
        query_for("1.1.1.1 and 9.9.9.9", IndicatorType::Ipv4).as_deref(),
        Some("1.1.1.1")
    );
}

#[test]
fn url_host_is_not_reported_as_a_domain() {
    assert_eq!(
        kinds("https://example.com/login"),
        vec![IndicatorType::Url, IndicatorType::Text]
    );
}

#[test]
fn email_domain_is_not_reported_as_a_domain() {
    assert_eq!(
        kinds("someone@example.com"),
        vec![IndicatorType::Email, IndicatorType::Text]
    );
}

#[rstest]
#[case::executable("invoice.exe")]
#[case::script("payload.ps1")]
#[case::single_label("localhost")]
#[case::numeric_tld("1.2.3")]
fn file_names_and_bare_words_are_not_domains(#[case] text: &str) {
    assert!(!kinds(text).contains(&IndicatorType::Domain));
}

#[test]
fn classification_is_repeatable() {
    let text = "hxxp://evil[.]example/a 8.8.4.4";
    assert_eq!(classify(text), classify(text));
}

// ---------------------------------------------------------------------------
// Refanging and tokenisation
// ---------------------------------------------------------------------------

#[rstest]
#[case::bracket_dot("evil[.]example[.]com", IndicatorType::Domain, "evil.example.com")]
#[case::paren_dot("evil(.)example(dot)com", IndicatorType::Domain, "evil.example.com")]
#[case::hxxp("hxxp://evil[.]example/a", IndicatorType::Url, "http://evil.example/a")]
#[case::hxxps_upper("HXXPS://evil.example/", IndicatorType::Url, "https://evil.example/")]
#[case::at("analyst[@]example[.]org", IndicatorType::Email, "analyst@example.org")]
#[case::ipv4("192.0.2[.]1", IndicatorType::Ipv4, "192.0.2.1")]
fn defanged_indicators_are_refanged(
    #[case] text: &str,
    #[case] kind: IndicatorType,
    #[case] expected: &str,
) {
    assert_eq!(query_for(text, kind).as_deref(), Some(expected));
}

#[test]
fn text_keeps_the_defanged_spelling() {
    assert_eq!(
        query_for("evil[.]example[.]com", IndicatorType::Text).as_deref(),
        Some("evil[.]example[.]com")
    );
}

#[rstest]
#[case::quoted("\"example.com\"")]
#[case::parenthesised("(example.com)")]
#[case::sentence_end("see example.com.")]
#[case::comma("example.com, then")]
fn surrounding_punctuation_is_ignored(#[case] text: &str) {
    assert_eq!(
        query_for(text, IndicatorType::Domain).as_deref(),
        Some("example.com")
    );
}

#[test]
fn bracketed_ipv6_is_recognised() {
    assert_eq!(
        query_for("[2001:db8::1]", IndicatorType::Ipv6).as_deref(),
        Some("2001:db8::1")
    );
}

#[rstest]
#[case::balanced(
    "https://en.wikipedia.org/wiki/Foo_(bar)",
    "https://en.wikipedia.org/wiki/Foo_(bar)"
)]
#[case::wrapped(
    "(https://en.wikipedia.org/wiki/Foo_(bar)),",
    "https://en.wikipedia.org/wiki/Foo_(bar)"
)]
#[case::unbalanced_closer("see https://evil.example/a)", "https://evil.example/a")]
fn url_keeps_brackets_it_opened(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(query_for(text, IndicatorType::Url).as_deref(), Some(expected));
}

// ---------------------------------------------------------------------------
// Schemeless host forms
// ---------------------------------------------------------------------------

#[rstest]
#[case::ipv4_port("203.0.113.7:8080", IndicatorType::Ipv4, "203.0.113.7")]
#[case::ipv4_path("203.0.113.7/admin", IndicatorType::Ipv4, "203.0.113.7")]
#[case::domain_path("evil.example.com/payload.exe", IndicatorType::Domain, "evil.example.com")]
#[case::domain_port_path("Evil.Example.com:8443/x", IndicatorType::Domain, "evil.example.com")]
#[case::ipv6_port("[2001:db8::1]:443", IndicatorType::Ipv6, "2001:db8::1")]
fn schemeless_host_forms_yield_the_host(
    #[case] text: &str,
    #[case] kind: IndicatorType,
    #[case] expected: &str,
) {
    assert_eq!(query_for(text, kind).as_deref(), Some(expected));
}

#[test]
fn host_with_port_is_still_text() {
    assert_eq!(
        kinds("203.0.113.7:8080"),
        vec![IndicatorType::Ipv4, IndicatorType::Text]
    );
}

#[rstest]
#[case::non_numeric_port("example.com:http")]
#[case::port_out_of_range("example.com:70000")]
fn invalid_port_suffix_is_not_a_domain(#[case] text: &str) {
    assert!(!kinds(text).contains(&IndicatorType::Domain));
}
