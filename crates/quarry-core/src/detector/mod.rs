//! Classification of free-form selections into indicators.
//!
//! [`classify`] normalises whitespace, refangs the selection, splits it into
//! tokens, and then runs a fixed table of typed matchers from most to least
//! specific. A matcher reports the normalised form of the first token it
//! accepts; the generic `text` matcher runs last over the whole selection.
//!
//! A selection may satisfy several kinds at once. The detector reports all
//! of them, in matcher order, and leaves the choice to whoever builds the
//! menu.

mod matchers;
mod refang;

#[cfg(test)]
mod tests;

use tracing::trace;

use crate::indicator::{Indicator, IndicatorType};

pub use self::refang::refang;

type TokenMatcher = fn(&str) -> Option<String>;

/// Typed matchers in priority order.
///
/// Kinds are unique in this table, so each kind yields at most one query.
const TOKEN_MATCHERS: &[(IndicatorType, TokenMatcher)] = &[
    (IndicatorType::Hash, matchers::hash),
    (IndicatorType::Cve, matchers::cve),
    (IndicatorType::Asn, matchers::asn),
    (IndicatorType::Btc, matchers::btc),
    (IndicatorType::Eth, matchers::eth),
    (IndicatorType::GaPubId, matchers::ga_pub_id),
    (IndicatorType::GaTrackId, matchers::ga_track_id),
    (IndicatorType::Ipv4, matchers::ipv4),
    (IndicatorType::Ipv6, matchers::ipv6),
    (IndicatorType::Domain, matchers::domain),
    (IndicatorType::Url, matchers::url),
    (IndicatorType::Email, matchers::email),
];

/// Characters stripped from the start of a token before matching.
const LEADING: &[char] = &['"', '\'', '`', '(', '[', '{', '<', ',', ';'];

/// Characters always stripped from the end of a token.
const TRAILING: &[char] = &['"', '\'', '`', '>', ',', ';', '.', '!', '?'];

/// Closing brackets paired with their openers. A closer is stripped only
/// when the token holds more closers than openers of that pair.
const BRACKETS: &[(char, char)] = &[('(', ')'), ('[', ']'), ('{', '}')];

/// Classifies a selection into every indicator kind it satisfies.
///
/// Leading, trailing, and repeated whitespace is normalised first; empty or
/// whitespace-only input yields an empty vector. The output follows the
/// fixed matcher priority (hash, CVE, ASN, Bitcoin, Ethereum, AdSense and
/// Analytics identifiers, IPv4, IPv6, domain, URL, email, text), with at most
/// one indicator per kind.
///
/// The `text` kind accepts any selection except one that is, in its
/// entirety, a single IP address literal.
///
/// # Example
///
/// ```
/// use quarry_core::{IndicatorType, classify};
///
/// let kinds: Vec<IndicatorType> = classify("evil[.]example[.]com")
///     .iter()
///     .map(|indicator| indicator.kind())
///     .collect();
/// assert_eq!(kinds, vec![IndicatorType::Domain, IndicatorType::Text]);
///
/// assert!(classify("   ").is_empty());
/// ```
#[must_use]
pub fn classify(text: &str) -> Vec<Indicator> {
    let normalised = normalise_whitespace(text);
    if normalised.is_empty() {
        return Vec::new();
    }

    let refanged = refang(&normalised);
    let tokens: Vec<&str> = tokenise(&refanged).collect();

    let mut indicators: Vec<Indicator> = TOKEN_MATCHERS
        .iter()
        .filter_map(|(kind, matcher)| {
            tokens
                .iter()
                .find_map(|&token| matcher(token))
                .map(|query| Indicator::new(*kind, query))
        })
        .collect();

    if !matchers::is_ip_literal(&refanged) {
        indicators.push(Indicator::new(IndicatorType::Text, normalised.as_str()));
    }

    trace!(
        target: "quarry::detector",
        kinds = ?indicators.iter().map(Indicator::kind).collect::<Vec<_>>(),
        "classified selection"
    );
    indicators
}

fn normalise_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tokenise(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(unwrap_token)
        .filter(|token| !token.is_empty())
}

fn unwrap_token(token: &str) -> &str {
    let mut rest = token.trim_start_matches(LEADING);
    loop {
        let Some(last) = rest.chars().next_back() else {
            return rest;
        };
        let strip = TRAILING.contains(&last)
            || BRACKETS.iter().any(|&(open, close)| {
                last == close && rest.matches(close).count() > rest.matches(open).count()
            });
        if !strip {
            return rest;
        }
        rest = rest.strip_suffix(last).unwrap_or_default();
    }
}
