//! Token validators for each typed indicator kind.
//!
//! Every validator receives one token with surrounding punctuation removed
//! and either rejects it or returns the normalised query for its kind.
//! Validators never look at neighbouring tokens.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;
use url::{Host, Url};

use crate::indicator::HashAlgorithm;

macro_rules! pattern {
    ($name:ident, $regex:literal) => {
        #[expect(clippy::expect_used, reason = "static pattern is known to be valid")]
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new($regex).expect($regex));
    };
}

pattern!(CVE, r"(?i)^cve-\d{4}-\d{4,}$");
pattern!(ASN, r"(?i)^as\d{1,10}$");
pattern!(BTC_LEGACY, r"^[13][a-km-zA-HJ-NP-Z1-9]{25,34}$");
pattern!(BTC_BECH32, r"(?i)^bc1[ac-hj-np-z02-9]{11,71}$");
pattern!(ETH, r"(?i)^0x[0-9a-f]{40}$");
pattern!(GA_PUB_ID, r"(?i)^pub-\d{16}$");
pattern!(GA_TRACK_ID, r"(?i)^ua-\d{4,10}-\d{1,4}$");
pattern!(EMAIL_LOCAL, r"(?i)^[a-z0-9._%+-]+$");
pattern!(DOMAIN_LABEL, r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$");
pattern!(TLD, r"^(?:[a-z]{2,63}|xn--[a-z0-9-]{1,59})$");

/// File extensions that look like top-level domains in selections such as
/// `invoice.exe` but are not delegated TLDs.
const FILE_EXTENSIONS: &[&str] = &[
    "apk", "asp", "aspx", "bat", "bin", "cmd", "csv", "dat", "dll", "dmg", "doc", "docm", "docx",
    "elf", "exe", "gif", "gz", "hta", "htm", "html", "img", "ini", "iso", "jar", "jpeg", "jpg",
    "js", "json", "jsp", "lnk", "log", "msi", "php", "png", "ppt", "pptx", "ps1", "rar", "scr",
    "sys", "tar", "tmp", "txt", "vbs", "xls", "xlsm", "xlsx", "xml",
];

const URL_SCHEMES: &[&str] = &["http", "https", "ftp"];

pub(super) fn hash(token: &str) -> Option<String> {
    HashAlgorithm::from_hex_len(token.len())?;
    token
        .chars()
        .all(|c| c.is_ascii_hexdigit())
        .then(|| token.to_ascii_lowercase())
}

pub(super) fn cve(token: &str) -> Option<String> {
    CVE.is_match(token).then(|| token.to_ascii_uppercase())
}

pub(super) fn asn(token: &str) -> Option<String> {
    ASN.is_match(token).then(|| token.to_ascii_uppercase())
}

pub(super) fn btc(token: &str) -> Option<String> {
    // Base58 shares its alphabet with hex digests; an all-hex token is a
    // hash, not an address.
    if BTC_LEGACY.is_match(token) && !token.chars().all(|c| c.is_ascii_hexdigit()) {
        return Some(token.to_owned());
    }
    BTC_BECH32
        .is_match(token)
        .then(|| token.to_ascii_lowercase())
}

pub(super) fn eth(token: &str) -> Option<String> {
    ETH.is_match(token).then(|| token.to_ascii_lowercase())
}

pub(super) fn ga_pub_id(token: &str) -> Option<String> {
    GA_PUB_ID
        .is_match(token)
        .then(|| token.to_ascii_lowercase())
}

pub(super) fn ga_track_id(token: &str) -> Option<String> {
    GA_TRACK_ID
        .is_match(token)
        .then(|| token.to_ascii_uppercase())
}

pub(super) fn ipv4(token: &str) -> Option<String> {
    let host = strip_port(authority(token)?);
    host.parse::<Ipv4Addr>().ok().map(|ip| ip.to_string())
}

pub(super) fn ipv6(token: &str) -> Option<String> {
    let host = authority(token)?;
    // `[2001:db8::1]:443` usually arrives with its opening bracket already
    // removed by tokenisation.
    let address = host
        .split_once(']')
        .map_or(host, |(inside, _)| inside)
        .trim_start_matches('[');
    address.parse::<Ipv6Addr>().ok().map(|ip| ip.to_string())
}

pub(super) fn domain(token: &str) -> Option<String> {
    let host = strip_port(authority(token)?);
    let candidate = host.strip_suffix('.').unwrap_or(host).to_ascii_lowercase();
    is_domain(&candidate).then_some(candidate)
}

pub(super) fn url(token: &str) -> Option<String> {
    let (scheme, _) = token.split_once("://")?;
    if !URL_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
        return None;
    }
    let parsed = Url::parse(token).ok()?;
    match parsed.host()? {
        Host::Domain(name) if !is_domain(name) => None,
        _ => Some(parsed.into()),
    }
}

pub(super) fn email(token: &str) -> Option<String> {
    let (local, domain) = token.rsplit_once('@')?;
    if !EMAIL_LOCAL.is_match(local) {
        return None;
    }
    let host = domain.to_ascii_lowercase();
    is_domain(&host).then(|| format!("{}@{host}", local.to_ascii_lowercase()))
}

/// Returns `true` when the whole selection is a single IP address literal.
pub(super) fn is_ip_literal(text: &str) -> bool {
    text.parse::<IpAddr>().is_ok()
}

/// Returns the host part of a schemeless token such as `host:port/path`.
///
/// Tokens carrying a scheme belong to the URL matcher and yield `None`.
fn authority(token: &str) -> Option<&str> {
    if token.contains("://") {
        return None;
    }
    Some(token.split_once('/').map_or(token, |(host, _)| host))
}

/// Drops a trailing `:port` when the suffix is a valid port number.
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.parse::<u16>().is_ok() => name,
        _ => host,
    }
}

fn is_domain(candidate: &str) -> bool {
    if candidate.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = candidate.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    !rest.is_empty()
        && TLD.is_match(tld)
        && !FILE_EXTENSIONS.contains(tld)
        && labels.iter().all(|label| DOMAIN_LABEL.is_match(label))
}
