//! The bundled analyzer catalogue.

use std::sync::Arc;

use quarry_core::IndicatorType::{
    Asn, Btc, Cve, Domain, Email, Eth, GaPubId, GaTrackId, Hash, Ipv4, Ipv6, Text, Url,
};

use crate::analyzer::Analyzer;
use crate::error::AnalyzerError;
use crate::registry::AnalyzerRegistry;
use crate::scanner::{HybridAnalysisScanner, UrlscanScanner, VirusTotalScanner};

impl AnalyzerRegistry {
    /// Builds the registry of well-known public services.
    ///
    /// Text searchers come first, followed by services for typed
    /// indicators. The urlscan.io, VirusTotal and Hybrid Analysis entries
    /// also scan, using `http` for their requests.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyzerError`] if a bundled definition fails
    /// validation.
    pub fn builtin(http: &reqwest::Client) -> Result<Self, AnalyzerError> {
        let mut registry = Self::new();
        for analyzer in bundled(http) {
            registry.register(analyzer)?;
        }
        Ok(registry)
    }
}

fn bundled(http: &reqwest::Client) -> Vec<Analyzer> {
    vec![
        Analyzer::new("Google")
            .with_search(&[Text], "https://www.google.com/search?q={query}"),
        Analyzer::new("X")
            .with_search(&[Text], "https://x.com/search?q={query}&f=live"),
        Analyzer::new("GitHub")
            .with_search(&[Text], "https://github.com/search?q={query}&type=code"),
        Analyzer::new("AbuseIPDB")
            .with_search(
                &[Ipv4, Ipv6, Domain],
                "https://www.abuseipdb.com/check/{raw}",
            ),
        Analyzer::new("Censys")
            .with_search(&[Ipv4, Ipv6], "https://search.censys.io/hosts/{raw}")
            .with_search(
                &[Domain],
                "https://search.censys.io/search?resource=hosts&q={query}",
            ),
        Analyzer::new("Shodan")
            .with_search(&[Ipv4, Ipv6], "https://www.shodan.io/host/{raw}")
            .with_search(
                &[Domain],
                "https://www.shodan.io/search?query=hostname%3A{query}",
            )
            .with_search(&[Asn], "https://www.shodan.io/search?query=asn%3A{query}"),
        Analyzer::new("GreyNoise")
            .with_search(&[Ipv4], "https://viz.greynoise.io/ip/{raw}")
            .with_search(&[Cve], "https://viz.greynoise.io/query?gnql=cve%3A{query}"),
        Analyzer::new("OTX")
            .with_search(&[Ipv4], "https://otx.alienvault.com/indicator/ip/{raw}")
            .with_search(&[Ipv6], "https://otx.alienvault.com/indicator/ip/{query}")
            .with_search(
                &[Domain],
                "https://otx.alienvault.com/indicator/domain/{raw}",
            )
            .with_search(&[Url], "https://otx.alienvault.com/indicator/url/{query}")
            .with_search(&[Hash], "https://otx.alienvault.com/indicator/file/{raw}")
            .with_search(&[Cve], "https://otx.alienvault.com/indicator/cve/{raw}"),
        Analyzer::new("SecurityTrails")
            .with_search(&[Ipv4], "https://securitytrails.com/list/ip/{raw}")
            .with_search(&[Domain], "https://securitytrails.com/domain/{raw}/dns"),
        Analyzer::new("crt.sh")
            .with_search(&[Domain], "https://crt.sh/?q={query}"),
        Analyzer::new("urlscan.io")
            .with_search(&[Ipv4], "https://urlscan.io/ip/{raw}")
            .with_search(&[Domain], "https://urlscan.io/domain/{raw}")
            .with_search(&[Url], "https://urlscan.io/search/#{query}")
            .with_scanner(Arc::new(UrlscanScanner::new(http.clone()))),
        Analyzer::new("VirusTotal")
            .with_search(&[Ipv4], "https://www.virustotal.com/gui/ip-address/{raw}")
            .with_search(&[Domain], "https://www.virustotal.com/gui/domain/{raw}")
            .with_search(&[Url], "https://www.virustotal.com/gui/search/{query}")
            .with_search(&[Hash], "https://www.virustotal.com/gui/file/{raw}")
            .with_scanner(Arc::new(VirusTotalScanner::new(http.clone()))),
        Analyzer::new("HybridAnalysis")
            .with_search(
                &[Hash],
                "https://www.hybrid-analysis.com/search?query={query}",
            )
            .with_scanner(Arc::new(HybridAnalysisScanner::new(http.clone()))),
        Analyzer::new("MalwareBazaar")
            .with_search(&[Hash], "https://bazaar.abuse.ch/browse.php?search={query}"),
        Analyzer::new("NVD")
            .with_search(&[Cve], "https://nvd.nist.gov/vuln/detail/{raw}"),
        Analyzer::new("BGP Toolkit")
            .with_search(&[Asn], "https://bgp.he.net/{raw}")
            .with_search(&[Ipv4, Ipv6], "https://bgp.he.net/ip/{raw}"),
        Analyzer::new("Blockchain.com")
            .with_search(
                &[Btc],
                "https://www.blockchain.com/explorer/addresses/btc/{raw}",
            ),
        Analyzer::new("Etherscan")
            .with_search(&[Eth], "https://etherscan.io/address/{raw}"),
        Analyzer::new("SpyOnWeb")
            .with_search(&[GaPubId, GaTrackId, Domain], "https://spyonweb.com/{raw}"),
        Analyzer::new("HaveIBeenPwned")
            .with_search(&[Email], "https://haveibeenpwned.com/account/{query}"),
        Analyzer::new("EmailRep")
            .with_search(&[Email], "https://emailrep.io/{query}"),
    ]
}
