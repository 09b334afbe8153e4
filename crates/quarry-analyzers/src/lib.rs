//! Analyzer capability model and registry for Quarry.
//!
//! An analyzer is an external service that accepts indicators of some
//! kinds. It may offer **search** (a lookup URL built locally from a
//! template) and **scan** (a remote submission that returns a result URL).
//! The [`AnalyzerRegistry`] keeps analyzers in a fixed order and matches
//! classified indicators against their capabilities.
//!
//! Scanning goes through the [`Scanner`] trait so the HTTP clients for
//! urlscan.io, VirusTotal and Hybrid Analysis can be swapped for test
//! doubles. The user-controlled inputs to dispatch, [`SearcherStates`] and
//! [`ApiKeys`], also live here.
//!
//! # Example
//!
//! ```
//! use quarry_analyzers::{AnalyzerRegistry, Capability};
//! use quarry_core::classify;
//!
//! let registry = AnalyzerRegistry::builtin(&reqwest::Client::new()).expect("catalogue is valid");
//! let indicators = classify("CVE-2021-44228");
//! let names: Vec<&str> = registry
//!     .entries_for(&indicators, Capability::Search)
//!     .iter()
//!     .map(|entry| entry.analyzer().name())
//!     .collect();
//! assert!(names.contains(&"NVD"));
//! ```

mod analyzer;
mod capability;
mod catalogue;
pub mod error;
pub mod registry;
pub mod scanner;
mod settings;
mod template;

#[cfg(test)]
mod tests;

pub use self::analyzer::Analyzer;
pub use self::capability::Capability;
pub use self::error::{AnalyzerError, ScanError, TemplateError};
pub use self::registry::{AnalyzerEntry, AnalyzerRegistry};
pub use self::scanner::{
    HybridAnalysisScanner, ScanRequest, Scanner, UrlscanScanner, VirusTotalScanner,
};
pub use self::settings::{ApiKey, ApiKeys, SearcherStates};
pub use self::template::UrlTemplate;
