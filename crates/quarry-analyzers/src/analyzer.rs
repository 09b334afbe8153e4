//! Analyzer definitions.
//!
//! An [`Analyzer`] is an external lookup service described by the search
//! URL templates it offers per indicator kind and, optionally, a
//! [`Scanner`] for active submission. Analyzers are plain values: they are
//! assembled with the `with_*` builders, validated on registration, and
//! never mutated afterwards.

use std::fmt;
use std::sync::Arc;

use quarry_core::{ALL_TARGET, IndicatorType};
use url::Url;

use crate::capability::Capability;
use crate::error::{AnalyzerError, ScanError, TemplateError};
use crate::scanner::{ScanRequest, Scanner};
use crate::template::UrlTemplate;

/// Sequence that would make an analyzer name ambiguous inside a menu
/// identifier.
const IDENTIFIER_DELIMITER: &str = " as a ";

/// A template paired with its kind. Parse failures are kept until
/// [`Analyzer::validate`] reports them.
#[derive(Clone)]
struct SearchRoute {
    kind: IndicatorType,
    template: Result<UrlTemplate, TemplateError>,
}

/// An external analysis service.
///
/// # Example
///
/// ```
/// use quarry_analyzers::{Analyzer, Capability};
/// use quarry_core::IndicatorType;
///
/// let shodan = Analyzer::new("Shodan")
///     .with_search(
///         &[IndicatorType::Ipv4, IndicatorType::Ipv6],
///         "https://www.shodan.io/host/{raw}",
///     );
/// assert!(shodan.validate().is_ok());
/// assert!(shodan.supports(Capability::Search, IndicatorType::Ipv4));
/// assert!(!shodan.supports(Capability::Scan, IndicatorType::Ipv4));
///
/// let url = shodan.search_url(IndicatorType::Ipv4, "8.8.8.8").expect("url");
/// assert_eq!(url.as_str(), "https://www.shodan.io/host/8.8.8.8");
/// ```
#[derive(Clone)]
pub struct Analyzer {
    name: String,
    searches: Vec<SearchRoute>,
    scanner: Option<Arc<dyn Scanner>>,
}

impl Analyzer {
    /// Creates an analyzer with no capabilities.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            searches: Vec::new(),
            scanner: None,
        }
    }

    /// Adds a search template for each of `kinds`.
    ///
    /// A later template for the same kind replaces the earlier one.
    #[must_use]
    pub fn with_search(mut self, kinds: &[IndicatorType], template: &str) -> Self {
        for &kind in kinds {
            self.searches.retain(|route| route.kind != kind);
            self.searches.push(SearchRoute {
                kind,
                template: UrlTemplate::parse(template),
            });
        }
        self
    }

    /// Attaches a scanner.
    #[must_use]
    pub fn with_scanner(mut self, scanner: Arc<dyn Scanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    /// Returns the display name, which doubles as the menu target.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Checks the invariants the registry relies on.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidName`] for a blank name, the reserved
    /// target `all`, or a name containing `" as a "`;
    /// [`AnalyzerError::NoCapability`] when the analyzer can neither search
    /// nor scan; and [`AnalyzerError::InvalidTemplate`] for a template that
    /// cannot produce a URL.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.name.trim().is_empty() {
            return Err(AnalyzerError::invalid_name(&self.name, "name is empty"));
        }
        if self.name == ALL_TARGET {
            return Err(AnalyzerError::invalid_name(
                &self.name,
                "name is reserved for dispatching to every analyzer",
            ));
        }
        if self.name.contains(IDENTIFIER_DELIMITER) {
            return Err(AnalyzerError::invalid_name(
                &self.name,
                format!("name must not contain '{IDENTIFIER_DELIMITER}'"),
            ));
        }
        let scans = self
            .scanner
            .as_ref()
            .is_some_and(|scanner| !scanner.supported_types().is_empty());
        if self.searches.is_empty() && !scans {
            return Err(AnalyzerError::NoCapability {
                name: self.name.clone(),
            });
        }
        for route in &self.searches {
            if let Err(source) = &route.template {
                return Err(AnalyzerError::invalid_template(
                    &self.name,
                    route.kind,
                    source.clone(),
                ));
            }
        }
        Ok(())
    }

    /// Returns `true` when the analyzer offers `capability` for `kind`.
    #[must_use]
    pub fn supports(&self, capability: Capability, kind: IndicatorType) -> bool {
        match capability {
            Capability::Search => self.searches.iter().any(|route| route.kind == kind),
            Capability::Scan => self
                .scanner
                .as_ref()
                .is_some_and(|scanner| scanner.supported_types().contains(&kind)),
        }
    }

    /// Returns the kinds accepted for `capability`, in declaration order.
    #[must_use]
    pub fn supported_types(&self, capability: Capability) -> Vec<IndicatorType> {
        match capability {
            Capability::Search => self.searches.iter().map(|route| route.kind).collect(),
            Capability::Scan => self
                .scanner
                .as_ref()
                .map_or_else(Vec::new, |scanner| scanner.supported_types()),
        }
    }

    /// Returns `true` when scanning needs an API key.
    #[must_use]
    pub fn requires_api_key(&self) -> bool {
        self.scanner
            .as_ref()
            .is_some_and(|scanner| scanner.requires_api_key())
    }

    /// Builds the search URL for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Unsupported`] when the analyzer has no
    /// search template for `kind`, or [`AnalyzerError::InvalidUrl`] when the
    /// substituted template does not parse.
    pub fn search_url(&self, kind: IndicatorType, query: &str) -> Result<Url, AnalyzerError> {
        let route = self
            .searches
            .iter()
            .find(|route| route.kind == kind)
            .ok_or_else(|| self.unsupported(Capability::Search, kind))?;
        let template = route
            .template
            .as_ref()
            .map_err(|source| AnalyzerError::invalid_template(&self.name, kind, source.clone()))?;
        template.render(query).map_err(|error| AnalyzerError::InvalidUrl {
            name: self.name.clone(),
            message: error.to_string(),
        })
    }

    /// Submits `request` through the attached scanner.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnsupportedType`] when the analyzer cannot scan
    /// the request's kind, or whatever the scanner reports.
    pub async fn scan(&self, request: &ScanRequest) -> Result<Url, ScanError> {
        match &self.scanner {
            Some(scanner) if scanner.supported_types().contains(&request.kind()) => {
                scanner.scan(request).await
            }
            _ => Err(ScanError::UnsupportedType {
                scanner: self.name.clone(),
                kind: request.kind(),
            }),
        }
    }

    fn unsupported(&self, capability: Capability, kind: IndicatorType) -> AnalyzerError {
        AnalyzerError::Unsupported {
            name: self.name.clone(),
            capability,
            kind,
        }
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("name", &self.name)
            .field("search", &self.supported_types(Capability::Search))
            .field("scan", &self.supported_types(Capability::Scan))
            .finish()
    }
}
