//! Analyzer registry for capability lookup.
//!
//! The [`AnalyzerRegistry`] stores validated analyzers in registration
//! order and answers the two questions the menu builder and dispatcher ask:
//! which analyzers accept these indicators, and which analyzer a decoded
//! command names. Duplicate names are rejected.

use quarry_core::{Indicator, IndicatorType};
use tracing::debug;

use crate::analyzer::Analyzer;
use crate::capability::Capability;
use crate::error::AnalyzerError;

/// An analyzer paired with one indicator it accepts.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerEntry<'a> {
    analyzer: &'a Analyzer,
    indicator: &'a Indicator,
}

impl<'a> AnalyzerEntry<'a> {
    /// Returns the matched analyzer.
    #[must_use]
    pub const fn analyzer(&self) -> &'a Analyzer {
        self.analyzer
    }

    /// Returns the indicator the analyzer accepts.
    #[must_use]
    pub const fn indicator(&self) -> &'a Indicator {
        self.indicator
    }
}

/// Ordered table of available analyzers.
///
/// Registration order is significant: it is the order in which menus list
/// analyzers and in which "search all" opens their pages.
///
/// # Example
///
/// ```
/// use quarry_analyzers::{Analyzer, AnalyzerRegistry, Capability};
/// use quarry_core::{IndicatorType, classify};
///
/// let mut registry = AnalyzerRegistry::new();
/// registry
///     .register(
///         Analyzer::new("crt.sh")
///             .with_search(&[IndicatorType::Domain], "https://crt.sh/?q={query}"),
///     )
///     .expect("registration succeeds");
///
/// let indicators = classify("example.com");
/// let entries = registry.entries_for(&indicators, Capability::Search);
/// let names: Vec<&str> = entries.iter().map(|entry| entry.analyzer().name()).collect();
/// assert_eq!(names, ["crt.sh"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalyzerRegistry {
    analyzers: Vec<Analyzer>,
}

impl AnalyzerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an analyzer after validation.
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`Analyzer::validate`], or
    /// [`AnalyzerError::Duplicate`] if an analyzer with the same name is
    /// already registered.
    pub fn register(&mut self, analyzer: Analyzer) -> Result<(), AnalyzerError> {
        analyzer.validate()?;
        if self.get(analyzer.name()).is_some() {
            return Err(AnalyzerError::Duplicate {
                name: analyzer.name().to_owned(),
            });
        }
        debug!(
            target: "quarry::registry",
            analyzer = analyzer.name(),
            search = ?analyzer.supported_types(Capability::Search),
            scan = ?analyzer.supported_types(Capability::Scan),
            "registered analyzer"
        );
        self.analyzers.push(analyzer);
        Ok(())
    }

    /// Looks up an analyzer by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Analyzer> {
        self.analyzers.iter().find(|analyzer| analyzer.name() == name)
    }

    /// Returns the named analyzer if it offers `capability` for `kind`.
    #[must_use]
    pub fn resolve(
        &self,
        name: &str,
        capability: Capability,
        kind: IndicatorType,
    ) -> Option<&Analyzer> {
        self.get(name)
            .filter(|analyzer| analyzer.supports(capability, kind))
    }

    /// Pairs every indicator with every analyzer offering `capability` for
    /// its kind.
    ///
    /// Entries are ordered by indicator first, then by registration order.
    /// Indicators no analyzer accepts contribute nothing.
    #[must_use]
    pub fn entries_for<'a>(
        &'a self,
        indicators: &'a [Indicator],
        capability: Capability,
    ) -> Vec<AnalyzerEntry<'a>> {
        indicators
            .iter()
            .flat_map(|indicator| {
                self.analyzers
                    .iter()
                    .filter(move |analyzer| analyzer.supports(capability, indicator.kind()))
                    .map(move |analyzer| AnalyzerEntry {
                        analyzer,
                        indicator,
                    })
            })
            .collect()
    }

    /// Iterates over analyzers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Analyzer> {
        self.analyzers.iter()
    }

    /// Returns the number of registered analyzers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.analyzers.len()
    }

    /// Returns `true` when no analyzers are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

impl<'a> IntoIterator for &'a AnalyzerRegistry {
    type Item = &'a Analyzer;
    type IntoIter = std::slice::Iter<'a, Analyzer>;

    fn into_iter(self) -> Self::IntoIter {
        self.analyzers.iter()
    }
}
