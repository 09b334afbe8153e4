//! Resolution of decoded commands into lookup URLs.
//!
//! The [`Dispatcher`] borrows an immutable [`AnalyzerRegistry`] and turns a
//! [`Command`] into one or more URLs. Settings snapshots are passed per
//! call, so a single dispatcher can serve concurrent requests without
//! locking.
//!
//! | Action | Target          | Operation                   |
//! |--------|-----------------|-----------------------------|
//! | Search | `all`           | [`Dispatcher::search_all`]  |
//! | Search | analyzer name   | [`Dispatcher::search`]      |
//! | Scan   | analyzer name   | [`Dispatcher::scan`]        |

use quarry_analyzers::{AnalyzerRegistry, ApiKeys, Capability, ScanRequest, SearcherStates};
use quarry_core::{Action, Command};
use tracing::{debug, warn};
use url::Url;

use crate::errors::DispatchError;

/// Turns commands into URLs using a registry.
///
/// # Example
///
/// ```
/// use quarry_analyzers::{Analyzer, AnalyzerRegistry, SearcherStates};
/// use quarry_core::{Command, IndicatorType};
/// use quarry_dispatch::Dispatcher;
///
/// let mut registry = AnalyzerRegistry::new();
/// for (name, template) in [
///     ("Shodan", "https://www.shodan.io/host/{raw}"),
///     ("GreyNoise", "https://viz.greynoise.io/ip/{raw}"),
/// ] {
///     registry
///         .register(Analyzer::new(name).with_search(&[IndicatorType::Ipv4], template))
///         .expect("valid analyzer");
/// }
/// let dispatcher = Dispatcher::new(&registry);
///
/// let command: Command = "Search 8.8.8.8 as a ipv4 on Shodan".parse().expect("decodes");
/// let url = dispatcher.search(&command).expect("resolves");
/// assert_eq!(url.as_str(), "https://www.shodan.io/host/8.8.8.8");
///
/// let mut states = SearcherStates::new();
/// states.set("Shodan", false);
/// let all: Command = "Search 8.8.8.8 as a ipv4 on all".parse().expect("decodes");
/// let urls = dispatcher.search_all(&all, &states).expect("resolves");
/// assert_eq!(urls.len(), 1);
/// assert_eq!(urls.first().map(url::Url::as_str), Some("https://viz.greynoise.io/ip/8.8.8.8"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    registry: &'a AnalyzerRegistry,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over `registry`.
    #[must_use]
    pub const fn new(registry: &'a AnalyzerRegistry) -> Self {
        Self { registry }
    }

    /// Builds the search URL of the analyzer named by the command target.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnresolvedAnalyzer`] when no analyzer with
    /// that name offers search for the command's indicator kind.
    pub fn search(&self, command: &Command) -> Result<Url, DispatchError> {
        let analyzer = self
            .registry
            .resolve(command.target(), Capability::Search, command.kind())
            .ok_or_else(|| {
                DispatchError::unresolved(command.target(), Capability::Search, command.kind())
            })?;
        let url = analyzer.search_url(command.kind(), command.query())?;
        debug!(
            target: "quarry::dispatch",
            analyzer = analyzer.name(),
            kind = %command.kind(),
            "built search URL"
        );
        Ok(url)
    }

    /// Builds the search URL of every enabled analyzer that accepts the
    /// command's indicator, in registry order.
    ///
    /// Analyzers are skipped only when `states` explicitly disables them.
    /// The command target is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Analyzer`] if an analyzer fails to build its
    /// URL.
    pub fn search_all(
        &self,
        command: &Command,
        states: &SearcherStates,
    ) -> Result<Vec<Url>, DispatchError> {
        let indicators = [command.indicator()];
        let urls = self
            .registry
            .entries_for(&indicators, Capability::Search)
            .into_iter()
            .filter(|entry| states.is_enabled(entry.analyzer().name()))
            .map(|entry| {
                entry
                    .analyzer()
                    .search_url(command.kind(), command.query())
                    .map_err(DispatchError::from)
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            target: "quarry::dispatch",
            kind = %command.kind(),
            count = urls.len(),
            "built search URLs"
        );
        Ok(urls)
    }

    /// Submits the command's indicator to the named analyzer's scanner.
    ///
    /// The key check happens before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnresolvedAnalyzer`] when no analyzer with
    /// that name can scan the kind, [`DispatchError::MissingApiKey`] when the
    /// analyzer needs a key `keys` lacks, and
    /// [`DispatchError::RemoteFailure`] when the scan itself fails.
    pub async fn scan(&self, command: &Command, keys: &ApiKeys) -> Result<Url, DispatchError> {
        let analyzer = self
            .registry
            .resolve(command.target(), Capability::Scan, command.kind())
            .ok_or_else(|| {
                DispatchError::unresolved(command.target(), Capability::Scan, command.kind())
            })?;

        let key = keys.get(analyzer.name()).cloned();
        if analyzer.requires_api_key() && key.is_none() {
            return Err(DispatchError::MissingApiKey {
                name: analyzer.name().to_owned(),
            });
        }

        let request = ScanRequest::new(command.kind(), command.query(), key);
        match analyzer.scan(&request).await {
            Ok(url) => {
                debug!(
                    target: "quarry::dispatch",
                    analyzer = analyzer.name(),
                    kind = %command.kind(),
                    "scan submitted"
                );
                Ok(url)
            }
            Err(source) => {
                warn!(
                    target: "quarry::dispatch",
                    analyzer = analyzer.name(),
                    error = %source,
                    "scan failed"
                );
                Err(DispatchError::RemoteFailure {
                    name: analyzer.name().to_owned(),
                    source,
                })
            }
        }
    }

    /// Routes a command to the operation its action and target select.
    ///
    /// # Errors
    ///
    /// Returns whatever the selected operation returns.
    pub async fn execute(
        &self,
        command: &Command,
        states: &SearcherStates,
        keys: &ApiKeys,
    ) -> Result<Vec<Url>, DispatchError> {
        match command.action() {
            Action::Search if command.targets_all() => self.search_all(command, states),
            Action::Search => self.search(command).map(|url| vec![url]),
            Action::Scan => self.scan(command, keys).await.map(|url| vec![url]),
        }
    }

    /// Decodes a menu identifier and executes it.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Decode`] for a malformed identifier, or
    /// whatever [`Dispatcher::execute`] returns.
    pub async fn open(
        &self,
        identifier: &str,
        states: &SearcherStates,
        keys: &ApiKeys,
    ) -> Result<Vec<Url>, DispatchError> {
        let command = Command::decode(identifier)?;
        self.execute(&command, states, keys).await
    }
}
