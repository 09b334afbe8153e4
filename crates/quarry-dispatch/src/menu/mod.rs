//! Menu construction for a text selection.
//!
//! A menu lists, in order: one search item per enabled searcher entry, a
//! single "search all" item, and one scan item per scanner entry. Each item
//! identifier is an encoded [`Command`] that [`crate::Dispatcher::open`]
//! accepts.

mod request;

use quarry_analyzers::{AnalyzerEntry, AnalyzerRegistry, Capability, SearcherStates};
use quarry_core::{ALL_TARGET, Action, Command, Indicator, IndicatorType, classify};
use serde::Serialize;
use tracing::debug;

pub use self::request::SelectionRequest;

/// One selectable menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    id: String,
    title: String,
}

impl MenuItem {
    fn new(command: &Command, title: String) -> Self {
        Self {
            id: command.encode(),
            title,
        }
    }

    /// Returns the encoded command identifier.
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn title(&self) -> &str {
        self.title.as_str()
    }
}

/// Builds menus from a registry.
#[derive(Debug, Clone, Copy)]
pub struct MenuBuilder<'a> {
    registry: &'a AnalyzerRegistry,
}

impl<'a> MenuBuilder<'a> {
    /// Creates a builder over `registry`.
    #[must_use]
    pub const fn new(registry: &'a AnalyzerRegistry) -> Self {
        Self { registry }
    }

    /// Builds the menu for a selection request.
    #[must_use]
    pub fn build(&self, request: &SelectionRequest, states: &SearcherStates) -> Vec<MenuItem> {
        self.build_for(request.selection(), states)
    }

    /// Builds the menu for raw selected text.
    ///
    /// Disabled searchers are left out of both the per-analyzer items and
    /// the choice of "search all" indicator. Scanners are never disabled.
    #[must_use]
    pub fn build_for(&self, selection: &str, states: &SearcherStates) -> Vec<MenuItem> {
        let indicators = classify(selection);

        let searchers: Vec<AnalyzerEntry<'_>> = self
            .registry
            .entries_for(&indicators, Capability::Search)
            .into_iter()
            .filter(|entry| states.is_enabled(entry.analyzer().name()))
            .collect();

        let mut items: Vec<MenuItem> = searchers
            .iter()
            .map(|entry| item(Action::Search, entry.indicator(), entry.analyzer().name()))
            .collect();

        if let Some(indicator) = searchers
            .iter()
            .map(AnalyzerEntry::indicator)
            .find(|indicator| indicator.kind() != IndicatorType::Text)
        {
            items.push(item(Action::Search, indicator, ALL_TARGET));
        }

        items.extend(
            self.registry
                .entries_for(&indicators, Capability::Scan)
                .iter()
                .map(|entry| item(Action::Scan, entry.indicator(), entry.analyzer().name())),
        );

        debug!(
            target: "quarry::menu",
            indicators = indicators.len(),
            items = items.len(),
            "built menu"
        );
        items
    }
}

fn item(action: Action, indicator: &Indicator, target: &str) -> MenuItem {
    let command = Command::from_indicator(action, indicator, target);
    let title = format!("{action} this {} on {target}", indicator.kind());
    MenuItem::new(&command, title)
}
