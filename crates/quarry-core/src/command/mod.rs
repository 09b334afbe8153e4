//! Dispatch intents and their single-string menu identifiers.
//!
//! A host menu can carry only an opaque string per item, so every item
//! encodes the full intent behind it:
//!
//! ```text
//! <Action> <query> as a <type> on <target>
//! ```
//!
//! `<Action>` is `Search` or `Scan`, `<type>` is a canonical
//! [`IndicatorType`] label, and `<query>` and `<target>` are free-form and
//! may contain spaces. `<target>` is an analyzer name or the reserved
//! [`ALL_TARGET`].
//!
//! Decoding anchors on the *last* `" as a <type> on "` sequence whose type
//! label is known, so queries may contain the delimiter freely. A target
//! that itself contains such a sequence cannot be told apart from the
//! delimiter and will not round-trip. Analyzer names never do.


use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::indicator::{Indicator, IndicatorType};

/// Reserved target meaning "every enabled analyzer".
pub const ALL_TARGET: &str = "all";

const TYPE_DELIMITER: &str = " as a ";
const TARGET_DELIMITER: &str = " on ";

/// What a command asks the target analyzer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Open the analyzer's search page for the query.
    Search,
    /// Submit the query to the analyzer for a fresh scan.
    Scan,
}

impl Action {
    /// Returns the capitalised token used in menu identifiers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Scan => "Scan",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "Search" => Some(Self::Search),
            "Scan" => Some(Self::Scan),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dispatch intent reconstructed from a menu identifier.
///
/// # Example
///
/// ```
/// use quarry_core::{Action, Command, IndicatorType};
///
/// let command = Command::new(Action::Search, "1.2.3.4", IndicatorType::Ipv4, "all");
/// assert_eq!(command.encode(), "Search 1.2.3.4 as a ipv4 on all");
///
/// let decoded: Command = "Search 1.2.3.4 as a ipv4 on all".parse().expect("decodes");
/// assert_eq!(decoded, command);
/// assert!(decoded.targets_all());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    action: Action,
    query: String,
    kind: IndicatorType,
    target: String,
}

impl Command {
    /// Creates a command from its parts.
    #[must_use]
    pub fn new(
        action: Action,
        query: impl Into<String>,
        kind: IndicatorType,
        target: impl Into<String>,
    ) -> Self {
        Self {
            action,
            query: query.into(),
            kind,
            target: target.into(),
        }
    }

    /// Creates a command acting on `indicator` with the named target.
    #[must_use]
    pub fn from_indicator(
        action: Action,
        indicator: &Indicator,
        target: impl Into<String>,
    ) -> Self {
        Self::new(action, indicator.query(), indicator.kind(), target)
    }

    /// Returns the requested action.
    #[must_use]
    pub const fn action(&self) -> Action {
        self.action
    }

    /// Returns the query text.
    #[must_use]
    pub const fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Returns the indicator kind the query was classified as.
    #[must_use]
    pub const fn kind(&self) -> IndicatorType {
        self.kind
    }

    /// Returns the analyzer name or [`ALL_TARGET`].
    #[must_use]
    pub const fn target(&self) -> &str {
        self.target.as_str()
    }

    /// Returns `true` when the command addresses every enabled analyzer.
    #[must_use]
    pub fn targets_all(&self) -> bool {
        self.target == ALL_TARGET
    }

    /// Returns the indicator this command acts on.
    #[must_use]
    pub fn indicator(&self) -> Indicator {
        Indicator::new(self.kind, self.query.as_str())
    }

    /// Serialises the command into its menu identifier.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{action} {query}{TYPE_DELIMITER}{kind}{TARGET_DELIMITER}{target}",
            action = self.action,
            query = self.query,
            kind = self.kind,
            target = self.target,
        )
    }

    /// Reconstructs a command from a menu identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the action token is unknown, the
    /// `" as a "` delimiter is missing, no occurrence of it is followed by a
    /// known type label and `" on "`, or the query or target is empty.
    pub fn decode(identifier: &str) -> Result<Self, DecodeError> {
        let (token, body) = identifier.split_once(' ').unwrap_or((identifier, ""));
        let action = Action::from_token(token).ok_or_else(|| DecodeError::unknown_action(token))?;
        if body.is_empty() {
            return Err(DecodeError::missing_delimiter(identifier));
        }

        let (query, kind, target) = split_body(identifier, body)?;
        if query.is_empty() {
            return Err(DecodeError::EmptyQuery);
        }
        if target.is_empty() {
            return Err(DecodeError::EmptyTarget);
        }
        Ok(Self::new(action, query, kind, target))
    }
}

/// Splits `<query> as a <type> on <target>` at the last delimiter whose type
/// label is recognised.
fn split_body<'a>(
    identifier: &str,
    body: &'a str,
) -> Result<(&'a str, IndicatorType, &'a str), DecodeError> {
    let mut last_label: Option<&str> = None;
    for (index, _) in body.rmatch_indices(TYPE_DELIMITER) {
        let (query, remainder) = body.split_at(index);
        let Some(after) = remainder.strip_prefix(TYPE_DELIMITER) else {
            continue;
        };
        if let Some((kind, target)) = match_type_and_target(after) {
            return Ok((query, kind, target));
        }
        last_label.get_or_insert_with(|| after.split(' ').next().unwrap_or(after));
    }

    Err(last_label.map_or_else(
        || DecodeError::missing_delimiter(identifier),
        DecodeError::unknown_type,
    ))
}

fn match_type_and_target(after: &str) -> Option<(IndicatorType, &str)> {
    IndicatorType::ALL.into_iter().find_map(|kind| {
        after
            .strip_prefix(kind.as_str())
            .and_then(|rest| rest.strip_prefix(TARGET_DELIMITER))
            .map(|target| (kind, target))
    })
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Command {
    type Err = DecodeError;

    fn from_str(identifier: &str) -> Result<Self, Self::Err> {
        Self::decode(identifier)
    }
}
