//! Errors raised while decoding menu identifiers.

use thiserror::Error;

/// A menu identifier that does not follow the
/// `"<Action> <query> as a <type> on <target>"` grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The leading token is neither `Search` nor `Scan`.
    #[error("unknown action '{action}' in menu identifier")]
    UnknownAction {
        /// The token found where the action was expected.
        action: String,
    },

    /// No `" as a "` delimiter was found after the action.
    #[error("menu identifier '{identifier}' has no ' as a ' delimiter")]
    MissingDelimiter {
        /// The identifier that failed to decode.
        identifier: String,
    },

    /// Every `" as a "` occurrence is followed by an unrecognised type label
    /// or lacks the `" on "` delimiter.
    #[error("unknown indicator type '{label}' in menu identifier")]
    UnknownType {
        /// The token following the last `" as a "` delimiter.
        label: String,
    },

    /// The query between the action and the type is empty.
    #[error("menu identifier has an empty query")]
    EmptyQuery,

    /// Nothing follows the final `" on "` delimiter.
    #[error("menu identifier has an empty target")]
    EmptyTarget,
}

impl DecodeError {
    /// Creates an unknown action error.
    #[must_use]
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    /// Creates a missing delimiter error.
    #[must_use]
    pub fn missing_delimiter(identifier: impl Into<String>) -> Self {
        Self::MissingDelimiter {
            identifier: identifier.into(),
        }
    }

    /// Creates an unknown type error.
    #[must_use]
    pub fn unknown_type(label: impl Into<String>) -> Self {
        Self::UnknownType {
            label: label.into(),
        }
    }
}
