//! Selection classification requests.

use serde::{Deserialize, Serialize};

use crate::errors::DispatchError;

/// A request to build the menu for a selection.
///
/// Requests arrive as a single JSON object, for example
/// `{"selection":"example[.]com"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    selection: String,
}

impl SelectionRequest {
    /// Creates a request for `selection`.
    #[must_use]
    pub fn new(selection: impl Into<String>) -> Self {
        Self {
            selection: selection.into(),
        }
    }

    /// Parses one JSON request line.
    ///
    /// Trailing whitespace, including the newline delimiter, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedRequest`] if the line is empty or is
    /// not a JSON object with a string `selection` field.
    pub fn parse(line: &[u8]) -> Result<Self, DispatchError> {
        let trimmed = line.trim_ascii_end();
        if trimmed.is_empty() {
            return Err(DispatchError::malformed("empty request line"));
        }
        serde_json::from_slice(trimmed).map_err(DispatchError::from_json_error)
    }

    /// Returns the selected text.
    #[must_use]
    pub const fn selection(&self) -> &str {
        self.selection.as_str()
    }
}
