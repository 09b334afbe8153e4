//! What an analyzer can do with an indicator.

use std::fmt;

use quarry_core::Action;
use serde::{Deserialize, Serialize};

/// An operation an analyzer offers for some indicator kinds.
///
/// # Example
///
/// ```
/// use quarry_analyzers::Capability;
/// use quarry_core::Action;
///
/// assert_eq!(Capability::from(Action::Scan), Capability::Scan);
/// assert_eq!(Capability::Search.as_str(), "search");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Builds a lookup URL locally from a template.
    Search,
    /// Submits the indicator to the remote service, which returns a result
    /// URL.
    Scan,
}

impl Capability {
    /// Returns the lowercase capability name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Scan => "scan",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Action> for Capability {
    fn from(action: Action) -> Self {
        match action {
            Action::Search => Self::Search,
            Action::Scan => Self::Scan,
        }
    }
}
