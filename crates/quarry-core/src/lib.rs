//! Indicator model, text classification, and menu identifier codec for
//! Quarry.
//!
//! Quarry turns a free-form text selection into a menu of lookups against
//! external analysis services. This crate owns the parts of that pipeline
//! that need no knowledge of the services themselves:
//!
//! - [`IndicatorType`] and [`Indicator`]: the closed vocabulary of
//!   indicator kinds and a normalised query of one kind.
//! - [`classify`]: infers every indicator kind a selection satisfies, in a
//!   fixed priority order.
//! - [`Command`]: the dispatch intent behind a menu item, serialised to and
//!   from the single-string identifier the host menu carries.
//!
//! # Example
//!
//! ```
//! use quarry_core::{Action, Command, IndicatorType, classify};
//!
//! let indicators = classify("8.8.8.8");
//! assert_eq!(indicators.len(), 1);
//! let ip = indicators.first().expect("one indicator");
//! assert_eq!(ip.kind(), IndicatorType::Ipv4);
//!
//! let command = Command::from_indicator(Action::Search, ip, "all");
//! let identifier = command.encode();
//! assert_eq!(identifier, "Search 8.8.8.8 as a ipv4 on all");
//! assert_eq!(Command::decode(&identifier).expect("decodes"), command);
//! ```

pub mod command;
pub mod detector;
pub mod error;
mod indicator;

pub use self::command::{ALL_TARGET, Action, Command};
pub use self::detector::{classify, refang};
pub use self::error::DecodeError;
pub use self::indicator::{HashAlgorithm, Indicator, IndicatorType};

#[cfg(test)]
mod tests;
