//! Menu building and command dispatch for Quarry.
//!
//! [`MenuBuilder`] turns a selection into ordered [`MenuItem`]s whose
//! identifiers are encoded commands. When the user picks one,
//! [`Dispatcher::open`] decodes it and resolves it to the URL(s) to open,
//! consulting the caller's [`SearcherStates`](quarry_analyzers::SearcherStates)
//! and [`ApiKeys`](quarry_analyzers::ApiKeys) snapshot.

mod dispatcher;
mod errors;
pub mod menu;

pub use self::dispatcher::Dispatcher;
pub use self::errors::DispatchError;
pub use self::menu::{MenuBuilder, MenuItem, SelectionRequest};

#[cfg(test)]
mod tests;
