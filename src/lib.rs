//! locale-sync
//!
//! Runtime translation lookup with a fallback locale, and a validator that
//! checks every locale file exposes the same keys as a master locale.

pub mod cli;
pub mod config;
pub mod global;
pub mod loader;
pub mod resolver;
pub mod tree;
pub mod validator;

/// Helpers for unit tests
mod test_utils;

pub use resolver::{
    Params,
    Translator,
};
