//! JSON file backend for the Compass resource catalog.
//!
//! The catalog is authored elsewhere and only ever read here. Loading
//! validates the structural invariants the engine relies on, so malformed
//! records are rejected before they reach a query.

mod json;
mod validate;

pub mod error;

pub use error::{Error, Result};
pub use json::JsonCatalog;
pub use validate::validate;
