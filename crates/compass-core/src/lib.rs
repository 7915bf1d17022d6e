//! Core types and the discovery engine for the Compass resource finder.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies. Every
//! function in the query pipeline is pure: the caller supplies the catalog,
//! the reference instant and the user's location, and gets back a fresh,
//! deterministic result.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod geo;
pub mod locale;
pub mod query;
pub mod rank;
pub mod resource;
pub mod schedule;
pub mod view;

pub use error::{Error, Result};
pub use query::query;
