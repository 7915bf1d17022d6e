//! Error types for `compass-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
  /// Raised only by [`crate::geo::distance`].
  #[error("invalid coordinate: ({latitude}, {longitude})")]
  InvalidCoordinate { latitude: f64, longitude: f64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
