//! Error type for `compass-catalog`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read catalog {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("duplicate resource id: {0}")]
  DuplicateId(uuid::Uuid),

  #[error("resource {id}: day_of_week {day} is out of range 0-6")]
  DayOutOfRange { id: uuid::Uuid, day: u8 },

  #[error("resource {id}: interval opens after it closes ({window})")]
  InvertedInterval { id: uuid::Uuid, window: String },

  /// `reload` was called on a catalog that was not opened from a file.
  #[error("catalog has no backing file")]
  NoBackingFile,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
