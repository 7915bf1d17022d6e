//! Bilingual text records and their resolution to a single display string.
//!
//! A [`LocalizedText`] maps language codes to strings, in the order the
//! catalog authored them. Resolution never fails: an empty record cannot be
//! constructed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The catalog's primary authoring language; the first fallback after an
/// exact match.
pub const PRIMARY_LANGUAGE: &str = "en";

/// Returned when building a [`LocalizedText`] with no entries.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("localized text must contain at least one language")]
pub struct EmptyLocalizedText;

/// One field, many languages. Keys are language codes (`"en"`, `"es"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, String>", into = "IndexMap<String, String>")]
pub struct LocalizedText(IndexMap<String, String>);

impl LocalizedText {
  /// A record with a single entry.
  pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
    let mut map = IndexMap::with_capacity(2);
    map.insert(language.into(), text.into());
    Self(map)
  }

  /// Builder-style helper: add (or replace) the string for `language`.
  pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
    self.0.insert(language.into(), text.into());
    self
  }

  /// The string for exactly `language`, if present.
  pub fn get(&self, language: &str) -> Option<&str> {
    self
      .0
      .iter()
      .find(|(code, _)| code.eq_ignore_ascii_case(language))
      .map(|(_, text)| text.as_str())
  }

  /// Language codes in authoring order.
  pub fn languages(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  /// Resolve to a display string; see [`resolve`].
  pub fn resolve(&self, language: &str) -> &str { resolve(self, language) }
}

impl TryFrom<IndexMap<String, String>> for LocalizedText {
  type Error = EmptyLocalizedText;

  fn try_from(map: IndexMap<String, String>) -> Result<Self, Self::Error> {
    if map.is_empty() {
      return Err(EmptyLocalizedText);
    }
    Ok(Self(map))
  }
}

impl From<LocalizedText> for IndexMap<String, String> {
  fn from(text: LocalizedText) -> Self { text.0 }
}

/// Resolve `text` to one display string.
///
/// Order: exact match on `language`, then [`PRIMARY_LANGUAGE`], then the first
/// entry in authoring order.
pub fn resolve<'a>(text: &'a LocalizedText, language: &str) -> &'a str {
  text
    .get(language)
    .or_else(|| text.get(PRIMARY_LANGUAGE))
    .or_else(|| text.0.values().next().map(String::as_str))
    // The constructor and deserialiser both reject empty maps.
    .unwrap_or_default()
}
