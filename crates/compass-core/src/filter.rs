//! The predicate filter pipeline.
//!
//! Each [`Predicate`] is an independent, total test over one resource. The
//! pipeline keeps a resource only when every *active* predicate admits it,
//! and preserves catalog order.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::{
  geo::Coordinates,
  locale::{PRIMARY_LANGUAGE, resolve},
  resource::{Category, CommunityResource},
  schedule,
};

// ─── FilterState ─────────────────────────────────────────────────────────────

/// Everything one query needs besides the catalog. Built per interaction and
/// never mutated once handed to [`crate::query()`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
  /// Empty means every category.
  pub categories:            BTreeSet<Category>,
  pub free_only:             bool,
  pub immigration_safe_only: bool,
  pub open_now_only:         bool,
  pub bilingual_staff_only:  bool,
  /// Free-text search; ignored when blank after trimming.
  pub query:                 String,
  /// "Now", in the frame the catalog's hours were authored in.
  pub reference_instant:     NaiveDateTime,
  pub user_location:         Option<Coordinates>,
  /// Requested display language code.
  pub language:              String,
}

impl FilterState {
  /// A state with every toggle off, no search text, no location, and the
  /// primary language.
  pub fn new(reference_instant: NaiveDateTime) -> Self {
    Self {
      categories: BTreeSet::new(),
      free_only: false,
      immigration_safe_only: false,
      open_now_only: false,
      bilingual_staff_only: false,
      query: String::new(),
      reference_instant,
      user_location: None,
      language: PRIMARY_LANGUAGE.to_owned(),
    }
  }

  /// The trimmed search text, or `None` if there is nothing to search for.
  pub fn search_text(&self) -> Option<&str> {
    let trimmed = self.query.trim();
    (!trimmed.is_empty()).then_some(trimmed)
  }
}

// ─── Predicates ──────────────────────────────────────────────────────────────

/// A named inclusion test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
  Category,
  Cost,
  ImmigrationSafe,
  OpenNow,
  BilingualStaff,
  Text,
}

impl Predicate {
  pub const ALL: [Predicate; 6] = [
    Self::Category,
    Self::Cost,
    Self::ImmigrationSafe,
    Self::OpenNow,
    Self::BilingualStaff,
    Self::Text,
  ];

  /// Whether `state` switches this predicate on.
  pub fn is_active(self, state: &FilterState) -> bool {
    match self {
      Self::Category => !state.categories.is_empty(),
      Self::Cost => state.free_only,
      Self::ImmigrationSafe => state.immigration_safe_only,
      Self::OpenNow => state.open_now_only,
      Self::BilingualStaff => state.bilingual_staff_only,
      Self::Text => state.search_text().is_some(),
    }
  }

  /// Whether `resource` passes this test. Does not consult
  /// [`Predicate::is_active`]; an inactive predicate is simply not asked.
  pub fn admits(self, resource: &CommunityResource, state: &FilterState) -> bool {
    match self {
      Self::Category => {
        state.categories.is_empty() || state.categories.contains(&resource.category)
      }
      Self::Cost => resource.cost.is_affordable(),
      Self::ImmigrationSafe => resource.immigration_safe,
      Self::OpenNow => schedule::is_open_at(&resource.hours, state.reference_instant),
      Self::BilingualStaff => resource.accessibility.bilingual_staff,
      Self::Text => match state.search_text() {
        Some(text) => matches_text(resource, text, &state.language),
        None => true,
      },
    }
  }
}

/// Case-insensitive substring match against what the user actually sees: the
/// resolved name, the city and the neighborhood.
fn matches_text(resource: &CommunityResource, text: &str, language: &str) -> bool {
  let needle = text.to_lowercase();
  let name = resolve(&resource.name, language);
  let address = &resource.address;

  std::iter::once(name)
    .chain(std::iter::once(address.city.as_str()))
    .chain(address.neighborhood.as_deref())
    .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Keep the resources every active predicate admits, in catalog order.
pub fn filter<'a>(
  catalog: &'a [CommunityResource],
  state: &FilterState,
) -> Vec<&'a CommunityResource> {
  let active: Vec<Predicate> = Predicate::ALL
    .into_iter()
    .filter(|p| p.is_active(state))
    .collect();

  catalog
    .iter()
    .filter(|resource| active.iter().all(|p| p.admits(resource, state)))
    .collect()
}
