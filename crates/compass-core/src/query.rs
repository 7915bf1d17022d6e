//! The single entry point: filter, then rank.

use tracing::debug;

use crate::{
  filter::{FilterState, filter},
  rank::{RankedResource, compose},
  resource::CommunityResource,
};

/// Run one discovery query over `catalog`.
///
/// Filtering always happens before distance is computed, so no distance is
/// ever calculated for a resource that is about to be discarded. Holds no
/// state between calls.
pub fn query<'a>(
  catalog: &'a [CommunityResource],
  state: &FilterState,
) -> Vec<RankedResource<'a>> {
  let filtered = filter(catalog, state);
  debug!(
    catalog = catalog.len(),
    matched = filtered.len(),
    located = state.user_location.is_some(),
    "filtered catalog"
  );
  compose(&filtered, state.user_location, state.reference_instant)
}
