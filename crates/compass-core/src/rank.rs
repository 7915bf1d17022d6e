//! Result composition: attach distance and open/closed to each surviving
//! resource, then order by distance when the user's location is known.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::{geo, geo::Coordinates, resource::CommunityResource, schedule};

/// A resource plus the facts derived for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedResource<'a> {
  pub resource:       &'a CommunityResource,
  /// Miles from the user, or `f64::INFINITY` if either end is unknown.
  pub distance_miles: f64,
  /// Evaluated once at the query's reference instant.
  pub open:           bool,
}

impl RankedResource<'_> {
  /// `None` when the distance is the unknown-distance sentinel.
  pub fn known_distance(&self) -> Option<f64> {
    self.distance_miles.is_finite().then_some(self.distance_miles)
  }
}

fn distance_to(resource: &CommunityResource, user: Option<Coordinates>) -> f64 {
  let (Some(user), Some(here)) = (user, resource.coordinates) else {
    return f64::INFINITY;
  };
  match geo::distance(user, here) {
    Ok(miles) => miles,
    Err(e) => {
      warn!(resource_id = %resource.id, error = %e, "excluding resource from distance sort");
      f64::INFINITY
    }
  }
}

/// Pair each resource with its distance and open flag.
///
/// With a user location the output is stably sorted nearest-first, so equal
/// distances (including two unknowns) keep catalog order. Without one, catalog
/// order is returned untouched.
pub fn compose<'a>(
  filtered: &[&'a CommunityResource],
  user_location: Option<Coordinates>,
  reference: NaiveDateTime,
) -> Vec<RankedResource<'a>> {
  let mut ranked: Vec<RankedResource<'a>> = filtered
    .iter()
    .map(|&resource| RankedResource {
      resource,
      distance_miles: distance_to(resource, user_location),
      open: schedule::is_open_at(&resource.hours, reference),
    })
    .collect();

  if user_location.is_some() {
    // `sort_by` is stable.
    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
  }
  ranked
}
