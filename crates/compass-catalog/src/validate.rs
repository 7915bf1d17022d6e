//! Structural checks applied to every catalog at load time.

use std::collections::HashSet;

use compass_core::resource::CommunityResource;

use crate::{Error, Result};

/// Reject a catalog with duplicate ids, weekdays outside `0..=6`, or
/// intervals that open after they close.
///
/// Zero-width intervals (`open == close`) are allowed; the schedule evaluator
/// treats them as never open.
pub fn validate(resources: &[CommunityResource]) -> Result<()> {
  let mut seen = HashSet::with_capacity(resources.len());
  for resource in resources {
    if !seen.insert(resource.id) {
      return Err(Error::DuplicateId(resource.id));
    }
    for interval in &resource.hours {
      if interval.day_of_week > 6 {
        return Err(Error::DayOutOfRange {
          id:  resource.id,
          day: interval.day_of_week,
        });
      }
      if interval.open > interval.close {
        return Err(Error::InvertedInterval {
          id:     resource.id,
          window: interval.display(),
        });
      }
    }
  }
  Ok(())
}
