//! Great-circle distance between two points.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Mean Earth radius on the spherical approximation, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinates {
  pub fn new(latitude: f64, longitude: f64) -> Self { Self { latitude, longitude } }

  fn check(self) -> Result<Self> {
    if self.latitude.is_finite() && self.longitude.is_finite() {
      Ok(self)
    } else {
      Err(Error::InvalidCoordinate {
        latitude:  self.latitude,
        longitude: self.longitude,
      })
    }
  }
}

/// Haversine distance in miles between `a` and `b`.
///
/// Spherical Earth; good enough at city scale, not geodesic-exact. Both points
/// are required: callers with an unknown endpoint use `f64::INFINITY` instead
/// of calling this.
pub fn distance(a: Coordinates, b: Coordinates) -> Result<f64> {
  let a = a.check()?;
  let b = b.check()?;

  let dlat = (b.latitude - a.latitude).to_radians();
  let dlng = (b.longitude - a.longitude).to_radians();

  let h = (dlat / 2.0).sin().powi(2)
    + a.latitude.to_radians().cos()
      * b.latitude.to_radians().cos()
      * (dlng / 2.0).sin().powi(2);

  let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

  Ok(EARTH_RADIUS_MILES * c)
}
