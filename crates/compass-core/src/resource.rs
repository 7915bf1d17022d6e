//! Community resource records, the read-only input to the engine.
//!
//! Resources are authored by an external catalog process. The engine never
//! mutates one; every derived fact (distance, open/closed) is computed per
//! query and carried alongside the resource in
//! [`RankedResource`](crate::rank::RankedResource).

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{geo::Coordinates, locale::LocalizedText, schedule::OperatingInterval};

// ─── Category ────────────────────────────────────────────────────────────────

/// The closed set of service categories.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Category {
  Clinic,
  FoodBank,
  Shelter,
  MentalHealth,
  Legal,
}

// ─── Sub-records ─────────────────────────────────────────────────────────────

/// A postal address. Used for display and text search, never for distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub street:       String,
  pub city:         String,
  /// State, province, or region.
  pub region:       String,
  pub postal_code:  String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub neighborhood: Option<String>,
}

impl Address {
  /// Single-line form, e.g. `"2400 Park Ave, Minneapolis, MN 55404"`.
  pub fn one_line(&self) -> String {
    format!(
      "{}, {}, {} {}",
      self.street, self.city, self.region, self.postal_code
    )
  }
}

/// Cost eligibility flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
  #[serde(default)]
  pub free:          bool,
  #[serde(default)]
  pub sliding_scale: bool,
  /// Free-text detail, e.g. "Free for children under 18".
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note:          Option<LocalizedText>,
}

impl Cost {
  /// Whether someone without means can use the service.
  pub fn is_affordable(&self) -> bool { self.free || self.sliding_scale }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessibility {
  /// Staff fluent in the secondary language are present.
  #[serde(default)]
  pub bilingual_staff:       bool,
  #[serde(default)]
  pub wheelchair_accessible: bool,
}

// ─── CommunityResource ───────────────────────────────────────────────────────

/// One discoverable service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityResource {
  pub id:               Uuid,
  pub category:         Category,
  pub name:             LocalizedText,
  pub description:      LocalizedText,
  pub address:          Address,
  /// Absent coordinates never exclude a resource; they only push it to the
  /// end of a distance-sorted list.
  #[serde(default)]
  pub coordinates:      Option<Coordinates>,
  #[serde(default)]
  pub phone:            Option<String>,
  /// Weekly open windows. A day with no interval is closed all day.
  #[serde(default)]
  pub hours:            Vec<OperatingInterval>,
  #[serde(default)]
  pub cost:             Cost,
  /// The resource does not condition service on immigration-status checks.
  #[serde(default)]
  pub immigration_safe: bool,
  #[serde(default)]
  pub accessibility:    Accessibility,
  /// Offerings in display order.
  #[serde(default)]
  pub services:         Vec<LocalizedText>,
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn category_parses_kebab_case() {
    assert_eq!(Category::from_str("food-bank").unwrap(), Category::FoodBank);
    assert_eq!(Category::from_str("Mental-Health").unwrap(), Category::MentalHealth);
    assert!(Category::from_str("pharmacy").is_err());
  }

  #[test]
  fn category_display_matches_serde() {
    for category in Category::iter() {
      let json = serde_json::to_string(&category).unwrap();
      assert_eq!(json, format!("\"{category}\""));
    }
  }

  #[test]
  fn minimal_resource_deserialises_with_defaults() {
    let json = r#"{
      "id": "6f1c2a9e-3b7d-4f0e-9c51-2d8e4b7a1f00",
      "category": "shelter",
      "name": { "en": "Harbor House" },
      "description": { "en": "Emergency overnight shelter" },
      "address": {
        "street": "12 Lake St",
        "city": "Minneapolis",
        "region": "MN",
        "postal_code": "55408"
      }
    }"#;
    let resource: CommunityResource = serde_json::from_str(json).unwrap();
    assert_eq!(resource.category, Category::Shelter);
    assert!(resource.coordinates.is_none());
    assert!(resource.hours.is_empty());
    assert!(!resource.cost.is_affordable());
    assert!(!resource.immigration_safe);
    assert_eq!(resource.address.one_line(), "12 Lake St, Minneapolis, MN 55408");
  }
}
