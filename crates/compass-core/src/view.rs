//! The display-ready read model for one ranked resource. Never stored, always
//! derived per query and language.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  geo::Coordinates,
  locale::resolve,
  rank::RankedResource,
  resource::{Accessibility, Address, Category},
  schedule::todays_window,
};

/// A [`RankedResource`] with every bilingual field resolved to one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceView {
  pub id:               Uuid,
  pub category:         Category,
  pub name:             String,
  pub description:      String,
  pub address:          Address,
  pub coordinates:      Option<Coordinates>,
  pub phone:            Option<String>,
  pub free:             bool,
  pub sliding_scale:    bool,
  pub cost_note:        Option<String>,
  pub immigration_safe: bool,
  pub accessibility:    Accessibility,
  /// Service tags in catalog order.
  pub services:         Vec<String>,
  /// Rounded to a tenth of a mile; `None` when unknown.
  pub distance_miles:   Option<f64>,
  pub open_now:         bool,
  /// First window for the reference day, e.g. `"09:00-17:00"`.
  pub todays_hours:     Option<String>,
}

impl ResourceView {
  /// Resolve `ranked` for display in `language`. `reference` picks the day
  /// for [`ResourceView::todays_hours`] and should be the query's instant.
  pub fn from_ranked(
    ranked: &RankedResource<'_>,
    language: &str,
    reference: NaiveDateTime,
  ) -> Self {
    let r = ranked.resource;
    Self {
      id:               r.id,
      category:         r.category,
      name:             resolve(&r.name, language).to_owned(),
      description:      resolve(&r.description, language).to_owned(),
      address:          r.address.clone(),
      coordinates:      r.coordinates,
      phone:            r.phone.clone(),
      free:             r.cost.free,
      sliding_scale:    r.cost.sliding_scale,
      cost_note:        r
        .cost
        .note
        .as_ref()
        .map(|note| resolve(note, language).to_owned()),
      immigration_safe: r.immigration_safe,
      accessibility:    r.accessibility.clone(),
      services:         r
        .services
        .iter()
        .map(|s| resolve(s, language).to_owned())
        .collect(),
      distance_miles:   ranked
        .known_distance()
        .map(|miles| (miles * 10.0).round() / 10.0),
      open_now:         ranked.open,
      todays_hours:     todays_window(&r.hours, reference).map(|w| w.display()),
    }
  }

  /// Keep only the first `max` service tags.
  pub fn truncate_services(mut self, max: usize) -> Self {
    self.services.truncate(max);
    self
  }
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, NaiveTime};

  use super::*;
  use crate::{
    locale::LocalizedText,
    resource::{CommunityResource, Cost},
    schedule::OperatingInterval,
  };

  fn pantry() -> CommunityResource {
    CommunityResource {
      id:               Uuid::nil(),
      category:         Category::FoodBank,
      name:             LocalizedText::new("en", "Northside Pantry")
        .with("es", "Despensa Northside"),
      description:      LocalizedText::new("en", "Groceries weekly"),
      address:          Address {
        street:       "800 W Broadway".into(),
        city:         "Minneapolis".into(),
        region:       "MN".into(),
        postal_code:  "55411".into(),
        neighborhood: Some("Hawthorne".into()),
      },
      coordinates:      Some(Coordinates::new(44.999, -93.29)),
      phone:            Some("612-555-0100".into()),
      hours:            vec![OperatingInterval::new(
        3,
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
      )],
      cost:             Cost {
        free:          true,
        sliding_scale: false,
        note:          Some(LocalizedText::new("en", "No ID needed").with("es", "No se necesita ID")),
      },
      immigration_safe: true,
      accessibility:    Accessibility::default(),
      services:         vec![
        LocalizedText::new("en", "Groceries").with("es", "Comestibles"),
        LocalizedText::new("en", "Diapers").with("es", "Pañales"),
        LocalizedText::new("en", "Baby formula"),
      ],
    }
  }

  // 2024-01-03 was a Wednesday.
  fn wednesday() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 3)
      .unwrap()
      .and_hms_opt(11, 0, 0)
      .unwrap()
  }

  #[test]
  fn resolves_every_text_field() {
    let resource = pantry();
    let ranked = RankedResource {
      resource:       &resource,
      distance_miles: 1.2345,
      open:           true,
    };
    let view = ResourceView::from_ranked(&ranked, "es", wednesday());
    assert_eq!(view.name, "Despensa Northside");
    assert_eq!(view.description, "Groceries weekly");
    assert_eq!(view.cost_note.as_deref(), Some("No se necesita ID"));
    assert_eq!(view.services, vec!["Comestibles", "Pañales", "Baby formula"]);
    assert_eq!(view.distance_miles, Some(1.2));
    assert_eq!(view.todays_hours.as_deref(), Some("10:00-14:00"));
  }

  #[test]
  fn unknown_distance_becomes_none() {
    let resource = pantry();
    let ranked = RankedResource {
      resource:       &resource,
      distance_miles: f64::INFINITY,
      open:           false,
    };
    let view = ResourceView::from_ranked(&ranked, "en", wednesday());
    assert_eq!(view.distance_miles, None);
    assert!(!view.open_now);
  }

  #[test]
  fn truncate_keeps_catalog_order() {
    let resource = pantry();
    let ranked = RankedResource {
      resource:       &resource,
      distance_miles: f64::INFINITY,
      open:           false,
    };
    let view = ResourceView::from_ranked(&ranked, "en", wednesday()).truncate_services(2);
    assert_eq!(view.services, vec!["Groceries", "Diapers"]);
  }
}
