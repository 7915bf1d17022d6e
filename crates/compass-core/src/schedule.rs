//! Weekly operating hours and the "open now" evaluation.
//!
//! The reference instant is a naive local date-time. No timezone conversion
//! happens here: the caller supplies the instant in whatever frame the
//! catalog's hours were authored in.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One open window on one day of the week.
///
/// `open < close` is expected. A span across midnight is authored as two
/// intervals, one ending at `23:59` and one starting at `00:00` the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingInterval {
  /// 0 = Sunday through 6 = Saturday.
  pub day_of_week: u8,
  #[serde(with = "hhmm")]
  pub open:        NaiveTime,
  #[serde(with = "hhmm")]
  pub close:       NaiveTime,
}

impl OperatingInterval {
  pub fn new(day_of_week: u8, open: NaiveTime, close: NaiveTime) -> Self {
    Self { day_of_week, open, close }
  }

  /// Whether `minute` (minutes since midnight) falls inside this window,
  /// both endpoints included. Zero-width and inverted windows contain nothing.
  pub fn contains_minute(&self, minute: u32) -> bool {
    let open = minute_of_day(self.open);
    let close = minute_of_day(self.close);
    open < close && (open..=close).contains(&minute)
  }

  /// `"09:00-17:00"`.
  pub fn display(&self) -> String {
    format!("{}-{}", self.open.format("%H:%M"), self.close.format("%H:%M"))
  }
}

fn minute_of_day(time: NaiveTime) -> u32 { time.hour() * 60 + time.minute() }

fn day_of_week(reference: NaiveDateTime) -> u8 {
  reference.weekday().num_days_from_sunday() as u8
}

/// Intervals that apply on the reference instant's weekday, in catalog order.
fn on_day(
  hours: &[OperatingInterval],
  reference: NaiveDateTime,
) -> impl Iterator<Item = &OperatingInterval> {
  let day = day_of_week(reference);
  hours.iter().filter(move |interval| interval.day_of_week == day)
}

/// Whether any of `hours` covers `reference`.
pub fn is_open_at(hours: &[OperatingInterval], reference: NaiveDateTime) -> bool {
  let minute = minute_of_day(reference.time());
  on_day(hours, reference).any(|interval| interval.contains_minute(minute))
}

/// The first interval for the reference instant's weekday, for single-line
/// display.
pub fn todays_window(
  hours: &[OperatingInterval],
  reference: NaiveDateTime,
) -> Option<&OperatingInterval> {
  on_day(hours, reference).next()
}

/// Serde adapter for `HH:MM` time-of-day strings.
mod hhmm {
  use chrono::NaiveTime;
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  const FORMAT: &str = "%H:%M";

  pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&raw, FORMAT).map_err(D::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, NaiveDate};
  use proptest::prelude::*;

  use super::*;

  fn t(h: u32, m: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, m, 0).unwrap() }

  // 2024-01-01 was a Monday.
  fn monday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_time(t(h, m))
  }

  fn tuesday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_time(t(h, m))
  }

  fn nine_to_five(day: u8) -> OperatingInterval { OperatingInterval::new(day, t(9, 0), t(17, 0)) }

  #[test]
  fn open_inside_window() {
    assert!(is_open_at(&[nine_to_five(1)], monday(10, 0)));
  }

  #[test]
  fn endpoints_are_inclusive() {
    let hours = [nine_to_five(1)];
    assert!(is_open_at(&hours, monday(9, 0)));
    assert!(is_open_at(&hours, monday(17, 0)));
    assert!(!is_open_at(&hours, monday(8, 59)));
    assert!(!is_open_at(&hours, monday(17, 1)));
  }

  #[test]
  fn other_days_do_not_count() {
    assert!(!is_open_at(&[nine_to_five(1)], tuesday(10, 0)));
  }

  #[test]
  fn no_hours_is_always_closed() {
    for h in 0..24 {
      assert!(!is_open_at(&[], monday(h, 30)));
      assert!(!is_open_at(&[], tuesday(h, 0)));
    }
  }

  fn any_instant() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..3_650, 0i64..86_400).prop_map(|(days, secs)| {
      NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
        + Duration::days(days)
        + Duration::seconds(secs)
    })
  }

  fn minute(m: u32) -> NaiveTime { NaiveTime::from_num_seconds_from_midnight_opt(m * 60, 0).unwrap() }

  proptest! {
    #[test]
    fn empty_hours_never_open(at in any_instant()) {
      prop_assert!(!is_open_at(&[], at));
      prop_assert!(todays_window(&[], at).is_none());
    }

    #[test]
    fn inverted_interval_never_open(
      at in any_instant(),
      day in 0u8..7,
      (open, close) in (1u32..1_440).prop_flat_map(|open| (Just(open), 0..open))
    ) {
      let hours = [OperatingInterval::new(day, minute(open), minute(close))];
      prop_assert!(!is_open_at(&hours, at));
    }
  }

  #[test]
  fn zero_width_window_is_never_open() {
    let hours = [OperatingInterval::new(1, t(12, 0), t(12, 0))];
    assert!(!is_open_at(&hours, monday(12, 0)));
  }

  #[test]
  fn inverted_window_is_never_open() {
    let hours = [OperatingInterval::new(1, t(17, 0), t(9, 0))];
    assert!(!is_open_at(&hours, monday(12, 0)));
    assert!(!is_open_at(&hours, monday(17, 0)));
  }

  #[test]
  fn split_day_closed_for_lunch() {
    let hours = [
      OperatingInterval::new(1, t(8, 0), t(12, 0)),
      OperatingInterval::new(1, t(13, 0), t(17, 0)),
    ];
    assert!(is_open_at(&hours, monday(11, 0)));
    assert!(!is_open_at(&hours, monday(12, 30)));
    assert!(is_open_at(&hours, monday(16, 0)));
  }

  #[test]
  fn overnight_span_as_two_intervals() {
    let hours = [
      OperatingInterval::new(1, t(20, 0), t(23, 59)),
      OperatingInterval::new(2, t(0, 0), t(6, 0)),
    ];
    assert!(is_open_at(&hours, monday(23, 30)));
    assert!(is_open_at(&hours, tuesday(2, 0)));
    assert!(!is_open_at(&hours, tuesday(7, 0)));
  }

  #[test]
  fn todays_window_is_first_in_catalog_order() {
    let hours = [
      OperatingInterval::new(2, t(7, 0), t(9, 0)),
      OperatingInterval::new(1, t(13, 0), t(17, 0)),
      OperatingInterval::new(1, t(8, 0), t(12, 0)),
    ];
    let window = todays_window(&hours, monday(20, 0)).unwrap();
    assert_eq!(window.display(), "13:00-17:00");
    assert!(todays_window(&hours[..1], monday(8, 0)).is_none());
  }

  #[test]
  fn interval_round_trips_hhmm() {
    let interval: OperatingInterval =
      serde_json::from_str(r#"{"day_of_week": 0, "open": "09:30", "close": "14:00"}"#).unwrap();
    assert_eq!(interval.open, t(9, 30));
    let json = serde_json::to_value(interval).unwrap();
    assert_eq!(json["close"], "14:00");
  }
}
