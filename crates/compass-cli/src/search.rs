//! `compass search`: run one query against the catalog and print it.

use anyhow::{Context as _, bail};
use chrono::{Local, NaiveDateTime};
use clap::Args;
use compass_catalog::JsonCatalog;
use compass_core::{
  catalog::ResourceCatalog,
  filter::FilterState,
  geo::Coordinates,
  resource::Category,
  view::ResourceView,
};

use crate::settings::Settings;

#[derive(Args, Debug)]
pub struct SearchArgs {
  /// Restrict to a category; repeat for several (e.g. `--category clinic`).
  #[arg(long = "category", value_name = "CATEGORY")]
  categories: Vec<Category>,

  /// Only free or sliding-scale services.
  #[arg(long)]
  free_only: bool,

  /// Also show resources not marked immigration-safe.
  #[arg(long)]
  include_unverified: bool,

  /// Only resources open at `--at`.
  #[arg(long)]
  open_now: bool,

  /// Only resources with bilingual staff.
  #[arg(long)]
  bilingual_staff: bool,

  /// Free-text search over name, city and neighborhood.
  #[arg(short, long, default_value = "")]
  query: String,

  /// Your latitude; requires `--lng`.
  #[arg(long, requires = "lng", allow_hyphen_values = true)]
  lat: Option<f64>,

  /// Your longitude; requires `--lat`.
  #[arg(long, requires = "lat", allow_hyphen_values = true)]
  lng: Option<f64>,

  /// Display language (defaults to the configured language).
  #[arg(long)]
  lang: Option<String>,

  /// Reference time as `YYYY-MM-DDTHH:MM` (defaults to now, local time).
  #[arg(long, value_parser = parse_at)]
  at: Option<NaiveDateTime>,

  /// Print JSON instead of one line per result.
  #[arg(long)]
  json: bool,
}

fn parse_at(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
  NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
    .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
}

impl SearchArgs {
  fn filter_state(&self, settings: &Settings) -> anyhow::Result<FilterState> {
    let mut state = FilterState::new(self.at.unwrap_or_else(|| Local::now().naive_local()));
    state.categories = self.categories.iter().copied().collect();
    state.free_only = self.free_only;
    state.immigration_safe_only = settings.immigration_safe_default && !self.include_unverified;
    state.open_now_only = self.open_now;
    state.bilingual_staff_only = self.bilingual_staff;
    state.query = self.query.clone();
    state.language = self.lang.clone().unwrap_or_else(|| settings.language.clone());
    state.user_location = match (self.lat, self.lng) {
      (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
        Some(Coordinates::new(lat, lng))
      }
      (Some(_), Some(_)) => bail!("--lat and --lng must be finite numbers"),
      (None, None) => None,
      _ => bail!("--lat and --lng must be given together"),
    };
    Ok(state)
  }
}

/// One human-readable line per result.
pub fn format_line(view: &ResourceView) -> String {
  let distance = view
    .distance_miles
    .map(|d| format!("{d:.1} mi"))
    .unwrap_or_else(|| "-".to_owned());
  let status = if view.open_now { "open" } else { "closed" };
  let hours = view.todays_hours.as_deref().unwrap_or("closed today");
  format!(
    "{:<40} {:<14} {:>8}  {:<6} {}",
    view.name,
    view.category.as_ref(),
    distance,
    status,
    hours
  )
}

pub async fn run(args: SearchArgs, settings: &Settings) -> anyhow::Result<()> {
  let state = args.filter_state(settings)?;

  let catalog = JsonCatalog::open(&settings.catalog_path)
    .await
    .with_context(|| format!("failed to open catalog at {:?}", settings.catalog_path))?;
  let snapshot = catalog.snapshot().await?;

  let views: Vec<ResourceView> = compass_core::query(&snapshot, &state)
    .iter()
    .map(|r| {
      ResourceView::from_ranked(r, &state.language, state.reference_instant)
        .truncate_services(settings.max_services)
    })
    .collect();

  if args.json {
    println!("{}", serde_json::to_string_pretty(&views)?);
  } else if views.is_empty() {
    println!("No resources match.");
  } else {
    for view in &views {
      println!("{}", format_line(view));
    }
  }
  Ok(())
}
