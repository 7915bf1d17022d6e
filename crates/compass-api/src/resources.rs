//! Handlers for `/resources` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/resources` | Filter, rank and localize; `ETag` / `If-None-Match` |
//! | `GET`  | `/resources/{id}` | 404 if not found |
//!
//! `categories` is accepted as a comma-separated string. `at` is a naive local
//! date-time (`2024-01-01T10:00` or `2024-01-01T10:00:00`) and defaults to the
//! server's local clock.

use std::str::FromStr;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDateTime};
use compass_core::{
  catalog::ResourceCatalog,
  filter::FilterState,
  geo::Coordinates,
  rank::compose,
  resource::Category,
  view::ResourceView,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  ApiSettings, ApiState,
  error::ApiError,
  etag::{compute_etag, matches_if_none_match},
};

// ─── Params ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Comma-separated categories, e.g. `clinic,food-bank`.
  pub categories:            Option<String>,
  pub free_only:             Option<bool>,
  /// Falls back to [`ApiSettings::immigration_safe_default`].
  pub immigration_safe_only: Option<bool>,
  pub open_now_only:         Option<bool>,
  pub bilingual_staff_only:  Option<bool>,
  /// Free-text search.
  pub q:                     Option<String>,
  pub lat:                   Option<f64>,
  pub lng:                   Option<f64>,
  pub lang:                  Option<String>,
  pub at:                    Option<String>,
  pub limit:                 Option<usize>,
}

/// Parameters that shape a single resource's view without filtering it.
#[derive(Debug, Deserialize, Default)]
pub struct ViewParams {
  pub lat:  Option<f64>,
  pub lng:  Option<f64>,
  pub lang: Option<String>,
  pub at:   Option<String>,
}

fn parse_categories(raw: Option<&str>) -> Result<Vec<Category>, ApiError> {
  raw
    .into_iter()
    .flat_map(|s| s.split(','))
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| {
      Category::from_str(s).map_err(|_| ApiError::invalid("categories", format!("unknown category {s:?}")))
    })
    .collect()
}

fn parse_location(lat: Option<f64>, lng: Option<f64>) -> Result<Option<Coordinates>, ApiError> {
  match (lat, lng) {
    (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
      Ok(Some(Coordinates::new(lat, lng)))
    }
    (Some(_), Some(_)) => Err(ApiError::invalid("lat", "lat and lng must be finite")),
    (None, None) => Ok(None),
    _ => Err(ApiError::invalid("lat", "lat and lng must be given together")),
  }
}

fn parse_at(raw: Option<&str>) -> Result<NaiveDateTime, ApiError> {
  let Some(raw) = raw else {
    return Ok(Local::now().naive_local());
  };
  NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
    .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
    .map_err(|e| ApiError::invalid("at", format!("{raw:?}: {e}")))
}

impl SearchParams {
  /// Build the engine's [`FilterState`], filling gaps from `settings`.
  pub fn into_filter_state(self, settings: &ApiSettings) -> Result<FilterState, ApiError> {
    let mut state = FilterState::new(parse_at(self.at.as_deref())?);
    state.categories = parse_categories(self.categories.as_deref())?
      .into_iter()
      .collect();
    state.free_only = self.free_only.unwrap_or(false);
    state.immigration_safe_only = self
      .immigration_safe_only
      .unwrap_or(settings.immigration_safe_default);
    state.open_now_only = self.open_now_only.unwrap_or(false);
    state.bilingual_staff_only = self.bilingual_staff_only.unwrap_or(false);
    state.query = self.q.unwrap_or_default();
    state.user_location = parse_location(self.lat, self.lng)?;
    state.language = self.lang.unwrap_or_else(|| settings.language.clone());
    Ok(state)
  }
}

fn finish_view(view: ResourceView, settings: &ApiSettings) -> ResourceView {
  match settings.max_services {
    Some(max) => view.truncate_services(max),
    None => view,
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /resources[?categories=...][&free_only=...][&q=...][&lat=..&lng=..][&lang=..][&at=..][&limit=..]`
pub async fn list<C>(
  State(state): State<ApiState<C>>,
  headers: HeaderMap,
  Query(params): Query<SearchParams>,
) -> Result<Response, ApiError>
where
  C: ResourceCatalog,
{
  let limit = params.limit;
  let filter_state = params.into_filter_state(&state.settings)?;

  let snapshot = state
    .catalog
    .snapshot()
    .await
    .map_err(ApiError::catalog)?;

  let ranked = compass_core::query(&snapshot, &filter_state);
  let views: Vec<ResourceView> = ranked
    .iter()
    .take(limit.unwrap_or(usize::MAX))
    .map(|r| {
      finish_view(
        ResourceView::from_ranked(r, &filter_state.language, filter_state.reference_instant),
        &state.settings,
      )
    })
    .collect();

  let body = serde_json::to_vec(&views)?;
  let etag = compute_etag(&body);

  if matches_if_none_match(&headers, &etag) {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
  }

  Ok(
    (
      [
        (header::CONTENT_TYPE, "application/json".to_owned()),
        (header::ETAG, etag),
      ],
      body,
    )
      .into_response(),
  )
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /resources/{id}[?lang=..][&at=..][&lat=..&lng=..]`
pub async fn get_one<C>(
  State(state): State<ApiState<C>>,
  Path(id): Path<Uuid>,
  Query(params): Query<ViewParams>,
) -> Result<Json<ResourceView>, ApiError>
where
  C: ResourceCatalog,
{
  let at = parse_at(params.at.as_deref())?;
  let user_location = parse_location(params.lat, params.lng)?;
  let language = params
    .lang
    .unwrap_or_else(|| state.settings.language.clone());

  let resource = state
    .catalog
    .get(id)
    .await
    .map_err(ApiError::catalog)?
    .ok_or(ApiError::UnknownResource(id))?;

  let ranked = compose(&[&resource], user_location, at);
  let view = ranked
    .first()
    .map(|r| finish_view(ResourceView::from_ranked(r, &language, at), &state.settings))
    .ok_or(ApiError::UnknownResource(id))?;
  Ok(Json(view))
}
