//! JSON REST API for Compass.
//!
//! Exposes an axum [`Router`] backed by any
//! [`compass_core::catalog::ResourceCatalog`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", compass_api::api_router(catalog.clone(), settings))
//! ```

pub mod categories;
pub mod error;
pub mod etag;
pub mod resources;

use std::sync::Arc;

use axum::{Router, routing::get};
use compass_core::{catalog::ResourceCatalog, locale::PRIMARY_LANGUAGE};

pub use error::ApiError;

// ─── Settings ────────────────────────────────────────────────────────────────

/// Presentation defaults applied when a request leaves a parameter out.
#[derive(Debug, Clone)]
pub struct ApiSettings {
  /// Display language when `lang` is absent.
  pub language:                 String,
  /// Value of the immigration-safety toggle when `immigration_safe_only` is
  /// absent. Defaults to `true`.
  pub immigration_safe_default: bool,
  /// How many service tags each result carries; `None` keeps all.
  pub max_services:             Option<usize>,
}

impl Default for ApiSettings {
  fn default() -> Self {
    Self {
      language:                 PRIMARY_LANGUAGE.to_owned(),
      immigration_safe_default: true,
      max_services:             None,
    }
  }
}

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<C> {
  pub catalog:  Arc<C>,
  pub settings: Arc<ApiSettings>,
}

impl<C> Clone for ApiState<C> {
  fn clone(&self) -> Self {
    Self {
      catalog:  Arc::clone(&self.catalog),
      settings: Arc::clone(&self.settings),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `catalog`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<C>(catalog: Arc<C>, settings: ApiSettings) -> Router<()>
where
  C: ResourceCatalog + 'static,
{
  let state = ApiState {
    catalog,
    settings: Arc::new(settings),
  };
  Router::new()
    .route("/resources", get(resources::list::<C>))
    .route("/resources/{id}", get(resources::get_one::<C>))
    .route("/categories", get(categories::list))
    .with_state(state)
}
