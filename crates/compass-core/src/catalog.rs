//! The `ResourceCatalog` trait.
//!
//! The trait is implemented by catalog backends (e.g. `compass-catalog`).
//! Higher layers (`compass-api`, `compass-cli`) depend on this abstraction,
//! not on any concrete backend. The engine itself never touches a catalog
//! backend; it only ever sees a slice of resources.

use std::{future::Future, sync::Arc};

use uuid::Uuid;

use crate::resource::CommunityResource;

/// Read-only access to a catalog of community resources.
///
/// A snapshot is immutable: a backend that reloads swaps in a new snapshot
/// and leaves outstanding ones untouched.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ResourceCatalog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The current catalog, in curatorial order.
  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<Arc<[CommunityResource]>, Self::Error>> + Send + '_;

  /// Retrieve one resource by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CommunityResource>, Self::Error>> + Send + '_;
}
