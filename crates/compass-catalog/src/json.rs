//! [`JsonCatalog`]: a [`ResourceCatalog`] read from a JSON array on disk.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use compass_core::{catalog::ResourceCatalog, resource::CommunityResource};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{Error, Result, validate};

// ─── Catalog ─────────────────────────────────────────────────────────────────

struct Inner {
  path:     Option<PathBuf>,
  snapshot: RwLock<Arc<[CommunityResource]>>,
}

/// An in-memory catalog snapshot, optionally backed by a JSON file.
///
/// Cloning is cheap; clones share the same snapshot.
#[derive(Clone)]
pub struct JsonCatalog {
  inner: Arc<Inner>,
}

impl JsonCatalog {
  /// Read, parse and validate the catalog at `path`.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let resources = read_file(&path).await?;
    info!(path = %path.display(), resources = resources.len(), "catalog loaded");
    Ok(Self::build(Some(path), resources))
  }

  /// Parse and validate a catalog held in memory.
  pub fn from_json_str(json: &str) -> Result<Self> {
    let resources = parse(json)?;
    Ok(Self::build(None, resources))
  }

  /// Wrap already-built resources. Validates them like a file load would.
  pub fn from_resources(resources: Vec<CommunityResource>) -> Result<Self> {
    validate(&resources)?;
    Ok(Self::build(None, resources))
  }

  fn build(path: Option<PathBuf>, resources: Vec<CommunityResource>) -> Self {
    Self {
      inner: Arc::new(Inner {
        path,
        snapshot: RwLock::new(resources.into()),
      }),
    }
  }

  /// Re-read the backing file and swap in the new snapshot.
  ///
  /// On any error the previous snapshot stays in place. Queries already
  /// holding a snapshot are unaffected either way.
  pub async fn reload(&self) -> Result<usize> {
    let path = self.inner.path.as_ref().ok_or(Error::NoBackingFile)?;
    let resources = match read_file(path).await {
      Ok(resources) => resources,
      Err(e) => {
        warn!(path = %path.display(), error = %e, "catalog reload failed; keeping previous snapshot");
        return Err(e);
      }
    };
    let count = resources.len();
    *self.inner.snapshot.write().await = resources.into();
    info!(path = %path.display(), resources = count, "catalog reloaded");
    Ok(count)
  }
}

async fn read_file(path: &Path) -> Result<Vec<CommunityResource>> {
  let raw = tokio::fs::read_to_string(path)
    .await
    .map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })?;
  parse(&raw)
}

fn parse(json: &str) -> Result<Vec<CommunityResource>> {
  let resources: Vec<CommunityResource> = serde_json::from_str(json)?;
  validate(&resources)?;
  Ok(resources)
}

// ─── ResourceCatalog impl ────────────────────────────────────────────────────

impl ResourceCatalog for JsonCatalog {
  type Error = Error;

  async fn snapshot(&self) -> Result<Arc<[CommunityResource]>> {
    Ok(self.inner.snapshot.read().await.clone())
  }

  async fn get(&self, id: Uuid) -> Result<Option<CommunityResource>> {
    let snapshot = self.inner.snapshot.read().await.clone();
    Ok(snapshot.iter().find(|r| r.id == id).cloned())
  }
}
