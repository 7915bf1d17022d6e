//! `compass serve`: the JSON API over HTTP.
//!
//! On Unix, `SIGHUP` re-reads the catalog file without restarting.

use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use compass_catalog::JsonCatalog;
use tokio::{net::TcpListener, sync::mpsc};
use tower_http::trace::TraceLayer;

use crate::settings::Settings;

pub async fn run(settings: &Settings) -> anyhow::Result<()> {
  let catalog = JsonCatalog::open(&settings.catalog_path)
    .await
    .with_context(|| format!("failed to open catalog at {:?}", settings.catalog_path))?;

  let (reload_tx, reload_rx) = mpsc::channel(1);
  forward_hangups(reload_tx)?;
  tokio::spawn(reload_on(catalog.clone(), reload_rx));

  let app = Router::new()
    .nest("/api", compass_api::api_router(Arc::new(catalog), settings.api()))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", settings.host, settings.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

// ─── Reload ──────────────────────────────────────────────────────────────────

/// Reload `catalog` once per message on `triggers`, until every sender is
/// dropped.
pub async fn reload_on(catalog: JsonCatalog, mut triggers: mpsc::Receiver<()>) {
  while triggers.recv().await.is_some() {
    // `reload` logs both outcomes and keeps the old snapshot on failure.
    let _ = catalog.reload().await;
  }
}

#[cfg(unix)]
fn forward_hangups(reload: mpsc::Sender<()>) -> anyhow::Result<()> {
  use tokio::signal::unix::{SignalKind, signal};

  let mut hangup = signal(SignalKind::hangup()).context("failed to install SIGHUP handler")?;
  tokio::spawn(async move {
    while hangup.recv().await.is_some() {
      tracing::info!("SIGHUP received; reloading catalog");
      // A reload already queued will pick up this change too.
      let _ = reload.try_send(());
    }
  });
  Ok(())
}

#[cfg(not(unix))]
fn forward_hangups(_reload: mpsc::Sender<()>) -> anyhow::Result<()> { Ok(()) }

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use compass_core::catalog::ResourceCatalog;

  use super::*;

  const ONE_SHELTER: &str = r#"[
    {
      "id": "5e0c1d2a-3b4c-4d5e-8f60-718293a4b5c6",
      "category": "shelter",
      "name": { "en": "Harbor Light Shelter" },
      "description": { "en": "Overnight beds" },
      "address": {
        "street": "1010 Currie Ave",
        "city": "Minneapolis",
        "region": "MN",
        "postal_code": "55403"
      }
    }
  ]"#;

  fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("compass-serve-{tag}-{}.json", std::process::id()))
  }

  /// Send one trigger, close the channel and wait for the loop to drain it.
  async fn trigger_once(catalog: &JsonCatalog) {
    let (tx, rx) = mpsc::channel(1);
    let task = tokio::spawn(reload_on(catalog.clone(), rx));
    tx.send(()).await.unwrap();
    drop(tx);
    task.await.unwrap();
  }

  #[tokio::test]
  async fn trigger_swaps_in_the_new_file() {
    let path = temp_path("swap");
    tokio::fs::write(&path, "[]").await.unwrap();
    let catalog = JsonCatalog::open(&path).await.unwrap();
    assert!(catalog.snapshot().await.unwrap().is_empty());

    tokio::fs::write(&path, ONE_SHELTER).await.unwrap();
    trigger_once(&catalog).await;
    assert_eq!(catalog.snapshot().await.unwrap().len(), 1);

    tokio::fs::remove_file(&path).await.unwrap();
  }

  #[tokio::test]
  async fn broken_file_keeps_serving_previous_snapshot() {
    let path = temp_path("broken");
    tokio::fs::write(&path, ONE_SHELTER).await.unwrap();
    let catalog = JsonCatalog::open(&path).await.unwrap();

    tokio::fs::write(&path, "not json").await.unwrap();
    trigger_once(&catalog).await;
    assert_eq!(catalog.snapshot().await.unwrap().len(), 1);

    tokio::fs::remove_file(&path).await.unwrap();
  }

  #[tokio::test]
  async fn loop_ends_when_senders_are_gone() {
    let catalog = JsonCatalog::from_json_str("[]").unwrap();
    let (tx, rx) = mpsc::channel::<()>(1);
    drop(tx);
    reload_on(catalog, rx).await;
  }
}
