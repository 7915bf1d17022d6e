//! Runtime configuration, layered from an optional TOML file and
//! `COMPASS_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use compass_api::ApiSettings;
use compass_core::locale::PRIMARY_LANGUAGE;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub catalog_path:             PathBuf,
  pub host:                     String,
  pub port:                     u16,
  /// Display language when none is requested.
  pub language:                 String,
  /// Whether the immigration-safety toggle starts switched on.
  pub immigration_safe_default: bool,
  /// Service tags shown per result.
  pub max_services:             usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      catalog_path:             PathBuf::from("catalog.json"),
      host:                     "127.0.0.1".to_owned(),
      port:                     8080,
      language:                 PRIMARY_LANGUAGE.to_owned(),
      immigration_safe_default: true,
      max_services:             3,
    }
  }
}

impl Settings {
  /// Read `path` (if it exists), then apply `COMPASS_*` overrides.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("COMPASS"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  pub fn api(&self) -> ApiSettings {
    ApiSettings {
      language:                 self.language.clone(),
      immigration_safe_default: self.immigration_safe_default,
      max_services:             Some(self.max_services),
    }
  }
}
