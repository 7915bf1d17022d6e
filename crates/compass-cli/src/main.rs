//! `compass`: find community resources from the command line, or serve the
//! JSON API.
//!
//! # Usage
//!
//! ```text
//! compass search --category clinic --free-only --lat 44.95 --lng -93.26
//! compass --config /etc/compass/compass.toml serve
//! ```

mod search;
mod serve;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "compass", version, about = "Community resource finder")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "compass.toml", global = true)]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Filter and rank the catalog, printing the results.
  Search(search::SearchArgs),
  /// Serve the JSON API.
  Serve,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Initialise tracing. Logs go to stderr; stdout carries results.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  match cli.command {
    Command::Search(args) => search::run(args, &settings).await,
    Command::Serve => serve::run(&settings).await,
  }
}
