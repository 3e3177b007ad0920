//! crewboard-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the JSON API over HTTP. The `report` and `reset`
//! subcommands work on the same store without starting a server.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use crewboard_core::report::Report;
use crewboard_store_sqlite::SqliteStore;
use settings::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Crewboard site and crew assignment server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API (the default).
  Serve,
  /// Print the current assignment report as JSON and exit.
  Report {
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Tree)]
    format: ReportFormat,
  },
  /// Delete every site, employee, and assignment.
  Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
  Tree,
  Rows,
  Display,
  Summary,
  Document,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => {
      seed_if_configured(&store, &cfg).await?;
      serve(store, &cfg).await
    }
    Command::Report { format } => print_report(&store, format).await,
    Command::Reset => {
      store.reset().await.context("failed to reset store")?;
      seed_if_configured(&store, &cfg).await
    }
  }
}

async fn seed_if_configured(store: &SqliteStore, cfg: &ServerConfig) -> anyhow::Result<()> {
  if cfg.seed_demo_data {
    store
      .seed_demo_data()
      .await
      .context("failed to seed demo data")?;
  }
  Ok(())
}

async fn serve(store: SqliteStore, cfg: &ServerConfig) -> anyhow::Result<()> {
  let app = crewboard_api::api_router(Arc::new(store));
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}

async fn print_report(store: &SqliteStore, format: ReportFormat) -> anyhow::Result<()> {
  let report = Report::generate(store)
    .await
    .context("failed to build report")?;

  let json = match format {
    ReportFormat::Tree => serde_json::to_string_pretty(report.tree()),
    ReportFormat::Rows => serde_json::to_string_pretty(&report.export_rows()),
    ReportFormat::Display => serde_json::to_string_pretty(&report.display_rows()),
    ReportFormat::Summary => serde_json::to_string_pretty(&report.summary()),
    ReportFormat::Document => serde_json::to_string_pretty(&report.document()),
  }?;
  println!("{json}");
  Ok(())
}
