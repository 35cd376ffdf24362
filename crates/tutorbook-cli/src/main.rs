mod cli;
mod commands;
mod settings;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::Services;
use settings::{LoggingSettings, Settings};
use tutorbook_adapters::SqliteDb;

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Logs go to stderr; stdout carries the command's JSON output.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("failed to load configuration")?;

    init_tracing(&settings.logging);

    let timezone = settings.scheduling.tz()?;
    let db = SqliteDb::connect(&settings.database.url, settings.database.max_connections)
        .await
        .with_context(|| format!("failed to open {}", settings.database.url))?;
    tracing::debug!(timezone = %timezone, "services ready");

    let output = commands::run(cli.command, &Services::new(db, timezone)).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
