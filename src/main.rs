#![warn(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use clap::Parser;
use focusboard::cli::Cli;
use focusboard::{ApiClient, Controller, FileSettingsStore, SettingsStore, TerminalRenderer};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the rendered screens.
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let settings: Arc<dyn SettingsStore> =
        Arc::new(FileSettingsStore::load_or_init().context("Failed to load settings")?);
    let controller = Arc::new(Controller::new(
        ApiClient::new(settings),
        Arc::new(TerminalRenderer::new()),
    ));

    focusboard::app::dispatch(cli, controller).await
}
