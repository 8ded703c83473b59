use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quill::commands;
use quill::config::{Cli, Config};
use quill::notify::ConsoleNotifier;
use quill::state::App;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::debug!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;
    let mut app = App::from_config(&config, Arc::new(ConsoleNotifier))?;

    let command = cli.command.unwrap_or_default();
    match commands::run(&mut app, command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already reported through the notifier or inline form errors
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
