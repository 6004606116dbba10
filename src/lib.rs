pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{AppConfig, Credentials};
use anyhow::Result;
use chrono::Local;
use tracing::{debug, info};

/// Commands that run against a loaded configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Fetch the quote and mail the news if the move crosses the threshold
    Check { dry_run: bool },
    /// Show the quote and change only
    Quote,
    /// Show the news digest only
    News,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Stock alert starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let credentials = Credentials::from_env();
    debug!("Loaded credentials: {credentials:?}");

    run_with(command, &config, credentials).await
}

/// Runs `command` with an explicit configuration and credentials.
pub async fn run_with(
    command: AppCommand,
    config: &AppConfig,
    credentials: Credentials,
) -> Result<()> {
    let today = Local::now().date_naive();
    match command {
        AppCommand::Check { dry_run } => {
            cli::check::run(config, credentials, dry_run, today).await?;
        }
        AppCommand::Quote => cli::quote::run(config, &credentials).await?,
        AppCommand::News => cli::news::run(config, &credentials, today).await?,
    }
    Ok(())
}
