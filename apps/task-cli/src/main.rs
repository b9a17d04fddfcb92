//! # Taskdeck CLI
//!
//! Terminal front-end for the taskdeck client core.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod output;
mod state;
mod telemetry;

use cli::Cli;
use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    telemetry::init_telemetry();

    let config = AppConfig::from_env();
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    let mut state = AppState::init(&config).await?;
    commands::run(&mut state, cli.command).await
}
