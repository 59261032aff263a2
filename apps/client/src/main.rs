mod account;
mod api_client;
mod candidate;
mod chat;
mod cli;
mod config;
mod errors;
mod hr;
mod models;
mod session;
mod state;
mod storage;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::ClientError;
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match cli.api_url.as_deref() {
        Some(url) => config.with_api_url(url),
        None => config,
    };
    debug!(api_url = %config.api_url, state_dir = %config.state_dir.display(), "Client configured");

    match run(config, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, category = ?e.category(), "Command failed");
            eprintln!("{}", e.user_message());
            if matches!(e, ClientError::SessionExpired(_)) {
                eprintln!("Run `hireflow login` to start a new session.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config, cli: Cli) -> Result<(), ClientError> {
    let state = AppState::build(config)?;
    cli::run(&state, cli.command).await
}
