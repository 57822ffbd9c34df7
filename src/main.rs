//! CloudVault: a simulated cloud drive
//!
//! Entry point that loads configuration, seeds the vault, and runs one
//! command against it.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cloudvault_core::config::AppConfig;
use cloudvault_core::error::AppError;
use cloudvault_service::Vault;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&cli, config).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
        .map_err(|e| AppError::configuration(format!("Config load error: {e}")))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Build the vault and dispatch the command
async fn run(cli: &Cli, config: AppConfig) -> Result<(), AppError> {
    tracing::debug!("Starting CloudVault v{}", env!("CARGO_PKG_VERSION"));

    let vault = Vault::from_config(config).await?;
    cli.execute(&vault).await
}
