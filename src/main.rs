//! ShareLink command-line entry point.
//!
//! Loads configuration, initializes logging and dispatches to the
//! requested share link command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use sharelink_core::config::AppConfig;
use sharelink_core::error::AppError;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(2);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(&config).await {
        tracing::warn!(error = %e, "Command failed");
        // Rejected links all read the same.
        if e.is_invalid_parameter() {
            output::print_error(e.public_message());
        } else {
            output::print_error(&e.to_string());
        }
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay and variables
fn load_configuration(path: Option<&str>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(str::to_string)
        .or_else(|| std::env::var("SHARELINK_CONFIG").ok())
        .unwrap_or_else(|| "config/default".to_string());
    let env = std::env::var("SHARELINK_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging on stderr, leaving stdout for command output
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
