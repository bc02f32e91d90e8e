//! Chatterbox application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Open the SQLite database (migrations run on open)
//! 3. Build the weather/news adapters and the Hangman engine
//! 4. Serve the axum HTTP API

use std::path::PathBuf;

use clap::Parser;

use chatterbox_api::routes;
use chatterbox_api::state::AppState;
use chatterbox_core::config::ChatterboxConfig;
use chatterbox_storage::Database;

mod cli;

use cli::CliArgs;

/// Expand ~ to the home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config_exists = config_file.exists();
    let mut config = ChatterboxConfig::load_or_default(&config_file);
    config.apply_env_overrides();
    args.apply_overrides(&mut config);

    // Tracing. RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Chatterbox v{}", env!("CARGO_PKG_VERSION"));
    if config_exists {
        tracing::info!(path = %config_file.display(), "Configuration loaded");
    } else {
        tracing::info!(path = %config_file.display(), "No configuration file, using defaults");
    }
    config.validate()?;

    // Storage.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    let db_path = data_dir.join("chatbot.db");
    let db = Database::new(&db_path)?;
    tracing::info!(path = %db_path.display(), "SQLite database opened");

    let state = AppState::from_config(&config, db)?;

    routes::start_server(&config.server, state).await?;

    Ok(())
}
