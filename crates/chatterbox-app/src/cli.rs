//! CLI argument definitions for the Chatterbox server.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::Parser;

use chatterbox_core::config::ChatterboxConfig;

/// Chatterbox: a chatbot that learns answers, fetches weather and news, and plays Hangman.
#[derive(Parser, Debug)]
#[command(name = "chatterbox", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// HTTP server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Data directory holding chatbot.db.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > CHATTERBOX_CONFIG env var > ~/.chatterbox/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("CHATTERBOX_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Fold command-line and environment overrides into a loaded config.
    ///
    /// The port comes from `--port`, then `CHATTERBOX_PORT`, then the file.
    pub fn apply_overrides(&self, config: &mut ChatterboxConfig) {
        if let Some(ref dir) = self.data_dir {
            config.general.data_dir = dir.to_string_lossy().into_owned();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
        let env_port = std::env::var("CHATTERBOX_PORT")
            .ok()
            .and_then(|v| v.trim().parse::<u16>().ok());
        if let Some(port) = self.port.or(env_port) {
            config.server.port = port;
        }
    }
}

fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".chatterbox").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".chatterbox").join("config.toml");
    }
    PathBuf::from("config.toml")
}
