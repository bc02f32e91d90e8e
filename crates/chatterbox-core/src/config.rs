use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ChatterboxError, Result};

/// Top-level configuration for the Chatterbox service.
///
/// Loaded from `~/.chatterbox/config.toml` by default. Every section is
/// optional in the file and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatterboxConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub news: NewsConfig,
}

impl ChatterboxConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ChatterboxConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ChatterboxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Apply API key overrides from `CHATTERBOX_WEATHER_API_KEY` and
    /// `CHATTERBOX_NEWS_API_KEY` when they are set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_env("CHATTERBOX_WEATHER_API_KEY") {
            self.weather.api_key = key;
        }
        if let Some(key) = non_empty_env("CHATTERBOX_NEWS_API_KEY") {
            self.news.api_key = key;
        }
    }

    /// Validate value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.matcher.cutoff) {
            return Err(ChatterboxError::Config(format!(
                "matcher.cutoff must be within [0, 1], got {}",
                self.matcher.cutoff
            )));
        }
        if self.news.page_size == 0 || self.news.page_size > 100 {
            return Err(ChatterboxError::Config(format!(
                "news.page_size must be within [1, 100], got {}",
                self.news.page_size
            )));
        }
        if self.weather.timeout_secs == 0 || self.news.timeout_secs == 0 {
            return Err(ChatterboxError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory holding the SQLite database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.chatterbox/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Fuzzy question matching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum similarity ratio (0.0 - 1.0) for a stored question to match.
    pub cutoff: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { cutoff: 0.6 }
    }
}

/// OpenWeatherMap adapter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    /// Provider API key. Empty means unset.
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.openweathermap.org/data/2.5/weather".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

/// NewsAPI adapter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub base_url: String,
    /// Provider API key. Empty means unset.
    pub api_key: String,
    /// ISO 639-1 language code for returned articles.
    pub language: String,
    /// Provider sort order: relevancy, popularity or publishedAt.
    pub sort_by: String,
    /// Maximum number of articles per answer.
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org/v2/everything".to_string(),
            api_key: String::new(),
            language: "en".to_string(),
            sort_by: "relevancy".to_string(),
            page_size: 5,
            timeout_secs: 10,
        }
    }
}
