//! Reqwest-backed OpenWeatherMap adapter.
//!
//! Turns a city name into a one-line weather sentence. Every failure
//! (transport, status, payload shape) is rendered as user-facing text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

use chatterbox_core::config::WeatherConfig;

use crate::error::ChatError;

const KELVIN_OFFSET: f64 = 273.15;

/// Looks up current weather for a city.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn get_weather(&self, city: &str) -> String;
}

/// Weather adapter that performs HTTP GET requests against one endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl OpenWeatherClient {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    pub fn new(endpoint: Url, api_key: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, ChatError> {
        let endpoint = Url::parse(&config.base_url).map_err(|e| {
            ChatError::Client(format!("invalid weather base_url {:?}: {}", config.base_url, e))
        })?;
        if config.api_key.is_empty() {
            warn!("weather.api_key is not set; weather questions will fail");
        }
        Self::new(
            endpoint,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn get_weather(&self, city: &str) -> String {
        debug!(city, "Fetching weather");
        let response = match self
            .client
            .get(self.endpoint.clone())
            .query(&[("appid", self.api_key.as_str()), ("q", city)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(city, error = %e, "Weather request failed");
                return format!("Error: {}", e);
            }
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => describe_weather(city, status, &body),
            Err(e) => {
                warn!(city, error = %e, "Weather response body unreadable");
                format!("Error: {}", e)
            }
        }
    }
}

/// Render a provider response as a sentence or an error message.
pub fn describe_weather(city: &str, status: StatusCode, body: &str) -> String {
    if !status.is_success() {
        return format!("Error: Failed to fetch weather data for {}.", city);
    }

    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => return format!("Error: {}", e),
    };

    if is_not_found(&data) {
        return "Error: City not found.".to_string();
    }

    match extract_report(&data) {
        Ok((description, kelvin)) => format!(
            "The weather in {} is {} with a temperature of {:.2}°C.",
            city,
            description,
            kelvin - KELVIN_OFFSET
        ),
        Err(key) => format!(
            "Error: Unexpected response format from API. missing key '{}'",
            key
        ),
    }
}

/// The provider reports `cod` as a string on errors and a number on success.
fn is_not_found(data: &Value) -> bool {
    match data.get("cod") {
        Some(Value::String(code)) => code == "404",
        Some(Value::Number(code)) => code.as_i64() == Some(404),
        _ => false,
    }
}

/// Description and Kelvin temperature, or the first missing key.
fn extract_report(data: &Value) -> Result<(&str, f64), &'static str> {
    let main = data.get("main").ok_or("main")?;
    let description = data
        .get("weather")
        .ok_or("weather")?
        .get(0)
        .ok_or("weather[0]")?
        .get("description")
        .and_then(Value::as_str)
        .ok_or("description")?;
    let temp = main.get("temp").and_then(Value::as_f64).ok_or("temp")?;
    Ok((description, temp))
}
