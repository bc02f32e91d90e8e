//! Reqwest-backed NewsAPI adapter.
//!
//! Searches articles for a topic and renders them as Title / Description /
//! URL blocks. Failures come back as text, never as errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use chatterbox_core::config::NewsConfig;

use crate::error::ChatError;

const MISSING_FIELD: &str = "n/a";

/// Looks up recent articles for a topic.
#[async_trait]
pub trait NewsLookup: Send + Sync {
    async fn get_news(&self, topic: &str) -> String;
}

/// Search parameters sent with every request.
#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub language: String,
    pub sort_by: String,
    pub page_size: u32,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            sort_by: "relevancy".to_string(),
            page_size: 5,
        }
    }
}

/// News adapter that performs HTTP GET requests against one endpoint.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    query: NewsQuery,
}

impl NewsApiClient {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        query: NewsQuery,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            query,
        })
    }

    pub fn from_config(config: &NewsConfig) -> Result<Self, ChatError> {
        let endpoint = Url::parse(&config.base_url).map_err(|e| {
            ChatError::Client(format!("invalid news base_url {:?}: {}", config.base_url, e))
        })?;
        if config.api_key.is_empty() {
            warn!("news.api_key is not set; news questions will fail");
        }
        let query = NewsQuery {
            language: config.language.clone(),
            sort_by: config.sort_by.clone(),
            page_size: config.page_size,
        };
        Self::new(
            endpoint,
            config.api_key.clone(),
            query,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl NewsLookup for NewsApiClient {
    async fn get_news(&self, topic: &str) -> String {
        debug!(topic, "Fetching news");
        let page_size = self.query.page_size.to_string();
        let response = match self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", topic),
                ("apiKey", self.api_key.as_str()),
                ("language", self.query.language.as_str()),
                ("sortBy", self.query.sort_by.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(topic, error = %e, "News request failed");
                return format!("Error: {}", e);
            }
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => describe_news(topic, status, &body),
            Err(e) => {
                warn!(topic, error = %e, "News response body unreadable");
                format!("Error: {}", e)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponseDto {
    status: Option<String>,
    articles: Option<Vec<ArticleDto>>,
}

#[derive(Debug, Deserialize)]
struct ArticleDto {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

impl ArticleDto {
    fn render(&self) -> String {
        format!(
            "Title: {}\nDescription: {}\nURL: {}",
            self.title.as_deref().unwrap_or(MISSING_FIELD),
            self.description.as_deref().unwrap_or(MISSING_FIELD),
            self.url.as_deref().unwrap_or(MISSING_FIELD),
        )
    }
}

/// Render a provider response as article blocks or an error message.
pub fn describe_news(topic: &str, status: StatusCode, body: &str) -> String {
    if !status.is_success() {
        return format!("Error: Failed to fetch news for {}.", topic);
    }

    let data: NewsResponseDto = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => {
            debug!(error = %e, "News payload did not parse");
            return "Error: Could not retrieve news.".to_string();
        }
    };

    if data.status.as_deref() != Some("ok") {
        return "Error: Could not retrieve news.".to_string();
    }

    let articles = data.articles.unwrap_or_default();
    if articles.is_empty() {
        return format!("No news articles found for '{}'.", topic);
    }

    articles
        .iter()
        .map(ArticleDto::render)
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim_end()
        .to_string()
}
