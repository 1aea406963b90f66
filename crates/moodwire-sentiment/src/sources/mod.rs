//! HTTP fetch clients that turn upstream APIs into [`TextItem`](crate::TextItem) batches.
//!
//! Each client owns a `reqwest::Client` built from its config and a base URL
//! that can be pointed at a mock server in tests.

use std::time::Duration;

use moodwire_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::SentimentError;

pub mod newsapi;
pub mod twitter;

pub use newsapi::NewsApiClient;
pub use twitter::{search_query, TwitterClient};

/// Connection settings for [`NewsApiClient`].
#[derive(Clone)]
pub struct NewsApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl NewsApiConfig {
    /// # Errors
    ///
    /// Returns [`SentimentError::MissingCredential`] when `NEWS_API_KEY` is unset.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SentimentError> {
        let api_key = config
            .news_api_key
            .clone()
            .ok_or(SentimentError::MissingCredential("NEWS_API_KEY"))?;
        Ok(Self {
            api_key,
            base_url: config.news_api_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Connection settings for [`TwitterClient`].
#[derive(Clone)]
pub struct TwitterConfig {
    pub bearer_token: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("bearer_token", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl TwitterConfig {
    /// # Errors
    ///
    /// Returns [`SentimentError::MissingCredential`] when `TWITTER_BEARER_TOKEN` is unset.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SentimentError> {
        let bearer_token = config
            .twitter_bearer_token
            .clone()
            .ok_or(SentimentError::MissingCredential("TWITTER_BEARER_TOKEN"))?;
        Ok(Self {
            bearer_token,
            base_url: config.twitter_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        })
    }
}

fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SentimentError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Parse `base_url`, ensuring exactly one trailing slash so that joining an
/// endpoint path appends to it instead of replacing the last segment.
fn parse_base_url(base_url: &str) -> Result<Url, SentimentError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .map_err(|e| SentimentError::Api(format!("invalid base URL '{base_url}': {e}")))
}

fn endpoint_url(base_url: &Url, path: &str) -> Result<Url, SentimentError> {
    base_url
        .join(path)
        .map_err(|e| SentimentError::Api(format!("invalid endpoint '{path}': {e}")))
}

/// Read a response body as JSON.
///
/// Both APIs describe failures in the JSON body, so the body is parsed before
/// the HTTP status is judged. `api_error` extracts that description; a non-2xx
/// response without one is reported by its status line.
async fn read_json(
    response: reqwest::Response,
    context: &str,
    api_error: fn(&serde_json::Value) -> Option<String>,
) -> Result<serde_json::Value, SentimentError> {
    let status = response.status();
    let text = response.text().await?;
    let body: Option<serde_json::Value> = match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(_) if !status.is_success() => None,
        Err(e) => {
            return Err(SentimentError::Deserialize {
                context: context.to_string(),
                source: e,
            })
        }
    };

    if let Some(message) = body.as_ref().and_then(api_error) {
        return Err(SentimentError::Api(message));
    }
    match body {
        Some(value) if status.is_success() => Ok(value),
        _ => Err(SentimentError::Api(format!("{context}: HTTP {status}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_single_trailing_slash() {
        let url = parse_base_url("https://newsapi.org/v2").unwrap();
        assert_eq!(url.as_str(), "https://newsapi.org/v2/");
        let url = parse_base_url("https://newsapi.org/v2//").unwrap();
        assert_eq!(url.as_str(), "https://newsapi.org/v2/");
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let base = parse_base_url("https://api.twitter.com/2").unwrap();
        let url = endpoint_url(&base, "tweets/search/recent").unwrap();
        assert_eq!(url.as_str(), "https://api.twitter.com/2/tweets/search/recent");
    }

    #[test]
    fn invalid_base_url_is_api_error() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(SentimentError::Api(_))
        ));
    }

    #[test]
    fn configs_require_credentials() {
        let config = AppConfig {
            log_level: "info".to_string(),
            news_api_key: None,
            news_api_base_url: "https://newsapi.org/v2/".to_string(),
            news_country: "us".to_string(),
            twitter_bearer_token: None,
            twitter_base_url: "https://api.twitter.com/2/".to_string(),
            request_timeout_secs: 30,
            user_agent: "moodwire-test".to_string(),
            scores_dir: std::path::PathBuf::from("./scores"),
            lexicon_path: None,
            aggregation: moodwire_core::AggregationPolicy::WholeBatch,
            positive_threshold: 0.05,
            negative_threshold: -0.05,
        };
        assert!(matches!(
            NewsApiConfig::from_app_config(&config),
            Err(SentimentError::MissingCredential("NEWS_API_KEY"))
        ));
        assert!(matches!(
            TwitterConfig::from_app_config(&config),
            Err(SentimentError::MissingCredential("TWITTER_BEARER_TOKEN"))
        ));
    }

    #[test]
    fn config_debug_redacts_secrets() {
        let config = NewsApiConfig {
            api_key: "sk-secret".to_string(),
            base_url: "https://newsapi.org/v2/".to_string(),
            timeout_secs: 30,
            user_agent: "ua".to_string(),
        };
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
