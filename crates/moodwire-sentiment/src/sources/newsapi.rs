//! `NewsAPI` top-headlines client.
//!
//! Only the `top-headlines` endpoint is used. Every article with a title
//! becomes one [`TextItem`] whose body is the title followed by the
//! description, so that headline and teaser are scored together.

use reqwest::{Client, Url};
use serde::Deserialize;

use super::{build_http_client, endpoint_url, parse_base_url, read_json, NewsApiConfig};
use crate::error::SentimentError;
use crate::normalize::clean_text;
use crate::types::TextItem;

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    source: Option<ArticleSource>,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// Client for the `NewsAPI` REST API.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl NewsApiClient {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built, or
    /// [`SentimentError::Api`] if the configured base URL is invalid.
    pub fn new(config: &NewsApiConfig) -> Result<Self, SentimentError> {
        Ok(Self {
            client: build_http_client(config.timeout_secs, &config.user_agent)?,
            api_key: config.api_key.clone(),
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    /// Client pointed at `base_url` with default HTTP settings (for wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`NewsApiClient::new`].
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, SentimentError> {
        Self::new(&NewsApiConfig {
            api_key: api_key.to_owned(),
            base_url: base_url.to_owned(),
            timeout_secs: 30,
            user_agent: "moodwire/0.1 (sentiment-dashboard)".to_owned(),
        })
    }

    /// Current top headlines for a two-letter country code, in API order.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Api`] if the envelope status is not `ok`.
    /// - [`SentimentError::Http`] on network failure.
    /// - [`SentimentError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn top_headlines(&self, country: &str) -> Result<Vec<TextItem>, SentimentError> {
        let url = self.build_url("top-headlines", &[("country", country)])?;
        let response = self.client.get(url).send().await?;
        let context = format!("top-headlines(country={country})");
        let body = read_json(response, &context, api_error).await?;

        let envelope: HeadlinesResponse =
            serde_json::from_value(body).map_err(|e| SentimentError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let total = envelope.articles.len();
        let items: Vec<TextItem> = envelope
            .articles
            .into_iter()
            .enumerate()
            .filter_map(|(idx, article)| article_to_item(idx, article))
            .collect();
        tracing::info!(country, articles = total, items = items.len(), "fetched headlines");
        Ok(items)
    }

    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, SentimentError> {
        let mut url = endpoint_url(&self.base_url, endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("apiKey", &self.api_key);
        }
        Ok(url)
    }
}

/// `NewsAPI` reports failures as `{"status": "error", "message": ...}`.
fn api_error(body: &serde_json::Value) -> Option<String> {
    let status = body.get("status").and_then(serde_json::Value::as_str)?;
    if status == "ok" {
        return None;
    }
    Some(
        body.get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    )
}

fn article_to_item(idx: usize, article: Article) -> Option<TextItem> {
    let title = clean_text(article.title.as_deref()?);
    if title.is_empty() {
        return None;
    }
    let body = match article.description.as_deref().map(clean_text) {
        Some(description) if !description.is_empty() => format!("{title} {description}"),
        _ => title,
    };
    let id = article
        .url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| idx.to_string());
    let source = article
        .source
        .and_then(|s| s.name)
        .unwrap_or_else(|| "newsapi".to_string());

    let item = TextItem::new(id, body, source);
    Some(match article.author.filter(|a| !a.trim().is_empty()) {
        Some(author) => item.with_author(author),
        None => item,
    })
}
