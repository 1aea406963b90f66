//! Twitter API v2 recent-search client.

use std::collections::HashMap;

use reqwest::{Client, Url};
use serde::Deserialize;

use super::{build_http_client, endpoint_url, parse_base_url, read_json, TwitterConfig};
use crate::error::SentimentError;
use crate::normalize::clean_text;
use crate::types::TextItem;

/// Accepted range of the `max_results` parameter on recent search.
const MIN_RESULTS: u32 = 10;
const MAX_RESULTS: u32 = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
    #[serde(default)]
    includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    text: String,
    author_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    username: String,
}

/// Operator that drops retweets from a recent-search query.
const EXCLUDE_RETWEETS: &str = "-is:retweet";

/// Build a recent-search query matching any of `keywords`.
///
/// Keywords are trimmed and blank ones skipped; the rest are joined with
/// `OR`. Retweets are excluded unless `include_retweets` is set. Returns an
/// empty string when no keyword is left.
pub fn search_query<S: AsRef<str>>(keywords: &[S], include_retweets: bool) -> String {
    let terms: Vec<&str> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .collect();
    if terms.is_empty() {
        return String::new();
    }
    let mut query = terms.join(" OR ");
    if !include_retweets && !terms.iter().any(|t| t.contains(EXCLUDE_RETWEETS)) {
        query.push(' ');
        query.push_str(EXCLUDE_RETWEETS);
    }
    query
}

/// Client for Twitter API v2 recent search.
pub struct TwitterClient {
    client: Client,
    bearer_token: String,
    base_url: Url,
}

impl TwitterClient {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built, or
    /// [`SentimentError::Api`] if the configured base URL is invalid.
    pub fn new(config: &TwitterConfig) -> Result<Self, SentimentError> {
        Ok(Self {
            client: build_http_client(config.timeout_secs, &config.user_agent)?,
            bearer_token: config.bearer_token.clone(),
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    /// Client pointed at `base_url` with default HTTP settings (for wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`TwitterClient::new`].
    pub fn with_base_url(bearer_token: &str, base_url: &str) -> Result<Self, SentimentError> {
        Self::new(&TwitterConfig {
            bearer_token: bearer_token.to_owned(),
            base_url: base_url.to_owned(),
            timeout_secs: 30,
            user_agent: "moodwire/0.1 (sentiment-dashboard)".to_owned(),
        })
    }

    /// Tweets from the last seven days matching `query`, newest first.
    ///
    /// `max_results` is clamped to the 10..=100 range the API accepts. A
    /// search with no matches yields an empty vec.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Api`] if the API rejects the request.
    /// - [`SentimentError::Http`] on network failure.
    /// - [`SentimentError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<TextItem>, SentimentError> {
        let url = self.build_url(query, max_results)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        let context = format!("search_recent(query={query})");
        let body = read_json(response, &context, api_error).await?;

        let parsed: SearchResponse =
            serde_json::from_value(body).map_err(|e| SentimentError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let usernames: HashMap<String, String> = parsed
            .includes
            .map(|inc| inc.users)
            .unwrap_or_default()
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let items: Vec<TextItem> = parsed
            .data
            .into_iter()
            .filter_map(|tweet| {
                let body = clean_text(&tweet.text);
                if body.is_empty() {
                    return None;
                }
                let item = TextItem::new(tweet.id, body, "twitter");
                let author = tweet
                    .author_id
                    .as_ref()
                    .and_then(|id| usernames.get(id));
                Some(match author {
                    Some(username) => item.with_author(format!("@{username}")),
                    None => item,
                })
            })
            .collect();

        tracing::info!(query, tweets = items.len(), "fetched tweets");
        Ok(items)
    }

    fn build_url(&self, query: &str, max_results: u32) -> Result<Url, SentimentError> {
        let mut url = endpoint_url(&self.base_url, "tweets/search/recent")?;
        let max_results = max_results.clamp(MIN_RESULTS, MAX_RESULTS).to_string();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("max_results", &max_results)
            .append_pair("expansions", "author_id")
            .append_pair("user.fields", "username");
        Ok(url)
    }
}

/// Twitter reports request failures as problem documents with `detail` or
/// `title`, and partial failures as an `errors` array next to missing `data`.
fn api_error(body: &serde_json::Value) -> Option<String> {
    let str_field = |v: &serde_json::Value, key: &str| {
        v.get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    };

    if body.get("data").is_some() {
        return None;
    }
    if let Some(message) = str_field(body, "detail").or_else(|| str_field(body, "title")) {
        return Some(message);
    }
    body.get("errors")
        .and_then(serde_json::Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| str_field(first, "detail").or_else(|| str_field(first, "message")))
}
