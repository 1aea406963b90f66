use std::path::PathBuf;

use crate::AggregationPolicy;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub news_api_key: Option<String>,
    pub news_api_base_url: String,
    pub news_country: String,
    pub twitter_bearer_token: Option<String>,
    pub twitter_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub scores_dir: PathBuf,
    pub lexicon_path: Option<PathBuf>,
    pub aggregation: AggregationPolicy,
    pub positive_threshold: f64,
    pub negative_threshold: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "news_api_key",
                &self.news_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("news_api_base_url", &self.news_api_base_url)
            .field("news_country", &self.news_country)
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field("twitter_base_url", &self.twitter_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("scores_dir", &self.scores_dir)
            .field("lexicon_path", &self.lexicon_path)
            .field("aggregation", &self.aggregation)
            .field("positive_threshold", &self.positive_threshold)
            .field("negative_threshold", &self.negative_threshold)
            .finish()
    }
}
