use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::{AggregationPolicy, ConfigError};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default or is optional; credentials are only demanded
/// by the commands that need them.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !(-1.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{value} is outside [-1, 1]"),
            });
        }
        Ok(value)
    };

    let log_level = or_default("MOODWIRE_LOG_LEVEL", "info");

    let news_api_key = optional("NEWS_API_KEY");
    let news_api_base_url = or_default("MOODWIRE_NEWS_API_BASE_URL", "https://newsapi.org/v2/");
    let news_country = or_default("MOODWIRE_NEWS_COUNTRY", "us").to_lowercase();

    let twitter_bearer_token = optional("TWITTER_BEARER_TOKEN");
    let twitter_base_url = or_default("MOODWIRE_TWITTER_BASE_URL", "https://api.twitter.com/2/");

    let request_timeout_secs = parse_u64("MOODWIRE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("MOODWIRE_USER_AGENT", "moodwire/0.1 (sentiment-dashboard)");

    let scores_dir = PathBuf::from(or_default("MOODWIRE_SCORES_DIR", "./scores"));
    let lexicon_path = optional("MOODWIRE_LEXICON_PATH").map(PathBuf::from);

    let aggregation = or_default("MOODWIRE_AGGREGATION", "whole")
        .parse::<AggregationPolicy>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "MOODWIRE_AGGREGATION".to_string(),
            reason,
        })?;

    let positive_threshold = parse_f64("MOODWIRE_POSITIVE_THRESHOLD", "0.05")?;
    let negative_threshold = parse_f64("MOODWIRE_NEGATIVE_THRESHOLD", "-0.05")?;
    if negative_threshold > positive_threshold {
        return Err(ConfigError::InvalidEnvVar {
            var: "MOODWIRE_NEGATIVE_THRESHOLD".to_string(),
            reason: format!(
                "{negative_threshold} is above MOODWIRE_POSITIVE_THRESHOLD ({positive_threshold})"
            ),
        });
    }

    Ok(AppConfig {
        log_level,
        news_api_key,
        news_api_base_url,
        news_country,
        twitter_bearer_token,
        twitter_base_url,
        request_timeout_secs,
        user_agent,
        scores_dir,
        lexicon_path,
        aggregation,
        positive_threshold,
        negative_threshold,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
