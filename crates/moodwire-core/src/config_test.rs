use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.news_api_key.is_none());
    assert_eq!(cfg.news_api_base_url, "https://newsapi.org/v2/");
    assert_eq!(cfg.news_country, "us");
    assert!(cfg.twitter_bearer_token.is_none());
    assert_eq!(cfg.twitter_base_url, "https://api.twitter.com/2/");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "moodwire/0.1 (sentiment-dashboard)");
    assert_eq!(cfg.scores_dir, Path::new("./scores"));
    assert!(cfg.lexicon_path.is_none());
    assert_eq!(cfg.aggregation, AggregationPolicy::WholeBatch);
    assert!((cfg.positive_threshold - 0.05).abs() < f64::EPSILON);
    assert!((cfg.negative_threshold + 0.05).abs() < f64::EPSILON);
}

#[test]
fn credentials_are_read_when_present() {
    let mut map = HashMap::new();
    map.insert("NEWS_API_KEY", "news-key");
    map.insert("TWITTER_BEARER_TOKEN", "bearer");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.news_api_key.as_deref(), Some("news-key"));
    assert_eq!(cfg.twitter_bearer_token.as_deref(), Some("bearer"));
}

#[test]
fn blank_credentials_are_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("NEWS_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.news_api_key.is_none());
}

#[test]
fn debug_output_redacts_credentials() {
    let mut map = HashMap::new();
    map.insert("NEWS_API_KEY", "super-secret-key");
    map.insert("TWITTER_BEARER_TOKEN", "super-secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"), "leaked secret: {debug}");
    assert!(debug.contains("[redacted]"));
}

#[test]
fn news_country_is_lowercased() {
    let mut map = HashMap::new();
    map.insert("MOODWIRE_NEWS_COUNTRY", "GB");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.news_country, "gb");
}

#[test]
fn aggregation_override() {
    let mut map = HashMap::new();
    map.insert("MOODWIRE_AGGREGATION", "mean");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.aggregation, AggregationPolicy::PerItemMean);
}

#[test]
fn aggregation_invalid() {
    let mut map = HashMap::new();
    map.insert("MOODWIRE_AGGREGATION", "median");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MOODWIRE_AGGREGATION"),
        "expected InvalidEnvVar(MOODWIRE_AGGREGATION), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("MOODWIRE_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("MOODWIRE_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MOODWIRE_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(MOODWIRE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn lexicon_path_is_optional() {
    let mut map = HashMap::new();
    map.insert("MOODWIRE_LEXICON_PATH", "/opt/lexicons/vader.txt");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.lexicon_path.as_deref(),
        Some(Path::new("/opt/lexicons/vader.txt"))
    );
}

#[test]
fn threshold_overrides() {
    let mut map = HashMap::new();
    map.insert("MOODWIRE_POSITIVE_THRESHOLD", "0.2");
    map.insert("MOODWIRE_NEGATIVE_THRESHOLD", "-0.1");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.positive_threshold - 0.2).abs() < f64::EPSILON);
    assert!((cfg.negative_threshold + 0.1).abs() < f64::EPSILON);
}

#[test]
fn threshold_outside_unit_range_is_rejected() {
    let mut map = HashMap::new();
    map.insert("MOODWIRE_POSITIVE_THRESHOLD", "1.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MOODWIRE_POSITIVE_THRESHOLD"),
        "expected InvalidEnvVar(MOODWIRE_POSITIVE_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn inverted_thresholds_are_rejected() {
    let mut map = HashMap::new();
    map.insert("MOODWIRE_POSITIVE_THRESHOLD", "-0.2");
    map.insert("MOODWIRE_NEGATIVE_THRESHOLD", "0.2");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MOODWIRE_NEGATIVE_THRESHOLD"),
        "expected InvalidEnvVar(MOODWIRE_NEGATIVE_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn build_app_config_ignores_unrelated_variables() {
    let map: HashMap<&str, &str> = HashMap::from([
        ("MOODWIRE_ENV", "bogus"),
        ("DATABASE_URL", "postgres://unused"),
    ]);
    let cfg = build_app_config(lookup_from_map(&map)).expect("unrelated vars must not fail");
    assert_eq!(cfg.log_level, "info");
}
