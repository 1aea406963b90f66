//! Command handlers that fetch text from `NewsAPI` or Twitter before scoring.
//!
//! Fetch failures are reported as errors; they never reach the scoring path.

use anyhow::Context;
use futures::future::try_join_all;
use moodwire_core::AppConfig;
use moodwire_sentiment::{
    distinct_authors, filter_by_author, filter_by_source, search_query, select, JsonLinesStore,
    NewsApiClient, NewsApiConfig, SentimentPipeline, TwitterClient, TwitterConfig,
};

use crate::output::{print_batch, print_comparison, save_if_requested};

/// Flags of the `headlines` command.
#[derive(Debug)]
pub(crate) struct HeadlineOptions<'a> {
    pub country: Option<&'a str>,
    pub source: Option<&'a str>,
    pub author: Option<&'a str>,
    pub list_authors: bool,
    pub save: bool,
    pub show_items: bool,
}

/// Record context for a headline batch: the country plus whichever of the
/// publisher and author filters actually narrowed it.
pub(crate) fn headline_context(
    country: &str,
    source: Option<&str>,
    author: Option<&str>,
) -> String {
    fn narrowing(value: Option<&str>) -> Option<&str> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != select::ALL)
    }
    let mut parts = vec![format!("headlines:{country}")];
    if let Some(source) = narrowing(source) {
        parts.push(format!("source={source}"));
    }
    if let Some(author) = narrowing(author) {
        parts.push(format!("author={author}"));
    }
    parts.join(":")
}

fn twitter_client(config: &AppConfig) -> anyhow::Result<TwitterClient> {
    let twitter_config = TwitterConfig::from_app_config(config)?;
    TwitterClient::new(&twitter_config).context("building Twitter client")
}

/// Fetch top headlines, optionally narrowed to one publisher and one author,
/// and score them.
///
/// # Errors
///
/// Returns an error if `NEWS_API_KEY` is missing or the fetch fails.
pub(crate) async fn run_headlines(
    config: &AppConfig,
    pipeline: &SentimentPipeline,
    options: &HeadlineOptions<'_>,
) -> anyhow::Result<()> {
    let news_config = NewsApiConfig::from_app_config(config)?;
    let client = NewsApiClient::new(&news_config).context("building NewsAPI client")?;
    let country = options
        .country
        .map_or_else(|| config.news_country.clone(), str::to_lowercase);

    let items = client
        .top_headlines(&country)
        .await
        .with_context(|| format!("fetching top headlines for '{country}'"))?;

    if options.list_authors {
        let authors = distinct_authors(&items);
        if authors.is_empty() {
            println!("no authors listed in the current '{country}' headlines");
        }
        for author in authors {
            println!("{author}");
        }
        return Ok(());
    }

    let items = filter_by_source(items, options.source);
    let items = filter_by_author(items, options.author);
    let context = headline_context(&country, options.source, options.author);
    if items.is_empty() {
        println!("no headlines found for {context}; the score below is neutral");
    }

    let batch = pipeline.score_batch(items);
    print_batch(&batch, &context, options.show_items);

    let store = JsonLinesStore::new(&config.scores_dir);
    save_if_requested(pipeline, &store, &batch, &context, options.save);
    Ok(())
}

/// Fetch recent tweets for `query` and score them.
///
/// # Errors
///
/// Returns an error if `TWITTER_BEARER_TOKEN` is missing or the fetch fails.
pub(crate) async fn run_tweets(
    config: &AppConfig,
    pipeline: &SentimentPipeline,
    query: &str,
    count: u32,
    save: bool,
    show_items: bool,
) -> anyhow::Result<()> {
    let client = twitter_client(config)?;
    let items = client
        .search_recent(query, count)
        .await
        .with_context(|| format!("searching tweets for '{query}'"))?;

    let context = format!("tweets:{query}");
    let batch = pipeline.score_batch(items);
    print_batch(&batch, &context, show_items);

    let store = JsonLinesStore::new(&config.scores_dir);
    save_if_requested(pipeline, &store, &batch, &context, save);
    Ok(())
}

/// Fetch tweets for a brand and each competitor concurrently, then print the
/// mean compound per subject.
///
/// # Errors
///
/// Returns an error if `TWITTER_BEARER_TOKEN` is missing or any fetch fails.
pub(crate) async fn run_compare(
    config: &AppConfig,
    pipeline: &SentimentPipeline,
    brand: &str,
    competitors: &[String],
    count: u32,
) -> anyhow::Result<()> {
    let client = twitter_client(config)?;
    let names: Vec<&str> = std::iter::once(brand)
        .chain(competitors.iter().map(String::as_str))
        .collect();

    let fetches = names.iter().map(|name| {
        let client = &client;
        async move {
            let items = client
                .search_recent(&search_query(&[*name], false), count)
                .await
                .with_context(|| format!("searching tweets for '{name}'"))?;
            tracing::info!(subject = name, items = items.len(), "fetched comparison tweets");
            anyhow::Ok(((*name).to_string(), items))
        }
    });
    let subjects = try_join_all(fetches).await?;

    let results = pipeline.compare(&subjects);
    print_comparison(&results);

    if let Some(best) = results
        .iter()
        .max_by(|a, b| a.mean_compound.total_cmp(&b.mean_compound))
    {
        println!();
        println!("most positive: {} ({:.4})", best.name, best.mean_compound);
    }
    Ok(())
}
