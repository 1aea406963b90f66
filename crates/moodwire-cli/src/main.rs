use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use moodwire_core::{AggregationPolicy, AppConfig};
use moodwire_sentiment::{search_query, Lexicon, LexiconScorer, SentimentPipeline, Thresholds};
use tracing_subscriber::EnvFilter;

mod fetch;
mod history;
mod output;
mod score;

#[derive(Debug, Parser)]
#[command(name = "moodwire")]
#[command(about = "Sentiment scores for headlines, tweets and free text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score text given as arguments, or one item per stdin line
    Score {
        /// Texts to score; each argument is one item
        text: Vec<String>,
        /// Aggregation policy: `whole` or `mean` (defaults to MOODWIRE_AGGREGATION)
        #[arg(long)]
        policy: Option<AggregationPolicy>,
        /// Append the aggregate score to today's score file
        #[arg(long)]
        save: bool,
    },
    /// Score the current `NewsAPI` top headlines
    Headlines {
        /// Two-letter country code (defaults to MOODWIRE_NEWS_COUNTRY)
        #[arg(long)]
        country: Option<String>,
        /// Only score articles from this publisher ("All" keeps every article)
        #[arg(long)]
        source: Option<String>,
        /// Only score articles by this author ("All" keeps every article)
        #[arg(long)]
        author: Option<String>,
        /// List the authors in the current headlines and exit
        #[arg(long)]
        list_authors: bool,
        #[arg(long)]
        policy: Option<AggregationPolicy>,
        #[arg(long)]
        save: bool,
        /// Print every item with its own score
        #[arg(long)]
        items: bool,
    },
    /// Score recent tweets matching a search query or any of several keywords
    Tweets {
        /// Raw recent-search query
        #[arg(long, required_unless_present = "keywords", conflicts_with = "keywords")]
        query: Option<String>,
        /// Comma-separated keywords; a tweet matching any of them is fetched
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
        /// Keep retweets in the results
        #[arg(long)]
        include_retweets: bool,
        /// Number of tweets to fetch (10-100)
        #[arg(long, default_value = "50")]
        count: u32,
        #[arg(long)]
        policy: Option<AggregationPolicy>,
        #[arg(long)]
        save: bool,
        #[arg(long)]
        items: bool,
    },
    /// Compare mean tweet sentiment of a brand against its competitors
    Compare {
        #[arg(long)]
        brand: String,
        /// Competitor to compare against; repeat for several
        #[arg(long = "competitor", required = true)]
        competitors: Vec<String>,
        /// Tweets to fetch per subject (10-100)
        #[arg(long, default_value = "50")]
        count: u32,
    },
    /// Show the scores saved on one day
    History {
        /// Day to show as YYYYMMDD (defaults to today, UTC)
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map_err(|e| format!("expected a date as YYYYMMDD, got '{raw}': {e}"))
}

/// Build the scoring pipeline from config, with an optional policy override.
fn build_pipeline(
    config: &AppConfig,
    policy: Option<AggregationPolicy>,
) -> anyhow::Result<SentimentPipeline> {
    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::from_path(path)
            .with_context(|| format!("loading lexicon from {}", path.display()))?,
        None => Lexicon::builtin(),
    };
    Ok(SentimentPipeline::new(
        LexiconScorer::new(lexicon),
        policy.unwrap_or(config.aggregation),
        Thresholds::new(config.positive_threshold, config.negative_threshold),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = moodwire_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Score { text, policy, save } => {
            let pipeline = build_pipeline(&config, policy)?;
            score::run_score(&config, &pipeline, text, save)?;
        }
        Commands::Headlines {
            country,
            source,
            author,
            list_authors,
            policy,
            save,
            items,
        } => {
            let pipeline = build_pipeline(&config, policy)?;
            let options = fetch::HeadlineOptions {
                country: country.as_deref(),
                source: source.as_deref(),
                author: author.as_deref(),
                list_authors,
                save,
                show_items: items,
            };
            fetch::run_headlines(&config, &pipeline, &options).await?;
        }
        Commands::Tweets {
            query,
            keywords,
            include_retweets,
            count,
            policy,
            save,
            items,
        } => {
            let terms = query.map_or(keywords, |q| vec![q]);
            let query = search_query(&terms, include_retweets);
            anyhow::ensure!(!query.is_empty(), "no search keywords given");
            let pipeline = build_pipeline(&config, policy)?;
            fetch::run_tweets(&config, &pipeline, &query, count, save, items).await?;
        }
        Commands::Compare {
            brand,
            competitors,
            count,
        } => {
            let pipeline = build_pipeline(&config, None)?;
            fetch::run_compare(&config, &pipeline, &brand, &competitors, count).await?;
        }
        Commands::History { date } => {
            history::run_history(&config, date)?;
        }
    }

    Ok(())
}
