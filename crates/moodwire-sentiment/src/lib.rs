//! Lexicon-based sentiment scoring for short texts.
//!
//! Scores headlines and social posts with a VADER-style rule set, reduces a
//! batch to one aggregate score under a configurable [`AggregationPolicy`],
//! and classifies compound scores into positive, neutral and negative labels.
//! The [`sources`] module fetches batches from `NewsAPI` and Twitter, and
//! [`store`] appends aggregate scores to dated JSON-lines files.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod pipeline;
pub mod scorer;
pub mod select;
pub mod sources;
pub mod store;
pub mod types;

pub use aggregate::{aggregate, aggregate_batch};
pub use classify::{classify, Thresholds};
pub use error::SentimentError;
pub use lexicon::Lexicon;
pub use moodwire_core::AggregationPolicy;
pub use normalize::{clean_text, join_bodies};
pub use pipeline::SentimentPipeline;
pub use scorer::{LexiconScorer, PolarityScorer};
pub use select::{distinct_authors, filter_by_author, filter_by_source};
pub use sources::{search_query, NewsApiClient, NewsApiConfig, TwitterClient, TwitterConfig};
pub use store::{JsonLinesStore, ScoreRecord, ScoreSink};
pub use types::{
    PolarityScore, ScoredBatch, ScoredItem, SentimentLabel, SubjectSentiment, TextItem,
};
