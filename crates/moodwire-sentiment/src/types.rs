use moodwire_core::AggregationPolicy;
use serde::{Deserialize, Serialize};

use crate::classify::Thresholds;

/// A single piece of text handed over by a fetch layer for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    /// Opaque identifier (article URL, tweet id, or a position index).
    pub id: String,
    /// The text to score.
    pub body: String,
    /// Where the item came from: publisher name, `twitter`, `stdin`, ...
    pub source: String,
    pub author: Option<String>,
}

impl TextItem {
    pub fn new(id: impl Into<String>, body: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            source: source.into(),
            author: None,
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Four-axis polarity score.
///
/// `negative + neutral + positive` is 1.0 up to floating-point error.
/// `compound` is normalized on its own into `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScore {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

impl PolarityScore {
    /// Score of empty or valence-free text.
    pub const NEUTRAL: Self = Self {
        negative: 0.0,
        neutral: 1.0,
        positive: 0.0,
        compound: 0.0,
    };

    #[must_use]
    pub fn proportion_sum(&self) -> f64 {
        self.negative + self.neutral + self.positive
    }
}

impl Default for PolarityScore {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Display color used by the dashboards for this label.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "green",
            SentimentLabel::Negative => "red",
            SentimentLabel::Neutral => "gray",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        })
    }
}

/// One input item together with its own score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub item: TextItem,
    pub score: PolarityScore,
}

/// Result of scoring one batch of items. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBatch {
    items: Vec<ScoredItem>,
    aggregate: PolarityScore,
    policy: AggregationPolicy,
    thresholds: Thresholds,
}

impl ScoredBatch {
    pub(crate) fn new(
        items: Vec<ScoredItem>,
        aggregate: PolarityScore,
        policy: AggregationPolicy,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            items,
            aggregate,
            policy,
            thresholds,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[ScoredItem] {
        &self.items
    }

    #[must_use]
    pub fn aggregate(&self) -> PolarityScore {
        self.aggregate
    }

    #[must_use]
    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Label of the aggregate score.
    #[must_use]
    pub fn label(&self) -> SentimentLabel {
        self.thresholds.classify(&self.aggregate)
    }

    /// Labels of the individual items, in input order.
    pub fn item_labels(&self) -> impl Iterator<Item = SentimentLabel> + '_ {
        self.items
            .iter()
            .map(|scored| self.thresholds.classify(&scored.score))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Mean compound sentiment for one named subject (a brand, a competitor, a hashtag).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectSentiment {
    pub name: String,
    /// Mean compound across the subject's items. 0.0 if there are none.
    pub mean_compound: f64,
    pub item_count: usize,
    pub label: SentimentLabel,
}
