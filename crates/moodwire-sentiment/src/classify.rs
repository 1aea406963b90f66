//! Compound score to label mapping.

use serde::{Deserialize, Serialize};

use crate::types::{PolarityScore, SentimentLabel};

/// Compound at or above this is positive.
pub const DEFAULT_POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound at or below this is negative.
pub const DEFAULT_NEGATIVE_THRESHOLD: f64 = -0.05;

/// Inclusive classification bounds on the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE_THRESHOLD,
            negative: DEFAULT_NEGATIVE_THRESHOLD,
        }
    }
}

impl Thresholds {
    #[must_use]
    pub fn new(positive: f64, negative: f64) -> Self {
        Self { positive, negative }
    }

    #[must_use]
    pub fn classify(&self, score: &PolarityScore) -> SentimentLabel {
        self.classify_compound(score.compound)
    }

    #[must_use]
    pub fn classify_compound(&self, compound: f64) -> SentimentLabel {
        if compound >= self.positive {
            SentimentLabel::Positive
        } else if compound <= self.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Classify with the default `±0.05` bounds.
#[must_use]
pub fn classify(score: &PolarityScore) -> SentimentLabel {
    Thresholds::default().classify(score)
}
