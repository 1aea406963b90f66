//! Batch-level score reduction.

use moodwire_core::AggregationPolicy;

use crate::normalize::join_bodies;
use crate::scorer::PolarityScorer;
use crate::types::{PolarityScore, TextItem};

/// Field-wise arithmetic mean of the given scores.
///
/// An empty slice aggregates to [`PolarityScore::NEUTRAL`].
#[must_use]
pub fn aggregate(scores: &[PolarityScore]) -> PolarityScore {
    if scores.is_empty() {
        return PolarityScore::NEUTRAL;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = scores.len() as f64;
    let sum = scores.iter().fold(
        PolarityScore {
            negative: 0.0,
            neutral: 0.0,
            positive: 0.0,
            compound: 0.0,
        },
        |acc, s| PolarityScore {
            negative: acc.negative + s.negative,
            neutral: acc.neutral + s.neutral,
            positive: acc.positive + s.positive,
            compound: acc.compound + s.compound,
        },
    );
    PolarityScore {
        negative: sum.negative / n,
        neutral: sum.neutral / n,
        positive: sum.positive / n,
        compound: sum.compound / n,
    }
}

/// Aggregate a batch under `policy`.
///
/// `per_item` must hold the scores of `items` in the same order; it is used
/// by [`AggregationPolicy::PerItemMean`]. [`AggregationPolicy::WholeBatch`]
/// rescores the joined text instead.
pub fn aggregate_batch(
    policy: AggregationPolicy,
    scorer: &dyn PolarityScorer,
    items: &[TextItem],
    per_item: &[PolarityScore],
) -> PolarityScore {
    match policy {
        AggregationPolicy::WholeBatch => scorer.score(&join_bodies(items)),
        AggregationPolicy::PerItemMean => aggregate(per_item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::LexiconScorer;

    fn s(negative: f64, neutral: f64, positive: f64, compound: f64) -> PolarityScore {
        PolarityScore {
            negative,
            neutral,
            positive,
            compound,
        }
    }

    #[test]
    fn empty_mean_is_neutral() {
        assert_eq!(aggregate(&[]), PolarityScore::NEUTRAL);
    }

    #[test]
    fn mean_of_duplicates_is_invariant() {
        let score = s(0.25, 0.5, 0.25, 0.125);
        assert_eq!(aggregate(&[score, score]), score);
    }

    #[test]
    fn mean_is_field_wise() {
        let mean = aggregate(&[s(0.0, 1.0, 0.0, 0.0), s(0.5, 0.5, 0.0, -0.5)]);
        assert_eq!(mean, s(0.25, 0.75, 0.0, -0.25));
    }

    #[test]
    fn whole_batch_on_empty_items_is_neutral() {
        let scorer = LexiconScorer::default();
        let score = aggregate_batch(AggregationPolicy::WholeBatch, &scorer, &[], &[]);
        assert_eq!(score, PolarityScore::NEUTRAL);
    }

    #[test]
    fn per_item_mean_ignores_joined_text() {
        let scorer = LexiconScorer::default();
        let items = vec![TextItem::new("1", "I love this!", "test")];
        let per_item = vec![s(0.0, 1.0, 0.0, 0.0)];
        let score = aggregate_batch(AggregationPolicy::PerItemMean, &scorer, &items, &per_item);
        assert_eq!(score, per_item[0]);
    }
}
