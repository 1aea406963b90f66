//! Sentiment pipeline orchestration.

use chrono::Utc;
use moodwire_core::AggregationPolicy;

use crate::aggregate::{aggregate, aggregate_batch};
use crate::classify::Thresholds;
use crate::scorer::{LexiconScorer, PolarityScorer};
use crate::store::{ScoreRecord, ScoreSink};
use crate::types::{
    PolarityScore, ScoredBatch, ScoredItem, SentimentLabel, SubjectSentiment, TextItem,
};

/// Scores batches of text with one scorer, one aggregation policy and one
/// set of classification thresholds, all fixed at construction.
pub struct SentimentPipeline {
    scorer: Box<dyn PolarityScorer>,
    policy: AggregationPolicy,
    thresholds: Thresholds,
}

impl std::fmt::Debug for SentimentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentPipeline")
            .field("scorer", &self.scorer.name())
            .field("policy", &self.policy)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl SentimentPipeline {
    pub fn new(
        scorer: impl PolarityScorer + 'static,
        policy: AggregationPolicy,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            scorer: Box::new(scorer),
            policy,
            thresholds,
        }
    }

    /// Built-in lexicon scorer with the default `±0.05` thresholds.
    #[must_use]
    pub fn with_policy(policy: AggregationPolicy) -> Self {
        Self::new(LexiconScorer::default(), policy, Thresholds::default())
    }

    #[must_use]
    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    #[must_use]
    pub fn score_text(&self, text: &str) -> PolarityScore {
        self.scorer.score(text)
    }

    #[must_use]
    pub fn classify(&self, score: &PolarityScore) -> SentimentLabel {
        self.thresholds.classify(score)
    }

    /// Score every item, then aggregate the batch under the configured policy.
    ///
    /// An empty batch yields a neutral aggregate.
    #[must_use]
    pub fn score_batch(&self, items: Vec<TextItem>) -> ScoredBatch {
        let per_item: Vec<PolarityScore> = items
            .iter()
            .map(|item| self.scorer.score(&item.body))
            .collect();
        let aggregate = aggregate_batch(self.policy, self.scorer.as_ref(), &items, &per_item);

        tracing::debug!(
            scorer = self.scorer.name(),
            policy = %self.policy,
            items = items.len(),
            compound = aggregate.compound,
            "scored batch"
        );

        let scored = items
            .into_iter()
            .zip(per_item)
            .map(|(item, score)| ScoredItem { item, score })
            .collect();
        ScoredBatch::new(scored, aggregate, self.policy, self.thresholds)
    }

    /// Mean compound sentiment per named subject, in input order.
    ///
    /// Always averages per-item scores regardless of the pipeline policy, so
    /// subjects with different item counts stay comparable.
    #[must_use]
    pub fn compare(&self, subjects: &[(String, Vec<TextItem>)]) -> Vec<SubjectSentiment> {
        subjects
            .iter()
            .map(|(name, items)| {
                let scores: Vec<PolarityScore> = items
                    .iter()
                    .map(|item| self.scorer.score(&item.body))
                    .collect();
                let mean_compound = aggregate(&scores).compound;
                SubjectSentiment {
                    name: name.clone(),
                    mean_compound,
                    item_count: items.len(),
                    label: self.thresholds.classify_compound(mean_compound),
                }
            })
            .collect()
    }

    /// Save the batch aggregate to `sink`, logging instead of failing.
    ///
    /// Returns whether the record was stored. The batch stays valid either way.
    pub fn persist_best_effort(
        &self,
        sink: &dyn ScoreSink,
        batch: &ScoredBatch,
        context: &str,
    ) -> bool {
        let record = ScoreRecord::from_batch(batch, context, Utc::now());
        match sink.save(&record) {
            Ok(()) => {
                tracing::info!(context, compound = record.score.compound, "saved sentiment score");
                true
            }
            Err(e) => {
                tracing::warn!(context, error = %e, "failed to save sentiment score");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SentimentError;

    struct FailingSink;

    impl ScoreSink for FailingSink {
        fn save(&self, _record: &ScoreRecord) -> Result<(), SentimentError> {
            Err(SentimentError::Persistence {
                path: "/dev/full".to_string(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    struct CountingSink(std::cell::Cell<usize>);

    impl ScoreSink for CountingSink {
        fn save(&self, _record: &ScoreRecord) -> Result<(), SentimentError> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    /// Scores every text by its length, to observe which texts get scored.
    struct LengthScorer;

    impl PolarityScorer for LengthScorer {
        fn name(&self) -> &'static str {
            "length"
        }

        #[allow(clippy::cast_precision_loss)]
        fn score(&self, text: &str) -> PolarityScore {
            PolarityScore {
                compound: text.len() as f64 / 100.0,
                ..PolarityScore::NEUTRAL
            }
        }
    }

    fn items(bodies: &[&str]) -> Vec<TextItem> {
        bodies
            .iter()
            .enumerate()
            .map(|(i, body)| TextItem::new(i.to_string(), *body, "test"))
            .collect()
    }

    #[test]
    fn empty_batch_is_neutral_under_both_policies() {
        for policy in [AggregationPolicy::WholeBatch, AggregationPolicy::PerItemMean] {
            let batch = SentimentPipeline::with_policy(policy).score_batch(Vec::new());
            assert_eq!(batch.aggregate(), PolarityScore::NEUTRAL);
            assert_eq!(batch.label(), SentimentLabel::Neutral);
            assert!(batch.is_empty());
        }
    }

    #[test]
    fn whole_batch_scores_the_joined_text() {
        let pipeline = SentimentPipeline::new(
            LengthScorer,
            AggregationPolicy::WholeBatch,
            Thresholds::default(),
        );
        let batch = pipeline.score_batch(items(&["abcd", "ef"]));
        // "abcd ef" is 7 bytes.
        assert!((batch.aggregate().compound - 0.07).abs() < 1e-12);
    }

    #[test]
    fn per_item_mean_averages_item_scores() {
        let pipeline = SentimentPipeline::new(
            LengthScorer,
            AggregationPolicy::PerItemMean,
            Thresholds::default(),
        );
        let batch = pipeline.score_batch(items(&["abcd", "ef"]));
        assert!((batch.aggregate().compound - 0.03).abs() < 1e-12);
    }

    #[test]
    fn batch_keeps_items_in_input_order() {
        let pipeline = SentimentPipeline::with_policy(AggregationPolicy::PerItemMean);
        let batch = pipeline.score_batch(items(&["a", "b", "c"]));
        let ids: Vec<&str> = batch.items().iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn compare_reports_each_subject() {
        let pipeline = SentimentPipeline::with_policy(AggregationPolicy::WholeBatch);
        let subjects = vec![
            ("acme".to_string(), items(&["I love acme", "acme is great"])),
            ("globex".to_string(), items(&["globex is terrible"])),
            ("initech".to_string(), Vec::new()),
        ];
        let results = pipeline.compare(&subjects);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "acme");
        assert_eq!(results[0].item_count, 2);
        assert_eq!(results[0].label, SentimentLabel::Positive);
        assert_eq!(results[1].label, SentimentLabel::Negative);
        assert_eq!(results[2].mean_compound, 0.0);
        assert_eq!(results[2].label, SentimentLabel::Neutral);
    }

    #[test]
    fn failed_save_is_reported_not_raised() {
        let pipeline = SentimentPipeline::with_policy(AggregationPolicy::WholeBatch);
        let batch = pipeline.score_batch(items(&["I love this!"]));
        assert!(!pipeline.persist_best_effort(&FailingSink, &batch, "test"));
        // The batch is still usable after the failed save.
        assert_eq!(batch.label(), SentimentLabel::Positive);
    }

    #[test]
    fn successful_save_reaches_sink() {
        let pipeline = SentimentPipeline::with_policy(AggregationPolicy::WholeBatch);
        let batch = pipeline.score_batch(items(&["fine"]));
        let sink = CountingSink(std::cell::Cell::new(0));
        assert!(pipeline.persist_best_effort(&sink, &batch, "test"));
        assert_eq!(sink.0.get(), 1);
    }
}
