//! End-to-end scoring through `SentimentPipeline`.

use moodwire_sentiment::{
    AggregationPolicy, JsonLinesStore, PolarityScore, SentimentLabel, SentimentPipeline,
    TextItem, Thresholds,
};

fn three_items() -> Vec<TextItem> {
    vec![
        TextItem::new("1", "I love this!", "test"),
        TextItem::new("2", "This is terrible.", "test"),
        TextItem::new("3", "It is a table.", "test"),
    ]
}

#[test]
fn per_item_scores_keep_their_signs() {
    let pipeline = SentimentPipeline::with_policy(AggregationPolicy::PerItemMean);
    let batch = pipeline.score_batch(three_items());

    let compounds: Vec<f64> = batch.items().iter().map(|s| s.score.compound).collect();
    assert!(compounds[0] > 0.0, "{compounds:?}");
    assert!(compounds[1] < 0.0, "{compounds:?}");
    assert!(compounds[2].abs() < 1e-9, "{compounds:?}");

    let labels: Vec<SentimentLabel> = batch.item_labels().collect();
    assert_eq!(
        labels,
        vec![
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral
        ]
    );
}

#[test]
fn per_item_mean_aggregate_is_bounded_and_neutral() {
    let pipeline = SentimentPipeline::with_policy(AggregationPolicy::PerItemMean);
    let batch = pipeline.score_batch(three_items());
    let aggregate = batch.aggregate();

    assert!(aggregate.compound > -1.0 && aggregate.compound < 1.0);
    assert!((aggregate.proportion_sum() - 1.0).abs() < 1e-6);
    assert_eq!(batch.label(), SentimentLabel::Neutral);
}

#[test]
fn policies_produce_different_aggregates() {
    let whole = SentimentPipeline::with_policy(AggregationPolicy::WholeBatch)
        .score_batch(three_items())
        .aggregate();
    let mean = SentimentPipeline::with_policy(AggregationPolicy::PerItemMean)
        .score_batch(three_items())
        .aggregate();

    assert!(
        (whole.compound - mean.compound).abs() > 1e-3,
        "whole={whole:?} mean={mean:?}"
    );
}

#[test]
fn whole_batch_matches_scoring_the_joined_text() {
    let pipeline = SentimentPipeline::with_policy(AggregationPolicy::WholeBatch);
    let batch = pipeline.score_batch(three_items());
    let joined = pipeline.score_text("I love this! This is terrible. It is a table.");
    assert_eq!(batch.aggregate(), joined);
}

#[test]
fn empty_text_and_empty_batch_are_neutral() {
    let pipeline = SentimentPipeline::with_policy(AggregationPolicy::WholeBatch);
    assert_eq!(pipeline.score_text(""), PolarityScore::NEUTRAL);
    assert_eq!(
        pipeline.score_batch(Vec::new()).aggregate(),
        PolarityScore::NEUTRAL
    );
}

#[test]
fn custom_thresholds_change_labels_not_scores() {
    let strict = SentimentPipeline::new(
        moodwire_sentiment::LexiconScorer::default(),
        AggregationPolicy::WholeBatch,
        Thresholds::new(0.9, -0.9),
    );
    let lenient = SentimentPipeline::with_policy(AggregationPolicy::WholeBatch);

    let a = strict.score_batch(three_items());
    let b = lenient.score_batch(three_items());
    assert_eq!(a.aggregate(), b.aggregate());
    assert_eq!(a.label(), SentimentLabel::Neutral);
    assert_eq!(b.label(), SentimentLabel::Positive);
}

#[test]
fn saved_batch_can_be_read_back() {
    let dir = std::env::temp_dir().join(format!("moodwire-it-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let store = JsonLinesStore::new(&dir);

    let pipeline = SentimentPipeline::with_policy(AggregationPolicy::WholeBatch);
    let batch = pipeline.score_batch(three_items());
    assert!(pipeline.persist_best_effort(&store, &batch, "it:three"));

    let today = chrono::Utc::now().date_naive();
    let records = store.read_day(today).expect("records should load");
    let record = records.last().expect("one record saved");
    assert_eq!(record.score, batch.aggregate());
    assert_eq!(record.item_count, 3);
    assert_eq!(record.context, "it:three");

    let _ = std::fs::remove_dir_all(&dir);
}
