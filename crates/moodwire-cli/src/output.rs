//! Plain-text tables for scored batches.

use moodwire_sentiment::{
    JsonLinesStore, PolarityScore, ScoredBatch, SentimentPipeline, SubjectSentiment,
};

/// Longest item text shown in an item table row.
const EXCERPT_CHARS: usize = 60;

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS - 3).collect();
    format!("{cut}...")
}

fn score_columns(score: &PolarityScore) -> String {
    format!(
        "{:<10.4}{:<8.3}{:<8.3}{:<8.3}",
        score.compound, score.negative, score.neutral, score.positive
    )
}

/// Print the aggregate of `batch`, and every item when `show_items` is set.
pub(crate) fn print_batch(batch: &ScoredBatch, context: &str, show_items: bool) {
    if show_items && !batch.is_empty() {
        println!(
            "{:<10}{:<8}{:<8}{:<8}{:<10}{:<20}TEXT",
            "COMPOUND", "NEG", "NEU", "POS", "LABEL", "AUTHOR"
        );
        for (scored, label) in batch.items().iter().zip(batch.item_labels()) {
            println!(
                "{}{:<10}{:<20}{}",
                score_columns(&scored.score),
                label,
                scored.item.author.as_deref().unwrap_or("-"),
                excerpt(&scored.item.body)
            );
        }
        println!();
    }

    let aggregate = batch.aggregate();
    let label = batch.label();
    println!("{context}: {} items, policy {}", batch.len(), batch.policy());
    println!(
        "{:<10}{:<8}{:<8}{:<8}{:<10}COLOR",
        "COMPOUND", "NEG", "NEU", "POS", "LABEL"
    );
    println!("{}{:<10}{}", score_columns(&aggregate), label, label.color());
}

pub(crate) fn print_comparison(results: &[SubjectSentiment]) {
    println!(
        "{:<25}{:<10}{:<8}{:<10}COLOR",
        "SUBJECT", "MEAN", "ITEMS", "LABEL"
    );
    for result in results {
        println!(
            "{:<25}{:<10.4}{:<8}{:<10}{}",
            result.name,
            result.mean_compound,
            result.item_count,
            result.label,
            result.label.color()
        );
    }
}

/// Save the aggregate when requested. A failed save only prints a warning.
pub(crate) fn save_if_requested(
    pipeline: &SentimentPipeline,
    store: &JsonLinesStore,
    batch: &ScoredBatch,
    context: &str,
    save: bool,
) {
    if !save {
        return;
    }
    if pipeline.persist_best_effort(store, batch, context) {
        println!("saved to {}", store.dir().display());
    } else {
        eprintln!(
            "warning: could not save score to {}; results above are still valid",
            store.dir().display()
        );
    }
}
