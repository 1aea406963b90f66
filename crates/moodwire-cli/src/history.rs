//! Read-only view of saved scores.

use chrono::{NaiveDate, Utc};
use moodwire_core::AppConfig;
use moodwire_sentiment::JsonLinesStore;

/// Print the records saved on `date` (today, UTC, when `None`).
///
/// # Errors
///
/// Returns an error if the day's file exists but cannot be read or parsed.
pub(crate) fn run_history(config: &AppConfig, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let store = JsonLinesStore::new(&config.scores_dir);
    let records = store.read_day(date)?;

    if records.is_empty() {
        println!(
            "no scores saved on {}; run a command with --save first",
            date.format("%Y-%m-%d")
        );
        return Ok(());
    }

    println!(
        "{:<10}{:<10}{:<10}{:<8}{:<8}CONTEXT",
        "TIME", "COMPOUND", "LABEL", "POLICY", "ITEMS"
    );
    for record in &records {
        println!(
            "{:<10}{:<10.4}{:<10}{:<8}{:<8}{}",
            record.captured_at.format("%H:%M:%S").to_string(),
            record.score.compound,
            record.label,
            record.policy.to_string(),
            record.item_count,
            record.context
        );
    }

    Ok(())
}
