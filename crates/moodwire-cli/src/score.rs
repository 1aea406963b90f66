//! Scoring free text from arguments or stdin.

use std::io::BufRead;

use moodwire_core::AppConfig;
use moodwire_sentiment::{JsonLinesStore, SentimentPipeline, TextItem};

use crate::output::{print_batch, save_if_requested};

/// Turn argument texts into items, or read one item per non-blank stdin line
/// when no arguments were given.
pub(crate) fn collect_items(
    args: Vec<String>,
    stdin: impl BufRead,
) -> anyhow::Result<Vec<TextItem>> {
    if !args.is_empty() {
        return Ok(args
            .into_iter()
            .enumerate()
            .map(|(idx, text)| TextItem::new(idx.to_string(), text, "cli"))
            .collect());
    }

    let mut items = Vec::new();
    for (idx, line) in stdin.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        items.push(TextItem::new(idx.to_string(), line, "stdin"));
    }
    Ok(items)
}

/// Score the given texts and print the result.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub(crate) fn run_score(
    config: &AppConfig,
    pipeline: &SentimentPipeline,
    text: Vec<String>,
    save: bool,
) -> anyhow::Result<()> {
    let items = collect_items(text, std::io::stdin().lock())?;
    let show_items = items.len() > 1;
    let batch = pipeline.score_batch(items);

    print_batch(&batch, "text", show_items);

    let store = JsonLinesStore::new(&config.scores_dir);
    save_if_requested(pipeline, &store, &batch, "text", save);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_win_over_stdin() {
        let items = collect_items(vec!["great".to_string()], "ignored\n".as_bytes()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].body, "great");
        assert_eq!(items[0].source, "cli");
    }

    #[test]
    fn stdin_lines_become_items_skipping_blanks() {
        let items = collect_items(Vec::new(), "first\n\n  \nsecond\n".as_bytes()).unwrap();
        let bodies: Vec<&str> = items.iter().map(|i| i.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
        assert_eq!(items[1].id, "3");
        assert_eq!(items[0].source, "stdin");
    }

    #[test]
    fn empty_stdin_is_empty_batch() {
        let items = collect_items(Vec::new(), "".as_bytes()).unwrap();
        assert!(items.is_empty());
    }
}
