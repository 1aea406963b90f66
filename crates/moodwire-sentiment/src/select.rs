//! Source and author selection over a fetched batch.

use std::collections::HashSet;

use crate::types::TextItem;

/// Selection value meaning "no filter", as offered by the dashboards' pickers.
pub const ALL: &str = "All";

fn keep_all(selection: Option<&str>) -> bool {
    selection.is_none_or(|s| s.trim().is_empty() || s == ALL)
}

/// Keep the items written by `author`. `None` or [`ALL`] keeps everything.
#[must_use]
pub fn filter_by_author(items: Vec<TextItem>, author: Option<&str>) -> Vec<TextItem> {
    if keep_all(author) {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.author.as_deref() == author)
        .collect()
}

/// Keep the items published by `source`. `None` or [`ALL`] keeps everything.
#[must_use]
pub fn filter_by_source(items: Vec<TextItem>, source: Option<&str>) -> Vec<TextItem> {
    if keep_all(source) {
        return items;
    }
    items
        .into_iter()
        .filter(|item| Some(item.source.as_str()) == source)
        .collect()
}

/// Distinct authors in first-seen order.
#[must_use]
pub fn distinct_authors(items: &[TextItem]) -> Vec<&str> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| item.author.as_deref())
        .filter(|author| seen.insert(*author))
        .collect()
}
