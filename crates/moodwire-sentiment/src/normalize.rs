//! Turning fetched text items into scorer input.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::TextItem;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bhttps?://\S+").expect("valid url regex"));

/// Clean raw fetched text: drop links and collapse whitespace runs.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let without_urls = URL_RE.replace_all(raw, " ");
    without_urls.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Item bodies in input order, for scoring one item at a time.
#[must_use]
pub fn item_texts(items: &[TextItem]) -> Vec<&str> {
    items.iter().map(|item| item.body.as_str()).collect()
}

/// All item bodies joined with a single space, in input order.
///
/// An empty slice yields an empty string.
#[must_use]
pub fn join_bodies(items: &[TextItem]) -> String {
    item_texts(items).join(" ")
}
