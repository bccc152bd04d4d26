//! Body selection on the parsed document.
//!
//! Tiers, first non-blank match wins:
//!
//! 1. `div|section|article` carrying the marker class
//! 2. first `article` or `main`
//! 3. `body`
//!
//! Selection runs on the html5ever tree, so the inner HTML of a marked
//! `div` keeps nested `div`s whole.

use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Elements that may carry the marker class.
const MARKER_TAGS: [&str; 3] = ["div", "section", "article"];

static ARTICLE_OR_MAIN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article, main").unwrap());

static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Build the tier-1 selector for `class`.
///
/// `None` when the class is not a valid CSS identifier; tier 1 is then
/// skipped.
pub fn marker_selector(class: &str) -> Option<Selector> {
    let query = MARKER_TAGS
        .iter()
        .map(|tag| format!("{tag}.{class}"))
        .collect::<Vec<_>>()
        .join(", ");
    Selector::parse(&query).ok()
}

/// A single class token usable in [`marker_selector`].
pub fn is_marker_class(class: &str) -> bool {
    !class.is_empty()
        && class.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        && marker_selector(class).is_some()
}

/// Inner HTML of the best matching element, or `None` if every tier is blank.
pub fn select_body(html: &str, marker: Option<&Selector>) -> Option<String> {
    let doc = Html::parse_document(html);

    [marker, Some(&*ARTICLE_OR_MAIN), Some(&*BODY)]
        .into_iter()
        .flatten()
        .find_map(|selector| {
            doc.select(selector)
                .next()
                .map(|el| el.inner_html())
                .filter(|inner| !inner.trim().is_empty())
        })
}
