//! Plain-text excerpts for descriptions and index cards.

use scraper::{ElementRef, Html, Selector, node::Node};
use std::sync::LazyLock;

/// Excerpt length in characters, before the ellipsis.
pub const EXCERPT_CHARS: usize = 200;

/// Elements whose text never shows up on the page.
const HIDDEN: [&str; 4] = ["script", "style", "template", "noscript"];

/// Elements that separate words when flattened to text.
const BREAKS: [&str; 16] = [
    "address", "article", "aside", "blockquote", "br", "div", "footer", "h1", "h2", "h3",
    "h4", "h5", "h6", "li", "p", "section",
];

static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Excerpt of an HTML fragment.
///
/// Text of the first non-empty `<p>`, else of the whole fragment, with
/// whitespace collapsed and cut at [`EXCERPT_CHARS`] characters plus `...`.
pub fn excerpt(fragment: &str) -> Option<String> {
    let html = Html::parse_fragment(fragment);

    let first_paragraph = html
        .select(&PARAGRAPH)
        .map(|p| collapse(&text_of(p)))
        .find(|text| !text.is_empty());

    let text = first_paragraph.or_else(|| {
        let text = collapse(&text_of(html.root_element()));
        (!text.is_empty()).then_some(text)
    })?;

    Some(truncate(&text, EXCERPT_CHARS))
}

fn text_of(el: ElementRef) -> String {
    let mut out = String::new();
    collect_text(el, &mut out);
    out
}

fn collect_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) if HIDDEN.contains(&inner.name()) => {}
            Node::Element(inner) => {
                let breaks = BREAKS.contains(&inner.name());
                if breaks {
                    out.push(' ');
                }
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, out);
                }
                if breaks {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut at `max` characters, appending `...` when anything was dropped.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}
