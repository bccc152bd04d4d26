//! Fragment cleanup after selection.
//!
//! - drop share widgets (by class token or by their "Share this article" label)
//!   without touching surrounding content
//! - drop "Back to blog" links
//! - unwrap a lone `div|section|article|main` wrapper, repeatedly
//!
//! Output is re-serialized from the parse tree, so tags are always balanced.

use scraper::{ElementRef, Html, node::Node};

/// Wrappers that carry no content of their own.
const CONTAINERS: [&str; 4] = ["div", "section", "article", "main"];

const SHARE_LABEL: &str = "Share this article";

/// Content that keeps a block alive unless it sits inside a link.
const MEDIA: [&str; 7] = ["img", "picture", "video", "table", "pre", "figure", "iframe"];

/// Arrows that may lead a back link label.
const BACK_ARROWS: [&str; 4] = ["<-", "←", "⟵", "«"];

/// Full cleanup: strip boilerplate, unwrap, trim.
pub fn normalize(fragment: &str) -> String {
    let mut current = strip_boilerplate(fragment.trim()).trim().to_owned();
    while let Some(inner) = unwrap_single_container(&current) {
        current = inner.trim().to_owned();
    }
    current
}

/// Inner HTML of the only child when that child is a container.
///
/// Any sibling text, comment or element blocks the unwrap.
fn unwrap_single_container(fragment: &str) -> Option<String> {
    let html = Html::parse_fragment(fragment);
    let root = html.root_element();

    let mut only = None;
    for child in root.children() {
        match child.value() {
            Node::Text(text) if text.trim().is_empty() => {}
            Node::Element(_) if only.is_none() => only = ElementRef::wrap(child),
            _ => return None,
        }
    }

    only.filter(|el| CONTAINERS.contains(&el.value().name()))
        .map(|el| el.inner_html())
}

fn strip_boilerplate(fragment: &str) -> String {
    let mut html = Html::parse_fragment(fragment);
    let root = html.root_element();
    let root_id = root.id();

    let mut elements = root.children().filter(|c| c.value().is_element());
    let lone = match (elements.next(), elements.next()) {
        (Some(only), None) => Some(only.id()),
        _ => None,
    };

    let mut doomed = Vec::new();
    for node in root.descendants().skip(1) {
        match node.value() {
            Node::Element(el) => {
                if el.classes().any(is_share_class) {
                    doomed.push(node.id());
                } else if el.name() == "a"
                    && let Some(link) = ElementRef::wrap(node)
                    && is_back_link(link)
                {
                    doomed.push(node.id());
                }
            }
            Node::Text(text) if is_share_label(text) => {
                // Widest ancestor made of nothing but the label and share links.
                let widget = node
                    .ancestors()
                    .take_while(|a| a.id() != root_id && Some(a.id()) != lone)
                    .filter_map(ElementRef::wrap)
                    .take_while(|a| holds_only_share(*a))
                    .last();
                doomed.push(widget.map_or(node.id(), |w| w.id()));
            }
            _ => {}
        }
    }

    for id in doomed {
        if let Some(mut node) = html.tree.get_mut(id) {
            node.detach();
        }
    }
    html.root_element().inner_html()
}

/// Text that is the share label alone, optionally followed by a colon.
fn is_share_label(text: &str) -> bool {
    let text = text.trim();
    let text = text.strip_suffix(':').unwrap_or(text).trim_end();
    text.eq_ignore_ascii_case(SHARE_LABEL)
}

/// Every text and media node in `el` is the share label or sits in a link.
fn holds_only_share(el: ElementRef) -> bool {
    el.descendants().all(|node| {
        let linked = || {
            node.ancestors()
                .take_while(|a| a.id() != el.id())
                .any(|a| a.value().as_element().is_some_and(|e| e.name() == "a"))
        };
        match node.value() {
            Node::Text(text) => text.trim().is_empty() || is_share_label(text) || linked(),
            Node::Element(e) => !MEDIA.contains(&e.name()) || linked(),
            _ => true,
        }
    })
}

/// `share`, or a hyphenated class with a `share` segment.
fn is_share_class(class: &str) -> bool {
    class
        .split(['-', '_'])
        .any(|segment| segment.eq_ignore_ascii_case("share"))
}

fn is_back_link(link: ElementRef) -> bool {
    let Some(href) = link.value().attr("href") else {
        return false;
    };
    is_blog_href(href) && is_back_label(&link.text().collect::<String>())
}

/// `blog`, `blog.html` or `blog/`, optionally rooted or relative.
fn is_blog_href(href: &str) -> bool {
    let mut href = href.trim();
    loop {
        if let Some(rest) = href.strip_prefix("./") {
            href = rest;
        } else if let Some(rest) = href.strip_prefix("../") {
            href = rest;
        } else {
            break;
        }
    }
    let href = href.strip_prefix('/').unwrap_or(href);
    matches!(href, "blog" | "blog.html" | "blog/" | "blog/index.html")
}

fn is_back_label(text: &str) -> bool {
    let mut label = text.trim();
    for arrow in BACK_ARROWS {
        if let Some(rest) = label.strip_prefix(arrow) {
            label = rest.trim_start();
            break;
        }
    }
    label
        .get(..7)
        .is_some_and(|head| head.eq_ignore_ascii_case("back to"))
}
