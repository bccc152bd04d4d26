//! Post page rendering: literal token substitution in `post.html`.

use crate::{
    config::SiteInfo,
    extract::{PLACEHOLDER, excerpt},
    post::Post,
    utils::date::human,
};

/// A rendered post page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    /// Excerpt used because the post has no description. The caller
    /// decides whether to store it.
    pub derived_description: Option<String>,
}

/// Description for `post`: the stored one, else an excerpt of `body`.
///
/// Returns `(description, derived)`, where `derived` is set only when the
/// excerpt was used. The placeholder body never yields an excerpt.
pub fn describe(post: &Post, body: &str) -> (String, Option<String>) {
    if let Some(description) = post.description() {
        return (description.to_owned(), None);
    }
    let derived = (body != PLACEHOLDER).then(|| excerpt(body)).flatten();
    (derived.clone().unwrap_or_default(), derived)
}

/// Substitute every post token in `template`.
///
/// `{{POST_BODY}}` goes last, so tokens that happen to appear inside the
/// body are left as written.
pub fn render_page(template: &str, post: &Post, body: &str, site: &SiteInfo) -> RenderedPage {
    let (description, derived_description) = describe(post, body);
    let title = post.title();
    let author = post.author(&site.default_author);
    let page_title = format!("{title} - {}", site.name);
    let keywords = post.tags.join(", ");
    let canonical = site.absolute_url(&post.page_path());
    let date = post.display_date().map(human).unwrap_or_default();
    let cta = post
        .access_link()
        .map(|(url, label)| header_cta(url, label))
        .unwrap_or_default();

    let tokens = [
        ("{{PAGE_TITLE}}", page_title.as_str()),
        ("{{META_DESCRIPTION}}", description.as_str()),
        ("{{META_KEYWORDS}}", keywords.as_str()),
        ("{{META_AUTHOR}}", author),
        ("{{CANONICAL_URL}}", canonical.as_str()),
        ("{{OG_TITLE}}", title),
        ("{{OG_DESCRIPTION}}", description.as_str()),
        ("{{TWITTER_TITLE}}", title),
        ("{{TWITTER_DESCRIPTION}}", description.as_str()),
        ("{{POST_TITLE}}", title),
        ("{{POST_DESCRIPTION}}", description.as_str()),
        ("{{POST_AUTHOR}}", author),
        ("{{POST_DATE}}", date.as_str()),
        ("{{HEADER_CTA}}", cta.as_str()),
        ("{{POST_BODY}}", body),
    ];

    let html = tokens
        .into_iter()
        .fold(template.to_owned(), |html, (token, value)| html.replace(token, value));

    RenderedPage {
        html,
        derived_description,
    }
}

fn header_cta(url: &str, label: &str) -> String {
    format!(
        r#"<div class="header-cta">
  <a href="{url}" class="btn btn-primary" target="_blank" rel="noopener noreferrer">{label}</a>
</div>"#
    )
}
