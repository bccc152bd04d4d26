//! Rewrite site-relative asset references for pages one directory down.

use regex::Regex;
use std::sync::LazyLock;

static ASSET_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<attr>\s(?:href|src)\s*=\s*)(?P<q>["'])(?P<path>(?:css/|js/|public/|favicon\.ico)[^"']*)"#,
    )
    .unwrap()
});

/// Prefix `../` to `href`/`src` values under `css/`, `js/`, `public/` or
/// pointing at `favicon.ico`. Anything else is left alone.
pub fn adjust_asset_paths(html: &str) -> String {
    ASSET_REF
        .replace_all(html, "${attr}${q}../${path}")
        .into_owned()
}
