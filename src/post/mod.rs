//! Post records and the JSON store that holds them.
//!
//! ```text
//! posts.json ──► PostStore::load ──► gate::publish_due ──► PostStore::save
//!                      │
//!                      └── Post { slug, title, publish_at, approved, ... }
//! ```

pub mod gate;
mod store;

pub use store::{PostStore, StoreError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a post's body comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// An externally authored page at `source_path`.
    FullHtml,
    /// Legacy rich text: preview fragment first, then `<slug>.rtf`.
    #[default]
    Rtf,
}

/// One entry of `posts.json`.
///
/// Optional keys that are absent stay absent on save; unknown keys are kept
/// in `extra`, in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Earliest publication day, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<String>,

    #[serde(default)]
    pub approved: bool,

    #[serde(default)]
    pub published: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_label: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    pub fn source_type(&self) -> SourceType {
        self.source_type.unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Stored description, treating an empty string as missing.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    pub fn author<'a>(&'a self, default: &'a str) -> &'a str {
        self.author.as_deref().filter(|a| !a.is_empty()).unwrap_or(default)
    }

    /// `published_at`, falling back to `publish_at`.
    pub fn display_date(&self) -> Option<&str> {
        self.published_at.as_deref().or(self.publish_at.as_deref())
    }

    /// Site-relative path of the published page.
    ///
    /// Externally authored posts live at their `source_path`; everything
    /// else is rendered to `<slug>.html`.
    pub fn page_path(&self) -> String {
        match (self.source_type(), self.source_path.as_deref()) {
            (SourceType::FullHtml, Some(path)) if !path.is_empty() => {
                path.trim_start_matches("./").trim_start_matches('/').to_owned()
            }
            _ => format!("{}.html", self.slug),
        }
    }

    /// Header call-to-action, present only when both parts are set.
    pub fn access_link(&self) -> Option<(&str, &str)> {
        match (self.access_url.as_deref(), self.access_label.as_deref()) {
            (Some(url), Some(label)) if !url.is_empty() && !label.is_empty() => Some((url, label)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(json: &str) -> Post {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_minimal_post_defaults() {
        let p = post(r#"{"slug": "a"}"#);

        assert_eq!(p.slug, "a");
        assert!(!p.approved);
        assert!(!p.published);
        assert_eq!(p.source_type(), SourceType::Rtf);
        assert_eq!(p.page_path(), "a.html");
    }

    #[test]
    fn test_source_type_snake_case() {
        let p = post(r#"{"slug": "a", "source_type": "full_html", "source_path": "blog/a.html"}"#);

        assert_eq!(p.source_type(), SourceType::FullHtml);
        assert_eq!(p.page_path(), "blog/a.html");
    }

    #[test]
    fn test_full_html_without_source_path_uses_slug() {
        let p = post(r#"{"slug": "a", "source_type": "full_html"}"#);
        assert_eq!(p.page_path(), "a.html");
    }

    #[test]
    fn test_unknown_fields_are_kept_in_order() {
        let p = post(r#"{"slug": "a", "zeta": 1, "alpha": {"x": true}}"#);
        let keys: Vec<&str> = p.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);

        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(r#""zeta":1,"alpha":{"x":true}"#));
    }

    #[test]
    fn test_absent_options_are_not_serialized() {
        let json = serde_json::to_string(&post(r#"{"slug": "a"}"#)).unwrap();
        assert_eq!(json, r#"{"slug":"a","approved":false,"published":false}"#);
    }

    #[test]
    fn test_empty_description_is_missing() {
        let p = post(r#"{"slug": "a", "description": ""}"#);
        assert_eq!(p.description(), None);
    }

    #[test]
    fn test_author_default() {
        let p = post(r#"{"slug": "a"}"#);
        assert_eq!(p.author("Team"), "Team");

        let p = post(r#"{"slug": "a", "author": "Ziba"}"#);
        assert_eq!(p.author("Team"), "Ziba");
    }

    #[test]
    fn test_access_link_requires_both_parts() {
        let p = post(r#"{"slug": "a", "access_url": "https://x.io"}"#);
        assert_eq!(p.access_link(), None);

        let p = post(r#"{"slug": "a", "access_url": "https://x.io", "access_label": "Try it"}"#);
        assert_eq!(p.access_link(), Some(("https://x.io", "Try it")));
    }

    #[test]
    fn test_display_date_prefers_published_at() {
        let p = post(r#"{"slug": "a", "publish_at": "2024-01-02", "published_at": "2024-01-01"}"#);
        assert_eq!(p.display_date(), Some("2024-01-01"));

        let p = post(r#"{"slug": "a", "publish_at": "2024-01-02"}"#);
        assert_eq!(p.display_date(), Some("2024-01-02"));
    }
}
