//! `[site]` section configuration.
//!
//! Contains the site identity used in page metadata, the JSON-LD feed and
//! absolute URLs.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in publog.toml - site identity.
///
/// # Example
/// ```toml
/// [site]
/// name = "EnterpriseChai"
/// url = "https://enterprisechai.com"
/// default_author = "EnterpriseChai"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteInfo {
    /// Site name, appended to page titles and used as JSON-LD publisher.
    #[serde(default = "defaults::site::name")]
    #[educe(Default = defaults::site::name())]
    pub name: String,

    /// Base URL for absolute links (canonical, sitemap, JSON-LD).
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: String,

    /// Blog description for the JSON-LD `Blog` entry.
    #[serde(default = "defaults::site::description")]
    #[educe(Default = defaults::site::description())]
    pub description: String,

    /// Author shown when a post has none.
    #[serde(default = "defaults::site::default_author")]
    #[educe(Default = defaults::site::default_author())]
    pub default_author: String,

    /// Publisher logo, relative to `url`.
    #[serde(default = "defaults::site::logo")]
    #[educe(Default = defaults::site::logo())]
    pub logo: String,
}

impl SiteInfo {
    /// Join a site-relative path onto the base URL.
    ///
    /// ```ignore
    /// site.absolute_url("a.html") // → "https://enterprisechai.com/a.html"
    /// ```
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches("./").trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_site_config_full() {
        let config = r#"
            [site]
            name = "Acme"
            url = "https://acme.dev"
            description = "Acme engineering blog"
            default_author = "Acme Team"
            logo = "logo.svg"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.name, "Acme");
        assert_eq!(config.site.url, "https://acme.dev");
        assert_eq!(config.site.description, "Acme engineering blog");
        assert_eq!(config.site.default_author, "Acme Team");
        assert_eq!(config.site.logo, "logo.svg");
    }

    #[test]
    fn test_site_config_defaults() {
        let config: SiteConfig = toml::from_str("[site]").unwrap();

        assert_eq!(config.site.name, "EnterpriseChai");
        assert_eq!(config.site.url, "https://enterprisechai.com");
        assert_eq!(config.site.default_author, "EnterpriseChai");
        assert_eq!(config.site.logo, "images/logo-black.png");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [site]
            name = "Test"
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn test_absolute_url() {
        let site = SiteInfo {
            url: "https://example.com/".into(),
            ..SiteInfo::default()
        };

        assert_eq!(site.absolute_url("a.html"), "https://example.com/a.html");
        assert_eq!(site.absolute_url("/blog.html"), "https://example.com/blog.html");
        assert_eq!(
            site.absolute_url("./posts/b.html"),
            "https://example.com/posts/b.html"
        );
    }
}
