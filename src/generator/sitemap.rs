//! Sitemap maintenance.
//!
//! The sitemap is hand-edited as well as generated, so it is never rebuilt:
//! entries for published posts are inserted before the closing `</urlset>`
//! and everything else is left byte-for-byte as found.
//!
//! # Entry Format
//!
//! ```xml
//!     <url>
//!         <loc>https://example.com/post.html</loc>
//!         <lastmod>2025-01-01</lastmod>
//!     </url>
//! ```

use crate::{
    config::SiteConfig,
    log,
    post::Post,
    utils::write::{read_text, write_if_changed},
};
use anyhow::{Result, bail};
use std::path::Path;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const URLSET_CLOSE: &str = "</urlset>";

// ============================================================================
// Public API
// ============================================================================

/// Make sure every published post has a sitemap entry.
///
/// Returns whether the sitemap file was written.
pub fn update_sitemap(config: &SiteConfig, posts: &[&Post], today: &str) -> Result<bool> {
    let path = &config.paths.sitemap;
    let mut sitemap = Sitemap::load(path)?;

    let mut added = 0;
    for post in posts {
        let entry = UrlEntry {
            loc: config.site.absolute_url(&post.page_path()),
            lastmod: post.display_date().unwrap_or(today).to_owned(),
        };
        if sitemap.insert(&entry) {
            log!("sitemap"; "added {}", entry.loc);
            added += 1;
        }
    }

    if added == 0 {
        return Ok(false);
    }
    write_if_changed(path, &sitemap.into_xml())
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// An existing (or fresh) sitemap document.
struct Sitemap {
    xml: String,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location, unescaped
    loc: String,
    /// Last modification date, `YYYY-MM-DD`
    lastmod: String,
}

impl Sitemap {
    /// Read the sitemap at `path`, or start an empty one if there is none.
    fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::empty());
        }
        let xml = read_text(path)?;
        if !xml.contains(URLSET_CLOSE) {
            bail!("{} has no closing {URLSET_CLOSE}", path.display());
        }
        Ok(Self { xml })
    }

    fn empty() -> Self {
        let mut xml = String::with_capacity(256);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');
        xml.push_str(URLSET_CLOSE);
        xml.push('\n');
        Self { xml }
    }

    fn contains(&self, loc: &str) -> bool {
        self.xml.contains(&format!("<loc>{}</loc>", escape_xml(loc)))
    }

    /// Insert `entry` before the last `</urlset>` unless its URL is present.
    fn insert(&mut self, entry: &UrlEntry) -> bool {
        if self.contains(&entry.loc) {
            return false;
        }
        let Some(at) = self.xml.rfind(URLSET_CLOSE) else {
            return false;
        };
        self.xml.insert_str(at, &entry.to_xml());
        true
    }

    fn into_xml(self) -> String {
        self.xml
    }
}

impl UrlEntry {
    fn to_xml(&self) -> String {
        format!(
            "    <url>\n        <loc>{}</loc>\n        <lastmod>{}</lastmod>\n    </url>\n",
            escape_xml(&self.loc),
            escape_xml(&self.lastmod)
        )
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
