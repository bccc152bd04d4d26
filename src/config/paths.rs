//! `[paths]` section configuration.
//!
//! Every path is written relative to the site root in `publog.toml` and
//! resolved to an absolute path once, in [`PathsConfig::resolve`].
//!
//! ```text
//! <root>/
//!   ├── content/blog/posts.json   posts
//!   ├── content/blog/<slug>.rtf   content
//!   ├── templates/{blog,post}.html
//!   ├── previews/<slug>.html
//!   ├── <slug>.html               output
//!   ├── preview/<slug>.html       output/preview_output
//!   ├── blog.html                 output/index
//!   └── sitemap.xml               output/sitemap
//! ```

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Template file for the blog index page, inside `templates`.
pub const INDEX_TEMPLATE: &str = "blog.html";
/// Template file for a single post page, inside `templates`.
pub const POST_TEMPLATE: &str = "post.html";

/// `[paths]` section in publog.toml - file system layout.
///
/// # Example
/// ```toml
/// [paths]
/// posts = "content/blog/posts.json"
/// templates = "templates"
/// output = "."
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Post store document.
    #[serde(default = "defaults::paths::posts")]
    #[educe(Default = defaults::paths::posts())]
    pub posts: PathBuf,

    /// Directory holding legacy `<slug>.rtf` sources.
    #[serde(default = "defaults::paths::content")]
    #[educe(Default = defaults::paths::content())]
    pub content: PathBuf,

    /// Directory holding `blog.html` and `post.html` templates.
    #[serde(default = "defaults::paths::templates")]
    #[educe(Default = defaults::paths::templates())]
    pub templates: PathBuf,

    /// Directory holding `<slug>.html` preview fragments.
    #[serde(default = "defaults::paths::previews")]
    #[educe(Default = defaults::paths::previews())]
    pub previews: PathBuf,

    /// Directory published post pages are written to.
    #[serde(default = "defaults::paths::output")]
    #[educe(Default = defaults::paths::output())]
    pub output: PathBuf,

    /// Blog index page, relative to `output`.
    #[serde(default = "defaults::paths::index")]
    #[educe(Default = defaults::paths::index())]
    pub index: PathBuf,

    /// Sitemap document, relative to `output`.
    #[serde(default = "defaults::paths::sitemap")]
    #[educe(Default = defaults::paths::sitemap())]
    pub sitemap: PathBuf,

    /// Directory for `--preview` renders, relative to `output`.
    /// Must be exactly one level below `output`.
    #[serde(default = "defaults::paths::preview_output")]
    #[educe(Default = defaults::paths::preview_output())]
    pub preview_output: PathBuf,
}

impl PathsConfig {
    /// Resolve every path against `root`.
    pub fn resolve(&mut self, root: &Path) {
        self.posts = root.join(&self.posts);
        self.content = root.join(&self.content);
        self.templates = root.join(&self.templates);
        self.previews = root.join(&self.previews);
        self.output = root.join(&self.output);
        self.index = self.output.join(&self.index);
        self.sitemap = self.output.join(&self.sitemap);
        self.preview_output = self.output.join(&self.preview_output);
    }

    pub fn index_template(&self) -> PathBuf {
        self.templates.join(INDEX_TEMPLATE)
    }

    pub fn post_template(&self) -> PathBuf {
        self.templates.join(POST_TEMPLATE)
    }

    /// Published page for a slug.
    pub fn page_for(&self, slug: &str) -> PathBuf {
        self.output.join(format!("{slug}.html"))
    }

    /// Preview fragment for a slug.
    pub fn preview_for(&self, slug: &str) -> PathBuf {
        self.previews.join(format!("{slug}.html"))
    }

    /// Legacy rich-text source for a slug.
    pub fn rtf_for(&self, slug: &str) -> PathBuf {
        self.content.join(format!("{slug}.rtf"))
    }

    /// Rendered preview page for a slug.
    pub fn preview_page_for(&self, slug: &str) -> PathBuf {
        self.preview_output.join(format!("{slug}.html"))
    }
}
