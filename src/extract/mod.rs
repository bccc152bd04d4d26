//! Body extraction: from a post's source file to a clean HTML fragment.
//!
//! ```text
//! Source::locate ──► Html ──► select (marker / article|main / body) ─┐
//!                └─► Rtf  ──► rtf::to_html ─────────────────────────┤
//!                                                                    ▼
//!                                          normalize ──► fragment or PLACEHOLDER
//! ```
//!
//! [`excerpt`] and [`adjust_asset_paths`] work on the resulting fragment.

mod assets;
mod excerpt;
mod normalize;
mod rtf;
mod select;

pub use assets::adjust_asset_paths;
pub use excerpt::excerpt;
pub use select::is_marker_class;

use crate::{
    config::{ExtractConfig, SiteConfig},
    post::{Post, SourceType},
};
use scraper::Selector;
use std::{fs, io, path::PathBuf};
use thiserror::Error;

/// Terminal fallback when no tier yields content.
pub const PLACEHOLDER: &str = "<p>(content not available)</p>";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no source for `{slug}` (looked for {})", list(.tried))]
    Missing { slug: String, tried: Vec<PathBuf> },

    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

fn list(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no `source_path`".into();
    }
    paths
        .iter()
        .map(|p| format!("`{}`", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw source content of one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A full page or a preview fragment.
    Html(String),
    /// A legacy rich-text document.
    Rtf(String),
}

impl Source {
    /// Find and read the source of `post`.
    ///
    /// - `full_html`: `<root>/<source_path>`
    /// - `rtf`: `<previews>/<slug>.html`, else `<content>/<slug>.rtf`
    pub fn locate(post: &Post, config: &SiteConfig) -> Result<Self, SourceError> {
        let candidates = Self::candidates(post, config);
        for (path, is_rtf) in &candidates {
            if !path.is_file() {
                continue;
            }
            let bytes = fs::read(path).map_err(|err| SourceError::Io(path.clone(), err))?;
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Ok(if *is_rtf { Self::Rtf(text) } else { Self::Html(text) });
        }

        Err(SourceError::Missing {
            slug: post.slug.clone(),
            tried: candidates.into_iter().map(|(path, _)| path).collect(),
        })
    }

    /// Candidate files in preference order, flagged when RTF.
    fn candidates(post: &Post, config: &SiteConfig) -> Vec<(PathBuf, bool)> {
        let paths = &config.paths;
        match post.source_type() {
            SourceType::FullHtml => post
                .source_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| vec![(config.root.join(p), false)])
                .unwrap_or_default(),
            SourceType::Rtf => vec![
                (paths.preview_for(&post.slug), false),
                (paths.rtf_for(&post.slug), true),
            ],
        }
    }
}

/// Runs the extraction tiers and normalization.
#[derive(Debug, Clone)]
pub struct Extractor {
    marker: Option<Selector>,
}

impl Extractor {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            marker: select::marker_selector(&config.marker_class),
        }
    }

    /// Clean body fragment of `source`. Never fails; falls back to
    /// [`PLACEHOLDER`].
    pub fn extract(&self, source: &Source) -> String {
        let raw = match source {
            Source::Html(html) => select::select_body(html, self.marker.as_ref()),
            Source::Rtf(rtf) => rtf::to_html(rtf),
        };

        raw.map(|fragment| normalize::normalize(&fragment))
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| PLACEHOLDER.to_owned())
    }
}
