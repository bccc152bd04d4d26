//! `--preview`: render every post into the preview directory.
//!
//! Drafts included. Nothing published changes: the store, the index and the
//! sitemap are left alone and nothing is committed.

use crate::{
    config::SiteConfig,
    extract::{Extractor, Source, SourceError, adjust_asset_paths},
    log,
    post::PostStore,
    render::render_page,
    utils::write::{read_text, write_if_changed},
};
use anyhow::{Context, Result};

/// Outcome of a preview run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewReport {
    /// Slugs with no source file.
    pub missing: Vec<String>,
    /// Written preview pages, relative to the site root.
    pub changed: Vec<String>,
}

pub fn preview(config: &SiteConfig) -> Result<PreviewReport> {
    let store = PostStore::load(&config.paths.posts)?;
    let mut report = PreviewReport::default();

    let mut sources = Vec::with_capacity(store.posts().len());
    for post in store.posts() {
        match Source::locate(post, config) {
            Ok(source) => sources.push((post, source)),
            Err(SourceError::Missing { slug, .. }) => report.missing.push(slug),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to load post `{}`", post.slug));
            }
        }
    }

    if report.missing.is_empty() {
        log!("preview"; "all {} post(s) have a source", sources.len());
    } else {
        log!("warn"; "missing sources for: {}", report.missing.join(", "));
    }
    if sources.is_empty() {
        return Ok(report);
    }

    let template = read_text(&config.paths.post_template())?;
    let extractor = Extractor::new(&config.extract);

    for (post, source) in sources {
        let body = extractor.extract(&source);
        let page = render_page(&template, post, &body, &config.site);
        let path = config.paths.preview_page_for(&post.slug);

        if write_if_changed(&path, &adjust_asset_paths(&page.html))? {
            let relative = config.relative(&path);
            log!("preview"; "{}", relative);
            report.changed.push(relative);
        }
    }

    Ok(report)
}
