//! The publishing run.
//!
//! # Architecture
//!
//! ```text
//! run()
//!     │
//!     ├── PostStore::load ──► gate::publish_due ──► save (1st)
//!     │
//!     ├── build_pages()   per published post:
//!     │       Source::locate ──► Extractor ──► render_page ──► <slug>.html
//!     │                                   └──► derived descriptions
//!     │
//!     ├── save (2nd, descriptions)
//!     ├── render_index()  ──► blog.html
//!     ├── update_sitemap() ──► sitemap.xml
//!     │
//!     └── commit()        changed files only
//! ```
//!
//! Every artifact goes through `write_if_changed`, so a run with nothing new
//! writes nothing and commits nothing.

use crate::{
    config::SiteConfig,
    extract::{Extractor, Source, SourceError},
    generator::sitemap::update_sitemap,
    log,
    post::{Post, PostStore, SourceType, gate},
    render::{describe, render_index, render_page},
    utils::{
        date::iso,
        git,
        write::{read_text, write_if_changed},
    },
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

/// What happened to the commit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No file changed.
    NothingToCommit,
    /// In CI or `--no-commit`: left to the caller.
    Skipped,
    Committed,
    /// Git failed; the message says why.
    Failed(String),
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Slugs published by this run.
    pub published: Vec<String>,
    /// Written files, relative to the site root.
    pub changed: Vec<String>,
    pub commit: CommitOutcome,
}

/// Files written during a run, relative to the root, in write order.
struct Changes<'a> {
    config: &'a SiteConfig,
    files: Vec<String>,
}

impl<'a> Changes<'a> {
    fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            files: Vec::new(),
        }
    }

    fn record(&mut self, path: &Path, written: bool) {
        if !written {
            return;
        }
        let relative = self.config.relative(path);
        log!("write"; "{}", relative);
        if !self.files.contains(&relative) {
            self.files.push(relative);
        }
    }
}

/// Publish due posts and bring every output up to date.
pub fn run(config: &SiteConfig, today: NaiveDate) -> Result<PublishReport> {
    let today = iso(today);
    let paths = &config.paths;
    let mut changes = Changes::new(config);

    let mut store = PostStore::load(&paths.posts)?;
    let published = gate::publish_due(store.posts_mut(), &today);
    if !published.is_empty() {
        changes.record(store.path(), store.save()?);
    }

    let descriptions = build_pages(config, &store, &mut changes)?;
    if !descriptions.is_empty() {
        for (slug, description) in descriptions {
            if let Some(post) = store.get_mut(&slug) {
                log!("publish"; "{}: description from first paragraph", slug);
                post.description = Some(description);
            }
        }
        changes.record(store.path(), store.save()?);
    }

    let live = store.published();

    let template = read_text(&paths.index_template())?;
    let index = render_index(&template, &live, &config.site, &config.relative(&paths.index));
    changes.record(&paths.index, write_if_changed(&paths.index, &index)?);

    changes.record(&paths.sitemap, update_sitemap(config, &live, &today)?);

    let files = changes.files;
    let commit = if files.is_empty() {
        log!("publish"; "Nothing to publish or update.");
        CommitOutcome::NothingToCommit
    } else {
        log!(
            "publish";
            "{} newly published, {} file(s) changed",
            published.len(),
            files.len()
        );
        commit_changes(config, &files, &git::commit_message(live.len(), &today))
    };

    Ok(PublishReport {
        published,
        changed: files,
        commit,
    })
}

/// Render pages of published `rtf` posts and collect derived descriptions.
///
/// `full_html` posts are their own published page and are only read for
/// a description. Posts without a source are skipped with a warning.
fn build_pages(
    config: &SiteConfig,
    store: &PostStore,
    changes: &mut Changes,
) -> Result<Vec<(String, String)>> {
    let live = store.published();
    let needs_template = live.iter().any(|p| p.source_type() == SourceType::Rtf);
    let template = if needs_template {
        read_text(&config.paths.post_template())?
    } else {
        String::new()
    };
    let extractor = Extractor::new(&config.extract);

    let mut descriptions = Vec::new();
    for post in live {
        let Some(body) = body_of(post, config, &extractor)? else {
            continue;
        };

        let derived = match post.source_type() {
            SourceType::FullHtml => describe(post, &body).1,
            SourceType::Rtf => {
                let page = render_page(&template, post, &body, &config.site);
                let path = config.paths.page_for(&post.slug);
                changes.record(&path, write_if_changed(&path, &page.html)?);
                page.derived_description
            }
        };

        if let Some(description) = derived {
            descriptions.push((post.slug.clone(), description));
        }
    }
    Ok(descriptions)
}

/// Extracted body, or `None` (with a warning) when the post has no source.
fn body_of(post: &Post, config: &SiteConfig, extractor: &Extractor) -> Result<Option<String>> {
    match Source::locate(post, config) {
        Ok(source) => Ok(Some(extractor.extract(&source))),
        Err(err @ SourceError::Missing { .. }) => {
            log!("warn"; "{}, skipping", err);
            Ok(None)
        }
        Err(err) => Err(err).with_context(|| format!("Failed to load post `{}`", post.slug)),
    }
}

/// Commit `files`, or only list them when commits are not allowed here.
/// Git failures never fail the run.
fn commit_changes(config: &SiteConfig, files: &[String], message: &str) -> CommitOutcome {
    if !config.publish.commit_allowed() {
        log!(
            "git";
            "commit skipped (CI or --no-commit), files to commit: {}",
            files.join(", ")
        );
        return CommitOutcome::Skipped;
    }

    match git::commit_files(config.get_root(), files, message) {
        Ok(()) => CommitOutcome::Committed,
        Err(err) => {
            log!("warn"; "no commit made: {:#}", err);
            CommitOutcome::Failed(format!("{err:#}"))
        }
    }
}
