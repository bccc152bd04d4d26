//! Git operations for publishing.
//!
//! Stages an explicit file list and commits it through the `git` binary.
//! `gix` is only used to check that the site root lives inside a repository.

use crate::{exec, log, utils::exec::StderrFilter};
use anyhow::{Context, Result, bail};
use std::path::Path;

/// Git prints advice lines on stderr even when a command succeeds.
const GIT_FILTER: StderrFilter = StderrFilter::new(&["hint:", "warning: in the working copy"]);

/// Check that `root` is inside a git work tree.
pub fn ensure_repo(root: &Path) -> Result<()> {
    gix::discover(root)
        .with_context(|| format!("`{}` is not inside a git repository", root.display()))?;
    Ok(())
}

/// Check that the `git` binary is installed.
pub fn ensure_git_installed() -> Result<()> {
    which::which("git").context("`git` not found. Please install it first.")?;
    Ok(())
}

/// Stage `files` (relative to `root`) and commit them with `message`.
pub fn commit_files(root: &Path, files: &[String], message: &str) -> Result<()> {
    if message.trim().is_empty() {
        bail!("Commit message cannot be empty");
    }
    if files.is_empty() {
        bail!("No files to commit");
    }

    ensure_git_installed()?;
    ensure_repo(root)?;

    let mut add = vec!["git".to_owned(), "add".to_owned(), "--".to_owned()];
    add.extend(files.iter().cloned());
    exec!(filter=&GIT_FILTER; root; add.as_slice();)?;
    exec!(filter=&GIT_FILTER; root; ["git"]; "commit", "-m", message)?;

    log!("git"; "committed {} file(s)", files.len());
    Ok(())
}

/// Commit message for a publishing run.
///
/// ```ignore
/// commit_message(3, "2024-05-01")
/// // → "chore(publish): auto-publish 3 post(s) [2024-05-01]"
/// ```
pub fn commit_message(published: usize, today: &str) -> String {
    format!("chore(publish): auto-publish {published} post(s) [{today}]")
}

// ============================================================================
// Tests
// ============================================================================
