//! The post store: `posts.json` loaded whole, saved whole.

use super::Post;
use crate::utils::write::write_if_changed;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors loading or saving the store. All of them are fatal for a run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not a valid post list")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("duplicate slug `{0}`")]
    DuplicateSlug(String),

    #[error("invalid slug `{0}` (allowed: letters, digits, `.`, `_`, `-`)")]
    InvalidSlug(String),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] anyhow::Error),
}

/// Ordered post collection backed by one JSON document.
#[derive(Debug, Clone)]
pub struct PostStore {
    path: PathBuf,
    posts: Vec<Post>,
}

impl PostStore {
    /// Load and validate the store at `path`.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content =
            fs::read_to_string(path).map_err(|err| StoreError::Io(path.to_path_buf(), err))?;
        let posts: Vec<Post> =
            serde_json::from_str(&content).map_err(|err| StoreError::Json(path.to_path_buf(), err))?;
        Self::validate(&posts)?;
        Ok(Self {
            path: path.to_path_buf(),
            posts,
        })
    }

    fn validate(posts: &[Post]) -> Result<(), StoreError> {
        let mut seen = HashSet::with_capacity(posts.len());
        for post in posts {
            if !is_valid_slug(&post.slug) {
                return Err(StoreError::InvalidSlug(post.slug.clone()));
            }
            if !seen.insert(post.slug.as_str()) {
                return Err(StoreError::DuplicateSlug(post.slug.clone()));
            }
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn posts_mut(&mut self) -> &mut [Post] {
        &mut self.posts
    }

    pub fn get_mut(&mut self, slug: &str) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.slug == slug)
    }

    /// Published posts, in store order.
    pub fn published(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.published).collect()
    }

    /// Serialize with 2-space indentation and literal non-ASCII.
    pub fn to_json(&self) -> String {
        // Vec<Post> with string keys cannot fail to serialize.
        serde_json::to_string_pretty(&self.posts).unwrap_or_else(|_| "[]".to_owned())
    }

    /// Rewrite the document if its serialized form changed.
    pub fn save(&self) -> Result<bool, StoreError> {
        write_if_changed(&self.path, &self.to_json())
            .map_err(|err| StoreError::Write(self.path.clone(), err))
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
