//! Site configuration management for `publog.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Site identity (name, url, default author, logo)  |
//! | `[paths]`   | Store, templates, previews, outputs              |
//! | `[extract]` | Body extraction marker class                     |
//! | `[publish]` | CI detection for commits                         |
//!
//! The file is optional: a site laid out like the defaults needs none.
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Acme"
//! url = "https://acme.dev"
//!
//! [paths]
//! output = "public"
//!
//! [publish]
//! ci_env = "CI"
//! ```

mod defaults;
mod error;
mod extract;
mod paths;
mod publish;
mod site;

pub use error::ConfigError;

pub use extract::ExtractConfig;
pub use paths::PathsConfig;
pub use publish::PublishConfig;
pub use site::SiteInfo;

use crate::{cli::Cli, extract::is_marker_class};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing publog.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file, named in validation errors.
    /// The file need not exist.
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Absolute site root (set after loading)
    #[serde(skip)]
    #[educe(Default = PathBuf::from("./"))]
    pub root: PathBuf,

    /// Site identity
    #[serde(default)]
    pub site: SiteInfo,

    /// File system layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// Body extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Commit settings and run flags
    #[serde(default)]
    pub publish: PublishConfig,
}

impl SiteConfig {
    /// Parse configuration read from `path`.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: SiteConfig =
            toml::from_str(content).map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::parse(&content, path)
    }

    /// Build the run configuration from CLI arguments.
    ///
    /// Reads `<root>/<config>` when it exists, falls back to defaults
    /// otherwise, then merges CLI flags and validates.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = Self::expand_root(cli.root.as_deref().unwrap_or(Path::new("./")));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli, &root);
        config.validate()?;
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Update configuration with CLI arguments and resolve paths
    pub fn update_with_cli(&mut self, cli: &Cli, root: &Path) {
        let root = Self::normalize_path(root);
        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.paths.resolve(&root);
        self.root = root;

        self.publish.preview = cli.preview;
        self.publish.no_commit = cli.no_commit;
    }

    /// Expand `~` in a user-supplied root
    fn expand_root(root: &Path) -> PathBuf {
        match root.to_str() {
            Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
            None => root.to_path_buf(),
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current run
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            bail!(self.invalid(format!(
                "site root `{}` is not a directory",
                self.root.display()
            )));
        }

        if !self.site.url.starts_with("http") {
            bail!(self.invalid("[site.url] must start with http:// or https://"));
        }

        if !is_marker_class(&self.extract.marker_class) {
            bail!(self.invalid(format!(
                "[extract.marker_class] `{}` must be a single CSS class name",
                self.extract.marker_class
            )));
        }

        if self.publish.ci_env.is_empty() {
            bail!(self.invalid("[publish.ci_env] must not be empty"));
        }

        Ok(())
    }

    fn invalid(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::Invalid {
            file: self.config_path.clone(),
            message: message.into(),
        }
    }

    /// Path of `path` relative to the site root, with `/` separators.
    ///
    /// Used for the commit file list and log lines.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

// ============================================================================
// Tests
// ============================================================================
