//! Command-line interface definitions.
//!
//! Defines all CLI arguments using clap.

use clap::Parser;
use std::path::PathBuf;

/// Publish due blog posts: pages, index, sitemap, commit
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Site root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to root (default: publog.toml)
    #[arg(short = 'C', long, default_value = "publog.toml")]
    pub config: PathBuf,

    /// Check every post has a source and render preview pages, without publishing
    #[arg(long)]
    pub preview: bool,

    /// Do not create git commits (CI/workflow will handle commits)
    #[arg(long)]
    pub no_commit: bool,
}
