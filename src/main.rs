//! publog - scheduled publishing for a static HTML blog.

mod cli;
mod config;
mod extract;
mod generator;
mod logger;
mod post;
mod preview;
mod publish;
mod render;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;
use preview::preview;
use publish::run;
use utils::date::today;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    if config.publish.preview {
        preview(&config)?;
    } else {
        run(&config, today())?;
    }
    Ok(())
}
