//! HTML output: post pages and the blog index.

mod index;
mod page;

pub use index::render_index;
pub use page::{RenderedPage, describe, render_page};
