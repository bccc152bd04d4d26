//! Generated site-wide documents.

pub mod sitemap;
