//! `[extract]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[extract]` section in publog.toml - body extraction settings.
///
/// # Example
/// ```toml
/// [extract]
/// marker_class = "post-body"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Class token marking the article body inside a full HTML page.
    #[serde(default = "defaults::extract::marker_class")]
    #[educe(Default = defaults::extract::marker_class())]
    pub marker_class: String,
}
