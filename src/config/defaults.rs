//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn name() -> String {
        "EnterpriseChai".into()
    }

    pub fn url() -> String {
        "https://enterprisechai.com".into()
    }

    pub fn description() -> String {
        "Latest insights on AI copilots, sales automation, prompt engineering, and conversational AI."
            .into()
    }

    pub fn default_author() -> String {
        "EnterpriseChai".into()
    }

    pub fn logo() -> String {
        "images/logo-black.png".into()
    }
}

// ============================================================================
// [paths] Section Defaults
// ============================================================================

pub mod paths {
    use std::path::PathBuf;

    pub fn posts() -> PathBuf {
        "content/blog/posts.json".into()
    }

    pub fn content() -> PathBuf {
        "content/blog".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn previews() -> PathBuf {
        "previews".into()
    }

    pub fn output() -> PathBuf {
        ".".into()
    }

    pub fn index() -> PathBuf {
        "blog.html".into()
    }

    pub fn sitemap() -> PathBuf {
        "sitemap.xml".into()
    }

    pub fn preview_output() -> PathBuf {
        "preview".into()
    }
}

// ============================================================================
// [extract] Section Defaults
// ============================================================================

pub mod extract {
    pub fn marker_class() -> String {
        "blog-content".into()
    }
}

// ============================================================================
// [publish] Section Defaults
// ============================================================================

pub mod publish {
    pub fn ci_env() -> String {
        "GITHUB_ACTIONS".into()
    }
}
