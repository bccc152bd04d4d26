//! `[publish]` section configuration.
//!
//! Controls whether the run commits its own changes.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[publish]` section in publog.toml.
///
/// # Example
/// ```toml
/// [publish]
/// ci_env = "GITHUB_ACTIONS"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// Environment variable that is `true` inside CI. When set, the run
    /// leaves committing to the workflow.
    #[serde(default = "defaults::publish::ci_env")]
    #[educe(Default = defaults::publish::ci_env())]
    pub ci_env: String,

    /// Set from `--no-commit`.
    #[serde(skip)]
    pub no_commit: bool,

    /// Set from `--preview`.
    #[serde(skip)]
    pub preview: bool,
}

impl PublishConfig {
    /// Commits are allowed outside CI and without `--no-commit`.
    pub fn commit_allowed(&self) -> bool {
        let in_ci = std::env::var(&self.ci_env)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self::commit_allowed_with(in_ci, self.no_commit)
    }

    #[inline]
    pub const fn commit_allowed_with(in_ci: bool, no_commit: bool) -> bool {
        !in_ci && !no_commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_allowed_locally() {
        assert!(PublishConfig::commit_allowed_with(false, false));
    }

    #[test]
    fn test_commit_disallowed_in_ci() {
        assert!(!PublishConfig::commit_allowed_with(true, false));
    }

    #[test]
    fn test_commit_disallowed_with_flag() {
        assert!(!PublishConfig::commit_allowed_with(false, true));
    }

    #[test]
    fn test_commit_allowed_reads_env() {
        // A variable name no other test touches.
        let config = PublishConfig {
            ci_env: "PUBLOG_TEST_CI_FLAG_UNSET".into(),
            ..PublishConfig::default()
        };
        assert!(config.commit_allowed());

        let config = PublishConfig {
            ci_env: "PUBLOG_TEST_CI_FLAG_UNSET".into(),
            no_commit: true,
            ..PublishConfig::default()
        };
        assert!(!config.commit_allowed());
    }

    #[test]
    fn test_ci_variable_is_case_insensitive() {
        // Variable names no other test touches.
        let cases = [
            ("PUBLOG_TEST_CI_LOWER", "true", false),
            ("PUBLOG_TEST_CI_UPPER", "TRUE", false),
            ("PUBLOG_TEST_CI_FALSE", "false", true),
            ("PUBLOG_TEST_CI_ONE", "1", true),
        ];
        for (name, value, allowed) in cases {
            // SAFETY: the names are unique to this test.
            unsafe { std::env::set_var(name, value) };
            let config = PublishConfig {
                ci_env: name.into(),
                ..PublishConfig::default()
            };
            assert_eq!(config.commit_allowed(), allowed, "{name}={value}");
        }
    }
}
