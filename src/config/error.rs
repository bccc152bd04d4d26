//! Errors raised while loading `publog.toml`.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{}`", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("`{}` is not valid TOML", .0.display())]
    Toml(PathBuf, #[source] toml::de::Error),

    /// A value that parses but cannot drive a run.
    #[error("{message} (config: `{}`)", .file.display())]
    Invalid { file: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("site/publog.toml"),
            io::Error::new(ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(err.to_string(), "cannot read config file `site/publog.toml`");
    }

    #[test]
    fn test_invalid_names_file_and_key() {
        let err = ConfigError::Invalid {
            file: PathBuf::from("publog.toml"),
            message: "[site.url] must start with http:// or https://".into(),
        };
        assert_eq!(
            err.to_string(),
            "[site.url] must start with http:// or https:// (config: `publog.toml`)"
        );
    }
}
