//! Running external programs.
//!
//! Only `git` is run today. Output is captured; on success, stderr lines that
//! survive the filter are logged, on failure both streams end up in the
//! error.
//!
//! ```ignore
//! exec!(root; ["git"]; "commit", "-m", message)?;
//!
//! const QUIET: StderrFilter = StderrFilter::new(&["hint:"]);
//! exec!(filter=&QUIET; root; files.as_slice();)?;
//! ```

use crate::log;
use regex::Regex;
use std::{
    borrow::Cow,
    ffi::OsString,
    io,
    path::Path,
    process::{Command, ExitStatus, Output},
    sync::LazyLock,
};
use thiserror::Error;

/// Run a program in a working directory.
///
/// `exec!([filter=&F;] root; argv; args...)`. `argv` is a `[&str; N]` or
/// `&[String]`; empty extra args are dropped.
#[macro_export]
macro_rules! exec {
    (filter=$filter:expr; $root:expr; $argv:expr; $($arg:expr),* $(,)?) => {
        $crate::utils::exec::run(
            $root,
            $crate::utils::exec::Argv::from($argv)
                .with([$(::std::ffi::OsString::from($arg)),*]),
            $filter,
        )
    };
    ($root:expr; $argv:expr; $($arg:expr),* $(,)?) => {
        $crate::exec!(filter=&$crate::utils::exec::NO_FILTER; $root; $argv; $($arg),*)
    };
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command line")]
    Empty,

    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}{}", detail(.stderr, .stdout))]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
        stdout: String,
    },
}

/// Trailing detail for a failed command. git reports some failures
/// ("nothing to commit") on stdout only.
fn detail(stderr: &str, stdout: &str) -> String {
    let mut out = String::new();
    if !stderr.is_empty() {
        out.push_str(": ");
        out.push_str(stderr);
    }
    if !stdout.is_empty() {
        out.push_str("\nstdout: ");
        out.push_str(stdout);
    }
    out
}

/// Program and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argv(Vec<OsString>);

impl<const N: usize> From<[&str; N]> for Argv {
    fn from(argv: [&str; N]) -> Self {
        Self(argv.into_iter().map(OsString::from).collect())
    }
}

impl From<&[String]> for Argv {
    fn from(argv: &[String]) -> Self {
        Self(argv.iter().map(OsString::from).collect())
    }
}

impl Argv {
    /// Append `args`, skipping empty ones.
    pub fn with<I: IntoIterator<Item = OsString>>(mut self, args: I) -> Self {
        self.0.extend(args.into_iter().filter(|a| !a.is_empty()));
        self
    }

    fn program(&self) -> Option<String> {
        self.0.first().map(|p| p.to_string_lossy().into_owned())
    }
}

/// Stderr lines to keep out of the log when a command succeeds.
pub struct StderrFilter {
    quiet_prefixes: &'static [&'static str],
}

impl StderrFilter {
    pub const fn new(quiet_prefixes: &'static [&'static str]) -> Self {
        Self { quiet_prefixes }
    }

    fn keeps(&self, line: &str) -> bool {
        !line.is_empty() && !self.quiet_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Lines worth logging, ANSI colors removed.
    fn filter(&self, stderr: &str) -> Vec<String> {
        stderr
            .lines()
            .map(|line| strip_ansi(line).trim().to_owned())
            .filter(|line| self.keeps(line))
            .collect()
    }
}

pub const NO_FILTER: StderrFilter = StderrFilter::new(&[]);

/// Run `argv` in `root`, capturing output.
pub fn run(root: &Path, argv: Argv, filter: &StderrFilter) -> Result<Output, CommandError> {
    let program = argv.program().ok_or(CommandError::Empty)?;

    let output = Command::new(&argv.0[0])
        .args(&argv.0[1..])
        .current_dir(root)
        .output()
        .map_err(|source| CommandError::Spawn {
            program: program.clone(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(CommandError::Failed {
            program,
            status: output.status,
            stderr: stderr.trim().to_owned(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_owned(),
        });
    }

    let lines = filter.filter(&stderr);
    if !lines.is_empty() {
        log!(&program; "{}", lines.join("\n"));
    }
    Ok(output)
}

fn strip_ansi(s: &str) -> Cow<'_, str> {
    static ANSI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());
    ANSI.replace_all(s, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv_from_array() {
        let argv = Argv::from(["git", "status"]);
        assert_eq!(argv.0, vec![OsString::from("git"), OsString::from("status")]);
    }

    #[test]
    fn test_argv_from_slice_skips_empty_args() {
        let files = vec!["git".to_owned(), "add".to_owned()];
        let argv = Argv::from(files.as_slice()).with([
            OsString::from("a.html"),
            OsString::new(),
            OsString::from("b.html"),
        ]);
        assert_eq!(argv.0.len(), 4);
        assert_eq!(argv.program().as_deref(), Some("git"));
    }

    #[test]
    fn test_empty_argv() {
        let dir = tempfile::tempdir().unwrap();
        let empty: &[String] = &[];
        assert!(matches!(
            run(dir.path(), Argv::from(empty), &NO_FILTER),
            Err(CommandError::Empty)
        ));
    }

    #[test]
    fn test_stderr_filter() {
        let filter = StderrFilter::new(&["hint:", "warning:"]);
        let kept = filter.filter("hint: use --amend\n\x1b[31mfatal: bad\x1b[0m\n\nwarning: LF\n");
        assert_eq!(kept, vec!["fatal: bad".to_owned()]);
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[1;32mGreen\x1b[0m"), "Green");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn test_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let err = exec!(dir.path(); ["publog-no-such-program"];).unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_carries_status() {
        let dir = tempfile::tempdir().unwrap();
        let err = exec!(dir.path(); ["sh"]; "-c", "echo oops >&2; exit 3").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("`sh` exited with"));
        assert!(msg.ends_with(": oops"));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_root() {
        let dir = tempfile::tempdir().unwrap();
        let output = exec!(dir.path(); ["pwd"];).unwrap();
        let pwd = String::from_utf8_lossy(&output.stdout);
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(Path::new(pwd.trim()).canonicalize().unwrap(), expected);
    }
}
