//! Colored `[module] message` log lines.
//!
//! ```ignore
//! log!("publish"; "{} post(s) due", count);
//! log!("warn"; "no source for {}, skipping", slug);
//! ```
//!
//! `warn` and `error` go to stderr, everything else to stdout. On a
//! terminal, single-line messages are cut to the window width; piped output
//! (CI logs) is never cut.

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{self, IsTerminal, Write},
    sync::OnceLock,
};

/// Log a message with a colored module prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Width assumed when the terminal size cannot be read.
const FALLBACK_WIDTH: u16 = 120;

/// `[` + `]` + one space.
const PREFIX_OVERHEAD: usize = 3;

pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    if is_problem(module) {
        emit(&mut io::stderr().lock(), io::stderr().is_terminal(), module, &prefix, message);
    } else {
        emit(&mut io::stdout().lock(), io::stdout().is_terminal(), module, &prefix, message);
    }
}

fn emit<W: Write>(out: &mut W, terminal: bool, module: &str, prefix: &ColoredString, message: &str) {
    let message = match terminal_width(terminal) {
        Some(width) if !message.contains('\n') => {
            execute!(out, Clear(ClearType::UntilNewLine)).ok();
            let room = usize::from(width).saturating_sub(module.chars().count() + PREFIX_OVERHEAD);
            fit(message, room)
        }
        _ => message,
    };
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

fn terminal_width(terminal: bool) -> Option<u16> {
    static WIDTH: OnceLock<u16> = OnceLock::new();
    terminal.then(|| *WIDTH.get_or_init(|| size().map_or(FALLBACK_WIDTH, |(w, _)| w)))
}

fn is_problem(module: &str) -> bool {
    module.eq_ignore_ascii_case("warn") || module.eq_ignore_ascii_case("error")
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "publish" => prefix.bright_green().bold(),
        "git" => prefix.bright_blue().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// First `max` characters of `s`.
fn fit(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
