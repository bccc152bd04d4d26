//! Calendar date helpers for `YYYY-MM-DD` strings.

use chrono::{Local, NaiveDate};

const YMD: &str = "%Y-%m-%d";

/// Today's local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format as `YYYY-MM-DD`.
pub fn iso(date: NaiveDate) -> String {
    date.format(YMD).to_string()
}

/// Parse a strict, zero-padded `YYYY-MM-DD` date.
///
/// Anything else (`2024-1-5`, `2024-02-30`, `tomorrow`) is `None`. The
/// fixed width is what makes lexical and calendar order agree.
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 || !s.is_ascii() {
        return None;
    }
    NaiveDate::parse_from_str(s, YMD).ok()
}

/// Human-readable date for cards and post headers: `March 05, 2024`.
///
/// Unparseable input yields an empty string.
pub fn human(s: &str) -> String {
    parse_ymd(s)
        .map(|d| d.format("%B %d, %Y").to_string())
        .unwrap_or_default()
}
