//! Minimal RTF to HTML conversion for legacy posts.
//!
//! Keeps the visible text only: control words are dropped, destination
//! groups (font tables, stylesheets, pictures, ...) are skipped whole, and
//! each paragraph becomes a `<p>`.

/// Groups whose content is never visible text.
const DESTINATIONS: &[&str] = &[
    "colortbl",
    "datastore",
    "expandedcolortbl",
    "fonttbl",
    "footer",
    "footerf",
    "footerl",
    "footerr",
    "generator",
    "header",
    "headerf",
    "headerl",
    "headerr",
    "info",
    "latentstyles",
    "listoverridetable",
    "listtable",
    "pict",
    "rsidtbl",
    "stylesheet",
    "themedata",
    "xmlnstbl",
];

/// Convert an RTF document to paragraph HTML.
///
/// `None` when the document holds no visible text.
pub fn to_html(rtf: &str) -> Option<String> {
    let text = to_text(rtf);
    let html = paragraphs(&text)
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect::<Vec<_>>()
        .join("\n");
    (!html.is_empty()).then_some(html)
}

/// Blank-line-delimited runs, trimmed, empty runs dropped.
fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n").map(str::trim).filter(|p| !p.is_empty())
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Plain text of an RTF document.
///
/// Paragraph breaks come out as a blank line, `\line` as a single newline.
fn to_text(rtf: &str) -> String {
    let mut out = String::new();
    let mut chars = rtf.chars().peekable();
    // Skip state of each enclosing group.
    let mut stack: Vec<bool> = Vec::new();
    let mut skip = false;

    while let Some(c) = chars.next() {
        match c {
            '{' => stack.push(skip),
            '}' => skip = stack.pop().unwrap_or(false),
            // Raw line breaks are formatting, not content.
            '\r' | '\n' => {}
            '\\' => match chars.next() {
                Some(sym @ ('\\' | '{' | '}')) => push(&mut out, skip, sym),
                Some('\r' | '\n') => push_str(&mut out, skip, "\n\n"),
                Some('~') => push(&mut out, skip, '\u{a0}'),
                Some('_') => push(&mut out, skip, '-'),
                Some('*') => skip = true,
                Some('\'') => {
                    let hex: String = chars.by_ref().take(2).collect();
                    if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                        push(&mut out, skip, cp1252(byte));
                    }
                }
                Some(first) if first.is_ascii_alphabetic() => {
                    let mut word = String::from(first);
                    while let Some(&c) = chars.peek()
                        && c.is_ascii_alphabetic()
                    {
                        word.push(c);
                        chars.next();
                    }
                    let mut param = String::new();
                    if chars.peek() == Some(&'-') {
                        param.push('-');
                        chars.next();
                    }
                    while let Some(&c) = chars.peek()
                        && c.is_ascii_digit()
                    {
                        param.push(c);
                        chars.next();
                    }
                    // A single space terminates the control word.
                    if chars.peek() == Some(&' ') {
                        chars.next();
                    }

                    match word.as_str() {
                        "par" | "sect" | "page" => push_str(&mut out, skip, "\n\n"),
                        "line" => push(&mut out, skip, '\n'),
                        "tab" => push(&mut out, skip, '\t'),
                        "emdash" => push(&mut out, skip, '\u{2014}'),
                        "endash" => push(&mut out, skip, '\u{2013}'),
                        "bullet" => push(&mut out, skip, '\u{2022}'),
                        "lquote" => push(&mut out, skip, '\u{2018}'),
                        "rquote" => push(&mut out, skip, '\u{2019}'),
                        "ldblquote" => push(&mut out, skip, '\u{201c}'),
                        "rdblquote" => push(&mut out, skip, '\u{201d}'),
                        "u" => {
                            if let Some(ch) = unicode(&param) {
                                push(&mut out, skip, ch);
                            }
                            skip_fallback(&mut chars);
                        }
                        w if DESTINATIONS.contains(&w) => skip = true,
                        _ => {}
                    }
                }
                // Other control symbols carry no text.
                _ => {}
            },
            _ => push(&mut out, skip, c),
        }
    }
    out
}

fn push(out: &mut String, skip: bool, c: char) {
    if !skip {
        out.push(c);
    }
}

fn push_str(out: &mut String, skip: bool, s: &str) {
    if !skip {
        out.push_str(s);
    }
}

/// `\uN` takes a signed 16-bit code unit.
fn unicode(param: &str) -> Option<char> {
    let n: i32 = param.parse().ok()?;
    let n = if n < 0 { n + 0x10000 } else { n };
    u32::try_from(n).ok().and_then(char::from_u32)
}

/// Drop the one-character ANSI fallback that follows `\uN`.
fn skip_fallback(chars: &mut std::iter::Peekable<std::str::Chars>) {
    match chars.peek() {
        Some('{' | '}') | None => {}
        Some('\\') => {
            let mut ahead = chars.clone();
            ahead.next();
            if ahead.next() == Some('\'') {
                // `\'hh`
                for _ in 0..4 {
                    chars.next();
                }
            }
        }
        Some(_) => {
            chars.next();
        }
    }
}

/// Windows-1252 byte to char. Only the 0x80..0xA0 range differs from Latin-1.
fn cp1252(byte: u8) -> char {
    const HIGH: [char; 32] = [
        '€', '\u{81}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{8d}', 'Ž',
        '\u{8f}', '\u{90}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ',
        '\u{9d}', 'ž', 'Ÿ',
    ];
    match byte {
        0x80..=0x9f => HIGH[usize::from(byte - 0x80)],
        _ => char::from(byte),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r"{\rtf1\ansi\ansicpg1252\cocoartf2639
{\fonttbl\f0\fswiss\fcharset0 Helvetica;}
{\colortbl;\red255\green255\blue255;}
{\*\expandedcolortbl;;}
\paperw11900\paperh16840\margl1440\margr1440\vieww11520\viewh8400\viewkind0
\pard\tx566\pardirnatural\partightenfactor0

\f0\fs24 \cf0 First paragraph.\
\
Second & <last>.}";

    #[test]
    fn test_textedit_document() {
        assert_eq!(
            to_html(DOC).as_deref(),
            Some("<p>First paragraph.</p>\n<p>Second &amp; &lt;last&gt;.</p>")
        );
    }

    #[test]
    fn test_par_splits_paragraphs() {
        let rtf = r"{\rtf1 One\par Two\par\par Three}";
        assert_eq!(
            to_html(rtf).as_deref(),
            Some("<p>One</p>\n<p>Two</p>\n<p>Three</p>")
        );
    }

    #[test]
    fn test_line_stays_in_paragraph() {
        assert_eq!(to_text(r"{\rtf1 a\line b}"), "a\nb");
    }

    #[test]
    fn test_escaped_symbols() {
        assert_eq!(to_text(r"{\rtf1 a\{b\}c\\d}"), r"a{b}c\d");
    }

    #[test]
    fn test_hex_escapes() {
        assert_eq!(to_text(r"{\rtf1 caf\'e9 \'93q\'94}"), "café “q”");
    }

    #[test]
    fn test_unicode_escape_skips_fallback() {
        assert_eq!(to_text(r"{\rtf1 \u8212? dash \u-3913?x}"), "\u{2014} dash \u{f0b7}x");
        assert_eq!(to_text(r"{\rtf1 \u233\'e9 ok}"), "é ok");
    }

    #[test]
    fn test_destinations_are_skipped() {
        let rtf = r"{\rtf1{\info{\title Secret}}{\*\unknowndest hidden}Shown}";
        assert_eq!(to_text(rtf), "Shown");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_html(r"{\rtf1\ansi{\fonttbl\f0 Helvetica;}}"), None);
        assert_eq!(to_html(""), None);
    }

    #[test]
    fn test_unbalanced_braces() {
        assert_eq!(to_text(r"{\rtf1 a}}} b"), "a b");
    }
}
