//! Conversion of lightweight post markup into (unsanitized) HTML.
//!
//! The input is read one line at a time by a small state machine that tracks
//! whether a bullet list is open. Each line is one of:
//!
//! - a list item (`- text` or `* text`),
//! - a heading (`# `, `## `, `### `),
//! - a blank line,
//! - plain text.
//!
//! Inline `**bold**` and `*emphasis*` are expanded inside items, headings and
//! plain text. Raw HTML in the input is passed through untouched; the
//! allow-list pass that follows is what makes the result safe.

use std::fmt::Write;

const ITEM_MARKERS: [&str; 2] = ["- ", "* "];

/// Longest marker first, so `### ` never reads as `# ` plus stray hashes.
const HEADING_MARKERS: [(&str, u8); 3] = [("### ", 3), ("## ", 2), ("# ", 1)];

const MAX_CONSECUTIVE_BREAKS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Normal,
    InList,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Item(&'a str),
    Heading(u8, &'a str),
    Blank,
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    for marker in ITEM_MARKERS {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Line::Item(rest.trim_start());
        }
    }
    for (marker, level) in HEADING_MARKERS {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Line::Heading(level, rest.trim_start());
        }
    }
    Line::Text(trimmed)
}

/// Convert post markup to an HTML string.
///
/// The output is not safe to embed until it has been sanitized.
pub fn to_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 4);
    let mut state = State::Normal;
    // Breaks owed by the previous lines, written before the next content.
    let mut breaks = 0usize;

    for line in raw.lines() {
        let line = classify(line);

        if state == State::InList && !matches!(line, Line::Item(_)) {
            out.push_str("</ul>");
            state = State::Normal;
        }

        match line {
            Line::Item(content) => {
                match state {
                    State::Normal => {
                        flush_breaks(&mut out, &mut breaks);
                        out.push_str("<ul>");
                        state = State::InList;
                    }
                    State::InList => breaks = 0,
                }
                out.push_str("<li>");
                push_inline(content, &mut out);
                out.push_str("</li>");
                breaks = 1;
            }
            Line::Heading(level, text) => {
                flush_breaks(&mut out, &mut breaks);
                let _ = write!(out, "<h{level}>");
                push_inline(text, &mut out);
                let _ = write!(out, "</h{level}>");
            }
            Line::Blank => breaks += 1,
            Line::Text(text) => {
                flush_breaks(&mut out, &mut breaks);
                push_inline(text, &mut out);
                breaks = 1;
            }
        }
    }

    if state == State::InList {
        out.push_str("</ul>");
    }
    out
}

fn flush_breaks(out: &mut String, breaks: &mut usize) {
    if !out.is_empty() {
        for _ in 0..(*breaks).min(MAX_CONSECUTIVE_BREAKS) {
            out.push_str("<br>");
        }
    }
    *breaks = 0;
}

/// Expand `**bold**` and then `*emphasis*` within a single line.
fn push_inline(text: &str, out: &mut String) {
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let after = &rest[open + 2..];
        match after.find("**") {
            Some(0) => {
                // `****` has nothing to embolden; keep the first pair literal.
                push_emphasis(&rest[..open], out);
                out.push_str("**");
                rest = after;
            }
            Some(close) => {
                push_emphasis(&rest[..open], out);
                out.push_str("<strong>");
                push_emphasis(&after[..close], out);
                out.push_str("</strong>");
                rest = &after[close + 2..];
            }
            None => break,
        }
    }
    push_emphasis(rest, out);
}

fn push_emphasis(text: &str, out: &mut String) {
    let mut rest = text;
    while let Some(open) = rest.find('*') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('*') else {
            break;
        };
        let inner = &after[..close];
        if is_emphasis(inner) {
            out.push_str(&rest[..open]);
            out.push_str("<em>");
            out.push_str(inner);
            out.push_str("</em>");
            rest = &after[close + 1..];
        } else {
            out.push_str(&rest[..=open]);
            rest = after;
        }
    }
    out.push_str(rest);
}

fn is_emphasis(inner: &str) -> bool {
    !inner.is_empty()
        && !inner.starts_with(char::is_whitespace)
        && !inner.ends_with(char::is_whitespace)
}
