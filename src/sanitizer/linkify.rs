//! Autolinking of bare URLs.

use std::sync::LazyLock;

use regex::Regex;

use super::Sanitizer;
use super::rewrite::{Rewrite, escape_attr, escape_text, rewrite_fragment};

/// A bare `http(s)` URL: up to the first whitespace, angle bracket or quote.
static RE_BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhttps?://[^\s<>"']+"#).expect("bare URL pattern is valid")
});

/// Punctuation that ends a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Sanitizer that wraps bare URLs in `<a href="...">` elements.
///
/// Only text outside existing anchors is scanned, so an anchor is never
/// nested in another one. The anchor text is the URL itself.
///
/// # Example
///
/// ```
/// use post_formatter::{Linkifier, Sanitizer};
///
/// let result = Linkifier::new().sanitize("Veja https://netfyber.example.com.");
/// assert_eq!(
///     result,
///     r#"Veja <a href="https://netfyber.example.com">https://netfyber.example.com</a>."#
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Linkifier;

impl Linkifier {
    /// Create a new `Linkifier`.
    pub fn new() -> Self {
        Self
    }
}

impl Sanitizer for Linkifier {
    fn sanitize(&self, html: &str) -> String {
        if !RE_BARE_URL.is_match(html) {
            return html.to_string();
        }
        rewrite_fragment(html, self)
    }
}

impl Rewrite for Linkifier {
    fn text(&self, text: &str, in_anchor: bool, out: &mut String) {
        if in_anchor {
            escape_text(text, out);
            return;
        }

        let mut last = 0;
        for found in RE_BARE_URL.find_iter(text) {
            let url = trim_url(found.as_str());
            if url.ends_with("//") {
                continue;
            }
            escape_text(&text[last..found.start()], out);
            tracing::trace!("Linking bare URL {url}");
            out.push_str("<a href=\"");
            escape_attr(url, out);
            out.push_str("\">");
            escape_text(url, out);
            out.push_str("</a>");
            last = found.start() + url.len();
        }
        escape_text(&text[last..], out);
    }
}

/// Drop trailing sentence punctuation and an unbalanced closing paren.
fn trim_url(mut url: &str) -> &str {
    loop {
        if let Some(rest) = url.strip_suffix(TRAILING_PUNCTUATION) {
            url = rest;
        } else if url.ends_with(')') && url.matches(')').count() > url.matches('(').count() {
            url = &url[..url.len() - 1];
        } else {
            return url;
        }
    }
}
