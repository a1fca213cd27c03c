//! Reverse-tabnabbing protection for external links.

use scraper::node::Element;

use super::Sanitizer;
use super::rewrite::{Rewrite, rewrite_fragment};

const REQUIRED_REL: [&str; 2] = ["noopener", "noreferrer"];

/// Sanitizer that opens every external link in a new, detached context.
///
/// An anchor is external when its `href` starts with `http://`,
/// `https://` or `//`. Such anchors get `target="_blank"`, and their `rel` keeps
/// any existing tokens while gaining `noopener` and `noreferrer`. Duplicate
/// tokens are dropped, and so is `opener`, which would undo `noopener`.
/// Anchors with relative links are written unchanged.
///
/// # Example
///
/// ```
/// use post_formatter::{LinkHardener, Sanitizer};
///
/// let result = LinkHardener::new().sanitize(r#"<a href="https://a.example" rel="nofollow">a</a>"#);
/// assert_eq!(
///     result,
///     r#"<a href="https://a.example" target="_blank" rel="nofollow noopener noreferrer">a</a>"#
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkHardener;

impl LinkHardener {
    /// Create a new `LinkHardener`.
    pub fn new() -> Self {
        Self
    }
}

impl Sanitizer for LinkHardener {
    fn sanitize(&self, html: &str) -> String {
        if !html.contains("<a") {
            return html.to_string();
        }
        rewrite_fragment(html, self)
    }
}

impl Rewrite for LinkHardener {
    fn attributes(&self, element: &Element) -> Vec<(String, String)> {
        let external = element.name() == "a" && element.attr("href").is_some_and(is_external);
        if !external {
            return element
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
        }

        tracing::debug!(
            "Hardening external link {}",
            element.attr("href").unwrap_or_default()
        );

        let mut attrs: Vec<(String, String)> = element
            .attrs()
            .filter(|(k, _)| *k != "target" && *k != "rel")
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        attrs.push(("target".to_string(), "_blank".to_string()));
        attrs.push(("rel".to_string(), merge_rel(element.attr("rel"))));
        attrs
    }
}

/// True for absolute http(s) links and for scheme-relative ones (`//host`).
///
/// Browsers drop tabs and newlines inside URLs and read `\` as `/`, so
/// `/\host` and `/\t/host` also leave the site.
fn is_external(href: &str) -> bool {
    let href = href.trim_start();
    let is_absolute = ["http://", "https://"].iter().any(|scheme| {
        href.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    is_absolute || is_scheme_relative(href)
}

fn is_scheme_relative(href: &str) -> bool {
    href.chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .take_while(|c| matches!(c, '/' | '\\'))
        .nth(1)
        .is_some()
}

/// Existing `rel` tokens in order, deduplicated, then the required ones.
fn merge_rel(existing: Option<&str>) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let candidates = existing
        .unwrap_or_default()
        .split_ascii_whitespace()
        .chain(REQUIRED_REL);
    for token in candidates {
        let token = token.to_ascii_lowercase();
        if token != "opener" && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harden(html: &str) -> String {
        LinkHardener::new().sanitize(html)
    }

    #[test]
    fn external_link_gets_target_and_rel() {
        assert_eq!(
            harden(r#"<a href="https://netfyber.example.com">site</a>"#),
            r#"<a href="https://netfyber.example.com" target="_blank" rel="noopener noreferrer">site</a>"#
        );
    }

    #[test]
    fn existing_target_is_overridden() {
        let result = harden(r#"<a href="http://a.example" target="_self">a</a>"#);
        assert!(result.contains(r#"target="_blank""#));
        assert!(!result.contains("_self"));
        assert_eq!(result.matches("target=").count(), 1);
    }

    #[test]
    fn rel_tokens_are_merged_without_duplicates() {
        assert_eq!(
            merge_rel(Some("noreferrer  nofollow NOOPENER")),
            "noreferrer nofollow noopener"
        );
    }

    #[test]
    fn conflicting_opener_token_is_dropped() {
        assert_eq!(merge_rel(Some("opener")), "noopener noreferrer");
    }

    #[test]
    fn missing_rel_gets_both_tokens() {
        assert_eq!(merge_rel(None), "noopener noreferrer");
    }

    #[test]
    fn relative_links_are_untouched() {
        let html = r##"<a href="/planos">planos</a><a href="#contato">contato</a>"##;
        assert_eq!(harden(html), html);
    }

    #[test]
    fn scheme_relative_links_are_external() {
        let external = [
            "//evil.example",
            "/\\evil.example",
            "\\\\evil.example",
            "/\t/evil.example",
        ];
        for href in external {
            assert!(is_external(href), "{href:?}");
        }
        for href in ["/planos", "planos/", "#contato", "?page=2"] {
            assert!(!is_external(href), "{href:?}");
        }
        let result = harden(r#"<a href="//evil.example">x</a>"#);
        assert_eq!(
            result,
            r#"<a href="//evil.example" target="_blank" rel="noopener noreferrer">x</a>"#
        );
    }

    #[test]
    fn scheme_check_is_case_insensitive() {
        let result = harden(r#"<a href="HTTPS://A.EXAMPLE">a</a>"#);
        assert!(result.contains(r#"target="_blank""#));
    }

    #[test]
    fn title_and_class_are_kept() {
        let result =
            harden(r#"<a href="https://a.example" title="Velocímetro" class="btn">teste</a>"#);
        assert!(result.contains(r#"title="Velocímetro""#));
        assert!(result.contains(r#"class="btn""#));
        assert!(result.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn hardening_twice_is_stable() {
        let once = harden(r#"<p>ver <a href="https://a.example" rel="nofollow">a</a></p>"#);
        assert_eq!(harden(&once), once);
    }

    #[test]
    fn anchor_without_href_is_untouched() {
        let html = "<a>sem destino</a>";
        assert_eq!(harden(html), html);
    }
}
