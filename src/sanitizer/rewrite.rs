//! Tree-walking serializer shared by the link stages.
//!
//! The fragment is parsed with `scraper`, walked depth-first, and written
//! back out. The walk follows the tree's open/close edges instead of
//! recursing, so nesting depth does not grow the call stack. A [`Rewrite`]
//! decides the attributes of each element and how each text node is written.

use ego_tree::NodeRef;
use ego_tree::iter::Edge;
use scraper::Html;
use scraper::node::{Element, Node};

/// HTML5 void elements that must not have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Hooks for a single rewriting pass.
pub(crate) trait Rewrite {
    /// Attributes to write for `element`, in output order.
    fn attributes(&self, element: &Element) -> Vec<(String, String)> {
        element
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Write a text node. `in_anchor` is set for text below an `<a>`.
    fn text(&self, text: &str, _in_anchor: bool, out: &mut String) {
        escape_text(text, out);
    }
}

/// Parse `html` as a fragment and serialize it back through `rewrite`.
///
/// Comments and doctypes are not written.
pub(crate) fn rewrite_fragment(html: &str, rewrite: &impl Rewrite) -> String {
    let document = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_node(document.tree.root(), rewrite, &mut out);
    out
}

fn write_node(node: NodeRef<'_, Node>, rewrite: &impl Rewrite, out: &mut String) {
    // Open anchors enclosing the current edge.
    let mut anchors = 0usize;
    for edge in node.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                // Fragment parsing wraps everything in a synthetic <html> root.
                Node::Element(el) if el.name() == "html" => {}
                Node::Element(el) => {
                    let tag = el.name();
                    out.push('<');
                    out.push_str(tag);
                    for (k, v) in rewrite.attributes(el) {
                        out.push(' ');
                        out.push_str(&k);
                        out.push_str("=\"");
                        escape_attr(&v, out);
                        out.push('"');
                    }
                    out.push('>');
                    if tag == "a" {
                        anchors += 1;
                    }
                }
                Node::Text(text) => rewrite.text(text.as_ref(), anchors > 0, out),
                _ => {}
            },
            Edge::Close(node) => match node.value() {
                Node::Element(el) if el.name() == "html" => {}
                Node::Element(el) if VOID_ELEMENTS.contains(&el.name()) => {}
                Node::Element(el) => {
                    let tag = el.name();
                    if tag == "a" {
                        anchors = anchors.saturating_sub(1);
                    }
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
                _ => {}
            },
        }
    }
}

/// Escape text content the way html5ever serializes it.
pub(crate) fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

/// Escape a double-quoted attribute value the way html5ever serializes it.
pub(crate) fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;
    impl Rewrite for Identity {}

    #[test]
    fn identity_preserves_structure() {
        let html = r#"<ul><li>um</li><li>dois</li></ul><br><a href="/planos">Planos</a>"#;
        assert_eq!(rewrite_fragment(html, &Identity), html);
    }

    #[test]
    fn html_wrapper_is_not_written() {
        let out = rewrite_fragment("<p>oi</p>", &Identity);
        assert!(!out.contains("<html"));
        assert_eq!(out, "<p>oi</p>");
    }

    #[test]
    fn text_is_reescaped() {
        let out = rewrite_fragment("a &lt;script&gt; &amp; b", &Identity);
        assert_eq!(out, "a &lt;script&gt; &amp; b");
    }

    #[test]
    fn attribute_quotes_are_escaped() {
        let out = rewrite_fragment(r#"<a title='diz "oi"'>x</a>"#, &Identity);
        assert_eq!(out, r#"<a title="diz &quot;oi&quot;">x</a>"#);
    }

    #[test]
    fn comments_are_dropped() {
        let out = rewrite_fragment("<p>a<!-- nota -->b</p>", &Identity);
        assert_eq!(out, "<p>ab</p>");
    }

    #[test]
    fn anchor_flag_reaches_nested_text() {
        struct Marker;
        impl Rewrite for Marker {
            fn text(&self, text: &str, in_anchor: bool, out: &mut String) {
                out.push_str(if in_anchor { "A:" } else { "T:" });
                escape_text(text, out);
            }
        }
        let out = rewrite_fragment("x<a href=\"/\"><b>y</b></a>", &Marker);
        assert_eq!(out, "T:x<a href=\"/\"><b>A:y</b></a>");
    }

    #[test]
    fn anchor_flag_is_cleared_after_close() {
        struct Marker;
        impl Rewrite for Marker {
            fn text(&self, text: &str, in_anchor: bool, out: &mut String) {
                out.push_str(if in_anchor { "A:" } else { "T:" });
                escape_text(text, out);
            }
        }
        let out = rewrite_fragment("<a href=\"/\">x</a>y<br>z", &Marker);
        assert_eq!(out, "<a href=\"/\">A:x</a>T:y<br>T:z");
    }

    #[test]
    fn deep_nesting_is_written_without_recursion() {
        let depth = 20_000;
        let html = format!("{}fundo{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let out = rewrite_fragment(&html, &Identity);
        assert_eq!(out.matches("<div>").count(), depth);
        assert_eq!(out.matches("</div>").count(), depth);
        assert!(out.contains("fundo"));
    }
}
