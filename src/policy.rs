//! Static allow-list tables for the sanitizer.
//!
//! Every tag, attribute and URL scheme that may survive sanitization is
//! listed here and nowhere else.

/// An HTML allow-list.
///
/// All tables are `'static` so a policy is a plain `Copy` value that can be
/// declared as a `const`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Policy {
    /// Tags that are kept. Anything else is unwrapped (its text survives).
    pub tags: &'static [&'static str],
    /// Attributes permitted on specific tags.
    pub tag_attributes: &'static [(&'static str, &'static [&'static str])],
    /// Attributes permitted on every allowed tag.
    pub generic_attributes: &'static [&'static str],
    /// Tags removed together with everything inside them.
    pub clean_content_tags: &'static [&'static str],
    /// Schemes accepted in URL attributes. Relative URLs always pass.
    pub url_schemes: &'static [&'static str],
}

const UNSAFE_CONTENT_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "textarea", "title",
];

impl Policy {
    /// Policy for rendered blog post bodies.
    pub const POST_BODY: Policy = Policy {
        tags: &[
            "p", "br", "strong", "em", "b", "i", "u", "a", "ul", "ol", "li", "h1", "h2", "h3", "h4",
            "blockquote",
        ],
        tag_attributes: &[("a", &["href", "target", "rel", "title"])],
        generic_attributes: &["class"],
        clean_content_tags: UNSAFE_CONTENT_TAGS,
        url_schemes: &["http", "https"],
    };

    /// Policy for single-value form fields: no markup at all.
    pub const PLAIN_TEXT: Policy = Policy {
        tags: &[],
        tag_attributes: &[],
        generic_attributes: &[],
        clean_content_tags: UNSAFE_CONTENT_TAGS,
        url_schemes: &[],
    };

    /// Returns `true` if `tag` is kept by this policy.
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }

    /// Returns `true` if `attr` may appear on `tag`.
    pub fn allows_attribute(&self, tag: &str, attr: &str) -> bool {
        if !self.allows_tag(tag) {
            return false;
        }
        self.generic_attributes.contains(&attr)
            || self
                .tag_attributes
                .iter()
                .any(|(t, attrs)| *t == tag && attrs.contains(&attr))
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::POST_BODY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_body_allows_anchor_attributes() {
        let policy = Policy::POST_BODY;
        for attr in ["href", "target", "rel", "title", "class"] {
            assert!(policy.allows_attribute("a", attr), "{attr} should be allowed");
        }
        assert!(!policy.allows_attribute("a", "onclick"));
        assert!(!policy.allows_attribute("a", "style"));
    }

    #[test]
    fn class_is_global_but_href_is_not() {
        let policy = Policy::POST_BODY;
        assert!(policy.allows_attribute("li", "class"));
        assert!(!policy.allows_attribute("li", "href"));
    }

    #[test]
    fn disallowed_tags_carry_no_attributes() {
        let policy = Policy::POST_BODY;
        assert!(!policy.allows_tag("img"));
        assert!(!policy.allows_attribute("img", "class"));
    }

    #[test]
    fn content_tags_never_overlap_kept_tags() {
        for policy in [Policy::POST_BODY, Policy::PLAIN_TEXT] {
            for tag in policy.clean_content_tags {
                assert!(!policy.allows_tag(tag), "{tag} is both kept and dropped");
            }
        }
    }

    #[test]
    fn plain_text_allows_nothing() {
        let policy = Policy::PLAIN_TEXT;
        assert!(!policy.allows_tag("b"));
        assert!(policy.url_schemes.is_empty());
    }
}
