//! Allow-list sanitizer backed by `ammonia`.

use std::collections::{HashMap, HashSet};

use ammonia::{Builder, UrlRelative};

use super::Sanitizer;
use crate::policy::Policy;

/// Sanitizer that keeps only what a [`Policy`] allows.
///
/// Disallowed tags are unwrapped and their text is kept. Tags listed in
/// [`Policy::clean_content_tags`] are removed with their content. URL
/// attributes with a scheme outside [`Policy::url_schemes`] are removed.
/// Comments never survive.
///
/// Running the sanitizer on its own output returns that output unchanged.
///
/// # Example
///
/// ```
/// use post_formatter::{AllowListSanitizer, Policy, Sanitizer};
///
/// let sanitizer = AllowListSanitizer::new(&Policy::POST_BODY);
/// let html = r#"<p onclick="x()">Oi<script>alert(1)</script></p>"#;
/// assert_eq!(sanitizer.sanitize(html), "<p>Oi</p>");
/// ```
pub struct AllowListSanitizer {
    cleaner: Builder<'static>,
}

impl AllowListSanitizer {
    /// Create a sanitizer enforcing `policy`.
    pub fn new(policy: &Policy) -> Self {
        let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = policy
            .tag_attributes
            .iter()
            .filter(|(tag, _)| policy.allows_tag(tag))
            .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
            .collect();

        let mut cleaner = Builder::empty();
        cleaner
            .tags(policy.tags.iter().copied().collect())
            .clean_content_tags(policy.clean_content_tags.iter().copied().collect())
            .tag_attributes(tag_attributes)
            .generic_attributes(policy.generic_attributes.iter().copied().collect())
            .url_schemes(policy.url_schemes.iter().copied().collect())
            .url_relative(UrlRelative::PassThrough)
            .link_rel(None)
            .strip_comments(true);

        Self { cleaner }
    }

    /// Sanitizer that strips every tag, for plain-text form fields.
    pub fn plain_text() -> Self {
        Self::new(&Policy::PLAIN_TEXT)
    }
}

impl Default for AllowListSanitizer {
    fn default() -> Self {
        Self::new(&Policy::POST_BODY)
    }
}

impl Sanitizer for AllowListSanitizer {
    fn sanitize(&self, html: &str) -> String {
        self.cleaner.clean(html).to_string()
    }
}
