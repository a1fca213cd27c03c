//! Builder for configuring a [`Formatter`].

use crate::formatter::Formatter;
use crate::policy::Policy;
use crate::sanitizer::{
    AllowListSanitizer, LinkHardener, Linkifier, RegexSanitizer, Sanitizer, SanitizerPipeline,
};

/// Builder for configuring a [`Formatter`].
///
/// The pipeline it assembles always runs in this order:
///
/// 1. extra sanitizers added with [`add_sanitizer`](Self::add_sanitizer),
/// 2. the allow-list for the configured [`Policy`],
/// 3. autolinking (unless disabled),
/// 4. external link hardening (unless disabled),
/// 5. line-break cleanup.
///
/// # Example
///
/// ```
/// use post_formatter::{FormatterBuilder, RegexSanitizer};
///
/// let formatter = FormatterBuilder::new()
///     .placeholder("<p>Em breve.</p>")
///     .add_sanitizer(RegexSanitizer::new(vec![("Mbps", "Mega")]))
///     .build();
///
/// assert_eq!(formatter.format(""), "<p>Em breve.</p>");
/// assert_eq!(formatter.format("Plano 500 Mbps"), "Plano 500 Mega");
/// ```
pub struct FormatterBuilder {
    policy: Policy,
    placeholder: String,
    autolink: bool,
    harden_links: bool,
    extra: Vec<Box<dyn Sanitizer>>,
}

impl FormatterBuilder {
    /// Create a new builder with the post-body policy, autolinking and link
    /// hardening enabled, and an empty placeholder.
    pub fn new() -> Self {
        Self {
            policy: Policy::POST_BODY,
            placeholder: String::new(),
            autolink: true,
            harden_links: true,
            extra: Vec::new(),
        }
    }

    /// Allow-list applied to every formatted fragment.
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Fragment returned for empty input. It is sanitized like any other.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Wrap bare `http(s)` URLs in anchors.
    pub fn autolink(mut self, enabled: bool) -> Self {
        self.autolink = enabled;
        self
    }

    /// Force `target="_blank"` and `rel="noopener noreferrer"` on external
    /// anchors.
    pub fn harden_links(mut self, enabled: bool) -> Self {
        self.harden_links = enabled;
        self
    }

    /// Append a [`Sanitizer`] that runs on the converted markup.
    ///
    /// Extra sanitizers run before the allow-list, in the order they are
    /// added, so nothing they emit can bypass it.
    pub fn add_sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.extra.push(Box::new(sanitizer));
        self
    }

    /// Consume the builder and assemble the [`Formatter`].
    pub fn build(self) -> Formatter {
        let allow_list = AllowListSanitizer::new(&self.policy);
        let placeholder = allow_list.sanitize(&self.placeholder);

        let mut sanitizers = SanitizerPipeline::new();
        for extra in self.extra {
            sanitizers.add_boxed(extra);
        }
        sanitizers.add(allow_list);
        if self.autolink {
            sanitizers.add(Linkifier::new());
        }
        if self.harden_links {
            sanitizers.add(LinkHardener::new());
        }
        sanitizers.add(RegexSanitizer::line_break_cleanup());

        Formatter::new(sanitizers, placeholder)
    }
}

impl Default for FormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
