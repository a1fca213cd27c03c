//! The post body formatter: markup conversion followed by the sanitizer
//! pipeline.

use crate::config::FormatterBuilder;
use crate::markup;
use crate::sanitizer::SanitizerPipeline;

/// Converts admin-authored post markup into a safe HTML fragment.
///
/// A `Formatter` is immutable once built, so one instance can serve every
/// request thread. Build one with [`FormatterBuilder`] or use
/// [`Formatter::default`].
///
/// # Example
///
/// ```
/// use post_formatter::Formatter;
///
/// let formatter = Formatter::default();
/// let html = formatter.format("**Fibra** em https://netfyber.example.com");
/// assert!(html.contains("<strong>Fibra</strong>"));
/// assert!(html.contains(r#"rel="noopener noreferrer""#));
/// ```
pub struct Formatter {
    sanitizers: SanitizerPipeline,
    placeholder: String,
}

impl Formatter {
    pub(crate) fn new(sanitizers: SanitizerPipeline, placeholder: String) -> Self {
        Self {
            sanitizers,
            placeholder,
        }
    }

    /// Shorthand for [`FormatterBuilder::new`].
    pub fn builder() -> FormatterBuilder {
        FormatterBuilder::new()
    }

    /// Format raw post content into a sanitized HTML fragment.
    ///
    /// Empty or whitespace-only input yields the configured placeholder.
    /// This never fails; malformed markup degrades to escaped text.
    pub fn format(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return self.placeholder.clone();
        }

        let html = markup::to_html(raw);
        let fragment = self.sanitizers.sanitize(&html);
        tracing::debug!(
            "Formatted post body: {} bytes of markup into {} bytes of HTML",
            raw.len(),
            fragment.len()
        );
        fragment
    }

    /// Like [`format`](Self::format), treating an absent body as empty.
    pub fn format_opt(&self, raw: Option<&str>) -> String {
        self.format(raw.unwrap_or_default())
    }

    /// The fragment returned for empty input.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl Default for Formatter {
    fn default() -> Self {
        FormatterBuilder::new().build()
    }
}
