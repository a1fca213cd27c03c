//! Sanitizer pipeline that turns converted markup into a safe fragment.
//!
//! Sanitizers implement the [`Sanitizer`] trait and are composed into a
//! [`SanitizerPipeline`] that runs them sequentially.
//!
//! Built-in sanitizers:
//!
//! - [`AllowListSanitizer`] -- tag/attribute/scheme allow-list.
//! - [`Linkifier`] -- wraps bare URLs in anchors.
//! - [`LinkHardener`] -- `target="_blank"` and `rel="noopener noreferrer"`
//!   on external links.
//! - [`RegexSanitizer`] -- regex-based replacements, including the
//!   line-break cleanup.

mod allowlist;
mod harden;
mod linkify;
mod regex;
mod rewrite;

pub use self::regex::RegexSanitizer;
pub use allowlist::AllowListSanitizer;
pub use harden::LinkHardener;
pub use linkify::Linkifier;

/// Trait for HTML content sanitizers.
///
/// Each sanitizer receives an HTML string and returns a transformed version.
/// Implementations must be `Send + Sync` so a formatter can be shared across
/// request handlers.
pub trait Sanitizer: Send + Sync {
    /// Transform the given HTML content, returning the sanitized result.
    fn sanitize(&self, html: &str) -> String;
}

/// An ordered chain of [`Sanitizer`] implementations applied sequentially.
///
/// Each sanitizer receives the output of the previous one. An empty pipeline
/// is a no-op.
pub struct SanitizerPipeline {
    sanitizers: Vec<Box<dyn Sanitizer>>,
}

impl SanitizerPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            sanitizers: Vec::new(),
        }
    }

    /// Append a sanitizer to the end of the pipeline.
    pub fn add(&mut self, sanitizer: impl Sanitizer + 'static) {
        self.sanitizers.push(Box::new(sanitizer));
    }

    pub(crate) fn add_boxed(&mut self, sanitizer: Box<dyn Sanitizer>) {
        self.sanitizers.push(sanitizer);
    }

    /// Run the full pipeline on the given HTML, returning the final result.
    pub fn sanitize(&self, html: &str) -> String {
        self.sanitizers
            .iter()
            .fold(html.to_string(), |acc, s| s.sanitize(&acc))
    }

    /// Returns `true` if no sanitizers have been added.
    pub fn is_empty(&self) -> bool {
        self.sanitizers.is_empty()
    }

    /// Number of sanitizers in the pipeline.
    pub fn len(&self) -> usize {
        self.sanitizers.len()
    }
}

impl Default for SanitizerPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for SanitizerPipeline {
    fn sanitize(&self, html: &str) -> String {
        SanitizerPipeline::sanitize(self, html)
    }
}
