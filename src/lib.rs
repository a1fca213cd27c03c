//! # post_formatter
//!
//! Turns admin-authored blog post markup into an HTML fragment that is safe
//! to embed directly in a page.
//!
//! ## Overview
//!
//! A [`Formatter`] reads the post line by line: `- ` / `* ` items become a
//! bullet list, `# ` to `### ` become headings, `**bold**` and `*emphasis*`
//! are expanded, and line breaks are kept. The result then goes through a
//! [`SanitizerPipeline`]:
//!
//! 1. [`AllowListSanitizer`] keeps only the tags and attributes of the
//!    configured [`Policy`] and drops `javascript:`-style links,
//! 2. [`Linkifier`] turns bare URLs into anchors,
//! 3. [`LinkHardener`] makes external anchors open in a new tab with
//!    `rel="noopener noreferrer"`,
//! 4. a [`RegexSanitizer`] trims stray `<br>` runs.
//!
//! Formatting is a pure function of the input and never fails.
//!
//! ## Quick start
//!
//! ```rust
//! let html = post_formatter::format(
//!     "**Internet rápida** chegou!\n- Suporte 24h\n- Fibra óptica",
//! );
//! assert_eq!(
//!     html,
//!     "<strong>Internet rápida</strong> chegou!<br><ul><li>Suporte 24h</li><li>Fibra óptica</li></ul>"
//! );
//! ```
//!
//! The [`validate`] module holds checks for the other admin form fields.

pub mod config;
pub mod error;
pub mod formatter;
mod markup;
pub mod policy;
pub mod sanitizer;
pub mod validate;

pub use config::FormatterBuilder;
pub use error::{PostFormatError, Result};
pub use formatter::Formatter;
pub use policy::Policy;
pub use sanitizer::{
    AllowListSanitizer, LinkHardener, Linkifier, RegexSanitizer, Sanitizer, SanitizerPipeline,
};
pub use validate::FieldError;

use std::sync::{LazyLock, OnceLock};

static GLOBAL: OnceLock<Formatter> = OnceLock::new();

static PLAIN_TEXT: LazyLock<AllowListSanitizer> = LazyLock::new(AllowListSanitizer::plain_text);

/// Install the process-wide [`Formatter`] used by [`format`].
///
/// Call once at application startup. Returns [`PostFormatError::Config`] if a
/// global formatter is already in place, including the default one that
/// [`global()`] creates on first use.
pub fn init(builder: FormatterBuilder) -> Result<&'static Formatter> {
    GLOBAL.set(builder.build()).map_err(|_| {
        tracing::warn!("Ignoring attempt to replace the global formatter");
        PostFormatError::Config("global formatter already initialized".to_string())
    })?;
    Ok(global())
}

/// The formatter installed with [`init()`], or the default one.
pub fn global() -> &'static Formatter {
    GLOBAL.get_or_init(Formatter::default)
}

/// Format raw post content with the [`global()`] formatter.
pub fn format(raw: &str) -> String {
    global().format(raw)
}

/// Clean a plain-text form value: trim it and strip every tag.
///
/// The result is entity-escaped text, suitable for titles, summaries and
/// settings values.
///
/// ```
/// assert_eq!(post_formatter::clean_input("  <b>Plano</b> Turbo & Cia "), "Plano Turbo &amp; Cia");
/// ```
pub fn clean_input(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    PLAIN_TEXT.sanitize(text)
}
