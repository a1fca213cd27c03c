//! Regex-based find-and-replace sanitizer.

use regex::Regex;

use super::Sanitizer;
use crate::error::Result;

/// Rules that tidy up `<br>` runs left over after formatting.
const LINE_BREAK_RULES: &[(&str, &str)] = &[
    // Three or more breaks read as a gap, not a paragraph.
    (r"(?:<br>\s*){3,}", "<br><br>"),
    (r"(<[uo]l>)\s*(?:<br>\s*)+", "$1"),
    (r"(?:<br>\s*)+(</[uo]l>)", "$1"),
    (r"</li>\s*(?:<br>\s*)+<li>", "</li><li>"),
];

/// Sanitizer that applies a series of regex find-and-replace rules.
///
/// Rules are applied in order; each rule operates on the output of the
/// previous one. Matching is linear in the input length.
///
/// # Example
///
/// ```
/// use post_formatter::{RegexSanitizer, Sanitizer};
///
/// let sanitizer = RegexSanitizer::new(vec![(r"\bfibra\b", "fibra óptica")]);
/// assert_eq!(sanitizer.sanitize("Plano fibra 500"), "Plano fibra óptica 500");
/// ```
pub struct RegexSanitizer {
    rules: Vec<(Regex, String)>,
}

impl RegexSanitizer {
    /// Create a new `RegexSanitizer` from a list of `(pattern, replacement)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if any regex pattern is invalid. Use [`try_new`](Self::try_new)
    /// for a fallible alternative.
    pub fn new(rules: Vec<(&str, &str)>) -> Self {
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| {
                (
                    Regex::new(pattern).expect("invalid regex pattern"),
                    replacement.to_string(),
                )
            })
            .collect();
        Self { rules }
    }

    /// Fallible constructor that returns
    /// [`PostFormatError::Pattern`](crate::PostFormatError::Pattern) for invalid patterns.
    pub fn try_new(rules: Vec<(&str, &str)>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| -> Result<(Regex, String)> {
                Ok((Regex::new(pattern)?, replacement.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Collapse runs of three or more `<br>` into two, and drop breaks that
    /// sit just inside a list or between two list items.
    pub fn line_break_cleanup() -> Self {
        Self::new(LINE_BREAK_RULES.to_vec())
    }
}

impl Sanitizer for RegexSanitizer {
    fn sanitize(&self, html: &str) -> String {
        self.rules
            .iter()
            .fold(html.to_string(), |acc, (re, replacement)| {
                re.replace_all(&acc, replacement.as_str()).into_owned()
            })
    }
}
