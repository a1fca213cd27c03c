//! Error types for the `post_formatter` crate.

/// Errors from the fallible parts of the crate.
///
/// Formatting itself never fails; these only surface while configuring
/// custom sanitizers or the global formatter.
#[derive(Debug, thiserror::Error)]
pub enum PostFormatError {
    /// A caller-supplied regex pattern did not compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The requested configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

/// A type alias for `Result<T, PostFormatError>`.
pub type Result<T> = std::result::Result<T, PostFormatError>;
