//! Shared error types for the runner, its processors and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lintmux operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid regular expression in configuration
    #[error("Invalid pattern {pattern:?}: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Malformed unified diff
    #[error("Diff parse error at line {line}: {message}")]
    DiffParse { line: usize, message: String },

    /// Processor failures that are not I/O
    #[error("{processor}: {message}")]
    Processor { processor: String, message: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Glob pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    /// Git errors
    #[error(transparent)]
    Git(#[from] git2::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    pub fn regex(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn processor(processor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Processor {
            processor: processor.into(),
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

/// Compile a user supplied regular expression, case-insensitively.
pub fn compile_case_insensitive(pattern: &str) -> Result<regex::Regex> {
    regex::Regex::new(&format!("(?i){pattern}")).map_err(|e| Error::regex(pattern, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_prefixes_message() {
        let err = Error::Configuration("bad value".into()).with_context("loading .lintmux.toml");
        assert_eq!(
            err.to_string(),
            "loading .lintmux.toml: Configuration error: bad value"
        );
    }

    #[test]
    fn test_compile_case_insensitive() {
        let re = compile_case_insensitive("unused VARIABLE").unwrap();
        assert!(re.is_match("Unused variable x"));
    }

    #[test]
    fn test_invalid_pattern_names_pattern() {
        let err = compile_case_insensitive("(unclosed").unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
