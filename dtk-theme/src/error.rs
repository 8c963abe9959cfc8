//! # Theme Error Types
//!
//! Errors raised at the theme-document and theme-provider boundary: loading a
//! document, parsing it, or compiling it into a stylesheet.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, parsing or compiling a theme.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Theme with the specified id was not found by the provider.
    #[error("Theme '{id}' not found")]
    NotFound {
        /// The id of the theme that was not found.
        id: String,
        /// The tenant the lookup was scoped to, if any.
        tenant: Option<String>,
    },

    /// Error parsing a theme document.
    #[error("Failed to parse theme document {source_name}: {details}")]
    ParseError {
        /// Where the document came from (file path or a short label).
        source_name: String,
        /// Details about the parse error.
        details: String,
    },

    /// Error reading a theme document from disk.
    #[error("Failed to read theme file {path:?}: {source}")]
    ReadError {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The provider failed to compile a theme into a stylesheet.
    #[error("Failed to compile theme '{id}': {message}")]
    CompileError {
        /// The id of the theme being compiled.
        id: String,
        /// What went wrong.
        message: String,
    },

    /// A token override names a path the document cannot hold.
    #[error("Invalid token path '{path}': {message}")]
    InvalidTokenPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        message: String,
    },

    /// Error serializing a theme document.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create a theme not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            id: id.into(),
            tenant: None,
        }
    }

    /// Create a theme not found error scoped to a tenant.
    pub fn not_found_for_tenant(tenant: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            id: id.into(),
            tenant: Some(tenant.into()),
        }
    }

    /// Create a theme parse error.
    pub fn parse_error(source_name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ParseError {
            source_name: source_name.into(),
            details: details.into(),
        }
    }

    /// Create a compile error.
    pub fn compile_error(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CompileError {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create an invalid token path error.
    pub fn invalid_token_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTokenPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the theme does not exist, as opposed to a
    /// theme that exists but could not be read or parsed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
