//! Error types for mapping and extraction operations.
//!
//! This module defines the main error type [`AraneaError`] which covers
//! everything that can go wrong while fetching pages, building a site map,
//! compiling extraction patterns, and mirroring pages to disk.
//!
//! Fetch-time variants always carry the URL that failed, so a traversal can
//! report exactly which page was skipped. Configuration variants
//! ([`AraneaError::InvalidUrl`], [`AraneaError::InvalidPattern`]) are raised
//! before any page work begins.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for site mapping and data extraction.
#[derive(Error, Debug)]
pub enum AraneaError {
    /// HTTP client errors from reqwest that are not tied to a single page,
    /// such as a failure to construct the client itself.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A page request exceeded the configured timeout.
    #[error("request for '{url}' timed out after {timeout} seconds")]
    Timeout { url: String, timeout: u64 },

    /// A page answered with a non-success status code.
    #[error("'{url}' answered with status {status}")]
    Status { url: String, status: u16 },

    /// A page could not be reached at all (DNS, connection, TLS, body read).
    #[error("could not reach '{url}': {source}")]
    Transport { url: String, source: reqwest::Error },

    /// The URL uses a scheme the fetcher does not know how to read.
    #[error("cannot fetch '{url}': unsupported scheme '{scheme}'")]
    UnsupportedScheme { url: String, scheme: String },

    /// A `file://` URL pointed at a file that does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// A URL could not be parsed.
    ///
    /// For the root of a traversal this aborts the run before any fetch.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// An extraction pattern failed to compile.
    ///
    /// Raised by [`Extractor::new`](crate::Extractor::new) before any page
    /// is scanned; an extraction run never partially succeeds on a bad
    /// pattern.
    #[error("invalid extraction pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Encoding a site map as JSON failed.
    #[error("failed to encode map: {0}")]
    Json(#[from] serde_json::Error),

    /// File system errors while mirroring pages to disk.
    #[error("failed to write mirrored page: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for [`AraneaError`].
pub type Result<T> = std::result::Result<T, AraneaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_names_the_url() {
        let err = AraneaError::Timeout { url: "https://example.com".to_string(), timeout: 10 };
        assert!(err.to_string().contains("https://example.com"));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_status_display() {
        let err = AraneaError::Status { url: "https://example.com/missing".to_string(), status: 404 };
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_invalid_pattern_from_regex_error() {
        let err: AraneaError = regex::Regex::new("[").unwrap_err().into();
        assert!(matches!(err, AraneaError::InvalidPattern(_)));
    }

    #[test]
    fn test_unsupported_scheme_display() {
        let err = AraneaError::UnsupportedScheme {
            url: "mailto:someone@example.com".to_string(),
            scheme: "mailto".to_string(),
        };
        assert!(err.to_string().contains("mailto"));
    }
}
