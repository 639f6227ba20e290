//! Error types for the download module.
//!
//! These errors describe why a single request failed. They are carried inside
//! [`DownloadResult::Failed`](super::DownloadResult::Failed) next to the URL,
//! so the messages deliberately omit the URL itself.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a page or an image.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("request timed out")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while writing an image.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates a network error, promoting reqwest timeouts to [`DownloadError::Timeout`].
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else {
            Self::network(url, source)
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// No From<reqwest::Error> / From<std::io::Error>: every variant needs a URL or
// path the source error does not carry.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_timeout_display() {
        let error = DownloadError::timeout("https://example.com/cat.png");
        assert_eq!(error.to_string(), "request timed out");
    }

    #[test]
    fn test_download_error_http_status_display() {
        let error = DownloadError::http_status("https://example.com/cat.png", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(
            !msg.contains("example.com"),
            "URL is reported separately, not in: {msg}"
        );
    }

    #[test]
    fn test_download_error_io_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = DownloadError::io(PathBuf::from("/tmp/cat.png"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/cat.png"), "Expected path in: {msg}");
        assert!(msg.contains("access denied"), "Expected cause in: {msg}");
    }
}
