//! Error types for listing extraction.

use thiserror::Error;

use crate::download::DownloadError;

/// Errors that abort a scrape before any image is requested.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The listing URL could not be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed validation
        url: String,
        /// Why the URL is invalid
        reason: String,
    },

    /// The listing URL uses a scheme other than http/https.
    #[error("invalid URL '{url}': scheme '{scheme}' is not supported, use http:// or https://")]
    UnsupportedScheme {
        /// The URL that failed validation
        url: String,
        /// The rejected scheme
        scheme: String,
    },

    /// Fetching the listing page failed.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// The listing URL
        url: String,
        /// The underlying request error
        #[source]
        source: DownloadError,
    },
}

impl ScrapeError {
    /// Creates an `InvalidUrl` error for a malformed URL.
    #[must_use]
    pub fn malformed(url: &str, parse_error: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: parse_error.to_string(),
        }
    }

    /// Creates an `UnsupportedScheme` error.
    #[must_use]
    pub fn unsupported_scheme(url: &str, scheme: &str) -> Self {
        Self::UnsupportedScheme {
            url: url.to_string(),
            scheme: scheme.to_string(),
        }
    }

    /// Wraps a page fetch failure.
    #[must_use]
    pub fn fetch(url: &str, source: DownloadError) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source,
        }
    }
}
