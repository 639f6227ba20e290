//! The unit of work handed from the extractor to the downloader.

use url::Url;

/// One image to fetch: where it lives and what to call it locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTask {
    source_url: Url,
    filename: String,
}

impl ImageTask {
    /// Creates a task. `filename` is expected to be a bare, local-safe basename.
    #[must_use]
    pub fn new(source_url: Url, filename: impl Into<String>) -> Self {
        Self {
            source_url,
            filename: filename.into(),
        }
    }

    /// Absolute URL of the image.
    #[must_use]
    pub fn source_url(&self) -> &Url {
        &self.source_url
    }

    /// Local filename inside the output folder.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }
}
