//! Per-task download outcomes.

use std::fmt;

use super::DownloadError;

/// Outcome of one image task.
///
/// The `Display` form is the console line reported for the task.
#[derive(Debug)]
pub enum DownloadResult {
    /// The target file already existed; nothing was requested.
    SkippedExisting(String),
    /// The image was written to disk.
    Downloaded(String),
    /// The server answered with a non-image content type; nothing was written.
    SkippedNonImage(String),
    /// The request or the write failed.
    Failed {
        /// Absolute URL of the image.
        url: String,
        /// What went wrong.
        error: DownloadError,
    },
}

impl DownloadResult {
    /// Returns true only for [`DownloadResult::Downloaded`].
    #[must_use]
    pub fn is_downloaded(&self) -> bool {
        matches!(self, Self::Downloaded(_))
    }

    /// Local filename for skip/download outcomes, `None` for failures.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::SkippedExisting(name) | Self::Downloaded(name) | Self::SkippedNonImage(name) => {
                Some(name)
            }
            Self::Failed { .. } => None,
        }
    }
}

impl fmt::Display for DownloadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedExisting(name) => write!(f, "Skipping existing image: {name}"),
            Self::Downloaded(name) => write!(f, "Downloaded: {name}"),
            Self::SkippedNonImage(name) => write!(f, "Skipped non-image content: {name}"),
            Self::Failed { url, error } => write!(f, "Failed to download {url}: {error}"),
        }
    }
}
