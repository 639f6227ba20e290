//! Run configuration.
//!
//! A [`Config`] is built once at startup (from flags or prompts) and is not
//! mutated afterwards; every component reads from the same value.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::download::DEFAULT_CONCURRENCY;
use crate::download::constants::IMAGE_TIMEOUT_SECS;

/// Output folder used when none is given.
pub const DEFAULT_OUTPUT_FOLDER: &str = "downloaded_images";

/// Immutable settings for one scrape run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    target_url: String,
    output_folder: PathBuf,
    max_concurrency: usize,
    image_timeout: Duration,
}

impl Config {
    /// Creates a configuration for `target_url` with default folder, pool size and timeout.
    #[must_use]
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into().trim().to_string(),
            output_folder: PathBuf::from(DEFAULT_OUTPUT_FOLDER),
            max_concurrency: DEFAULT_CONCURRENCY,
            image_timeout: Duration::from_secs(IMAGE_TIMEOUT_SECS),
        }
    }

    /// Sets the output folder; blank input keeps [`DEFAULT_OUTPUT_FOLDER`].
    #[must_use]
    pub fn with_output_folder(mut self, folder: &str) -> Self {
        self.output_folder = resolve_output_folder(folder);
        self
    }

    /// Sets the worker pool size. Bounds are enforced by the engine.
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Sets the image read timeout.
    #[must_use]
    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    #[must_use]
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    #[must_use]
    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    #[must_use]
    pub fn image_timeout(&self) -> Duration {
        self.image_timeout
    }
}

/// Trims user input and falls back to the default folder when nothing is left.
#[must_use]
pub fn resolve_output_folder(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PathBuf::from(DEFAULT_OUTPUT_FOLDER)
    } else {
        PathBuf::from(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("https://example.com/files/");
        assert_eq!(config.target_url(), "https://example.com/files/");
        assert_eq!(config.output_folder(), Path::new("downloaded_images"));
        assert_eq!(config.max_concurrency(), 10);
        assert_eq!(config.image_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_trims_target_url() {
        let config = Config::new("  https://example.com/  \n");
        assert_eq!(config.target_url(), "https://example.com/");
    }

    #[test]
    fn test_resolve_output_folder_blank_uses_default() {
        assert_eq!(resolve_output_folder(""), PathBuf::from(DEFAULT_OUTPUT_FOLDER));
        assert_eq!(
            resolve_output_folder("   \t"),
            PathBuf::from(DEFAULT_OUTPUT_FOLDER)
        );
    }

    #[test]
    fn test_resolve_output_folder_trims_input() {
        assert_eq!(resolve_output_folder("  pics \n"), PathBuf::from("pics"));
    }

    #[test]
    fn test_config_builders_override_defaults() {
        let config = Config::new("https://example.com/")
            .with_output_folder("out/nested")
            .with_max_concurrency(3)
            .with_image_timeout(Duration::from_secs(2));
        assert_eq!(config.output_folder(), Path::new("out/nested"));
        assert_eq!(config.max_concurrency(), 3);
        assert_eq!(config.image_timeout(), Duration::from_secs(2));
    }
}
