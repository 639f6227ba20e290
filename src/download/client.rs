//! HTTP client wrapper for fetching listings and downloading images.
//!
//! This module provides the `HttpClient` struct which carries the shared
//! request identity, timeout configuration and streaming-to-disk logic.
//!
//! The image timeout bounds each socket read, not the whole transfer: a large
//! file on a slow link still completes as long as bytes keep arriving.

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, REFERER};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, IMAGE_TIMEOUT_SECS, PAGE_TIMEOUT_SECS, WRITE_CHUNK_SIZE};
use super::error::DownloadError;
use super::result::DownloadResult;
use crate::scrape::ImageTask;
use crate::user_agent;

/// HTTP client shared by the page fetch and every image task.
///
/// Cloning is cheap; clones share the underlying connection pool. The
/// configuration (headers, timeouts) is fixed at construction.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with the default 10 second image timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_image_timeout(Duration::from_secs(IMAGE_TIMEOUT_SECS))
    }

    /// Creates a client whose reads time out after `image_timeout` of silence.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_image_timeout(image_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .read_timeout(image_timeout)
            .default_headers(user_agent::base_headers())
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches a page body as text.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` on network failure, timeout, or a non-2xx status.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &Url) -> Result<String, DownloadError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(Duration::from_secs(PAGE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| DownloadError::from_reqwest(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url.as_str(), status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DownloadError::from_reqwest(url.as_str(), e))?;
        debug!(bytes = body.len(), "fetched page");
        Ok(body)
    }

    /// Downloads one image task into `output_dir`.
    ///
    /// Never fails: every error is folded into [`DownloadResult::Failed`] so
    /// that one task cannot take down its siblings.
    #[instrument(skip(self, task, output_dir, referer), fields(url = %task.source_url()))]
    pub async fn download_image(
        &self,
        task: &ImageTask,
        output_dir: &Path,
        referer: &str,
    ) -> DownloadResult {
        match self.try_download_image(task, output_dir, referer).await {
            Ok(result) => result,
            Err(error) => {
                debug!(error = %error, "image download failed");
                DownloadResult::Failed {
                    url: task.source_url().to_string(),
                    error,
                }
            }
        }
    }

    async fn try_download_image(
        &self,
        task: &ImageTask,
        output_dir: &Path,
        referer: &str,
    ) -> Result<DownloadResult, DownloadError> {
        let filename = task.filename();
        let file_path = output_dir.join(filename);

        // Presence alone counts; partial or stale files are not inspected.
        let exists = tokio::fs::try_exists(&file_path).await.unwrap_or_else(|e| {
            debug!(path = %file_path.display(), error = %e, "presence check failed, treating as absent");
            false
        });
        if exists {
            debug!(path = %file_path.display(), "target exists, skipping request");
            return Ok(DownloadResult::SkippedExisting(filename.to_string()));
        }

        let url = task.source_url().as_str();
        let response = self
            .client
            .get(task.source_url().clone())
            .header(REFERER, referer)
            .send()
            .await
            .map_err(|e| DownloadError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !is_image_content_type(content_type) {
            debug!(content_type, "response is not an image");
            return Ok(DownloadResult::SkippedNonImage(filename.to_string()));
        }

        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %file_path.display(), "target appeared during request");
                return Ok(DownloadResult::SkippedExisting(filename.to_string()));
            }
            Err(e) => return Err(DownloadError::io(file_path, e)),
        };

        let stream_result = stream_to_file(file, response, url, &file_path).await;
        if stream_result.is_err() {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
        }
        let bytes = stream_result?;

        info!(path = %file_path.display(), bytes, "download complete");
        Ok(DownloadResult::Downloaded(filename.to_string()))
    }
}

fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// Streams response body to file in fixed-size writes, returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::from_reqwest(url, e))?;

        for piece in chunk.chunks(WRITE_CHUNK_SIZE) {
            writer
                .write_all(piece)
                .await
                .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;
        }

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
