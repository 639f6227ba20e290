//! Download engine for running image tasks on a bounded worker pool.
//!
//! This module provides the `DownloadEngine` which coordinates concurrent
//! downloads using a semaphore-based concurrency control pattern.
//!
//! # Overview
//!
//! Tasks are dispatched in the order given. Each one runs in its own Tokio
//! task while holding a semaphore permit, and its [`DownloadResult`] is
//! handed back to the caller as soon as it completes, so results arrive in
//! completion order rather than submission order.
//!
//! # Example
//!
//! ```no_run
//! use grabber_core::download::{DownloadEngine, HttpClient};
//! use std::path::Path;
//!
//! # async fn example(tasks: Vec<grabber_core::ImageTask>) -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DownloadEngine::new(10)?;
//! let client = HttpClient::new();
//! let stats = engine
//!     .run(&client, tasks, Path::new("./images"), "https://example.com/pics/", |result| {
//!         println!("{result}");
//!     })
//!     .await;
//! println!("Downloaded: {}", stats.downloaded());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use super::{DownloadResult, HttpClient};
use crate::scrape::ImageTask;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 100;

/// Default concurrency if not specified.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Error type for download engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },
}

/// Outcome counts from one engine run.
///
/// Updated only by the result consumer, one result at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadStats {
    downloaded: usize,
    skipped_existing: usize,
    skipped_non_image: usize,
    failed: usize,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of images written to disk.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded
    }

    /// Returns the number of tasks skipped because the file already existed.
    #[must_use]
    pub fn skipped_existing(&self) -> usize {
        self.skipped_existing
    }

    /// Returns the number of tasks whose response was not an image.
    #[must_use]
    pub fn skipped_non_image(&self) -> usize {
        self.skipped_non_image
    }

    /// Returns the number of failed tasks.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Returns the number of results recorded.
    #[must_use]
    pub fn total(&self) -> usize {
        self.downloaded + self.skipped_existing + self.skipped_non_image + self.failed
    }

    /// Counts one result.
    pub fn record(&mut self, result: &DownloadResult) {
        match result {
            DownloadResult::Downloaded(_) => self.downloaded += 1,
            DownloadResult::SkippedExisting(_) => self.skipped_existing += 1,
            DownloadResult::SkippedNonImage(_) => self.skipped_non_image += 1,
            DownloadResult::Failed { .. } => self.failed += 1,
        }
    }
}

/// Download engine for concurrent image downloads.
///
/// # Concurrency Model
///
/// - A dispatcher acquires a semaphore permit per task, in task order
/// - Each download runs in its own Tokio task and holds its permit (RAII)
/// - Results travel back over a channel and are consumed as they complete
/// - No retries: a failed task reports once and is done
#[derive(Debug)]
pub struct DownloadEngine {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
}

impl DownloadEngine {
    /// Creates a new download engine with the specified concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    ///
    /// # Example
    ///
    /// ```
    /// use grabber_core::download::DownloadEngine;
    ///
    /// let engine = DownloadEngine::new(10).unwrap();
    /// assert_eq!(engine.concurrency(), 10);
    /// ```
    #[instrument(level = "debug")]
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating download engine");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Downloads every task and reports each result through `on_result`.
    ///
    /// `on_result` is called once per task, in completion order, from the
    /// calling task. Individual failures never abort the run; a worker that
    /// panics is logged and simply produces no result.
    #[instrument(skip(self, client, tasks, on_result), fields(tasks = tasks.len(), output_dir = %output_dir.display()))]
    pub async fn run<F>(
        &self,
        client: &HttpClient,
        tasks: Vec<ImageTask>,
        output_dir: &Path,
        referer: &str,
        mut on_result: F,
    ) -> DownloadStats
    where
        F: FnMut(&DownloadResult),
    {
        let mut stats = DownloadStats::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        info!("starting downloads");

        let dispatcher = tokio::spawn(dispatch(
            Arc::clone(&self.semaphore),
            client.clone(),
            tasks,
            output_dir.to_path_buf(),
            referer.to_string(),
            tx,
        ));

        while let Some(result) = rx.recv().await {
            stats.record(&result);
            on_result(&result);
        }

        if let Err(e) = dispatcher.await {
            warn!(error = %e, "download dispatcher panicked");
        }

        info!(
            downloaded = stats.downloaded(),
            skipped_existing = stats.skipped_existing(),
            skipped_non_image = stats.skipped_non_image(),
            failed = stats.failed(),
            "downloads complete"
        );

        stats
    }
}

async fn dispatch(
    semaphore: Arc<Semaphore>,
    client: HttpClient,
    tasks: Vec<ImageTask>,
    output_dir: PathBuf,
    referer: String,
    results: mpsc::UnboundedSender<DownloadResult>,
) {
    let output_dir = Arc::new(output_dir);
    let referer: Arc<str> = Arc::from(referer);
    let mut workers = JoinSet::new();

    for task in tasks {
        // Blocks while every worker is busy.
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            warn!("semaphore closed; remaining tasks not dispatched");
            break;
        };

        debug!(url = %task.source_url(), filename = task.filename(), "dispatching task");

        let client = client.clone();
        let output_dir = Arc::clone(&output_dir);
        let referer = Arc::clone(&referer);
        let results = results.clone();

        workers.spawn(async move {
            let _permit = permit;
            let result = client.download_image(&task, &output_dir, &referer).await;
            // Receiver outlives all workers; a send error means the caller was dropped.
            let _ = results.send(result);
        });
    }

    drop(results);

    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "download task panicked");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::download::DownloadError;
    use crate::test_support::socket_guard::start_mock_server_or_skip;

    use std::time::Duration;

    use tempfile::TempDir;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_engine_rejects_zero_concurrency() {
        let result = DownloadEngine::new(0);
        assert!(matches!(
            result,
            Err(EngineError::InvalidConcurrency { value: 0 })
        ));
    }

    #[test]
    fn test_engine_rejects_over_max_concurrency() {
        assert!(DownloadEngine::new(101).is_err());
    }

    #[test]
    fn test_engine_accepts_bounds() {
        assert_eq!(DownloadEngine::new(1).unwrap().concurrency(), 1);
        assert_eq!(DownloadEngine::new(100).unwrap().concurrency(), 100);
    }

    #[test]
    fn test_engine_error_message_names_bounds() {
        let msg = DownloadEngine::new(0).unwrap_err().to_string();
        assert!(msg.contains("between 1 and 100"), "got: {msg}");
    }

    #[test]
    fn test_stats_record_each_outcome() {
        let mut stats = DownloadStats::new();
        stats.record(&DownloadResult::Downloaded("a.png".into()));
        stats.record(&DownloadResult::Downloaded("b.png".into()));
        stats.record(&DownloadResult::SkippedExisting("c.png".into()));
        stats.record(&DownloadResult::SkippedNonImage("d.png".into()));
        stats.record(&DownloadResult::Failed {
            url: "https://example.com/e.png".into(),
            error: DownloadError::timeout("https://example.com/e.png"),
        });

        assert_eq!(stats.downloaded(), 2);
        assert_eq!(stats.skipped_existing(), 1);
        assert_eq!(stats.skipped_non_image(), 1);
        assert_eq!(stats.failed(), 1);
        assert_eq!(stats.total(), 5);
    }

    #[tokio::test]
    async fn test_run_with_no_tasks_reports_nothing() {
        let engine = DownloadEngine::new(2).unwrap();
        let temp_dir = TempDir::new().unwrap();
        let mut seen = 0;

        let stats = engine
            .run(
                &HttpClient::new(),
                Vec::new(),
                temp_dir.path(),
                "http://localhost/",
                |_| seen += 1,
            )
            .await;

        assert_eq!(seen, 0);
        assert_eq!(stats.total(), 0);
    }

    #[tokio::test]
    async fn test_run_reports_every_task_and_isolates_failures() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        for name in ["a.png", "b.png", "c.png"] {
            Mock::given(method("GET"))
                .and(path(format!("/{name}")))
                .respond_with(ResponseTemplate::new(200).set_body_raw(b"PNG".to_vec(), "image/png"))
                .mount(&mock_server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/broken.png"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let tasks: Vec<ImageTask> = ["a.png", "broken.png", "b.png", "c.png"]
            .iter()
            .map(|name| {
                let url = Url::parse(&format!("{}/{name}", mock_server.uri())).unwrap();
                ImageTask::new(url, *name)
            })
            .collect();

        let engine = DownloadEngine::new(2).unwrap();
        let mut lines = Vec::new();
        let stats = engine
            .run(
                &HttpClient::new(),
                tasks,
                temp_dir.path(),
                &mock_server.uri(),
                |result| lines.push(result.to_string()),
            )
            .await;

        assert_eq!(lines.len(), 4);
        assert_eq!(stats.downloaded(), 3);
        assert_eq!(stats.failed(), 1);
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("Failed to download") && l.contains("broken.png"))
        );
        for name in ["a.png", "b.png", "c.png"] {
            assert!(temp_dir.path().join(name).exists(), "{name} should exist");
        }
    }

    #[tokio::test]
    async fn test_run_reports_in_completion_order() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .and(path("/slow.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"PNG".to_vec(), "image/png")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fast.png"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"PNG".to_vec(), "image/png"))
            .mount(&mock_server)
            .await;

        let tasks = ["slow.png", "fast.png"]
            .iter()
            .map(|name| {
                let url = Url::parse(&format!("{}/{name}", mock_server.uri())).unwrap();
                ImageTask::new(url, *name)
            })
            .collect();

        let engine = DownloadEngine::new(2).unwrap();
        let mut order = Vec::new();
        engine
            .run(
                &HttpClient::new(),
                tasks,
                temp_dir.path(),
                &mock_server.uri(),
                |result| order.push(result.filename().unwrap().to_string()),
            )
            .await;

        assert_eq!(order, vec!["fast.png", "slow.png"]);
    }

    #[tokio::test]
    async fn test_run_never_exceeds_concurrency() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let temp_dir = TempDir::new().unwrap();

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"PNG".to_vec(), "image/png")
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&mock_server)
            .await;

        let tasks = (0..4)
            .map(|i| {
                let url = Url::parse(&format!("{}/img{i}.png", mock_server.uri())).unwrap();
                ImageTask::new(url, format!("img{i}.png"))
            })
            .collect();

        // One worker: four 200ms responses must run back to back.
        let engine = DownloadEngine::new(1).unwrap();
        let started = std::time::Instant::now();
        let stats = engine
            .run(
                &HttpClient::new(),
                tasks,
                temp_dir.path(),
                &mock_server.uri(),
                |_| {},
            )
            .await;

        assert_eq!(stats.downloaded(), 4);
        assert!(started.elapsed() >= Duration::from_millis(800));
    }
}
