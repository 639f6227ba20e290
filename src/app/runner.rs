//! One scrape-and-download run, from listing URL to final count.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{info, instrument, warn};

use super::dedupe::dedupe_by_filename;
use crate::config::Config;
use crate::download::{DownloadEngine, DownloadStats, EngineError, HttpClient};
use crate::scrape::{ScrapeError, extract_image_tasks};

/// How a run ended. Every variant has already been reported on the output.
#[derive(Debug)]
pub enum RunReport {
    /// The listing could not be fetched; nothing was downloaded.
    ScrapeFailed(ScrapeError),
    /// The listing had no qualifying image links.
    NoImages,
    /// Tasks were dispatched and all of them finished.
    Completed {
        /// Tasks found on the listing.
        discovered: usize,
        /// Tasks dispatched after dropping duplicate filenames.
        dispatched: usize,
        /// Per-outcome counts.
        stats: DownloadStats,
    },
}

impl RunReport {
    /// Number of images written during the run.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        match self {
            Self::Completed { stats, .. } => stats.downloaded(),
            Self::ScrapeFailed(_) | Self::NoImages => 0,
        }
    }
}

/// Errors that stop a run before the listing is fetched, or that break the output.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Worker pool size out of range.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The output folder could not be created.
    #[error("cannot create output folder {path}: {source}")]
    OutputDir {
        /// Folder that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Writing a report line failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

/// Runs the whole pipeline for `config`, writing one line per event to `out`.
///
/// Lines written:
/// - `Error during scraping: <error>` if the listing cannot be fetched (and nothing else)
/// - `No valid images found.` if the listing has no image links
/// - otherwise one line per task in completion order, then `Total images downloaded: <N>`
///
/// # Errors
///
/// Returns [`RunError`] if the pool size is invalid, the output folder cannot
/// be created, or `out` rejects a write. Scrape and per-image failures are
/// reported through `out` and the returned [`RunReport`] instead.
#[instrument(skip(config, out), fields(url = %config.target_url(), output = %config.output_folder().display()))]
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<RunReport, RunError> {
    let engine = DownloadEngine::new(config.max_concurrency())?;
    let client = HttpClient::with_image_timeout(config.image_timeout());

    let output_dir = config.output_folder();
    std::fs::create_dir_all(output_dir).map_err(|source| RunError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let tasks = match extract_image_tasks(&client, config.target_url()).await {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(error = %e, "scraping failed");
            writeln!(out, "Error during scraping: {e}").map_err(RunError::Output)?;
            return Ok(RunReport::ScrapeFailed(e));
        }
    };

    if tasks.is_empty() {
        writeln!(out, "No valid images found.").map_err(RunError::Output)?;
        return Ok(RunReport::NoImages);
    }

    let discovered = tasks.len();
    let tasks = dedupe_by_filename(tasks);
    let dispatched = tasks.len();
    info!(discovered, dispatched, "dispatching image tasks");

    let mut write_error = None;
    let stats = engine
        .run(
            &client,
            tasks,
            output_dir,
            config.target_url(),
            |result| {
                if write_error.is_none()
                    && let Err(e) = writeln!(out, "{result}")
                {
                    write_error = Some(e);
                }
            },
        )
        .await;
    if let Some(e) = write_error {
        return Err(RunError::Output(e));
    }

    writeln!(out, "Total images downloaded: {}", stats.downloaded()).map_err(RunError::Output)?;

    Ok(RunReport::Completed {
        discovered,
        dispatched,
        stats,
    })
}
