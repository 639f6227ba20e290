//! Grabber Core Library
//!
//! This library downloads every image linked from a directory listing page
//! into a local folder, skipping files that are already there.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`filter`] - Image filename allow/exclude rules
//! - [`scrape`] - Listing fetch and anchor extraction into [`ImageTask`]s
//! - [`download`] - HTTP client, per-image download and the bounded worker pool
//! - [`app`] - End-to-end run orchestration and console reporting
//! - [`config`] - Immutable run configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod download;
pub mod filter;
pub mod scrape;
#[cfg(test)]
pub mod test_support;
pub mod user_agent;

// Re-export commonly used types
pub use app::{RunError, RunReport, run};
pub use config::{Config, DEFAULT_OUTPUT_FOLDER};
pub use download::{
    DEFAULT_CONCURRENCY, DownloadEngine, DownloadError, DownloadResult, DownloadStats,
    EngineError, HttpClient,
};
pub use filter::{has_image_extension, is_valid_image};
pub use scrape::{ImageTask, ScrapeError, extract_image_tasks, extract_tasks_from_html};
