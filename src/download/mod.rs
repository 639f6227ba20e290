//! HTTP download engine for streaming images to disk.
//!
//! # Features
//!
//! - Streaming downloads written in fixed-size chunks
//! - Presence-based skipping: an existing target file is never requested again
//! - Content-type gate: only `image/*` responses are written
//! - Bounded concurrency with results reported in completion order
//! - Typed per-task outcomes ([`DownloadResult`]) instead of propagated errors
//!
//! # Example
//!
//! ```no_run
//! use grabber_core::download::HttpClient;
//! use grabber_core::ImageTask;
//! use std::path::Path;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let task = ImageTask::new(Url::parse("https://example.com/pics/cat.png")?, "cat.png");
//! let result = client
//!     .download_image(&task, Path::new("./images"), "https://example.com/pics/")
//!     .await;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod engine;
mod error;
mod result;

pub use client::HttpClient;
pub use engine::{DEFAULT_CONCURRENCY, DownloadEngine, DownloadStats, EngineError};
pub use error::DownloadError;
pub use result::DownloadResult;
