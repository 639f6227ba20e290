//! Listing scraper: turns a directory listing page into image tasks.
//!
//! Only anchor tags are considered, and links are never followed. See
//! [`extract_tasks_from_html`] for the per-href rules.
//!
//! # Example
//!
//! ```no_run
//! use grabber_core::download::HttpClient;
//! use grabber_core::scrape::extract_image_tasks;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let tasks = extract_image_tasks(&client, "https://example.com/pics/").await?;
//! for task in &tasks {
//!     println!("{} -> {}", task.source_url(), task.filename());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod links;
mod task;

pub use error::ScrapeError;
pub use links::{extract_image_tasks, extract_tasks_from_html};
pub use task::ImageTask;
