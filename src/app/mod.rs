//! Run orchestration: folder setup, scraping, dispatch and reporting.

mod dedupe;
mod runner;

pub use dedupe::dedupe_by_filename;
pub use runner::{RunError, RunReport, run};
