//! CLI argument definitions using clap derive macros.

use clap::Parser;

use grabber_core::DEFAULT_CONCURRENCY;
use grabber_core::download::constants::IMAGE_TIMEOUT_SECS;

/// Download every image linked from a directory listing.
///
/// Without --url, the URL and output folder are read interactively.
#[derive(Parser, Debug)]
#[command(name = "grabber")]
#[command(author, version, about)]
pub struct Args {
    /// Listing page to scrape (skips the interactive prompts)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Output folder (default: downloaded_images)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Maximum concurrent downloads (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Seconds an image response may stall before it fails (1-300)
    #[arg(long, default_value_t = IMAGE_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log level used when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
