//! CLI entry point for the grabber tool.

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use grabber_core::{Config, RunReport};
use tracing::{debug, info};

mod cli;
mod prompt;

use cli::Args;
use prompt::{FOLDER_PROMPT, URL_PROMPT, prompt_line};

/// Exit code for a run that never got a URL.
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));

    // Logs go to stderr; stdout carries the per-image report lines.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    debug!(?args, "CLI arguments parsed");

    let (target_url, output_folder) = read_target(&args)?;
    if target_url.is_empty() {
        eprintln!("error: a listing URL is required");
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    let config = Config::new(target_url)
        .with_output_folder(&output_folder)
        .with_max_concurrency(usize::from(args.concurrency))
        .with_image_timeout(Duration::from_secs(args.timeout));

    info!(
        url = config.target_url(),
        output = %config.output_folder().display(),
        concurrency = config.max_concurrency(),
        "grabber starting"
    );

    let mut stdout = io::stdout().lock();
    let report = grabber_core::run(&config, &mut stdout)
        .await
        .context("run aborted")?;
    stdout.flush().context("failed to flush output")?;

    Ok(match report {
        RunReport::ScrapeFailed(_) => ExitCode::FAILURE,
        RunReport::NoImages | RunReport::Completed { .. } => ExitCode::SUCCESS,
    })
}

/// Resolves the listing URL and output folder from flags, prompting for
/// whatever the flags leave out when no URL was given.
fn read_target(args: &Args) -> Result<(String, String)> {
    if let Some(url) = &args.url {
        return Ok((url.trim().to_string(), args.output.clone().unwrap_or_default()));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let url = prompt_line(&mut input, &mut stdout, URL_PROMPT).context("failed to read URL")?;
    let folder = match &args.output {
        Some(folder) => folder.clone(),
        None => prompt_line(&mut input, &mut stdout, FOLDER_PROMPT)
            .context("failed to read output folder")?,
    };
    Ok((url, folder))
}
