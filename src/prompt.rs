//! Interactive prompts used when no URL is passed on the command line.

use std::io::{self, BufRead, Write};

pub const URL_PROMPT: &str = "Enter the URL to scrape images from (Directory Listing): ";
pub const FOLDER_PROMPT: &str = "Enter output folder name (default is 'downloaded_images'): ";

/// Writes `message`, then reads one line and returns it trimmed.
///
/// End of input yields an empty string.
pub fn prompt_line<R, W>(input: &mut R, output: &mut W, message: &str) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    output.write_all(message.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
