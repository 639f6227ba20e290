//! Anchor extraction from directory listing pages.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, info, instrument, trace};
use url::Url;

use super::error::ScrapeError;
use super::task::ImageTask;
use crate::download::HttpClient;
use crate::filter::{has_image_extension, is_valid_image};

#[allow(clippy::expect_used)]
static ANCHOR_WITH_HREF: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid")); // Static pattern, safe to panic

/// Fetches `page_url` and returns one [`ImageTask`] per qualifying anchor.
///
/// The whole page is scanned before returning; callers get the complete,
/// ordered task list.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the URL is not an absolute http/https URL, or
/// if the page cannot be fetched (network error, timeout, non-2xx status).
#[instrument(skip(client))]
pub async fn extract_image_tasks(
    client: &HttpClient,
    page_url: &str,
) -> Result<Vec<ImageTask>, ScrapeError> {
    let base = validate_page_url(page_url)?;
    let html = client
        .fetch_text(&base)
        .await
        .map_err(|e| ScrapeError::fetch(page_url, e))?;

    let tasks = extract_tasks_from_html(&html, &base);
    info!(tasks = tasks.len(), "extracted image links");
    Ok(tasks)
}

/// Scans HTML for anchors that point at images, in document order.
///
/// For each `href`: the raw value must end in an image extension, its
/// basename must pass [`is_valid_image`], and it must resolve against
/// `base_url`.
///
/// # Examples
///
/// ```
/// use grabber_core::scrape::extract_tasks_from_html;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/pics/").unwrap();
/// let html = r#"<a href="photo1.jpg">1</a><a href="logo-bg.png">l</a><a href="readme.txt">r</a>"#;
/// let tasks = extract_tasks_from_html(html, &base);
/// assert_eq!(tasks.len(), 1);
/// assert_eq!(tasks[0].filename(), "photo1.jpg");
/// assert_eq!(tasks[0].source_url().as_str(), "https://example.com/pics/photo1.jpg");
/// ```
#[must_use]
pub fn extract_tasks_from_html(html: &str, base_url: &Url) -> Vec<ImageTask> {
    let document = Html::parse_document(html);
    let mut tasks = Vec::new();

    for anchor in document.select(&ANCHOR_WITH_HREF) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        if !has_image_extension(href) {
            trace!(href, "no image extension");
            continue;
        }

        let filename = filename_from_href(href);
        if !is_valid_image(&filename) {
            debug!(href, filename = %filename, "excluded by filter");
            continue;
        }

        let source_url = match base_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(href, error = %e, "href does not resolve against page URL");
                continue;
            }
        };

        trace!(url = %source_url, filename = %filename, "image link");
        tasks.push(ImageTask::new(source_url, filename));
    }

    tasks
}

/// Validates the listing URL.
///
/// # Validation rules:
/// - Must be parseable by the `url` crate
/// - Must use http or https scheme (no ftp, file, etc.)
/// - Must have a host (domain or IP)
fn validate_page_url(raw: &str) -> Result<Url, ScrapeError> {
    let parsed = Url::parse(raw).map_err(|e| ScrapeError::malformed(raw, &e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(ScrapeError::unsupported_scheme(raw, scheme)),
    }

    if parsed.host().is_none() {
        return Err(ScrapeError::malformed(raw, "URL has no host"));
    }

    Ok(parsed)
}

/// Derives a local filename from an href: the last path segment with query
/// and fragment removed, percent-decoded, with separators neutralised.
pub(crate) fn filename_from_href(href: &str) -> String {
    let without_fragment = href.split('#').next().unwrap_or("");
    let path = without_fragment.split('?').next().unwrap_or("");
    let last_segment = path.rsplit('/').next().unwrap_or("");

    let decoded = urlencoding::decode(last_segment).unwrap_or_else(|e| {
        debug!(segment = %last_segment, error = %e, "URL decoding failed, using raw segment");
        last_segment.into()
    });

    sanitize_filename(&decoded)
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
