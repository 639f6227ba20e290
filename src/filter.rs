//! Filename filtering for image candidates.
//!
//! A candidate qualifies when it ends in a known raster image extension and
//! none of the exclusion patterns match. The exclusions drop assets that
//! listings commonly expose next to real images: site chrome (logos, icons,
//! backgrounds), stylesheets and scripts, and non-image files.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};

/// Matches names ending in a supported image extension.
#[allow(clippy::expect_used)]
static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpe?g|png|gif|bmp|webp|tiff)$").expect("extension regex is valid") // Static pattern, safe to panic
});

/// Patterns that disqualify a name even when its extension is an image one.
const EXCLUDED_PATTERNS: &[&str] = &[
    r"\.svg$",
    r"\.ico$",
    r"background",
    r"logo",
    r"icon-",
    r"css",
    r"js",
    r"\.txt$",
    r"\.html$",
    r"\.xml$",
    r"\.zip$",
];

#[allow(clippy::expect_used)]
static EXCLUDED: LazyLock<RegexSet> = LazyLock::new(|| {
    let patterns = EXCLUDED_PATTERNS.iter().map(|p| format!("(?i){p}"));
    RegexSet::new(patterns).expect("exclusion patterns are valid") // Static patterns, safe to panic
});

/// Returns true if `candidate` ends in a supported image extension.
///
/// The check is anchored at the very end, so a trailing query string or
/// fragment makes it fail.
#[must_use]
pub fn has_image_extension(candidate: &str) -> bool {
    IMAGE_EXTENSION.is_match(candidate)
}

/// Returns true if `filename` names a downloadable image.
///
/// # Examples
///
/// ```
/// use grabber_core::filter::is_valid_image;
///
/// assert!(is_valid_image("photo1.JPG"));
/// assert!(!is_valid_image("site-logo.png"));
/// assert!(!is_valid_image("readme.txt"));
/// ```
#[must_use]
pub fn is_valid_image(filename: &str) -> bool {
    has_image_extension(filename) && !EXCLUDED.is_match(filename)
}
