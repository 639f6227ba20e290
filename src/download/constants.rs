//! Constants for the download module (timeouts, write sizes).

/// HTTP connect timeout shared by page and image requests (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default image read timeout (10 seconds): the longest a response may stall
/// between reads, not a cap on the whole transfer.
pub const IMAGE_TIMEOUT_SECS: u64 = 10;

/// Timeout for fetching the listing page itself (30 seconds).
///
/// Listings of large directories can be slow to render server-side.
pub const PAGE_TIMEOUT_SECS: u64 = 30;

/// Size of each write when streaming an image body to disk.
pub const WRITE_CHUNK_SIZE: usize = 1024;
