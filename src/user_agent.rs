//! Shared request identity for page and image HTTP traffic.
//!
//! Directory listings are often fronted by hotlink protection that rejects
//! non-browser clients, so every request presents the same desktop browser
//! User-Agent. Image requests add a `Referer` on top of these base headers.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

/// Fixed browser User-Agent sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Base headers installed as client defaults.
#[must_use]
pub(crate) fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_headers_carry_browser_user_agent() {
        let headers = base_headers();
        assert_eq!(
            headers.get(USER_AGENT).and_then(|v| v.to_str().ok()),
            Some(BROWSER_USER_AGENT)
        );
        assert_eq!(headers.len(), 1, "only the User-Agent is a base header");
    }

    #[test]
    fn test_browser_user_agent_looks_like_a_browser() {
        assert!(BROWSER_USER_AGENT.starts_with("Mozilla/5.0"));
        assert!(BROWSER_USER_AGENT.contains("Chrome/"));
    }
}
