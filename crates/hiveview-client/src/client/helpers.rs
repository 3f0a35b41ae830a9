//! Pure helpers: URL building and header parsing (no HTTP, no status logic).

use reqwest::StatusCode;

pub(crate) fn discovery_url(base_url: &str) -> String {
    format!("{}/discovery.json", base_url.trim_end_matches('/'))
}

/// Short message for an error body; falls back to the status reason.
pub(crate) fn error_excerpt(body: &str, status: StatusCode) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no reason provided")
            .to_string()
    } else {
        body.chars().take(200).collect()
    }
}

/// Total length from a `Content-Range: bytes 0-99/1234` header.
pub(crate) fn content_range_total(header: &str) -> Option<u64> {
    let range = header.trim().strip_prefix("bytes")?.trim();
    let (_, total) = range.split_once('/')?;
    total.trim().parse().ok()
}
