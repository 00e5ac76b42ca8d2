//! Conditional request matching.

/// Whether an `If-None-Match` header value matches the object's ETag.
///
/// A match means the viewer's cached copy is current and a `304 Not
/// Modified` is appropriate. Handles `*`, comma-separated lists, and weak
/// validators (`W/"..."`), which compare equal to their strong form for GET.
///
/// # Examples
///
/// ```
/// use blogstack_http::conditional::if_none_match_matches;
///
/// assert!(if_none_match_matches("\"abc\"", "*"));
/// assert!(if_none_match_matches("\"abc\"", "\"xyz\", W/\"abc\""));
/// assert!(!if_none_match_matches("\"abc\"", "\"xyz\""));
/// ```
#[must_use]
pub fn if_none_match_matches(etag: &str, if_none_match: &str) -> bool {
    let etag = normalize_etag(etag);
    if_none_match.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || normalize_etag(candidate) == etag
    })
}

/// Normalize an ETag by stripping the weak prefix and surrounding quotes.
fn normalize_etag(etag: &str) -> &str {
    let etag = etag.strip_prefix("W/").unwrap_or(etag);
    etag.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(etag)
}
