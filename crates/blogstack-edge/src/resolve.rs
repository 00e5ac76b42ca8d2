//! Request path to object key resolution.
//!
//! Static site builders emit `about.html` for a top-level page but link to
//! it as `/about`. The edge resolves that mismatch before the request reaches
//! the origin bucket:
//!
//! | Request path | Forwarded path | Rule |
//! |--------------|----------------|------|
//! | `/style.css` | `/style.css` | has an extension |
//! | `/blog/` | `/blog/` | trailing slash, left to the index document |
//! | `/blog/post-one` | `/blog/post-one` | nested, passed through |
//! | `/about` | `/about.html` | top-level page |
//!
//! Nested extensionless paths are not suffixed; only top-level pages are.

use std::borrow::Cow;
use std::fmt;

/// Suffix appended to top-level extensionless paths.
pub const HTML_SUFFIX: &str = ".html";

/// Which rule decided the outcome for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The path already names an object or a folder.
    Unchanged,
    /// The path is a top-level page and gets [`HTML_SUFFIX`].
    Suffixed,
}

impl Resolution {
    /// Short name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Suffixed => "suffixed",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide how `path` is resolved without building the result.
///
/// # Examples
///
/// ```
/// use blogstack_edge::{Resolution, classify_path};
///
/// assert_eq!(classify_path("/about"), Resolution::Suffixed);
/// assert_eq!(classify_path("/blog/post-one"), Resolution::Unchanged);
/// ```
#[must_use]
pub fn classify_path(path: &str) -> Resolution {
    if path.contains('.') || path.ends_with('/') {
        return Resolution::Unchanged;
    }

    // Trailing slashes returned above, so anything with more than two
    // segments here is an extensionless file inside a folder.
    if path.split('/').count() > 2 {
        return Resolution::Unchanged;
    }

    Resolution::Suffixed
}

/// Resolve a request path to the path forwarded to the origin.
///
/// Total over all strings: never fails, never allocates when the path is
/// left unchanged. Callers apply it exactly once per request.
///
/// # Examples
///
/// ```
/// use blogstack_edge::resolve_path;
///
/// assert_eq!(resolve_path("/about"), "/about.html");
/// assert_eq!(resolve_path("/style.css"), "/style.css");
/// assert_eq!(resolve_path("/"), "/");
/// ```
#[must_use]
pub fn resolve_path(path: &str) -> Cow<'_, str> {
    match classify_path(path) {
        Resolution::Unchanged => Cow::Borrowed(path),
        Resolution::Suffixed => {
            let mut resolved = String::with_capacity(path.len() + HTML_SUFFIX.len());
            resolved.push_str(path);
            resolved.push_str(HTML_SUFFIX);
            Cow::Owned(resolved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_keep_paths_with_extension() {
        assert_eq!(resolve_path("/style.css"), "/style.css");
        assert_eq!(resolve_path("/images/logo.png"), "/images/logo.png");
        assert_eq!(resolve_path("/about.html"), "/about.html");
        assert_eq!(resolve_path("/feed.xml"), "/feed.xml");
    }

    #[test]
    fn test_should_keep_dot_anywhere_in_path() {
        assert_eq!(resolve_path("/v1.2/notes"), "/v1.2/notes");
        assert_eq!(resolve_path("/.well-known"), "/.well-known");
    }

    #[test]
    fn test_should_keep_trailing_slash_paths() {
        assert_eq!(resolve_path("/blog/"), "/blog/");
        assert_eq!(resolve_path("/blog/2024/"), "/blog/2024/");
        assert_eq!(resolve_path("//"), "//");
    }

    #[test]
    fn test_should_keep_root_path() {
        assert_eq!(resolve_path("/"), "/");
        assert_eq!(classify_path("/"), Resolution::Unchanged);
    }

    #[test]
    fn test_should_suffix_top_level_page() {
        assert_eq!(resolve_path("/about"), "/about.html");
        assert_eq!(resolve_path("/tags"), "/tags.html");
        assert_eq!(classify_path("/about"), Resolution::Suffixed);
    }

    #[test]
    fn test_should_pass_nested_extensionless_path_through() {
        assert_eq!(resolve_path("/blog/post-one"), "/blog/post-one");
        assert_eq!(resolve_path("/a/b/c"), "/a/b/c");
        assert_eq!(classify_path("/blog/post-one"), Resolution::Unchanged);
    }

    #[test]
    fn test_should_borrow_when_unchanged() {
        assert!(matches!(resolve_path("/blog/"), Cow::Borrowed(_)));
        assert!(matches!(resolve_path("/about"), Cow::Owned(_)));
    }

    #[test]
    fn test_should_leave_suffixed_path_alone_on_second_application() {
        let once = resolve_path("/about").into_owned();
        assert_eq!(resolve_path(&once), "/about.html");
    }

    #[test]
    fn test_should_handle_paths_without_leading_slash() {
        assert_eq!(resolve_path(""), ".html");
        assert_eq!(resolve_path("about"), "about.html");
        assert_eq!(resolve_path("blog/post"), "blog/post.html");
    }

    #[test]
    fn test_should_treat_double_slash_as_nested() {
        assert_eq!(resolve_path("//about"), "//about");
    }

    #[test]
    fn test_should_handle_non_ascii_paths() {
        assert_eq!(resolve_path("/über"), "/über.html");
        assert_eq!(resolve_path("/日記/一"), "/日記/一");
    }

    #[test]
    fn test_should_display_resolution() {
        assert_eq!(Resolution::Suffixed.to_string(), "suffixed");
        assert_eq!(Resolution::Unchanged.to_string(), "unchanged");
    }
}
