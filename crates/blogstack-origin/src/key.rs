//! Mapping forwarded request paths onto object keys.
//!
//! The edge forwards a path such as `/blog/post%20one.html`; the bucket
//! stores `blog/post one.html`. Keys ending in `/` (including the empty key
//! for `/`) name a folder and resolve to the folder's index document, the
//! way an object-store website endpoint does.

use percent_encoding::percent_decode_str;

use crate::error::{OriginError, OriginResult};

/// Maximum object key length in bytes.
const MAX_KEY_BYTES: usize = 1024;

/// Convert a forwarded request path into an object key.
///
/// Strips any query string and the leading slash, then percent-decodes.
///
/// # Examples
///
/// ```
/// use blogstack_origin::object_key_for_uri;
///
/// assert_eq!(object_key_for_uri("/about.html").unwrap(), "about.html");
/// assert_eq!(object_key_for_uri("/blog/my%20post.html").unwrap(), "blog/my post.html");
/// assert_eq!(object_key_for_uri("/").unwrap(), "");
/// ```
pub fn object_key_for_uri(uri: &str) -> OriginResult<String> {
    let path = uri.split_once('?').map_or(uri, |(path, _)| path);
    let path = path.strip_prefix('/').unwrap_or(path);

    percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| OriginError::invalid_key(path, "not valid UTF-8 after percent-decoding"))
}

/// Append the index document to folder keys.
///
/// # Examples
///
/// ```
/// use blogstack_origin::with_index_document;
///
/// assert_eq!(with_index_document("", "index.html"), "index.html");
/// assert_eq!(with_index_document("blog/", "index.html"), "blog/index.html");
/// assert_eq!(with_index_document("about.html", "index.html"), "about.html");
/// ```
#[must_use]
pub fn with_index_document(key: &str, index_document: &str) -> String {
    if key.is_empty() || key.ends_with('/') {
        format!("{key}{index_document}")
    } else {
        key.to_owned()
    }
}

/// Reject keys that are too long or could reach outside the site root.
///
/// Rules:
/// - 1-1024 bytes
/// - no `..` or `.` segment
/// - no backslash or NUL byte
/// - not absolute
pub fn validate_key(key: &str) -> OriginResult<()> {
    if key.is_empty() {
        return Err(OriginError::invalid_key(key, "key must not be empty"));
    }

    if key.len() > MAX_KEY_BYTES {
        return Err(OriginError::invalid_key(
            key,
            format!("key exceeds {MAX_KEY_BYTES} bytes"),
        ));
    }

    if key.starts_with('/') {
        return Err(OriginError::invalid_key(key, "key must be relative"));
    }

    if key.contains('\\') || key.contains('\0') {
        return Err(OriginError::invalid_key(
            key,
            "key contains a backslash or NUL byte",
        ));
    }

    if key.split('/').any(|segment| segment == ".." || segment == ".") {
        return Err(OriginError::invalid_key(key, "key contains a dot segment"));
    }

    Ok(())
}
