//! Objects returned by the origin.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use mime::Mime;

/// An object read from the origin, with the metadata the edge needs to
/// build a response.
#[derive(Debug, Clone)]
pub struct OriginObject {
    /// Object key, after index-document resolution.
    pub key: String,
    /// Object body.
    pub body: Bytes,
    /// Media type derived from the key's extension.
    pub content_type: Mime,
    /// Quoted hex MD5 of the body.
    pub etag: String,
    /// Last modification time, when the backend knows it.
    pub last_modified: Option<DateTime<Utc>>,
}

impl OriginObject {
    /// Build an object, deriving the content type and ETag.
    #[must_use]
    pub fn new(key: impl Into<String>, body: Bytes, last_modified: Option<DateTime<Utc>>) -> Self {
        let key = key.into();
        Self {
            content_type: content_type_for_key(&key),
            etag: compute_etag(&body),
            key,
            body,
            last_modified,
        }
    }

    /// Body size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.body.len() as u64
    }
}

/// Compute the quoted hex-encoded MD5 digest of `data`, the object-store
/// ETag convention.
///
/// # Examples
///
/// ```
/// use blogstack_origin::compute_etag;
///
/// let etag = compute_etag(b"");
/// assert_eq!(etag, "\"d41d8cd98f00b204e9800998ecf8427e\"");
/// ```
#[must_use]
pub fn compute_etag(data: &[u8]) -> String {
    let hash = Md5::digest(data);
    format!("\"{}\"", hex::encode(hash))
}

/// Media type for an object key, from its extension.
///
/// Unknown or missing extensions are served as `application/octet-stream`,
/// matching what an object store does for uploads without a content type.
#[must_use]
pub fn content_type_for_key(key: &str) -> Mime {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return mime::APPLICATION_OCTET_STREAM;
    };

    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => mime::TEXT_HTML_UTF_8,
        "css" => mime::TEXT_CSS_UTF_8,
        "js" | "mjs" => mime::APPLICATION_JAVASCRIPT_UTF_8,
        "json" | "map" => mime::APPLICATION_JSON,
        "txt" => mime::TEXT_PLAIN_UTF_8,
        "xml" => mime::TEXT_XML,
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "bmp" => mime::IMAGE_BMP,
        "pdf" => mime::APPLICATION_PDF,
        "woff" => mime::FONT_WOFF,
        "woff2" => mime::FONT_WOFF2,
        other => parse_extra(other),
    }
}

/// Types the `mime` crate has no constant for.
fn parse_extra(ext: &str) -> Mime {
    let essence = match ext {
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "rss" => "application/rss+xml",
        "atom" => "application/atom+xml",
        "webmanifest" => "application/manifest+json",
        "wasm" => "application/wasm",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => return mime::APPLICATION_OCTET_STREAM,
    };
    essence.parse().unwrap_or(mime::APPLICATION_OCTET_STREAM)
}
