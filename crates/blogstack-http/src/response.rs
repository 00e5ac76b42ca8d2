//! Response builders for the edge service.

use chrono::{DateTime, Utc};
use http::header::{
    ALLOW, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, ETAG, HeaderValue, LAST_MODIFIED,
};
use http::{Response, StatusCode};

use blogstack_origin::{OriginError, OriginObject};

use crate::body::EdgeResponseBody;

/// Format a timestamp as an HTTP-date (RFC 9110 IMF-fixdate).
///
/// # Examples
///
/// ```
/// use blogstack_http::response::http_date;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 1).unwrap();
/// assert_eq!(http_date(&ts), "Sat, 09 Mar 2024 08:05:01 GMT");
/// ```
#[must_use]
pub fn http_date(ts: &DateTime<Utc>) -> String {
    ts.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Build a `200 OK` response for an object.
///
/// For `HEAD` the headers describe the object but the body is empty.
#[must_use]
pub fn object_response(
    obj: &OriginObject,
    cache_control: &str,
    head: bool,
) -> Response<EdgeResponseBody> {
    let body = if head {
        EdgeResponseBody::empty()
    } else {
        EdgeResponseBody::from_bytes(obj.body.clone())
    };

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, obj.content_type.as_ref())
        .header(CONTENT_LENGTH, obj.size())
        .body(body)
        .expect("static object response should be valid");
    add_validators(&mut response, obj, cache_control);
    response
}

/// Build a `304 Not Modified` response for an object.
#[must_use]
pub fn not_modified_response(
    obj: &OriginObject,
    cache_control: &str,
) -> Response<EdgeResponseBody> {
    let mut response = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .body(EdgeResponseBody::empty())
        .expect("static 304 response should be valid");
    add_validators(&mut response, obj, cache_control);
    response
}

fn add_validators(
    response: &mut Response<EdgeResponseBody>,
    obj: &OriginObject,
    cache_control: &str,
) {
    let headers = response.headers_mut();
    if let Ok(hv) = HeaderValue::from_str(&obj.etag) {
        headers.insert(ETAG, hv);
    }
    if let Some(ts) = &obj.last_modified {
        if let Ok(hv) = HeaderValue::from_str(&http_date(ts)) {
            headers.insert(LAST_MODIFIED, hv);
        }
    }
    if let Ok(hv) = HeaderValue::from_str(cache_control) {
        headers.insert(CACHE_CONTROL, hv);
    }
}

/// HTTP status for an origin error.
#[must_use]
pub fn status_for_error(err: &OriginError) -> StatusCode {
    match err {
        OriginError::NoSuchKey { .. } => StatusCode::NOT_FOUND,
        OriginError::InvalidKey { .. } => StatusCode::FORBIDDEN,
        OriginError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build an error response for an origin error.
///
/// When `error_document` is given it becomes the body (served as the site's
/// own "not found" page); otherwise the body is a plain-text message.
#[must_use]
pub fn error_response(
    err: &OriginError,
    error_document: Option<&OriginObject>,
    head: bool,
) -> Response<EdgeResponseBody> {
    let status = status_for_error(err);

    let (content_type, bytes) = match error_document {
        Some(doc) => (doc.content_type.to_string(), doc.body.clone()),
        None => (
            mime::TEXT_PLAIN_UTF_8.to_string(),
            bytes::Bytes::from(format!("{}: {}\n", err.code(), public_message(err))),
        ),
    };
    let length = bytes.len();
    let body = if head {
        EdgeResponseBody::empty()
    } else {
        EdgeResponseBody::from_bytes(bytes)
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, length)
        .header(CACHE_CONTROL, "no-store")
        .body(body)
        .unwrap_or_else(|_| {
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(EdgeResponseBody::empty())
                .expect("static response should be valid")
        })
}

/// Message safe to show a viewer; filesystem details stay in the logs.
fn public_message(err: &OriginError) -> String {
    match err {
        OriginError::NoSuchKey { key } => format!("The specified key does not exist: {key}"),
        OriginError::InvalidKey { .. } => "Access Denied".to_owned(),
        OriginError::Io { .. } => "We encountered an internal error. Please try again.".to_owned(),
    }
}

/// Build a `405 Method Not Allowed` response.
#[must_use]
pub fn method_not_allowed_response() -> Response<EdgeResponseBody> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(ALLOW, "GET, HEAD")
        .body(EdgeResponseBody::empty())
        .expect("static 405 response should be valid")
}

const HEALTH_BODY: &str = r#"{"status":"running","service":"edge"}"#;

/// Produce a health check response. `HEAD` probes get the headers only.
#[must_use]
pub fn health_check_response(head: bool) -> Response<EdgeResponseBody> {
    let body = if head {
        EdgeResponseBody::empty()
    } else {
        EdgeResponseBody::from_string(HEALTH_BODY)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .header(CONTENT_LENGTH, HEALTH_BODY.len())
        .body(body)
        .expect("static health response should be valid")
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use chrono::TimeZone;
    use http_body::Body;

    use super::*;

    fn object() -> OriginObject {
        let ts = Utc
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .expect("valid timestamp");
        OriginObject::new("about.html", Bytes::from_static(b"<h1>about</h1>"), Some(ts))
    }

    fn header<'a>(resp: &'a Response<EdgeResponseBody>, name: &str) -> Option<&'a str> {
        resp.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_should_build_object_response() {
        let obj = object();
        let resp = object_response(&obj, "public, max-age=300", false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(header(&resp, "content-length"), Some("14"));
        assert_eq!(header(&resp, "etag"), Some(obj.etag.as_str()));
        assert_eq!(
            header(&resp, "last-modified"),
            Some("Tue, 02 Jan 2024 03:04:05 GMT")
        );
        assert_eq!(header(&resp, "cache-control"), Some("public, max-age=300"));
        assert_eq!(resp.body().size_hint().exact(), Some(14));
    }

    #[test]
    fn test_should_keep_length_but_drop_body_for_head() {
        let resp = object_response(&object(), "no-cache", true);
        assert_eq!(header(&resp, "content-length"), Some("14"));
        assert!(resp.body().is_end_stream());
    }

    #[test]
    fn test_should_build_not_modified_response() {
        let obj = object();
        let resp = not_modified_response(&obj, "no-cache");
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(header(&resp, "etag"), Some(obj.etag.as_str()));
        assert!(resp.body().is_end_stream());
    }

    #[test]
    fn test_should_map_errors_to_status() {
        let missing = OriginError::NoSuchKey { key: "x".into() };
        let denied = OriginError::invalid_key("../x", "dot segment");
        let io = OriginError::Io {
            key: "x".into(),
            source: std::io::Error::other("disk"),
        };
        assert_eq!(status_for_error(&missing), StatusCode::NOT_FOUND);
        assert_eq!(status_for_error(&denied), StatusCode::FORBIDDEN);
        assert_eq!(status_for_error(&io), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_should_use_error_document_body() {
        let doc = OriginObject::new("404.html", Bytes::from_static(b"<h1>lost</h1>"), None);
        let err = OriginError::NoSuchKey { key: "x.html".into() };
        let resp = error_response(&err, Some(&doc), false);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(header(&resp, "content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(header(&resp, "content-length"), Some("13"));
    }

    #[test]
    fn test_should_hide_io_details_in_error_body() {
        let err = OriginError::Io {
            key: "x".into(),
            source: std::io::Error::other("/home/site/x: EIO"),
        };
        assert!(!public_message(&err).contains("/home"));
    }

    #[test]
    fn test_should_build_method_not_allowed_response() {
        let resp = method_not_allowed_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(header(&resp, "allow"), Some("GET, HEAD"));
    }

    #[test]
    fn test_should_produce_health_check_response() {
        let resp = health_check_response(false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "content-type"), Some("application/json"));
        assert_eq!(header(&resp, "content-length"), Some("37"));
    }

    #[test]
    fn test_should_omit_health_body_for_head() {
        let resp = health_check_response(true);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "content-length"), Some("37"));
        assert!(resp.body().is_end_stream());
    }
}
