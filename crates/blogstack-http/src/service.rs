//! The edge HTTP service implementing hyper's `Service` trait.
//!
//! [`EdgeHttpService`] plays the part of the CDN in front of the origin:
//!
//! 1. Health check interception (`GET`/`HEAD /_blogstack/health`)
//! 2. Method filtering (only `GET` and `HEAD` reach the origin)
//! 3. Viewer-request function: path resolution on the request URI
//! 4. Origin fetch by object key
//! 5. Conditional `If-None-Match` handling
//! 6. Error responses, with the site's error document for 404s
//! 7. Common response headers (`x-amz-cf-id`, `Server`)

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::service::Service;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use blogstack_core::EdgeConfig;
use blogstack_edge::{ViewerRequestEvent, classify_path, handle_viewer_request};
use blogstack_origin::{Origin, OriginError, OriginObject, object_key_for_uri};

use crate::body::EdgeResponseBody;
use crate::conditional::if_none_match_matches;
use crate::response::{
    error_response, health_check_response, method_not_allowed_response, not_modified_response,
    object_response,
};
use crate::viewer::edge_request_from_parts;

/// Path answered by the health check without touching the origin.
pub const HEALTH_PATH: &str = "/_blogstack/health";

/// Configuration for the edge HTTP service.
#[derive(Debug, Clone)]
pub struct EdgeHttpConfig {
    /// `Cache-Control` value for successful object responses.
    pub cache_control: String,
    /// Object key served as the body of 404 responses.
    pub error_document: Option<String>,
    /// Whether to run the viewer-request function.
    pub rewrite_enabled: bool,
}

impl Default for EdgeHttpConfig {
    fn default() -> Self {
        Self::from(&EdgeConfig::default())
    }
}

impl From<&EdgeConfig> for EdgeHttpConfig {
    fn from(config: &EdgeConfig) -> Self {
        Self {
            cache_control: config.cache_control.clone(),
            error_document: config.error_document.clone(),
            rewrite_enabled: config.rewrite_enabled,
        }
    }
}

/// The edge HTTP service that implements hyper's `Service` trait.
///
/// # Type Parameters
///
/// - `O`: The origin objects are fetched from.
#[derive(Debug)]
pub struct EdgeHttpService<O: Origin> {
    origin: Arc<O>,
    config: Arc<EdgeHttpConfig>,
}

impl<O: Origin> EdgeHttpService<O> {
    /// Create a new edge service with the given origin and configuration.
    #[must_use]
    pub fn new(origin: O, config: EdgeHttpConfig) -> Self {
        Self::from_shared(Arc::new(origin), config)
    }

    /// Create a new edge service from an `Arc<O>` origin and configuration.
    #[must_use]
    pub fn from_shared(origin: Arc<O>, config: EdgeHttpConfig) -> Self {
        Self {
            origin,
            config: Arc::new(config),
        }
    }
}

impl<O: Origin> Clone for EdgeHttpService<O> {
    fn clone(&self) -> Self {
        Self {
            origin: Arc::clone(&self.origin),
            config: Arc::clone(&self.config),
        }
    }
}

impl<O: Origin> Service<http::Request<Incoming>> for EdgeHttpService<O> {
    type Response = http::Response<EdgeResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let origin = Arc::clone(&self.origin);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();

            // Viewer requests that reach the origin are GET or HEAD; the
            // body is never read.
            let (parts, _body) = req.into_parts();
            let response = process_request(&parts, origin.as_ref(), &config, &request_id).await;

            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a viewer request through the edge pipeline.
pub async fn process_request<O: Origin>(
    parts: &http::request::Parts,
    origin: &O,
    config: &EdgeHttpConfig,
    request_id: &str,
) -> http::Response<EdgeResponseBody> {
    let method = &parts.method;
    let uri = &parts.uri;
    debug!(%method, %uri, request_id, "processing viewer request");

    let head = *method == http::Method::HEAD;

    // 1. Health check interception.
    if is_health_check(method, uri.path()) {
        return health_check_response(head);
    }

    // 2. Only reads reach the origin.
    if !head && *method != http::Method::GET {
        warn!(%method, %uri, request_id, "rejected non-read method");
        return method_not_allowed_response();
    }

    // 3. Viewer-request function, applied exactly once.
    let forwarded_uri = if config.rewrite_enabled {
        let resolution = classify_path(uri.path());
        let event = ViewerRequestEvent::new(edge_request_from_parts(parts));
        let forwarded = handle_viewer_request(event).uri;
        debug!(
            uri = uri.path(),
            forwarded_uri = %forwarded,
            %resolution,
            request_id,
            "ran viewer-request function"
        );
        forwarded
    } else {
        uri.path().to_owned()
    };

    // 4. Origin fetch.
    let result = match object_key_for_uri(&forwarded_uri) {
        Ok(key) => origin.get_object(&key).await,
        Err(err) => Err(err),
    };

    let obj = match result {
        Ok(obj) => obj,
        Err(err) => return origin_error_response(&err, origin, config, head, request_id).await,
    };

    // 5. Conditional request.
    let cached = parts
        .headers
        .get(http::header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| if_none_match_matches(&obj.etag, v));
    if cached {
        debug!(key = %obj.key, request_id, "viewer copy is current");
        return not_modified_response(&obj, &config.cache_control);
    }

    info!(
        %method,
        uri = uri.path(),
        key = %obj.key,
        size = obj.size(),
        request_id,
        "served object"
    );
    object_response(&obj, &config.cache_control, head)
}

/// Turn an origin error into a response, loading the error document for 404s.
async fn origin_error_response<O: Origin>(
    err: &OriginError,
    origin: &O,
    config: &EdgeHttpConfig,
    head: bool,
    request_id: &str,
) -> http::Response<EdgeResponseBody> {
    match err {
        OriginError::NoSuchKey { key } => {
            info!(key = %key, request_id, "object not found");
        }
        OriginError::InvalidKey { key, reason } => {
            warn!(key = %key, reason = %reason, request_id, "rejected object key");
        }
        OriginError::Io { key, source } => {
            error!(key = %key, error = %source, request_id, "origin read failed");
        }
    }

    let document = match (err, &config.error_document) {
        (OriginError::NoSuchKey { .. }, Some(doc_key)) => {
            load_error_document(origin, doc_key, request_id).await
        }
        _ => None,
    };

    error_response(err, document.as_ref(), head)
}

async fn load_error_document<O: Origin>(
    origin: &O,
    key: &str,
    request_id: &str,
) -> Option<OriginObject> {
    match origin.get_object(key).await {
        Ok(doc) => Some(doc),
        Err(err) => {
            debug!(key, error = %err, request_id, "error document unavailable");
            None
        }
    }
}

/// Check if the request is a health check probe.
fn is_health_check(method: &http::Method, path: &str) -> bool {
    (*method == http::Method::GET || *method == http::Method::HEAD)
        && (path == HEALTH_PATH || path == "/_health")
}

/// Add common response headers to every edge response.
fn add_common_headers(
    mut response: http::Response<EdgeResponseBody>,
    request_id: &str,
) -> http::Response<EdgeResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert("x-amz-cf-id", hv);
    }

    headers.insert(
        http::header::SERVER,
        http::header::HeaderValue::from_static("BlogStack"),
    );

    response
}
