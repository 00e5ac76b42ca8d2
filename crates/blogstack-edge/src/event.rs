//! Viewer-request event model.
//!
//! The edge runtime hands the function an event object and forwards whatever
//! request the function returns. Only `request.uri` is ever touched; the
//! query string, headers, and cookies are carried as opaque JSON so nothing
//! the runtime sends is lost on the way through.
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "context": { "eventType": "viewer-request" },
//!   "viewer": { "ip": "198.51.100.11" },
//!   "request": { "method": "GET", "uri": "/about", "headers": {} }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EdgeError, EdgeResult};
use crate::resolve::{Resolution, classify_path, resolve_path};

/// Lifecycle point at which the runtime invoked the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    /// Before cache lookup, on every viewer request.
    #[default]
    ViewerRequest,
    /// After the response is produced, before it reaches the viewer.
    ViewerResponse,
}

/// Runtime-supplied metadata about the invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContext {
    /// Lifecycle point.
    #[serde(default)]
    pub event_type: EventType,
    /// Distribution that received the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_id: Option<String>,
    /// Domain name of that distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_domain_name: Option<String>,
    /// Runtime request identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// The client that sent the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// Client IP address as seen by the edge.
    pub ip: String,
}

/// The request as seen (and returned) by the function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRequest {
    /// HTTP method.
    #[serde(default = "default_method")]
    pub method: String,
    /// Request path, without query string.
    pub uri: String,
    /// Query string parameters, passed through untouched.
    #[serde(default)]
    pub querystring: Map<String, Value>,
    /// Request headers, passed through untouched.
    #[serde(default)]
    pub headers: Map<String, Value>,
    /// Request cookies, passed through untouched.
    #[serde(default)]
    pub cookies: Map<String, Value>,
}

fn default_method() -> String {
    "GET".to_owned()
}

impl EdgeRequest {
    /// Create a request with the given method and path and no parameters.
    #[must_use]
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            querystring: Map::new(),
            headers: Map::new(),
            cookies: Map::new(),
        }
    }
}

/// A viewer-request event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerRequestEvent {
    /// Event schema version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Invocation metadata.
    #[serde(default)]
    pub context: EventContext,
    /// The client, when the runtime reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer: Option<Viewer>,
    /// The request to rewrite.
    pub request: EdgeRequest,
}

fn default_version() -> String {
    "1.0".to_owned()
}

impl ViewerRequestEvent {
    /// Wrap a request in a viewer-request event with default metadata.
    #[must_use]
    pub fn new(request: EdgeRequest) -> Self {
        Self {
            version: default_version(),
            context: EventContext::default(),
            viewer: None,
            request,
        }
    }
}

/// What the function hands back to the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionOutput {
    /// The request forwarded to the origin.
    pub request: EdgeRequest,
}

/// Run the path-resolution function on a viewer-request event.
///
/// Returns the event's request with `uri` rewritten when the path is a
/// top-level page. Every other field is returned as received.
///
/// # Examples
///
/// ```
/// use blogstack_edge::{EdgeRequest, ViewerRequestEvent, handle_viewer_request};
///
/// let event = ViewerRequestEvent::new(EdgeRequest::new("GET", "/about"));
/// assert_eq!(handle_viewer_request(event).uri, "/about.html");
/// ```
#[must_use]
pub fn handle_viewer_request(event: ViewerRequestEvent) -> EdgeRequest {
    let mut request = event.request;
    if classify_path(&request.uri) == Resolution::Suffixed {
        request.uri = resolve_path(&request.uri).into_owned();
    }
    request
}

/// Decode an event from JSON, run the function, and encode its output.
///
/// This is how the runtime's "test function" facility evaluates a function:
/// the output is `{"request": {...}}`.
pub fn handle_event_json(json: &str) -> EdgeResult<String> {
    let event: ViewerRequestEvent = serde_json::from_str(json).map_err(EdgeError::InvalidEvent)?;
    let output = FunctionOutput {
        request: handle_viewer_request(event),
    };
    serde_json::to_string_pretty(&output).map_err(EdgeError::Encode)
}
