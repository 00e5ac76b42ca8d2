//! Viewer-request path resolution for BlogStack.
//!
//! The edge runs this function on every viewer request, before cache lookup,
//! to map the requested path onto the object key stored in the origin
//! bucket. It is pure and stateless: the same path always resolves to the
//! same result, and invocations share nothing.
//!
//! # Architecture
//!
//! ```text
//! ViewerRequestEvent (JSON from the edge runtime)
//!        |
//!        v
//! handle_viewer_request
//!        |
//!        v
//! resolve_path (request.uri)
//!        |
//!        v
//! EdgeRequest (forwarded to origin)
//! ```

mod error;
mod event;
mod resolve;

pub use error::{EdgeError, EdgeResult};
pub use event::{
    EdgeRequest, EventContext, EventType, FunctionOutput, Viewer, ViewerRequestEvent,
    handle_event_json, handle_viewer_request,
};
pub use resolve::{HTML_SUFFIX, Resolution, classify_path, resolve_path};
