//! Edge HTTP service for BlogStack.
//!
//! This crate provides the HTTP layer that stands where the CDN stands in
//! production. It handles:
//!
//! - **Viewer requests** ([`viewer`]): Converts HTTP request parts into the
//!   edge function's request model.
//!
//! - **Conditional requests** ([`conditional`]): `If-None-Match` matching.
//!
//! - **Responses** ([`response`]): Object, 304, error, 405, and health
//!   responses.
//!
//! - **Service** ([`service`]): The [`EdgeHttpService`](service::EdgeHttpService)
//!   implementing hyper's `Service` trait.
//!
//! - **Body** ([`body`]): The [`EdgeResponseBody`](body::EdgeResponseBody) type.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> EdgeHttpService (hyper Service)
//!     -> Health check interception
//!     -> Method filter (GET / HEAD)
//!     -> Viewer-request function (path resolution)
//!     -> Origin::get_object
//!     -> If-None-Match
//!     -> Common response headers (x-amz-cf-id, Server)
//!   <- HTTP Response
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use blogstack_http::service::{EdgeHttpConfig, EdgeHttpService};
//! use blogstack_origin::DirectoryOrigin;
//!
//! let origin = DirectoryOrigin::new("public", "index.html");
//! let service = EdgeHttpService::new(origin, EdgeHttpConfig::default());
//! // Use `service` with hyper server.
//! ```

pub mod body;
pub mod conditional;
pub mod response;
pub mod service;
pub mod viewer;

pub use body::EdgeResponseBody;
pub use service::{EdgeHttpConfig, EdgeHttpService, HEALTH_PATH};
