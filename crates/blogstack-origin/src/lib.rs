//! Origin storage for the BlogStack edge.
//!
//! In production the origin is an object-store bucket holding the built
//! site. For local preview and tests, [`DirectoryOrigin`] serves the same
//! layout from a directory. The edge HTTP layer only sees the [`Origin`]
//! trait.
//!
//! # Key resolution
//!
//! ```text
//! forwarded path "/blog/"
//!        |
//!        v
//! object_key_for_uri   -> "blog/"
//!        |
//!        v
//! with_index_document  -> "blog/index.html"
//!        |
//!        v
//! validate_key + read
//! ```

use std::future::Future;
use std::pin::Pin;

mod directory;
mod error;
mod key;
mod object;

pub use directory::DirectoryOrigin;
pub use error::{OriginError, OriginResult};
pub use key::{object_key_for_uri, validate_key, with_index_document};
pub use object::{OriginObject, compute_etag, content_type_for_key};

/// Source of objects behind the edge.
///
/// This is the boundary between the HTTP layer and storage. It returns a
/// boxed future so the service can hold any backend behind an `Arc`.
pub trait Origin: Send + Sync + 'static {
    /// Fetch the object stored under `key`.
    ///
    /// Keys that are empty or end in `/` name a folder; backends resolve
    /// them to the folder's index document.
    fn get_object(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = OriginResult<OriginObject>> + Send + '_>>;
}
