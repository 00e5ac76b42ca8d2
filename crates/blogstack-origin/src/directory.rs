//! Origin backed by a directory of built site files.
//!
//! [`DirectoryOrigin`] treats a local directory as the bucket: the object
//! key `blog/index.html` is the file `<root>/blog/index.html`. Every key is
//! validated lexically and then checked again after canonicalization, so a
//! symlink inside the site cannot expose files outside it.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::Origin;
use crate::error::{OriginError, OriginResult};
use crate::key::{validate_key, with_index_document};
use crate::object::OriginObject;

/// Serves objects from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryOrigin {
    root: PathBuf,
    index_document: String,
}

impl DirectoryOrigin {
    /// Create an origin rooted at `root`, resolving folder keys to
    /// `index_document`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, index_document: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            index_document: index_document.into(),
        }
    }

    /// The site root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read an object by key.
    pub async fn read(&self, key: &str) -> OriginResult<OriginObject> {
        let key = with_index_document(key, &self.index_document);
        validate_key(&key)?;

        let root = tokio::fs::canonicalize(&self.root)
            .await
            .map_err(|source| OriginError::Io {
                key: key.clone(),
                source,
            })?;
        let path = tokio::fs::canonicalize(root.join(&key))
            .await
            .map_err(|e| OriginError::from_io(&key, e))?;

        if !path.starts_with(&root) {
            return Err(OriginError::invalid_key(key, "resolves outside the site root"));
        }

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| OriginError::from_io(&key, e))?;
        if !metadata.is_file() {
            // A folder requested without its trailing slash has no object.
            debug!(key = %key, "key names a directory, not an object");
            return Err(OriginError::NoSuchKey { key });
        }

        let body = tokio::fs::read(&path)
            .await
            .map_err(|e| OriginError::from_io(&key, e))?;
        let last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);

        trace!(key = %key, size = body.len(), "read object from directory origin");
        Ok(OriginObject::new(key, Bytes::from(body), last_modified))
    }
}

impl Origin for DirectoryOrigin {
    fn get_object(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = OriginResult<OriginObject>> + Send + '_>> {
        let key = key.to_owned();
        Box::pin(async move { self.read(&key).await })
    }
}
