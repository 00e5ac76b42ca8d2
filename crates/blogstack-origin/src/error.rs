//! Origin error types.
//!
//! Each variant maps to one HTTP status in the edge service: a missing
//! object is a 404, a key that could escape the site root is a 403, and
//! anything the filesystem reports beyond that is a 500.

/// Origin lookup error.
#[derive(Debug, thiserror::Error)]
pub enum OriginError {
    /// The specified key does not exist.
    #[error("The specified key does not exist: {key}")]
    NoSuchKey {
        /// The key that was not found.
        key: String,
    },

    /// The key cannot be served from this origin.
    #[error("Invalid object key {key:?}: {reason}")]
    InvalidKey {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The filesystem failed while reading the object.
    #[error("I/O error reading {key}: {source}")]
    Io {
        /// The key being read.
        key: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl OriginError {
    /// Build an [`OriginError::InvalidKey`].
    #[must_use]
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Classify an I/O error: not-found becomes [`OriginError::NoSuchKey`].
    #[must_use]
    pub fn from_io(key: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NoSuchKey {
                key: key.to_owned(),
            }
        } else {
            Self::Io {
                key: key.to_owned(),
                source,
            }
        }
    }

    /// Short error code used in logs and error bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoSuchKey { .. } => "NoSuchKey",
            Self::InvalidKey { .. } => "AccessDenied",
            Self::Io { .. } => "InternalError",
        }
    }
}

/// Convenience result type for origin operations.
pub type OriginResult<T> = Result<T, OriginError>;
