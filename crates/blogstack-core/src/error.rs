//! Error types for the BlogStack core.

/// Core error type for BlogStack infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum BlogStackError {
    /// The configured bind address is not a valid socket address.
    #[error("invalid listen address: {0} (expected host:port)")]
    InvalidListenAddress(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for BlogStack operations.
pub type BlogStackResult<T> = Result<T, BlogStackError>;
