//! Errors raised around the edge function.
//!
//! The path-resolution function itself cannot fail. These cover the JSON
//! boundary used to evaluate it outside the edge runtime.

/// Edge event error.
#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    /// The input is not a well-formed viewer-request event.
    #[error("invalid viewer-request event: {0}")]
    InvalidEvent(#[source] serde_json::Error),

    /// The function output could not be encoded.
    #[error("failed to encode function output: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Convenience result type for edge event handling.
pub type EdgeResult<T> = Result<T, EdgeError>;
