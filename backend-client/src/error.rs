//! Error taxonomy for upstream fetches.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure, including body decode errors from reqwest.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// The body parsed but did not carry the shape we need.
    #[error("malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },
}

pub type Result<T> = std::result::Result<T, BackendError>;
