//! Error taxonomy at the collaborator boundary.

use thiserror::Error;

/// Failure of a call to a remote collaborator. Converted from the
/// transport error at the call site and propagated unchanged; the caller
/// owns all user-facing messaging.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx status from the collaborator; the body is kept for the
    /// error message the service chose to send.
    #[error("collaborator returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
