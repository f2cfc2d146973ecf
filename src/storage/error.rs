//! Storage client error definitions.

use thiserror::Error;

/// Longest storage error body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Errors that can occur while calling the storage service.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The configured service URL cannot be used.
    #[error("invalid storage url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No service with this name is configured.
    #[error("storage service '{0}' is not configured")]
    NotConfigured(String),

    /// The call did not complete within the configured timeout.
    #[error("storage call timed out")]
    Timeout,

    /// Connection, TLS or protocol failure.
    #[error("storage transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The storage service answered with a non-success status.
    #[error("storage returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request payload could not be serialized.
    #[error("failed to encode storage request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    /// Classify a reqwest failure, separating timeouts from other transport errors.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StorageError::Timeout
        } else {
            StorageError::Transport(err)
        }
    }

    /// Build a status error from a raw response body.
    pub fn status(status: u16, body: &[u8]) -> Self {
        let mut body = String::from_utf8_lossy(body).trim().to_string();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
            body.push_str("...");
        }
        StorageError::Status { status, body }
    }

    /// Returns true if the call ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, StorageError::Timeout)
    }
}

/// Result type for storage calls.
pub type StorageResult<T> = Result<T, StorageError>;
