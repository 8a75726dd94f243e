//! Error types for the backend client.

use thiserror::Error;

/// Errors that can occur while talking to the chat/commerce backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Base or endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The backend answered with a non-success status.
    #[error("Backend returned status {0}")]
    Status(u16),

    /// Response body could not be decoded.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl BackendError {
    /// Check if this error is worth retrying by the host.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::HttpRequest(_) | Self::Status(500..=599))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transient_failures_are_retryable() {
        assert!(BackendError::Status(500).is_retryable());
        assert!(BackendError::Status(503).is_retryable());
        assert!(!BackendError::Status(404).is_retryable());
        assert!(!BackendError::Status(400).is_retryable());
        assert!(!BackendError::InvalidUrl(url::ParseError::EmptyHost).is_retryable());
    }
}
