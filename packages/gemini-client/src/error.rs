//! Error types for the Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
///
/// API failures are classified by HTTP status so callers can react to
/// quota and credential problems differently from transient faults.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Quota exceeded for the supplied API key (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Key rejected or lacks access (HTTP 401/403)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Malformed request (HTTP 400)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// Classify a non-success HTTP status into a typed error.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => Self::RateLimited(message),
            401 | 403 => Self::PermissionDenied(message),
            400 => Self::InvalidArgument(message),
            _ => Self::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            GeminiError::from_status(429, "quota".into()),
            GeminiError::RateLimited(_)
        ));
        assert!(matches!(
            GeminiError::from_status(403, "bad key".into()),
            GeminiError::PermissionDenied(_)
        ));
        assert!(matches!(
            GeminiError::from_status(400, "bad request".into()),
            GeminiError::InvalidArgument(_)
        ));
        assert!(matches!(
            GeminiError::from_status(503, "overloaded".into()),
            GeminiError::Api { status: 503, .. }
        ));
    }
}
