//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during extraction operations.
///
/// Strategy-level failures (everything except [`AllStrategiesFailed`]) are
/// recovered by the orchestrator falling through to the next strategy; they
/// never reach the caller.
///
/// [`AllStrategiesFailed`]: ExtractionError::AllStrategiesFailed
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Every credential in the pool is rate limited or disabled
    #[error("all API credentials are rate limited or unavailable")]
    CredentialExhausted,

    /// Provider signalled a quota hit for the credential in use
    #[error("provider rate limited the request")]
    ProviderRateLimited,

    /// Provider rejected the credential or the request itself
    #[error("provider rejected the request: {0}")]
    ProviderRejected(String),

    /// Transient provider fault (network, 5xx)
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Model output was not valid JSON and span recovery also failed
    #[error("failed to parse model output as JSON: {0}")]
    MalformedModelOutput(String),

    /// Credential-rotation retry budget spent without a usable response
    #[error("retry budget exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// Document text was empty or carried an upstream extraction error
    #[error("document text is empty or unreadable")]
    EmptyInput,

    /// The external text-extraction library failed to read the file
    #[error("document text extraction failed: {0}")]
    TextExtraction(String),

    /// Every strategy in the chain failed (implementation bug: the static
    /// fallback is total)
    #[error("all extraction strategies failed")]
    AllStrategiesFailed,
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
