//! Provider-facing traits for text generation.
//!
//! The extraction pipeline never talks to a provider directly; it goes
//! through [`GenerativeModel`] (one structured-completion call) and
//! [`ModelResolver`] (capability discovery). Tests inject mocks for both.

use async_trait::async_trait;
use thiserror::Error;

/// How a provider call failed, from the pipeline's point of view.
///
/// The AI extractor maps each variant to a different credential-pool
/// report and retry decision.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Quota exhausted for the credential in use
    #[error("rate limited")]
    RateLimited,

    /// Credential rejected or lacks access to the model
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The request itself was malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Transient fault (network, provider 5xx)
    #[error("transient provider error: {0}")]
    Transient(String),
}

/// One completed generation call.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Raw response text
    pub text: String,

    /// Tokens billed for the call (0 when the provider does not report)
    pub tokens_used: u32,
}

/// A text-generation provider.
///
/// The API key is an argument, not state: the pipeline rotates between
/// credentials per call.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run one blocking completion call against `model` using `api_key`.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        api_key: &str,
    ) -> Result<Generation, ProviderError>;
}

/// Discovers which model id the pipeline should call.
///
/// Returns `None` when discovery fails or nothing suitable is listed; the
/// extractor then falls back to its hard-coded default id.
#[async_trait]
pub trait ModelResolver: Send + Sync {
    async fn resolve(&self, api_key: &str) -> Option<String>;
}
