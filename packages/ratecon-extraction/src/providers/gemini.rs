//! Gemini implementation of the generation traits.
//!
//! A reference implementation over the `gemini-client` package. Enabled
//! with the `gemini` feature; the core pipeline and its tests run without
//! it.

use async_trait::async_trait;

use gemini_client::{GeminiClient, GeminiError, GenerateRequest, GenerationConfig};

use crate::traits::{Generation, GenerativeModel, ModelResolver, ProviderError};

/// Discovery preference order, most capable lightweight model first.
pub const PREFERRED_MODELS: &[&str] = &[
    "models/gemini-2.5-flash-lite",
    "models/gemini-2.5-flash-lite-preview-06-17",
    "models/gemini-2.0-flash-lite",
    "models/gemini-2.5-flash",
    "models/gemini-2.0-flash",
];

const MAX_OUTPUT_TOKENS: u32 = 2048;

/// [`GenerativeModel`] over the Gemini REST API.
#[derive(Clone, Default)]
pub struct GeminiModel {
    client: GeminiClient,
}

impl GeminiModel {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        api_key: &str,
    ) -> Result<Generation, ProviderError> {
        let request = GenerateRequest::from_prompt(prompt)
            .with_config(GenerationConfig::json_output(MAX_OUTPUT_TOKENS));

        let response = self
            .client
            .generate_content(model, api_key, request)
            .await
            .map_err(map_provider_error)?;

        let tokens_used = response
            .usage
            .map(|u| u.total_token_count)
            .unwrap_or_default();

        Ok(Generation {
            text: response.text,
            tokens_used,
        })
    }
}

/// [`ModelResolver`] over the Gemini `models` listing.
///
/// Filters to flash-lite / 2.5-flash generation models that can serve
/// `generateContent`, then takes the first preferred id that is actually
/// listed, falling back to the first listed candidate.
#[derive(Clone)]
pub struct GeminiResolver {
    client: GeminiClient,
    preferred: Vec<String>,
}

impl GeminiResolver {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            preferred: PREFERRED_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Put a host-pinned model id at the front of the preference order.
    pub fn with_preferred(mut self, model: impl Into<String>) -> Self {
        self.preferred.insert(0, model.into());
        self
    }
}

#[async_trait]
impl ModelResolver for GeminiResolver {
    async fn resolve(&self, api_key: &str) -> Option<String> {
        let models = match self.client.list_models(api_key).await {
            Ok(models) => models,
            Err(err) => {
                tracing::warn!(error = %err, "model discovery failed");
                return None;
            }
        };

        let available: Vec<String> = models
            .into_iter()
            .filter(|m| {
                let name = m.name.to_lowercase();
                (name.contains("flash-lite") || name.contains("gemini-2.5-flash"))
                    && m.supports_generate_content()
            })
            .map(|m| m.name)
            .collect();

        for preferred in &self.preferred {
            if available.iter().any(|a| a == preferred) {
                return Some(preferred.clone());
            }
        }

        available.into_iter().next()
    }
}

fn map_provider_error(err: GeminiError) -> ProviderError {
    match err {
        GeminiError::RateLimited(_) => ProviderError::RateLimited,
        GeminiError::PermissionDenied(message) => ProviderError::PermissionDenied(message),
        GeminiError::InvalidArgument(message) => ProviderError::InvalidArgument(message),
        GeminiError::Config(message) => ProviderError::InvalidArgument(message),
        GeminiError::Network(message) | GeminiError::Parse(message) => {
            ProviderError::Transient(message)
        }
        GeminiError::Api { status, message } => {
            ProviderError::Transient(format!("HTTP {status}: {message}"))
        }
    }
}
